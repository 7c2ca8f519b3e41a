// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core types used throughout pd0codec.
//!
//! This module provides the foundational types for the library:
//! - [`Pd0Error`] - Error handling
//! - [`DecodeOptions`] / [`ConversionOptions`] - Configuration
//! - [`CoordinateTransform`] - Reference frame of velocity data

pub mod error;
pub mod options;

pub use error::{Pd0Error, Result};
pub use options::{ConversionOptions, DecodeOptions, Strictness};

use serde::{Deserialize, Serialize};

/// Reference frame in which velocity components are expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoordinateTransform {
    /// Radial velocities along each beam
    Beam,
    /// X/Y/Z relative to the instrument head
    Instrument,
    /// Starboard/forward/mast relative to the vessel
    Ship,
    /// East/north/up
    #[default]
    Earth,
}

/// Error returned when parsing a `CoordinateTransform` from string fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseTransformError {
    _private: (),
}

impl std::fmt::Display for ParseTransformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid coordinate transform, expected 'beam', 'instrument', 'ship', or 'earth'"
        )
    }
}

impl std::error::Error for ParseTransformError {}

impl std::str::FromStr for CoordinateTransform {
    type Err = ParseTransformError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "beam" => Ok(CoordinateTransform::Beam),
            "instrument" | "xyz" => Ok(CoordinateTransform::Instrument),
            "ship" => Ok(CoordinateTransform::Ship),
            "earth" | "enu" => Ok(CoordinateTransform::Earth),
            _ => Err(ParseTransformError { _private: () }),
        }
    }
}

impl CoordinateTransform {
    /// All transforms in EX bit order.
    pub const ALL: [CoordinateTransform; 4] = [
        CoordinateTransform::Beam,
        CoordinateTransform::Instrument,
        CoordinateTransform::Ship,
        CoordinateTransform::Earth,
    ];

    /// Two-bit frame code stored in bits 3-4 of the EX byte.
    pub const fn frame_bits(self) -> u8 {
        match self {
            CoordinateTransform::Beam => 0b00,
            CoordinateTransform::Instrument => 0b01,
            CoordinateTransform::Ship => 0b10,
            CoordinateTransform::Earth => 0b11,
        }
    }

    /// Inverse of [`frame_bits`](Self::frame_bits); only the low two bits are used.
    pub const fn from_frame_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0b00 => CoordinateTransform::Beam,
            0b01 => CoordinateTransform::Instrument,
            0b10 => CoordinateTransform::Ship,
            _ => CoordinateTransform::Earth,
        }
    }

    /// Whether velocities use the instrument/ship axis convention.
    pub fn is_instrument_like(&self) -> bool {
        matches!(
            self,
            CoordinateTransform::Instrument | CoordinateTransform::Ship
        )
    }

    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            CoordinateTransform::Beam => "beam",
            CoordinateTransform::Instrument => "instrument",
            CoordinateTransform::Ship => "ship",
            CoordinateTransform::Earth => "earth",
        }
    }
}
