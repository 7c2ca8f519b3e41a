// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Options for decode and conversion operations.
//!
//! Both option sets have sensible defaults, builder-style setters, and can be
//! loaded from a TOML table:
//!
//! ```
//! use pd0codec::core::{ConversionOptions, CoordinateTransform, DecodeOptions, Strictness};
//!
//! let decode = DecodeOptions::from_toml_str("strictness = \"strict\"").unwrap();
//! assert_eq!(decode.strictness, Strictness::Strict);
//!
//! let convert = ConversionOptions::from_toml_str("transform = \"beam\"").unwrap();
//! assert_eq!(convert.transform, CoordinateTransform::Beam);
//! ```

use serde::{Deserialize, Serialize};

use super::error::{Pd0Error, Result};
use super::CoordinateTransform;

/// How decode treats a record whose offset or extent lies outside the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strictness {
    /// Fail the whole decode with [`Pd0Error::Truncated`]
    Strict,
    /// Skip the record and keep decoding the rest
    #[default]
    Lenient,
}

/// Options for [`Ensemble::decode_with`](crate::pd0::Ensemble::decode_with).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeOptions {
    /// Handling of records that run past the end of the buffer
    pub strictness: Strictness,

    /// Whether to verify the trailing checksum before decoding records
    pub verify_checksum: bool,

    /// Worker threads for batch decoding (None = rayon default)
    pub num_threads: Option<usize>,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            strictness: Strictness::Lenient,
            verify_checksum: false,
            num_threads: None,
        }
    }
}

impl DecodeOptions {
    /// Create default options (lenient, no checksum verification).
    pub fn new() -> Self {
        Self::default()
    }

    /// Options that reject truncated records and bad checksums.
    pub fn strict() -> Self {
        Self {
            strictness: Strictness::Strict,
            verify_checksum: true,
            num_threads: None,
        }
    }

    /// Set the truncation handling.
    pub fn with_strictness(mut self, strictness: Strictness) -> Self {
        self.strictness = strictness;
        self
    }

    /// Enable or disable checksum verification.
    pub fn with_checksum_verification(mut self, verify: bool) -> Self {
        self.verify_checksum = verify;
        self
    }

    /// Set the worker count for batch decoding.
    pub fn with_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = Some(num_threads);
        self
    }

    /// Check if truncated records abort decoding.
    pub fn is_strict(&self) -> bool {
        self.strictness == Strictness::Strict
    }

    /// Parse options from a TOML table. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let options: Self =
            toml::from_str(text).map_err(|e| Pd0Error::invalid_options(e.to_string()))?;
        check_threads(options.num_threads)?;
        Ok(options)
    }
}

fn check_threads(num_threads: Option<usize>) -> Result<()> {
    if num_threads == Some(0) {
        return Err(Pd0Error::invalid_options("num_threads must be at least 1"));
    }
    Ok(())
}

/// Options for [`Pd0Converter`](crate::convert::Pd0Converter).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionOptions {
    /// Frame the PD0 velocity records are expressed in
    pub transform: CoordinateTransform,

    /// Whether to append the native NMEA text as an opaque NmeaData record
    pub include_nmea: bool,

    /// Worker threads for batch conversion (None = rayon default)
    pub num_threads: Option<usize>,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            transform: CoordinateTransform::Earth,
            include_nmea: false,
            num_threads: None,
        }
    }
}

impl ConversionOptions {
    /// Create options for the given transform.
    pub fn new(transform: CoordinateTransform) -> Self {
        Self {
            transform,
            ..Self::default()
        }
    }

    /// Enable or disable NMEA passthrough.
    pub fn with_nmea(mut self, include: bool) -> Self {
        self.include_nmea = include;
        self
    }

    /// Set the worker count for batch conversion.
    pub fn with_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = Some(num_threads);
        self
    }

    /// Parse options from a TOML table. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let options: Self =
            toml::from_str(text).map_err(|e| Pd0Error::invalid_options(e.to_string()))?;
        check_threads(options.num_threads)?;
        Ok(options)
    }
}
