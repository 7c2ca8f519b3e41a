// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Typed views over the packed configuration bytes of the fixed leader.
//!
//! The leader keeps the raw bytes so unknown bits survive a decode/encode
//! round trip; these views only interpret and rebuild them.
//!
//! ## System configuration word (bytes 4-5)
//!
//! LSB:
//! - bits 0-2: frequency band (75, 150, 300, 600, 1200, 2400 kHz)
//! - bit 3: beam pattern (0 concave, 1 convex)
//! - bits 4-5: sensor configuration
//! - bit 6: transducer head attached
//! - bit 7: facing (0 down, 1 up)
//!
//! MSB:
//! - bits 0-1: beam angle (15°, 20°, 30°, other)
//! - bits 4-7: beam configuration
//!
//! ## Coordinate transform byte (EX, byte 25)
//!
//! - bits 3-4: frame (beam, instrument, ship, earth)
//! - bit 2: tilts used
//! - bit 1: 3-beam solutions allowed
//! - bit 0: bin mapping

use serde::{Deserialize, Serialize};

use crate::core::CoordinateTransform;
use crate::encoding::scalar::{bits_u8, is_bit_set_u8, set_bit_u8, with_bits_u8};

/// Transmit frequency band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrequencyBand {
    /// 75 kHz
    Khz75,
    /// 150 kHz
    Khz150,
    /// 300 kHz
    Khz300,
    /// 600 kHz
    Khz600,
    /// 1200 kHz
    Khz1200,
    /// 2400 kHz
    Khz2400,
}

impl FrequencyBand {
    const BANDS: [(FrequencyBand, f64); 6] = [
        (FrequencyBand::Khz75, 75_000.0),
        (FrequencyBand::Khz150, 150_000.0),
        (FrequencyBand::Khz300, 300_000.0),
        (FrequencyBand::Khz600, 600_000.0),
        (FrequencyBand::Khz1200, 1_200_000.0),
        (FrequencyBand::Khz2400, 2_400_000.0),
    ];

    /// Nominal frequency in Hz.
    pub fn hz(&self) -> f64 {
        Self::BANDS
            .iter()
            .find(|(band, _)| band == self)
            .map(|(_, hz)| *hz)
            .unwrap_or(0.0)
    }

    /// Band whose nominal frequency is closest to `hz` (log scale).
    pub fn nearest(hz: f64) -> Self {
        if hz.is_nan() || hz <= 0.0 {
            return FrequencyBand::Khz300;
        }
        Self::BANDS
            .iter()
            .min_by(|(_, a), (_, b)| {
                let da = (hz.ln() - a.ln()).abs();
                let db = (hz.ln() - b.ln()).abs();
                da.total_cmp(&db)
            })
            .map(|(band, _)| *band)
            .unwrap_or(FrequencyBand::Khz300)
    }

    fn code(self) -> u8 {
        match self {
            FrequencyBand::Khz75 => 0b000,
            FrequencyBand::Khz150 => 0b001,
            FrequencyBand::Khz300 => 0b010,
            FrequencyBand::Khz600 => 0b011,
            FrequencyBand::Khz1200 => 0b100,
            FrequencyBand::Khz2400 => 0b101,
        }
    }

    fn from_code(code: u8) -> Option<Self> {
        match code {
            0b000 => Some(FrequencyBand::Khz75),
            0b001 => Some(FrequencyBand::Khz150),
            0b010 => Some(FrequencyBand::Khz300),
            0b011 => Some(FrequencyBand::Khz600),
            0b100 => Some(FrequencyBand::Khz1200),
            0b101 => Some(FrequencyBand::Khz2400),
            _ => None,
        }
    }
}

/// Nominal beam angle from vertical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BeamAngle {
    /// 15°
    Deg15,
    /// 20°
    Deg20,
    /// 30°
    Deg30,
    /// Any other angle (see the beam angle byte)
    Other,
}

impl BeamAngle {
    /// Classify an angle in degrees.
    pub fn from_degrees(degrees: u8) -> Self {
        match degrees {
            15 => BeamAngle::Deg15,
            20 => BeamAngle::Deg20,
            30 => BeamAngle::Deg30,
            _ => BeamAngle::Other,
        }
    }
}

/// Beam layout of the transducer head.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BeamConfiguration {
    /// Four-beam Janus
    FourBeamJanus,
    /// Five-beam Janus, three demodulators
    FiveBeamJanusThreeDemods,
    /// Five-beam Janus, two demodulators
    FiveBeamJanusTwoDemods,
    /// Unrecognized nibble
    Other(u8),
}

impl BeamConfiguration {
    /// Layout for an instrument with `beams` physical beams.
    ///
    /// Only the Janus heads have a code; other counts map to `Other(0)`.
    pub fn for_beam_count(beams: usize) -> Self {
        match beams {
            4 => BeamConfiguration::FourBeamJanus,
            5 => BeamConfiguration::FiveBeamJanusThreeDemods,
            _ => BeamConfiguration::Other(0),
        }
    }

    /// Whether this is a Janus layout.
    pub fn is_janus(self) -> bool {
        !matches!(self, BeamConfiguration::Other(_))
    }

    fn nibble(self) -> u8 {
        match self {
            BeamConfiguration::FourBeamJanus => 0b0100,
            BeamConfiguration::FiveBeamJanusThreeDemods => 0b0101,
            BeamConfiguration::FiveBeamJanusTwoDemods => 0b1111,
            BeamConfiguration::Other(n) => n & 0x0F,
        }
    }

    fn from_nibble(nibble: u8) -> Self {
        match nibble {
            0b0100 => BeamConfiguration::FourBeamJanus,
            0b0101 => BeamConfiguration::FiveBeamJanusThreeDemods,
            0b1111 => BeamConfiguration::FiveBeamJanusTwoDemods,
            n => BeamConfiguration::Other(n),
        }
    }
}

/// View over the 16-bit system configuration word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SystemConfiguration {
    /// Raw LSB
    pub lsb: u8,
    /// Raw MSB
    pub msb: u8,
}

impl SystemConfiguration {
    /// Wrap raw bytes.
    pub fn from_bytes(lsb: u8, msb: u8) -> Self {
        Self { lsb, msb }
    }

    /// Frequency band, `None` if the code is reserved.
    pub fn frequency(&self) -> Option<FrequencyBand> {
        FrequencyBand::from_code(bits_u8(self.lsb, 0, 3))
    }

    /// Whether the beam pattern is convex.
    pub fn is_convex(&self) -> bool {
        is_bit_set_u8(self.lsb, 3)
    }

    /// Sensor configuration number (1-3, 0 if unset).
    pub fn sensor_config(&self) -> u8 {
        bits_u8(self.lsb, 4, 2)
    }

    /// Whether the transducer head is attached.
    pub fn head_attached(&self) -> bool {
        is_bit_set_u8(self.lsb, 6)
    }

    /// Whether the transducer faces up.
    pub fn is_upward(&self) -> bool {
        is_bit_set_u8(self.lsb, 7)
    }

    /// Beam angle class.
    pub fn beam_angle(&self) -> BeamAngle {
        match bits_u8(self.msb, 0, 2) {
            0b00 => BeamAngle::Deg15,
            0b01 => BeamAngle::Deg20,
            0b10 => BeamAngle::Deg30,
            _ => BeamAngle::Other,
        }
    }

    /// Beam layout.
    pub fn beam_configuration(&self) -> BeamConfiguration {
        BeamConfiguration::from_nibble(bits_u8(self.msb, 4, 4))
    }

    /// Set the frequency band.
    pub fn with_frequency(mut self, band: FrequencyBand) -> Self {
        self.lsb = with_bits_u8(self.lsb, 0, 3, band.code());
        self
    }

    /// Set convex (true) or concave (false) beam pattern.
    pub fn with_convex(mut self, convex: bool) -> Self {
        self.lsb = set_bit_u8(self.lsb, 3, convex);
        self
    }

    /// Set the sensor configuration number.
    pub fn with_sensor_config(mut self, config: u8) -> Self {
        self.lsb = with_bits_u8(self.lsb, 4, 2, config);
        self
    }

    /// Set the head-attached flag.
    pub fn with_head_attached(mut self, attached: bool) -> Self {
        self.lsb = set_bit_u8(self.lsb, 6, attached);
        self
    }

    /// Set up (true) or down (false) facing.
    pub fn with_upward(mut self, upward: bool) -> Self {
        self.lsb = set_bit_u8(self.lsb, 7, upward);
        self
    }

    /// Set the beam angle class.
    pub fn with_beam_angle(mut self, angle: BeamAngle) -> Self {
        let code = match angle {
            BeamAngle::Deg15 => 0b00,
            BeamAngle::Deg20 => 0b01,
            BeamAngle::Deg30 => 0b10,
            BeamAngle::Other => 0b11,
        };
        self.msb = with_bits_u8(self.msb, 0, 2, code);
        self
    }

    /// Set the beam layout.
    pub fn with_beam_configuration(mut self, config: BeamConfiguration) -> Self {
        self.msb = with_bits_u8(self.msb, 4, 4, config.nibble());
        self
    }
}

/// View over the EX coordinate transform byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CoordinateTransformByte(pub u8);

impl CoordinateTransformByte {
    /// Build the byte for a frame with the usual processing flags.
    ///
    /// Tilts and 3-beam solutions are flagged for every frame except beam;
    /// bin mapping is flagged for earth.
    pub fn for_transform(transform: CoordinateTransform) -> Self {
        let processed = transform != CoordinateTransform::Beam;
        Self(0)
            .with_transform(transform)
            .with_tilts_used(processed)
            .with_three_beam(processed)
            .with_bin_mapping(transform == CoordinateTransform::Earth)
    }

    /// Frame the velocity data is in.
    pub fn transform(&self) -> CoordinateTransform {
        CoordinateTransform::from_frame_bits(bits_u8(self.0, 3, 2))
    }

    /// Whether tilts were used in the transform.
    pub fn tilts_used(&self) -> bool {
        is_bit_set_u8(self.0, 2)
    }

    /// Whether 3-beam solutions were allowed.
    pub fn three_beam(&self) -> bool {
        is_bit_set_u8(self.0, 1)
    }

    /// Whether bin mapping was applied.
    pub fn bin_mapping(&self) -> bool {
        is_bit_set_u8(self.0, 0)
    }

    /// Set the frame.
    pub fn with_transform(self, transform: CoordinateTransform) -> Self {
        Self(with_bits_u8(self.0, 3, 2, transform.frame_bits()))
    }

    /// Set the tilts-used flag.
    pub fn with_tilts_used(self, on: bool) -> Self {
        Self(set_bit_u8(self.0, 2, on))
    }

    /// Set the 3-beam flag.
    pub fn with_three_beam(self, on: bool) -> Self {
        Self(set_bit_u8(self.0, 1, on))
    }

    /// Set the bin-mapping flag.
    pub fn with_bin_mapping(self, on: bool) -> Self {
        Self(set_bit_u8(self.0, 0, on))
    }
}

/// View over the sensor source (EZ) and sensors-available bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SensorFlags(pub u8);

impl SensorFlags {
    /// Speed of sound computed from depth, salinity and temperature.
    pub const SPEED_OF_SOUND: u8 = 6;
    /// Depth sensor.
    pub const DEPTH: u8 = 5;
    /// Heading sensor.
    pub const HEADING: u8 = 4;
    /// Pitch sensor.
    pub const PITCH: u8 = 3;
    /// Roll sensor.
    pub const ROLL: u8 = 2;
    /// Conductivity (salinity) sensor.
    pub const SALINITY: u8 = 1;
    /// Temperature sensor.
    pub const TEMPERATURE: u8 = 0;

    /// All seven sensors present.
    pub fn all() -> Self {
        Self(0b0111_1111)
    }

    /// Check a sensor bit.
    pub fn has(&self, sensor: u8) -> bool {
        is_bit_set_u8(self.0, sensor)
    }

    /// Set or clear a sensor bit.
    pub fn with(self, sensor: u8, on: bool) -> Self {
        Self(set_bit_u8(self.0, sensor, on))
    }
}
