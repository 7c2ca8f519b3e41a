// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Native sensor ensemble.
//!
//! The native representation groups measurements by kind. Every group is
//! optional; the converter emits one PD0 record per group that is present.
//! Array groups are indexed `[bin][beam]` using the instrument's physical
//! beam numbering. Velocities are in m/s, correlation is normalized to
//! `0.0..=1.0`, amplitude is in dB and good-ping arrays hold ping counts.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Native bad-velocity sentinel (m/s).
pub const BAD_VELOCITY: f64 = 88.888;

/// Whether a native velocity carries the bad sentinel.
///
/// Values produced from single-precision storage compare within 1e-4.
pub fn is_bad_velocity(value: f64) -> bool {
    (value - BAD_VELOCITY).abs() < 1e-4
}

/// Dense `[bin][beam]` array of native samples.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BeamArray {
    bins: usize,
    beams: usize,
    values: Vec<f64>,
}

impl BeamArray {
    /// Create an array with every sample set to `fill`.
    pub fn filled(bins: usize, beams: usize, fill: f64) -> Self {
        Self {
            bins,
            beams,
            values: vec![fill; bins * beams],
        }
    }

    /// Build from per-bin rows. Short rows are padded with `0.0`.
    pub fn from_rows(rows: &[Vec<f64>]) -> Self {
        let beams = rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut array = Self::filled(rows.len(), beams, 0.0);
        for (bin, row) in rows.iter().enumerate() {
            for (beam, &value) in row.iter().enumerate() {
                array.set(bin, beam, value);
            }
        }
        array
    }

    /// Number of bins.
    pub fn bins(&self) -> usize {
        self.bins
    }

    /// Number of beams.
    pub fn beams(&self) -> usize {
        self.beams
    }

    /// Sample at `(bin, beam)`, `None` when out of range.
    pub fn get(&self, bin: usize, beam: usize) -> Option<f64> {
        if bin >= self.bins || beam >= self.beams {
            return None;
        }
        self.values.get(bin * self.beams + beam).copied()
    }

    /// Set the sample at `(bin, beam)`. Out-of-range writes are ignored.
    pub fn set(&mut self, bin: usize, beam: usize, value: f64) {
        if bin < self.bins && beam < self.beams {
            self.values[bin * self.beams + beam] = value;
        }
    }
}

/// Ensemble identity and system metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnsembleGroup {
    /// Logical ensemble number
    pub ensemble_number: u32,
    /// Depth bins
    pub num_bins: usize,
    /// Physical beams (1, 3 or 4)
    pub num_beams: usize,
    /// Pings requested per ensemble
    pub desired_pings: u16,
    /// Pings actually averaged
    pub actual_pings: u16,
    /// Instrument serial number
    pub serial_number: u32,
    /// Firmware major version
    pub firmware_major: u8,
    /// Firmware minor version
    pub firmware_minor: u8,
    /// Subsystem transmit frequency (Hz)
    pub subsystem_frequency_hz: f64,
    /// Code repeats per ping
    pub code_repeats: u16,
    /// Beam angle from vertical (degrees)
    pub beam_angle_deg: u8,
    /// Whether the beams face up
    pub upward: bool,
    /// Ensemble timestamp
    pub timestamp: NaiveDateTime,
}

impl Default for EnsembleGroup {
    fn default() -> Self {
        Self {
            ensemble_number: 0,
            num_bins: 0,
            num_beams: 4,
            desired_pings: 1,
            actual_pings: 1,
            serial_number: 0,
            firmware_major: 0,
            firmware_minor: 0,
            subsystem_frequency_hz: 600_000.0,
            code_repeats: 1,
            beam_angle_deg: 20,
            upward: false,
            timestamp: NaiveDateTime::default(),
        }
    }
}

/// Ancillary scalars measured with the ensemble.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AncillaryGroup {
    /// Range to the centre of the first bin (m)
    pub first_bin_range_m: f64,
    /// Bin size (m)
    pub bin_size_m: f64,
    /// Blank after transmit (m)
    pub blank_m: f64,
    /// Heading (degrees)
    pub heading_deg: f64,
    /// Pitch (degrees)
    pub pitch_deg: f64,
    /// Roll (degrees)
    pub roll_deg: f64,
    /// Water temperature (°C)
    pub water_temp_c: f64,
    /// Salinity (ppt)
    pub salinity_ppt: f64,
    /// Pressure (Pa)
    pub pressure_pa: f64,
    /// Transducer depth (m)
    pub transducer_depth_m: f64,
    /// Speed of sound (m/s)
    pub speed_of_sound_m_s: f64,
}

/// Bottom track measurements, one entry per physical beam.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BottomTrackGroup {
    /// Pings averaged for bottom track
    pub actual_pings: u16,
    /// Range to bottom (m)
    pub range_m: Vec<f64>,
    /// Beam-frame velocity (m/s)
    pub beam_velocity: Vec<f64>,
    /// Instrument-frame velocity (m/s)
    pub instrument_velocity: Vec<f64>,
    /// Ship-frame velocity (m/s)
    pub ship_velocity: Option<Vec<f64>>,
    /// Earth-frame velocity (m/s)
    pub earth_velocity: Vec<f64>,
    /// Correlation (0.0-1.0)
    pub correlation: Vec<f64>,
    /// Amplitude (dB)
    pub amplitude: Vec<f64>,
    /// Good pings per beam
    pub beam_good: Vec<f64>,
}

/// A native ensemble as produced by the instrument-side decoder.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NativeEnsemble {
    /// Identity and system metadata
    pub ensemble: Option<EnsembleGroup>,
    /// Ancillary scalars
    pub ancillary: Option<AncillaryGroup>,
    /// Beam-frame velocity
    pub beam_velocity: Option<BeamArray>,
    /// Instrument-frame velocity
    pub instrument_velocity: Option<BeamArray>,
    /// Ship-frame velocity
    pub ship_velocity: Option<BeamArray>,
    /// Earth-frame velocity
    pub earth_velocity: Option<BeamArray>,
    /// Correlation
    pub correlation: Option<BeamArray>,
    /// Amplitude
    pub amplitude: Option<BeamArray>,
    /// Good pings per beam
    pub good_beam: Option<BeamArray>,
    /// Good pings per earth component
    pub good_earth: Option<BeamArray>,
    /// Bottom track
    pub bottom_track: Option<BottomTrackGroup>,
    /// NMEA sentences received during the ensemble
    pub nmea: Option<String>,
}

impl NativeEnsemble {
    /// Physical beam count, 0 without an ensemble group.
    pub fn beam_count(&self) -> usize {
        self.ensemble.as_ref().map_or(0, |e| e.num_beams)
    }

    /// Bin count, 0 without an ensemble group.
    pub fn bin_count(&self) -> usize {
        self.ensemble.as_ref().map_or(0, |e| e.num_bins)
    }
}
