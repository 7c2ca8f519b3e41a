// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common fixtures for integration tests.

#![allow(dead_code)]

use chrono::NaiveDate;

use pd0codec::native::{
    AncillaryGroup, BeamArray, BottomTrackGroup, EnsembleGroup, NativeEnsemble, BAD_VELOCITY,
};
use pd0codec::pd0::{FixedLeader, VariableLeader};

// ============================================================================
// PD0 Fixtures
// ============================================================================

/// Fixed leader with the given dimensions and otherwise realistic settings.
pub fn fixed_leader(cells: u8, beams: u8) -> FixedLeader {
    FixedLeader {
        cpu_firmware_version: 51,
        cpu_firmware_revision: 41,
        number_of_beams: beams,
        number_of_cells: cells,
        pings_per_ensemble: 10,
        depth_cell_length_cm: 100,
        blank_after_transmit_cm: 88,
        bin1_distance_cm: 270,
        serial_number: 24_601,
        beam_angle: 20,
        ..FixedLeader::default()
    }
}

/// Variable leader for ensemble `number`.
pub fn variable_leader(number: u32) -> VariableLeader {
    let mut leader = VariableLeader {
        speed_of_sound: 1500,
        heading: 9000,
        temperature: 1250,
        ..VariableLeader::default()
    };
    leader.set_ensemble_number(number);
    leader
}

// ============================================================================
// Native Fixtures
// ============================================================================

/// Builder for native ensembles.
pub struct NativeBuilder {
    native: NativeEnsemble,
}

impl NativeBuilder {
    /// Start with ensemble and ancillary groups for `bins` x `beams`.
    pub fn new(bins: usize, beams: usize) -> Self {
        let ensemble = EnsembleGroup {
            ensemble_number: 1,
            num_bins: bins,
            num_beams: beams,
            desired_pings: 10,
            actual_pings: 10,
            serial_number: 7,
            firmware_major: 1,
            firmware_minor: 2,
            subsystem_frequency_hz: 1_200_000.0,
            code_repeats: 2,
            timestamp: NaiveDate::from_ymd_opt(2026, 1, 15)
                .and_then(|d| d.and_hms_milli_opt(10, 20, 30, 500))
                .unwrap_or_default(),
            ..EnsembleGroup::default()
        };
        let ancillary = AncillaryGroup {
            first_bin_range_m: 0.9,
            bin_size_m: 0.5,
            blank_m: 0.4,
            heading_deg: 123.45,
            pitch_deg: -1.5,
            roll_deg: 0.75,
            water_temp_c: 8.5,
            salinity_ppt: 35.0,
            pressure_pa: 50_000.0,
            transducer_depth_m: 5.0,
            speed_of_sound_m_s: 1480.0,
        };
        Self {
            native: NativeEnsemble {
                ensemble: Some(ensemble),
                ancillary: Some(ancillary),
                ..NativeEnsemble::default()
            },
        }
    }

    /// Fill every velocity frame with a per-sample ramp.
    pub fn with_velocities(mut self) -> Self {
        let (bins, beams) = self.dims();
        let ramp = ramp(bins, beams, |bin, beam| 0.01 * (bin * 10 + beam) as f64);
        self.native.beam_velocity = Some(ramp.clone());
        self.native.instrument_velocity = Some(ramp.clone());
        self.native.ship_velocity = Some(ramp.clone());
        self.native.earth_velocity = Some(ramp);
        self
    }

    /// Fill every velocity frame with the native bad sentinel.
    pub fn with_bad_velocities(mut self) -> Self {
        let (bins, beams) = self.dims();
        let bad = BeamArray::filled(bins, beams, BAD_VELOCITY);
        self.native.beam_velocity = Some(bad.clone());
        self.native.instrument_velocity = Some(bad.clone());
        self.native.ship_velocity = Some(bad.clone());
        self.native.earth_velocity = Some(bad);
        self
    }

    /// Add correlation, amplitude and good-ping arrays.
    pub fn with_quality(mut self) -> Self {
        let (bins, beams) = self.dims();
        self.native.correlation = Some(BeamArray::filled(bins, beams, 0.4));
        self.native.amplitude = Some(ramp(bins, beams, |bin, _| 60.0 - bin as f64));
        self.native.good_beam = Some(BeamArray::filled(bins, beams, 10.0));
        self.native.good_earth = Some(BeamArray::filled(bins, beams, 5.0));
        self
    }

    /// Add a bottom track group.
    pub fn with_bottom_track(mut self) -> Self {
        let (_, beams) = self.dims();
        let per_beam = |f: fn(usize) -> f64| (0..beams).map(f).collect::<Vec<_>>();
        self.native.bottom_track = Some(BottomTrackGroup {
            actual_pings: 4,
            range_m: per_beam(|b| 12.0 + b as f64),
            beam_velocity: per_beam(|b| 0.1 * (b + 1) as f64),
            instrument_velocity: per_beam(|b| -0.1 * (b + 1) as f64),
            ship_velocity: None,
            earth_velocity: per_beam(|b| 0.2 * (b + 1) as f64),
            correlation: per_beam(|_| 0.3),
            amplitude: per_beam(|_| 50.0),
            beam_good: per_beam(|_| 4.0),
        });
        self
    }

    /// Attach NMEA text.
    pub fn with_nmea(mut self, text: &str) -> Self {
        self.native.nmea = Some(text.to_string());
        self
    }

    /// Set the logical ensemble number.
    pub fn with_number(mut self, number: u32) -> Self {
        if let Some(group) = self.native.ensemble.as_mut() {
            group.ensemble_number = number;
        }
        self
    }

    /// Finish building.
    pub fn build(self) -> NativeEnsemble {
        self.native
    }

    fn dims(&self) -> (usize, usize) {
        (self.native.bin_count(), self.native.beam_count())
    }
}

fn ramp(bins: usize, beams: usize, f: impl Fn(usize, usize) -> f64) -> BeamArray {
    let mut array = BeamArray::filled(bins, beams, 0.0);
    for bin in 0..bins {
        for beam in 0..beams {
            array.set(bin, beam, f(bin, beam));
        }
    }
    array
}

// ============================================================================
// Assertions
// ============================================================================

/// Assert that the header length and offset table agree with the buffer.
pub fn assert_consistent_layout(bytes: &[u8]) {
    let total = u16::from_le_bytes([bytes[2], bytes[3]]) as usize;
    assert_eq!(bytes.len(), total + 2, "ensemble length");

    let count = bytes[5] as usize;
    let offsets: Vec<usize> = (0..count)
        .map(|i| u16::from_le_bytes([bytes[6 + 2 * i], bytes[7 + 2 * i]]) as usize)
        .collect();
    assert_eq!(offsets.first().copied(), Some(6 + 2 * count), "first offset");
    for pair in offsets.windows(2) {
        assert!(pair[0] < pair[1], "offsets must increase: {offsets:?}");
    }
    assert!(offsets.last().copied().unwrap_or(0) < total - 2);
    assert_eq!(&bytes[total - 2..total], &[0x0F, 0x0F], "spare trailer");
}
