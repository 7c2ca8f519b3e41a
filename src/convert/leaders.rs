// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Leader records built from the native ensemble and ancillary groups.

use crate::core::CoordinateTransform;
use crate::encoding::scalar::{scale_to_i16, scale_to_u16, scale_to_u32};
use crate::native::{AncillaryGroup, EnsembleGroup};
use crate::pd0::{
    BeamAngle, BeamConfiguration, CoordinateTransformByte, FixedLeader, FrequencyBand,
    SensorFlags, SystemConfiguration, VariableLeader,
};

/// Water profiling mode written to the fixed leader.
const PROFILING_MODE: u8 = 1;

/// Heading in hundredths of a degree wraps at one full turn.
const HEADING_TURN: u16 = 36_000;

fn saturate_u8(value: usize, field: &'static str) -> u8 {
    u8::try_from(value).unwrap_or_else(|_| {
        tracing::warn!(context = "fixed_leader", field, value, "Value exceeds 255, clamping");
        u8::MAX
    })
}

/// Build the fixed leader.
pub fn fixed_leader(
    ensemble: &EnsembleGroup,
    ancillary: &AncillaryGroup,
    transform: CoordinateTransform,
) -> FixedLeader {
    let beam_configuration = BeamConfiguration::for_beam_count(ensemble.num_beams);
    let system_configuration = SystemConfiguration::default()
        .with_frequency(FrequencyBand::nearest(ensemble.subsystem_frequency_hz))
        .with_convex(beam_configuration.is_janus())
        .with_sensor_config(1)
        .with_head_attached(true)
        .with_upward(ensemble.upward)
        .with_beam_angle(BeamAngle::from_degrees(ensemble.beam_angle_deg))
        .with_beam_configuration(beam_configuration);

    FixedLeader {
        cpu_firmware_version: ensemble.firmware_major,
        cpu_firmware_revision: ensemble.firmware_minor,
        system_configuration,
        number_of_beams: saturate_u8(ensemble.num_beams, "number_of_beams"),
        number_of_cells: saturate_u8(ensemble.num_bins, "number_of_cells"),
        pings_per_ensemble: ensemble.desired_pings,
        depth_cell_length_cm: scale_to_u16(ancillary.bin_size_m, 100.0),
        blank_after_transmit_cm: scale_to_u16(ancillary.blank_m, 100.0),
        profiling_mode: PROFILING_MODE,
        number_of_code_repetitions: saturate_u8(
            usize::from(ensemble.code_repeats),
            "number_of_code_repetitions",
        ),
        coordinate_transform: CoordinateTransformByte::for_transform(transform),
        sensor_source: SensorFlags::all(),
        sensors_available: SensorFlags::all(),
        bin1_distance_cm: scale_to_u16(ancillary.first_bin_range_m, 100.0),
        serial_number: ensemble.serial_number,
        beam_angle: ensemble.beam_angle_deg,
        ..FixedLeader::default()
    }
}

/// Build the variable leader.
pub fn variable_leader(ensemble: &EnsembleGroup, ancillary: &AncillaryGroup) -> VariableLeader {
    let mut leader = VariableLeader {
        speed_of_sound: scale_to_u16(ancillary.speed_of_sound_m_s, 1.0),
        depth_of_transducer_dm: scale_to_u16(ancillary.transducer_depth_m, 10.0),
        heading: scale_to_u16(ancillary.heading_deg.rem_euclid(360.0), 100.0) % HEADING_TURN,
        pitch: scale_to_i16(ancillary.pitch_deg, 100.0),
        roll: scale_to_i16(ancillary.roll_deg, 100.0),
        salinity: scale_to_u16(ancillary.salinity_ppt, 1.0),
        temperature: scale_to_i16(ancillary.water_temp_c, 100.0),
        pressure: scale_to_u32(ancillary.pressure_pa, 0.1),
        ..VariableLeader::default()
    };
    leader.set_ensemble_number(ensemble.ensemble_number);
    leader.set_timestamp(ensemble.timestamp);
    leader
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn groups() -> (EnsembleGroup, AncillaryGroup) {
        let ensemble = EnsembleGroup {
            ensemble_number: 70_000,
            num_bins: 30,
            num_beams: 4,
            desired_pings: 10,
            serial_number: 1234,
            firmware_major: 51,
            firmware_minor: 41,
            subsystem_frequency_hz: 614_400.0,
            code_repeats: 2,
            timestamp: NaiveDate::from_ymd_opt(2025, 7, 1)
                .unwrap()
                .and_hms_opt(8, 30, 0)
                .unwrap(),
            ..EnsembleGroup::default()
        };
        let ancillary = AncillaryGroup {
            first_bin_range_m: 1.5,
            bin_size_m: 0.5,
            blank_m: 0.25,
            heading_deg: -10.0,
            pitch_deg: 2.5,
            roll_deg: -1.25,
            water_temp_c: 12.34,
            salinity_ppt: 35.0,
            pressure_pa: 101_325.0,
            transducer_depth_m: 3.2,
            speed_of_sound_m_s: 1490.4,
        };
        (ensemble, ancillary)
    }

    #[test]
    fn test_fixed_leader() {
        let (ensemble, ancillary) = groups();
        let leader = fixed_leader(&ensemble, &ancillary, CoordinateTransform::Earth);
        assert_eq!(leader.firmware_version(), (51, 41));
        assert_eq!(leader.cell_count(), 30);
        assert_eq!(leader.beam_count(), 4);
        assert_eq!(leader.depth_cell_length_cm, 50);
        assert_eq!(leader.blank_after_transmit_cm, 25);
        assert_eq!(leader.bin1_distance_cm, 150);
        assert_eq!(leader.number_of_code_repetitions, 2);
        assert_eq!(leader.serial_number, 1234);
        assert_eq!(
            leader.system_configuration.frequency(),
            Some(FrequencyBand::Khz600)
        );
        assert_eq!(leader.system_configuration.beam_angle(), BeamAngle::Deg20);
        assert_eq!(
            leader.coordinate_transform.transform(),
            CoordinateTransform::Earth
        );
        assert_eq!(
            leader.system_configuration.beam_configuration(),
            BeamConfiguration::FourBeamJanus
        );
        assert!(leader.system_configuration.is_convex());
        assert_eq!(leader.transmit_pulse_length_cm, 0);
    }

    #[test]
    fn test_fixed_leader_beam_layout_follows_beam_count() {
        let (mut ensemble, ancillary) = groups();
        for beams in [1usize, 3] {
            ensemble.num_beams = beams;
            let leader = fixed_leader(&ensemble, &ancillary, CoordinateTransform::Beam);
            assert_eq!(
                leader.system_configuration.beam_configuration(),
                BeamConfiguration::Other(0)
            );
            assert!(!leader.system_configuration.is_convex());
            assert_eq!(leader.beam_count(), beams);
        }
    }

    #[test]
    fn test_fixed_leader_clamps_cells() {
        let (mut ensemble, ancillary) = groups();
        ensemble.num_bins = 300;
        let leader = fixed_leader(&ensemble, &ancillary, CoordinateTransform::Beam);
        assert_eq!(leader.number_of_cells, 255);
    }

    #[test]
    fn test_variable_leader() {
        let (ensemble, ancillary) = groups();
        let leader = variable_leader(&ensemble, &ancillary);
        assert_eq!(leader.ensemble_number(), 70_000);
        assert_eq!(leader.heading, 35_000);
        assert_eq!(leader.pitch, 250);
        assert_eq!(leader.roll, -125);
        assert_eq!(leader.temperature, 1234);
        assert_eq!(leader.salinity, 35);
        assert_eq!(leader.pressure, 10_133);
        assert_eq!(leader.depth_of_transducer_dm, 32);
        assert_eq!(leader.speed_of_sound, 1490);
        assert_eq!(leader.timestamp(), Some(ensemble.timestamp));
    }

    #[test]
    fn test_heading_wraps_below_full_turn() {
        let (ensemble, mut ancillary) = groups();
        for (deg, raw) in [(359.996, 0u16), (359.994, 35_999), (-0.001, 0), (720.5, 50)] {
            ancillary.heading_deg = deg;
            let leader = variable_leader(&ensemble, &ancillary);
            assert_eq!(leader.heading, raw, "heading {deg}");
            assert!(leader.heading_deg() < 360.0);
        }
    }
}
