// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Native to PD0 conversion tests.

mod common;

use common::{assert_consistent_layout, NativeBuilder};

use pd0codec::convert::scaling;
use pd0codec::pd0::{ReferenceLayer, BAD_VELOCITY};
use pd0codec::{
    convert, convert_all, decode_all, BeamMap, ConversionOptions, CoordinateTransform,
    DecodeOptions, Ensemble, Pd0Converter, RecordKind,
};

// ============================================================================
// Bad Value Propagation
// ============================================================================

#[test]
fn test_bad_velocity_for_every_frame_and_beam_count() {
    for beams in [1usize, 3, 4] {
        let native = NativeBuilder::new(6, beams).with_bad_velocities().build();
        for transform in CoordinateTransform::ALL {
            let ensemble = convert(&native, transform).expect("convert");
            let velocity = ensemble.velocity().expect("velocity record");
            assert!(
                velocity.grid.values().iter().all(|&v| v == BAD_VELOCITY),
                "beams {beams} transform {transform:?}"
            );
        }
    }
}

#[test]
fn test_bad_bottom_track_velocity() {
    let mut native = NativeBuilder::new(2, 4).with_bottom_track().build();
    if let Some(bt) = native.bottom_track.as_mut() {
        bt.earth_velocity = vec![pd0codec::native::BAD_VELOCITY; 4];
    }
    let ensemble = convert(&native, CoordinateTransform::Earth).expect("convert");
    assert_eq!(ensemble.bottom_track().unwrap().velocity, [BAD_VELOCITY; 4]);
}

// ============================================================================
// Beam Mapping
// ============================================================================

#[test]
fn test_beam_map_inverse_recovers_native_beam() {
    for beams in [1usize, 3, 4] {
        for transform in CoordinateTransform::ALL {
            for map in [
                BeamMap::canonical(beams),
                BeamMap::velocity(beams, transform),
                BeamMap::bottom_track_velocity(beams, transform),
            ] {
                for native_beam in 0..beams {
                    let slot = map.slot(native_beam).expect("slot");
                    assert_eq!(map.inverse(slot), Some(native_beam));
                }
            }
        }
    }
}

#[test]
fn test_velocity_lands_in_mapped_slot() {
    let native = NativeBuilder::new(3, 4).with_velocities().build();
    for transform in CoordinateTransform::ALL {
        let ensemble = convert(&native, transform).expect("convert");
        let velocity = ensemble.velocity().expect("velocity");
        let map = BeamMap::velocity(4, transform);
        for cell in 0..3 {
            for slot in 0..4 {
                let native_beam = map.inverse(slot).expect("inverse");
                let sign = map.get(native_beam).unwrap().sign;
                let expected = scaling::velocity(0.01 * (cell * 10 + native_beam) as f64, sign);
                assert_eq!(velocity.get(cell, slot), Some(expected));
            }
        }
    }
}

#[test]
fn test_three_beam_is_identity_with_signs() {
    let native = NativeBuilder::new(2, 3).with_velocities().build();
    let beam = convert(&native, CoordinateTransform::Beam).expect("convert");
    assert_eq!(beam.velocity().unwrap().grid.cell(1), Some(&[100, 110, 120][..]));

    let ship = convert(&native, CoordinateTransform::Ship).expect("convert");
    assert_eq!(ship.velocity().unwrap().grid.cell(1), Some(&[100, 110, -120][..]));
}

// ============================================================================
// Record Selection
// ============================================================================

#[test]
fn test_all_groups_produce_all_records() {
    let native = NativeBuilder::new(8, 4)
        .with_velocities()
        .with_quality()
        .with_bottom_track()
        .with_nmea("$GPGGA,1")
        .build();
    let converter =
        Pd0Converter::new(ConversionOptions::new(CoordinateTransform::Earth).with_nmea(true));
    let ensemble = converter.convert(&native).expect("convert");
    assert_eq!(
        ensemble.kinds(),
        vec![
            RecordKind::FixedLeader,
            RecordKind::VariableLeader,
            RecordKind::Velocity,
            RecordKind::Correlation,
            RecordKind::EchoIntensity,
            RecordKind::PercentGood,
            RecordKind::BottomTrack,
            RecordKind::NmeaData,
        ]
    );
}

#[test]
fn test_percent_good_source_follows_frame() {
    let native = NativeBuilder::new(2, 4).with_quality().build();

    let beam = convert(&native, CoordinateTransform::Beam).expect("convert");
    assert_eq!(beam.percent_good().unwrap().grid.cell(0), Some(&[100; 4][..]));

    let earth = convert(&native, CoordinateTransform::Earth).expect("convert");
    assert_eq!(earth.percent_good().unwrap().grid.cell(0), Some(&[50; 4][..]));
}

#[test]
fn test_percent_good_always_four_slots() {
    for beams in [1usize, 3, 4] {
        let native = NativeBuilder::new(5, beams).with_quality().build();
        let ensemble = convert(&native, CoordinateTransform::Beam).expect("convert");
        let good = ensemble.percent_good().unwrap();
        assert_eq!(good.size(), 2 + 5 * 4);
        for slot in beams..4 {
            assert_eq!(good.get(0, slot), Some(0));
        }
    }
}

#[test]
fn test_bottom_track_reference_layer_zeroed() {
    let native = NativeBuilder::new(2, 4).with_bottom_track().build();
    let ensemble = convert(&native, CoordinateTransform::Instrument).expect("convert");
    let bt = ensemble.bottom_track().unwrap();
    assert_eq!(bt.reference_layer, ReferenceLayer::default());
    // Native beam 0 range 12 m goes to slot 3.
    assert_eq!(bt.range_beam(3), Some(1200));
    assert_eq!(bt.velocity[1], -100);
}

// ============================================================================
// Encoded Output
// ============================================================================

#[test]
fn test_converted_ensemble_round_trips() {
    for beams in [1usize, 3, 4] {
        let native = NativeBuilder::new(20, beams)
            .with_velocities()
            .with_quality()
            .with_bottom_track()
            .with_number(70_000)
            .build();
        let ensemble = convert(&native, CoordinateTransform::Earth).expect("convert");
        let bytes = ensemble.encode().expect("encode");
        assert_consistent_layout(&bytes);

        let decoded = Ensemble::decode_with(&bytes, &DecodeOptions::strict()).expect("decode");
        assert_eq!(decoded, ensemble);
        assert_eq!(decoded.ensemble_number(), 70_000);
        assert_eq!(
            decoded.variable_leader().timestamp(),
            native.ensemble.as_ref().map(|e| e.timestamp)
        );
    }
}

#[test]
fn test_options_from_toml() {
    let options = ConversionOptions::from_toml_str(
        r#"
        transform = "ship"
        include_nmea = true
        num_threads = 2
        "#,
    )
    .expect("parse options");
    assert_eq!(options.transform, CoordinateTransform::Ship);
    assert!(options.include_nmea);
    assert!(ConversionOptions::from_toml_str("num_threads = 0").is_err());
}

#[test]
fn test_batch_convert_and_decode() {
    let natives: Vec<_> = (1..=16)
        .map(|n| NativeBuilder::new(4, 4).with_velocities().with_number(n).build())
        .collect();
    let options = ConversionOptions::new(CoordinateTransform::Beam).with_threads(4);

    let ensembles = convert_all(&natives, &options).expect("pool");
    let buffers: Vec<Vec<u8>> = ensembles
        .iter()
        .map(|r| r.as_ref().expect("convert").encode().expect("encode"))
        .collect();

    let decoded = decode_all(&buffers, &DecodeOptions::new().with_threads(4)).expect("pool");
    let numbers: Vec<u32> = decoded
        .iter()
        .map(|r| r.as_ref().expect("decode").ensemble_number())
        .collect();
    assert_eq!(numbers, (1..=16).collect::<Vec<u32>>());
}
