// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Bottom track record built from the native bottom track group.
//!
//! The native group carries no reference-layer data, so that sub-block is
//! always zero.

use crate::core::CoordinateTransform;
use crate::native::BottomTrackGroup;
use crate::pd0::{BottomTrack, ReferenceLayer, BAD_VELOCITY};

use super::beam_map::BeamMap;
use super::scaling;

/// Native bottom track velocity for a frame.
///
/// Ship falls back to instrument velocity.
pub fn select_velocity(group: &BottomTrackGroup, transform: CoordinateTransform) -> &[f64] {
    match transform {
        CoordinateTransform::Beam => &group.beam_velocity,
        CoordinateTransform::Instrument => &group.instrument_velocity,
        CoordinateTransform::Ship => group
            .ship_velocity
            .as_deref()
            .unwrap_or(&group.instrument_velocity),
        CoordinateTransform::Earth => &group.earth_velocity,
    }
}

/// Build the bottom track record.
pub fn bottom_track(
    group: &BottomTrackGroup,
    beams: usize,
    code_repeats: u16,
    transform: CoordinateTransform,
) -> BottomTrack {
    let canonical = BeamMap::canonical(beams);
    let velocity_map = BeamMap::bottom_track_velocity(beams, transform);
    let velocities = select_velocity(group, transform);

    let mut bt = BottomTrack {
        pings_per_ensemble: group.actual_pings,
        velocity: [BAD_VELOCITY; 4],
        reference_layer: ReferenceLayer::default(),
        ..BottomTrack::default()
    };

    for (native_beam, entry) in velocity_map.iter() {
        if entry.slot >= 4 {
            continue;
        }
        if let Some(&value) = velocities.get(native_beam) {
            bt.velocity[entry.slot] = scaling::velocity(value, entry.sign);
        }
    }

    for (native_beam, entry) in canonical.iter() {
        let slot = entry.slot;
        if slot >= 4 {
            continue;
        }
        if let Some(&range) = group.range_m.get(native_beam) {
            let (msb, lsb) = scaling::range_split(range);
            bt.range_msb[slot] = msb;
            bt.range_lsb[slot] = lsb;
        }
        if let Some(&value) = group.correlation.get(native_beam) {
            bt.correlation[slot] = scaling::correlation(value, code_repeats);
        }
        if let Some(&value) = group.amplitude.get(native_beam) {
            bt.amplitude[slot] = scaling::amplitude(value);
        }
        if let Some(&value) = group.beam_good.get(native_beam) {
            bt.percent_good[slot] = scaling::percent_good(value, group.actual_pings);
        }
    }

    bt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::native::BAD_VELOCITY as NATIVE_BAD;

    fn group() -> BottomTrackGroup {
        BottomTrackGroup {
            actual_pings: 4,
            range_m: vec![10.0, 20.0, 30.0, 700.0],
            beam_velocity: vec![0.1, 0.2, 0.3, 0.4],
            instrument_velocity: vec![1.0, 2.0, 3.0, NATIVE_BAD],
            ship_velocity: None,
            earth_velocity: vec![-0.1, -0.2, -0.3, -0.4],
            correlation: vec![0.5, 0.5, 0.5, 1.0],
            amplitude: vec![10.0, 20.0, 30.0, 40.0],
            beam_good: vec![4.0, 2.0, 1.0, 0.0],
        }
    }

    #[test]
    fn test_earth_bottom_track() {
        let bt = bottom_track(&group(), 4, 1, CoordinateTransform::Earth);
        assert_eq!(bt.velocity, [-300, -400, -200, -100]);
        assert_eq!(bt.range_beam(3), Some(1000));
        assert_eq!(bt.range_beam(1), Some(70_000));
        assert_eq!(bt.range_msb[1], 1);
        assert_eq!(bt.amplitude, [60, 80, 40, 20]);
        assert_eq!(bt.percent_good, [25, 0, 50, 100]);
        assert_eq!(bt.correlation, [64, 128, 64, 64]);
        assert_eq!(bt.reference_layer, ReferenceLayer::default());
        assert_eq!(bt.pings_per_ensemble, 4);
    }

    #[test]
    fn test_ship_falls_back_to_instrument() {
        let bt = bottom_track(&group(), 4, 1, CoordinateTransform::Ship);
        assert_eq!(bt.velocity, [2000, 1000, -3000, BAD_VELOCITY]);
    }

    #[test]
    fn test_three_beam_bottom_track() {
        let mut g = group();
        g.instrument_velocity.truncate(3);
        g.range_m.truncate(3);
        let bt = bottom_track(&g, 3, 1, CoordinateTransform::Instrument);
        assert_eq!(bt.velocity, [1000, 2000, -3000, BAD_VELOCITY]);
        assert_eq!(bt.range_beam(0), Some(1000));
        assert_eq!(bt.range_beam(3), Some(0));
    }
}
