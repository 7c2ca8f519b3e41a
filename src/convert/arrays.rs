// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Depth-cell arrays built from native beam arrays.
//!
//! Native samples outside the PD0 cell/beam range are dropped; PD0 slots
//! without a native sample keep their initial value (bad for velocity,
//! zero for the byte arrays).

use crate::core::CoordinateTransform;
use crate::native::{BeamArray, NativeEnsemble};
use crate::pd0::{Correlation, EchoIntensity, PercentGood, Velocity, PERCENT_GOOD_BEAMS};

use super::beam_map::BeamMap;
use super::scaling;

/// Native velocity group for a frame.
///
/// Ship falls back to instrument velocity when the native ensemble has no
/// ship group.
pub fn select_velocity(
    native: &NativeEnsemble,
    transform: CoordinateTransform,
) -> Option<&BeamArray> {
    match transform {
        CoordinateTransform::Beam => native.beam_velocity.as_ref(),
        CoordinateTransform::Instrument => native.instrument_velocity.as_ref(),
        CoordinateTransform::Ship => native
            .ship_velocity
            .as_ref()
            .or(native.instrument_velocity.as_ref()),
        CoordinateTransform::Earth => native.earth_velocity.as_ref(),
    }
}

/// Native good-ping group for a frame.
///
/// Beam frame uses per-beam counts; the other frames use the earth counts,
/// falling back to per-beam counts.
pub fn select_good(native: &NativeEnsemble, transform: CoordinateTransform) -> Option<&BeamArray> {
    match transform {
        CoordinateTransform::Beam => native.good_beam.as_ref(),
        _ => native.good_earth.as_ref().or(native.good_beam.as_ref()),
    }
}

/// Call `apply(cell, slot, sign, value)` for every mapped native sample.
fn for_each_mapped<F>(source: &BeamArray, map: &BeamMap, cells: usize, slots: usize, mut apply: F)
where
    F: FnMut(usize, usize, i8, f64),
{
    for cell in 0..cells.min(source.bins()) {
        for (native_beam, entry) in map.iter() {
            if entry.slot >= slots {
                continue;
            }
            if let Some(value) = source.get(cell, native_beam) {
                apply(cell, entry.slot, entry.sign, value);
            }
        }
    }
}

/// Velocity array in the requested frame.
pub fn velocity(
    source: &BeamArray,
    cells: usize,
    beams: usize,
    transform: CoordinateTransform,
) -> Velocity {
    let map = BeamMap::velocity(beams, transform);
    let mut out = Velocity::new(cells, beams);
    for_each_mapped(source, &map, cells, beams, |cell, slot, sign, value| {
        out.set(cell, slot, scaling::velocity(value, sign));
    });
    out
}

/// Correlation array.
pub fn correlation(source: &BeamArray, cells: usize, beams: usize, code_repeats: u16) -> Correlation {
    let map = BeamMap::canonical(beams);
    let mut out = Correlation::new(cells, beams);
    for_each_mapped(source, &map, cells, beams, |cell, slot, _, value| {
        out.set(cell, slot, scaling::correlation(value, code_repeats));
    });
    out
}

/// Echo intensity array.
pub fn echo_intensity(source: &BeamArray, cells: usize, beams: usize) -> EchoIntensity {
    let map = BeamMap::canonical(beams);
    let mut out = EchoIntensity::new(cells, beams);
    for_each_mapped(source, &map, cells, beams, |cell, slot, _, value| {
        out.set(cell, slot, scaling::amplitude(value));
    });
    out
}

/// Percent good array, always four slots.
pub fn percent_good(source: &BeamArray, cells: usize, beams: usize, pings: u16) -> PercentGood {
    let map = BeamMap::canonical(beams);
    let mut out = PercentGood::new(cells);
    for_each_mapped(source, &map, cells, PERCENT_GOOD_BEAMS, |cell, slot, _, value| {
        out.set(cell, slot, scaling::percent_good(value, pings));
    });
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::native::BAD_VELOCITY as NATIVE_BAD;
    use crate::pd0::BAD_VELOCITY;

    fn four_beam() -> BeamArray {
        BeamArray::from_rows(&[vec![0.1, 0.2, 0.3, 0.4], vec![NATIVE_BAD, 0.0, -0.1, 1.0]])
    }

    #[test]
    fn test_earth_velocity_reorder() {
        let vel = velocity(&four_beam(), 2, 4, CoordinateTransform::Earth);
        assert_eq!(vel.grid.cell(0), Some(&[300, 400, 200, 100][..]));
        assert_eq!(vel.get(1, 3), Some(BAD_VELOCITY));
    }

    #[test]
    fn test_instrument_velocity_signs() {
        let vel = velocity(&four_beam(), 2, 4, CoordinateTransform::Instrument);
        assert_eq!(vel.grid.cell(0), Some(&[200, 100, -300, 400][..]));
        assert_eq!(vel.get(1, 1), Some(BAD_VELOCITY));
        assert_eq!(vel.get(1, 2), Some(100));
    }

    #[test]
    fn test_missing_bins_stay_bad() {
        let vel = velocity(&four_beam(), 3, 4, CoordinateTransform::Beam);
        assert_eq!(vel.grid.cell(2), Some(&[BAD_VELOCITY; 4][..]));
    }

    #[test]
    fn test_single_beam() {
        let source = BeamArray::from_rows(&[vec![0.25], vec![NATIVE_BAD]]);
        let vel = velocity(&source, 2, 1, CoordinateTransform::Instrument);
        assert_eq!(vel.get(0, 0), Some(250));
        assert_eq!(vel.get(1, 0), Some(BAD_VELOCITY));

        let pg = percent_good(&BeamArray::from_rows(&[vec![4.0]]), 1, 1, 4);
        assert_eq!(pg.grid.cell(0), Some(&[100, 0, 0, 0][..]));
    }

    #[test]
    fn test_three_beam_identity() {
        let source = BeamArray::from_rows(&[vec![0.1, 0.2, 0.3]]);
        let vel = velocity(&source, 1, 3, CoordinateTransform::Ship);
        assert_eq!(vel.grid.cell(0), Some(&[100, 200, -300][..]));
        let amp = echo_intensity(&BeamArray::from_rows(&[vec![10.0, 20.0, 30.0]]), 1, 3);
        assert_eq!(amp.grid.cell(0), Some(&[20, 40, 60][..]));
    }

    #[test]
    fn test_byte_arrays_reorder() {
        let source = BeamArray::from_rows(&[vec![0.5, 0.25, 1.0, 0.0]]);
        let corr = correlation(&source, 1, 4, 1);
        assert_eq!(corr.grid.cell(0), Some(&[128, 0, 32, 64][..]));

        let good = BeamArray::from_rows(&[vec![10.0, 5.0, 0.0, 2.0]]);
        let pg = percent_good(&good, 1, 4, 10);
        assert_eq!(pg.grid.cell(0), Some(&[0, 20, 50, 100][..]));
    }

    #[test]
    fn test_selection_fallbacks() {
        let instrument = BeamArray::filled(1, 4, 0.5);
        let native = NativeEnsemble {
            instrument_velocity: Some(instrument.clone()),
            good_beam: Some(BeamArray::filled(1, 4, 1.0)),
            ..NativeEnsemble::default()
        };
        assert_eq!(select_velocity(&native, CoordinateTransform::Ship), Some(&instrument));
        assert!(select_velocity(&native, CoordinateTransform::Earth).is_none());
        assert_eq!(
            select_good(&native, CoordinateTransform::Earth),
            native.good_beam.as_ref()
        );
    }
}
