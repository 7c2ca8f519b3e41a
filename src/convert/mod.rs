// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Native to PD0 conversion.
//!
//! A [`Pd0Converter`] turns a [`NativeEnsemble`] into a PD0 [`Ensemble`] in
//! the requested coordinate frame. Both leaders are always built; every
//! other record is emitted only when its native group is present.
//!
//! # Example
//!
//! ```
//! use pd0codec::convert::Pd0Converter;
//! use pd0codec::core::{ConversionOptions, CoordinateTransform};
//! use pd0codec::native::{AncillaryGroup, EnsembleGroup, NativeEnsemble};
//!
//! let native = NativeEnsemble {
//!     ensemble: Some(EnsembleGroup { num_bins: 10, ..EnsembleGroup::default() }),
//!     ancillary: Some(AncillaryGroup::default()),
//!     ..NativeEnsemble::default()
//! };
//!
//! let converter = Pd0Converter::new(ConversionOptions::new(CoordinateTransform::Beam));
//! let ensemble = converter.convert(&native).unwrap();
//! assert_eq!(ensemble.cell_count(), 10);
//! ```

pub mod arrays;
pub mod batch;
pub mod beam_map;
pub mod bottom_track;
pub mod leaders;
pub mod scaling;

pub use batch::{convert_all, decode_all};
pub use beam_map::{BeamMap, BeamSlot};

use crate::core::{ConversionOptions, CoordinateTransform, Pd0Error, Result};
use crate::native::NativeEnsemble;
use crate::pd0::{Ensemble, NmeaData, Record};

/// Converts native ensembles to PD0.
#[derive(Debug, Clone, Default)]
pub struct Pd0Converter {
    options: ConversionOptions,
}

impl Pd0Converter {
    /// Create a converter.
    pub fn new(options: ConversionOptions) -> Self {
        Self { options }
    }

    /// Conversion options.
    pub fn options(&self) -> &ConversionOptions {
        &self.options
    }

    /// Convert one native ensemble.
    pub fn convert(&self, native: &NativeEnsemble) -> Result<Ensemble> {
        let transform = self.options.transform;
        let group = native
            .ensemble
            .as_ref()
            .ok_or_else(|| Pd0Error::missing_native_group("ensemble"))?;
        let ancillary = native
            .ancillary
            .as_ref()
            .ok_or_else(|| Pd0Error::missing_native_group("ancillary"))?;

        let fixed = leaders::fixed_leader(group, ancillary, transform);
        let variable = leaders::variable_leader(group, ancillary);
        let cells = fixed.cell_count();
        let beams = fixed.beam_count();
        let mut ensemble = Ensemble::new(fixed, variable);

        if let Some(source) = arrays::select_velocity(native, transform) {
            ensemble = ensemble.with_record(Record::Velocity(arrays::velocity(
                source, cells, beams, transform,
            )));
        }
        if let Some(source) = &native.correlation {
            ensemble = ensemble.with_record(Record::Correlation(arrays::correlation(
                source,
                cells,
                beams,
                group.code_repeats,
            )));
        }
        if let Some(source) = &native.amplitude {
            ensemble = ensemble.with_record(Record::EchoIntensity(arrays::echo_intensity(
                source, cells, beams,
            )));
        }
        if let Some(source) = arrays::select_good(native, transform) {
            ensemble = ensemble.with_record(Record::PercentGood(arrays::percent_good(
                source,
                cells,
                beams,
                group.actual_pings,
            )));
        }
        if let Some(source) = &native.bottom_track {
            ensemble = ensemble.with_record(Record::BottomTrack(bottom_track::bottom_track(
                source,
                beams,
                group.code_repeats,
                transform,
            )));
        }
        if self.options.include_nmea {
            if let Some(text) = native.nmea.as_deref().filter(|t| !t.is_empty()) {
                ensemble = ensemble.with_record(Record::NmeaData(NmeaData::from_text(text)));
            }
        }

        tracing::trace!(
            ensemble = ensemble.ensemble_number(),
            transform = transform.as_str(),
            records = ensemble.kinds().len(),
            "Converted native ensemble"
        );
        Ok(ensemble)
    }
}

/// Convert one native ensemble with default options in the given frame.
pub fn convert(native: &NativeEnsemble, transform: CoordinateTransform) -> Result<Ensemble> {
    Pd0Converter::new(ConversionOptions::new(transform)).convert(native)
}
