// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # pd0codec
//!
//! Codec for PD0 ensembles produced by Doppler current profilers, and a
//! converter from native sensor ensembles to PD0.
//!
//! The library is organized as:
//! - **PD0 records** and the ensemble codec in [`pd0`](crate::pd0)
//! - **Conversion** from native ensembles in [`convert`](crate::convert)
//! - **Native ensemble** model in [`native`](crate::native)
//! - **Byte handling** (cursor, writer, checksum) in [`encoding`](crate::encoding)
//!
//! ## Example: Decoding an ensemble
//!
//! ```rust,no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use pd0codec::Ensemble;
//!
//! let bytes = std::fs::read("ensemble.pd0")?;
//! let ensemble = Ensemble::decode(&bytes)?;
//! println!("Ensemble {} with {} cells", ensemble.ensemble_number(), ensemble.cell_count());
//! if let Some(velocity) = ensemble.velocity() {
//!     println!("Cell 0 beam 0: {:?} m/s", velocity.velocity_m_per_s(0, 0));
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Example: Converting and encoding
//!
//! ```rust,no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use pd0codec::{convert, CoordinateTransform, NativeEnsemble};
//!
//! # let native = NativeEnsemble::default();
//! let ensemble = convert(&native, CoordinateTransform::Earth)?;
//! let bytes = ensemble.encode()?;
//! # Ok(())
//! # }
//! ```

// Core types
pub mod core;

// Re-export core types for convenience
pub use core::{
    ConversionOptions, CoordinateTransform, DecodeOptions, Pd0Error, Result, Strictness,
};

// Byte-level reading, writing and checksums
pub mod encoding;

// PD0 records and ensemble codec
pub mod pd0;

pub use pd0::{Ensemble, EnsembleHeader, Record, RecordKind};

// Native ensemble model
pub mod native;

pub use native::NativeEnsemble;

// Native to PD0 conversion
pub mod convert;

pub use convert::{convert, convert_all, decode_all, BeamMap, Pd0Converter};
