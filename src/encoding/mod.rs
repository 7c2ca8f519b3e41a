// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Low-level byte handling shared by every PD0 record.
//!
//! - [`scalar`] - Little-endian packing, bit helpers and saturating scaling
//! - [`cursor`] - Bounds-checked record reader
//! - [`writer`] - Record writer
//! - [`checksum`] - Ensemble checksum

pub mod checksum;
pub mod cursor;
pub mod scalar;
pub mod writer;

pub use checksum::{checksum, verify as verify_checksum, CHECKSUM_SIZE};
pub use cursor::Pd0Cursor;
pub use writer::Pd0Writer;
