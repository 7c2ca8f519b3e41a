// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Ensemble checksum.
//!
//! The checksum is the unsigned sum of every ensemble byte before the
//! trailing two checksum bytes, truncated to 16 bits.

use crate::core::{Pd0Error, Result};

use super::scalar::u16_from_pair;

/// Size of the trailing checksum in bytes.
pub const CHECKSUM_SIZE: usize = 2;

/// Wrapping 16-bit sum of `buffer[0..length]`.
///
/// `length` is clamped to the buffer length.
pub fn checksum(buffer: &[u8], length: usize) -> u16 {
    buffer[..length.min(buffer.len())]
        .iter()
        .fold(0u16, |sum, &b| sum.wrapping_add(u16::from(b)))
}

/// Verify the checksum stored after the first `total_byte_length` bytes.
pub fn verify(buffer: &[u8], total_byte_length: usize) -> Result<()> {
    let needed = total_byte_length + CHECKSUM_SIZE;
    if buffer.len() < needed {
        return Err(Pd0Error::truncated(
            "checksum",
            CHECKSUM_SIZE,
            buffer.len().saturating_sub(total_byte_length),
            total_byte_length,
        ));
    }

    let stored = u16_from_pair(buffer[total_byte_length], buffer[total_byte_length + 1]);
    let computed = checksum(buffer, total_byte_length);
    if stored != computed {
        return Err(Pd0Error::checksum_mismatch(stored, computed));
    }
    Ok(())
}
