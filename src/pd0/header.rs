// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Ensemble header and offset table.
//!
//! ```text
//! 7F 7F | total_byte_length u16 | spare u8 | record_count u8 | offset u16 x n
//! ```
//!
//! `total_byte_length` counts everything up to, but not including, the
//! trailing checksum: the header, every record and the two `0F 0F` spare
//! bytes that precede the checksum.

use serde::{Deserialize, Serialize};

use crate::core::{Pd0Error, Result};
use crate::encoding::{Pd0Cursor, Pd0Writer, CHECKSUM_SIZE};

/// Header identifier bytes.
pub const HEADER_ID: [u8; 2] = [0x7F, 0x7F];

/// Bytes before the offset table.
pub const PREAMBLE_SIZE: usize = 6;

/// Spare bytes written between the last record and the checksum.
pub const TRAILER_SPARE: [u8; 2] = [0x0F, 0x0F];

/// Largest value the 16-bit length field can hold.
pub const MAX_TOTAL_LENGTH: usize = u16::MAX as usize;

/// Parsed ensemble header.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EnsembleHeader {
    /// Bytes covered by the checksum
    pub total_byte_length: u16,
    /// Spare byte after the length
    pub spare: u8,
    /// Offset of each record from the start of the ensemble
    pub offsets: Vec<u16>,
}

impl EnsembleHeader {
    /// Number of records in the offset table.
    pub fn record_count(&self) -> usize {
        self.offsets.len()
    }

    /// Header size including the offset table.
    pub fn size(&self) -> usize {
        PREAMBLE_SIZE + 2 * self.offsets.len()
    }

    /// Full ensemble length including the checksum.
    pub fn ensemble_len(&self) -> usize {
        usize::from(self.total_byte_length) + CHECKSUM_SIZE
    }

    /// End of the record area: the spare trailer starts here.
    pub fn records_end(&self) -> usize {
        usize::from(self.total_byte_length).saturating_sub(TRAILER_SPARE.len())
    }

    /// Byte span `[start, end)` of record `index`.
    ///
    /// The end is the smallest offset past `start`, or the end of the record
    /// area for the last record.
    pub fn record_span(&self, index: usize) -> Option<(usize, usize)> {
        let start = usize::from(*self.offsets.get(index)?);
        let end = self
            .offsets
            .iter()
            .map(|&o| usize::from(o))
            .filter(|&o| o > start)
            .min()
            .unwrap_or_else(|| self.records_end());
        Some((start, end.max(start)))
    }

    /// Build a header for records of the given sizes, laid out in order.
    pub fn from_sizes(sizes: &[usize]) -> Result<Self> {
        if sizes.len() > usize::from(u8::MAX) {
            return Err(Pd0Error::record_too_large(sizes.len(), usize::from(u8::MAX)));
        }

        let mut offsets = Vec::with_capacity(sizes.len());
        let mut position = PREAMBLE_SIZE + 2 * sizes.len();
        for &size in sizes {
            if position > MAX_TOTAL_LENGTH {
                return Err(Pd0Error::record_too_large(position, MAX_TOTAL_LENGTH));
            }
            offsets.push(position as u16);
            position += size;
        }

        let total = position + TRAILER_SPARE.len();
        if total > MAX_TOTAL_LENGTH {
            return Err(Pd0Error::record_too_large(total, MAX_TOTAL_LENGTH));
        }

        Ok(Self {
            total_byte_length: total as u16,
            spare: 0,
            offsets,
        })
    }

    /// Parse the header and offset table at the start of `buffer`.
    pub fn decode(buffer: &[u8]) -> Result<Self> {
        if buffer.len() < HEADER_ID.len() {
            return Err(Pd0Error::truncated("Header", PREAMBLE_SIZE, buffer.len(), 0));
        }
        if buffer[..2] != HEADER_ID {
            return Err(Pd0Error::invalid_sentinel([buffer[0], buffer[1]]));
        }

        let mut cursor = Pd0Cursor::new(buffer, "Header");
        cursor.skip(2)?;
        let total_byte_length = cursor.read_u16()?;
        let spare = cursor.read_u8()?;
        let record_count = cursor.read_u8()?;

        let mut offsets = Vec::with_capacity(usize::from(record_count));
        for _ in 0..record_count {
            offsets.push(cursor.read_u16()?);
        }

        Ok(Self {
            total_byte_length,
            spare,
            offsets,
        })
    }

    /// Append the header and offset table to `writer`.
    pub fn encode(&self, writer: &mut Pd0Writer) {
        writer
            .bytes(&HEADER_ID)
            .u16(self.total_byte_length)
            .u8(self.spare)
            .u8(self.offsets.len() as u8);
        for &offset in &self.offsets {
            writer.u16(offset);
        }
    }
}
