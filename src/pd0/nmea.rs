// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Opaque NMEA text record (ID `0x2022`).
//!
//! The payload is carried verbatim; its length comes from the offset table.

use serde::{Deserialize, Serialize};

use crate::core::Result;
use crate::encoding::{Pd0Cursor, Pd0Writer};

use super::registry::RecordKind;

/// NMEA passthrough record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NmeaData {
    /// Payload bytes following the ID
    pub payload: Vec<u8>,
}

impl NmeaData {
    /// Record kind.
    pub const KIND: RecordKind = RecordKind::NmeaData;

    /// Wrap NMEA text.
    pub fn from_text(text: &str) -> Self {
        Self {
            payload: text.as_bytes().to_vec(),
        }
    }

    /// Encoded size including the ID.
    pub fn size(&self) -> usize {
        2 + self.payload.len()
    }

    /// Payload as text, lossy for non-UTF-8 bytes.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.payload).into_owned()
    }

    /// Decode a record of `size` bytes starting at the ID.
    pub fn decode(data: &[u8], base: usize, size: usize) -> Result<Self> {
        let mut cursor = Pd0Cursor::at(data, base, "NmeaData");
        cursor.skip(2)?;
        let payload = cursor.read_bytes(size.saturating_sub(2))?.to_vec();
        Ok(Self { payload })
    }

    /// Append the encoded record to `writer`.
    pub fn encode(&self, writer: &mut Pd0Writer) {
        writer.u8(0x22).u8(0x20).bytes(&self.payload);
    }
}
