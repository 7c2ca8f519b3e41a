// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Depth-cell array records.
//!
//! Each array record is a 2-byte ID followed by `cell_count * beam_count`
//! values stored beam-minor (all beams of cell 0, then cell 1, ...).
//! Velocity values are 2-byte signed millimetres per second; the other
//! arrays hold one byte per value. Percent good always stores four beam
//! slots regardless of the instrument's beam count.

use serde::{Deserialize, Serialize};

use crate::core::{Pd0Error, Result};
use crate::encoding::{Pd0Cursor, Pd0Writer};

use super::registry::RecordKind;

/// Velocity sentinel marking a bad sample.
pub const BAD_VELOCITY: i16 = i16::MIN;

/// Byte-array sentinel marking a bad sample.
pub const BAD_BYTE: u8 = 255;

/// Beam slots stored by the percent-good record.
pub const PERCENT_GOOD_BEAMS: usize = 4;

/// Row-major `[cell][beam]` storage shared by the array records.
///
/// `values.len() == cell_count * beam_count` always holds; deserialization
/// rejects input that breaks it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawCellGrid<T>")]
pub struct CellGrid<T> {
    cell_count: usize,
    beam_count: usize,
    values: Vec<T>,
}

/// Unchecked serialized form of [`CellGrid`].
#[derive(Deserialize)]
struct RawCellGrid<T> {
    cell_count: usize,
    beam_count: usize,
    values: Vec<T>,
}

impl<T> TryFrom<RawCellGrid<T>> for CellGrid<T> {
    type Error = Pd0Error;

    fn try_from(raw: RawCellGrid<T>) -> Result<Self> {
        CellGrid::from_values(raw.cell_count, raw.beam_count, raw.values)
    }
}

impl<T> CellGrid<T> {
    /// Wrap beam-minor `values`, failing unless there are exactly
    /// `cell_count * beam_count` of them.
    pub fn from_values(cell_count: usize, beam_count: usize, values: Vec<T>) -> Result<Self> {
        if cell_count.checked_mul(beam_count) != Some(values.len()) {
            return Err(Pd0Error::malformed_grid(
                cell_count,
                beam_count,
                values.len(),
            ));
        }
        Ok(Self {
            cell_count,
            beam_count,
            values,
        })
    }

    /// `(cell_count, beam_count)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.cell_count, self.beam_count)
    }
}

impl<T: Copy> CellGrid<T> {
    /// Create a grid with every value set to `fill`.
    pub fn filled(cell_count: usize, beam_count: usize, fill: T) -> Self {
        Self {
            cell_count,
            beam_count,
            values: vec![fill; cell_count * beam_count],
        }
    }

    /// Number of depth cells.
    pub fn cell_count(&self) -> usize {
        self.cell_count
    }

    /// Number of beam slots per cell.
    pub fn beam_count(&self) -> usize {
        self.beam_count
    }

    /// Value at `(cell, beam)`, `None` when out of range.
    pub fn get(&self, cell: usize, beam: usize) -> Option<T> {
        if cell >= self.cell_count || beam >= self.beam_count {
            return None;
        }
        self.values.get(cell * self.beam_count + beam).copied()
    }

    /// Set the value at `(cell, beam)`. Out-of-range writes are ignored.
    pub fn set(&mut self, cell: usize, beam: usize, value: T) {
        if cell < self.cell_count && beam < self.beam_count {
            self.values[cell * self.beam_count + beam] = value;
        }
    }

    /// Values of one cell, `None` when out of range.
    pub fn cell(&self, cell: usize) -> Option<&[T]> {
        if cell >= self.cell_count {
            return None;
        }
        let start = cell * self.beam_count;
        self.values.get(start..start + self.beam_count)
    }

    /// All values, beam-minor.
    pub fn values(&self) -> &[T] {
        &self.values
    }
}

/// Velocity array, millimetres per second.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Velocity {
    /// Samples indexed `[cell][beam]`
    pub grid: CellGrid<i16>,
}

impl Velocity {
    /// Record kind.
    pub const KIND: RecordKind = RecordKind::Velocity;

    /// Create an array with every sample set to [`BAD_VELOCITY`].
    pub fn new(cell_count: usize, beam_count: usize) -> Self {
        Self {
            grid: CellGrid::filled(cell_count, beam_count, BAD_VELOCITY),
        }
    }

    /// Encoded size for the given dimensions.
    pub const fn size_for(cell_count: usize, beam_count: usize) -> usize {
        2 + cell_count * beam_count * 2
    }

    /// Encoded size of this record.
    pub fn size(&self) -> usize {
        Self::size_for(self.grid.cell_count(), self.grid.beam_count())
    }

    /// Raw sample at `(cell, beam)`.
    pub fn get(&self, cell: usize, beam: usize) -> Option<i16> {
        self.grid.get(cell, beam)
    }

    /// Set the raw sample at `(cell, beam)`.
    pub fn set(&mut self, cell: usize, beam: usize, value: i16) {
        self.grid.set(cell, beam, value);
    }

    /// Velocity in m/s, `None` for bad or out-of-range samples.
    pub fn velocity_m_per_s(&self, cell: usize, beam: usize) -> Option<f64> {
        match self.get(cell, beam)? {
            BAD_VELOCITY => None,
            raw => Some(f64::from(raw) / 1000.0),
        }
    }

    /// Decode from a slice starting at the record ID.
    pub fn decode(data: &[u8], base: usize, cell_count: usize, beam_count: usize) -> Result<Self> {
        let mut cursor = Pd0Cursor::at(data, base, "Velocity");
        cursor.skip(2)?;
        let mut values = Vec::with_capacity(cell_count * beam_count);
        for _ in 0..cell_count * beam_count {
            values.push(cursor.read_i16()?);
        }
        Ok(Self {
            grid: CellGrid {
                cell_count,
                beam_count,
                values,
            },
        })
    }

    /// Append the encoded record to `writer`.
    pub fn encode(&self, writer: &mut Pd0Writer) {
        writer.u8(0x00).u8(0x01);
        for value in self.grid.values() {
            writer.i16(*value);
        }
    }
}

macro_rules! byte_array_record {
    ($(#[$meta:meta])* $name:ident, $kind:ident, $id_msb:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
        pub struct $name {
            /// Samples indexed `[cell][beam]`
            pub grid: CellGrid<u8>,
        }

        impl $name {
            /// Record kind.
            pub const KIND: RecordKind = RecordKind::$kind;

            /// Encoded size of this record.
            pub fn size(&self) -> usize {
                2 + self.grid.cell_count() * self.grid.beam_count()
            }

            /// Raw sample at `(cell, beam)`.
            pub fn get(&self, cell: usize, beam: usize) -> Option<u8> {
                self.grid.get(cell, beam)
            }

            /// Set the raw sample at `(cell, beam)`.
            pub fn set(&mut self, cell: usize, beam: usize, value: u8) {
                self.grid.set(cell, beam, value);
            }

            /// Whether the sample at `(cell, beam)` holds the bad sentinel.
            pub fn is_bad(&self, cell: usize, beam: usize) -> bool {
                self.get(cell, beam) == Some(BAD_BYTE)
            }

            fn decode_grid(
                data: &[u8],
                base: usize,
                cell_count: usize,
                beam_count: usize,
            ) -> Result<Self> {
                let mut cursor = Pd0Cursor::at(data, base, stringify!($name));
                cursor.skip(2)?;
                let values = cursor.read_bytes(cell_count * beam_count)?.to_vec();
                Ok(Self {
                    grid: CellGrid {
                        cell_count,
                        beam_count,
                        values,
                    },
                })
            }

            /// Append the encoded record to `writer`.
            pub fn encode(&self, writer: &mut Pd0Writer) {
                writer.u8(0x00).u8($id_msb).bytes(self.grid.values());
            }
        }
    };
}

byte_array_record!(
    /// Correlation magnitude array.
    Correlation,
    Correlation,
    0x02
);

byte_array_record!(
    /// Echo intensity array, counts.
    EchoIntensity,
    EchoIntensity,
    0x03
);

byte_array_record!(
    /// Percent good array, always four beam slots.
    PercentGood,
    PercentGood,
    0x04
);

impl Correlation {
    /// Create an array filled with zeros.
    pub fn new(cell_count: usize, beam_count: usize) -> Self {
        Self {
            grid: CellGrid::filled(cell_count, beam_count, 0),
        }
    }

    /// Encoded size for the given dimensions.
    pub const fn size_for(cell_count: usize, beam_count: usize) -> usize {
        2 + cell_count * beam_count
    }

    /// Decode from a slice starting at the record ID.
    pub fn decode(data: &[u8], base: usize, cell_count: usize, beam_count: usize) -> Result<Self> {
        Self::decode_grid(data, base, cell_count, beam_count)
    }
}

impl EchoIntensity {
    /// Create an array filled with zeros.
    pub fn new(cell_count: usize, beam_count: usize) -> Self {
        Self {
            grid: CellGrid::filled(cell_count, beam_count, 0),
        }
    }

    /// Encoded size for the given dimensions.
    pub const fn size_for(cell_count: usize, beam_count: usize) -> usize {
        2 + cell_count * beam_count
    }

    /// Decode from a slice starting at the record ID.
    pub fn decode(data: &[u8], base: usize, cell_count: usize, beam_count: usize) -> Result<Self> {
        Self::decode_grid(data, base, cell_count, beam_count)
    }
}

impl PercentGood {
    /// Create an array filled with zeros.
    pub fn new(cell_count: usize) -> Self {
        Self {
            grid: CellGrid::filled(cell_count, PERCENT_GOOD_BEAMS, 0),
        }
    }

    /// Encoded size for the given cell count.
    pub const fn size_for(cell_count: usize) -> usize {
        2 + cell_count * PERCENT_GOOD_BEAMS
    }

    /// Decode from a slice starting at the record ID.
    pub fn decode(data: &[u8], base: usize, cell_count: usize) -> Result<Self> {
        Self::decode_grid(data, base, cell_count, PERCENT_GOOD_BEAMS)
    }
}
