// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Little-endian writer used by every record encoder.

use byteorder::{ByteOrder, LittleEndian};

/// Default initial capacity for the writer buffer.
const DEFAULT_CAPACITY: usize = 256;

/// Growable little-endian byte writer.
///
/// Writes never fail; the buffer grows as needed.
///
/// # Example
///
/// ```
/// use pd0codec::encoding::Pd0Writer;
///
/// let mut writer = Pd0Writer::new();
/// writer.u8(0x7F).u8(0x7F).u16(0x0088);
/// assert_eq!(writer.finish(), vec![0x7F, 0x7F, 0x88, 0x00]);
/// ```
#[derive(Debug, Clone)]
pub struct Pd0Writer {
    buffer: Vec<u8>,
    offset: usize,
}

impl Default for Pd0Writer {
    fn default() -> Self {
        Self::new()
    }
}

impl Pd0Writer {
    /// Create a new writer.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a new writer with the specified initial capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
            offset: 0,
        }
    }

    /// Get the current size of the written data.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.offset
    }

    /// Get a reference to the written data.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.buffer[..self.offset]
    }

    /// Consume the writer and return the written data.
    #[must_use]
    pub fn finish(mut self) -> Vec<u8> {
        self.buffer.truncate(self.offset);
        self.buffer
    }

    fn reserve(&mut self, additional: usize) -> &mut [u8] {
        let needed = self.offset + additional;
        if needed > self.buffer.len() {
            self.buffer.resize(needed, 0);
        }
        let start = self.offset;
        self.offset = needed;
        &mut self.buffer[start..needed]
    }

    /// Write an unsigned byte.
    pub fn u8(&mut self, value: u8) -> &mut Self {
        self.reserve(1)[0] = value;
        self
    }

    /// Write a signed byte.
    pub fn i8(&mut self, value: i8) -> &mut Self {
        self.u8(value as u8)
    }

    /// Write a little-endian u16.
    pub fn u16(&mut self, value: u16) -> &mut Self {
        LittleEndian::write_u16(self.reserve(2), value);
        self
    }

    /// Write a little-endian i16.
    pub fn i16(&mut self, value: i16) -> &mut Self {
        LittleEndian::write_i16(self.reserve(2), value);
        self
    }

    /// Write a little-endian u32.
    pub fn u32(&mut self, value: u32) -> &mut Self {
        LittleEndian::write_u32(self.reserve(4), value);
        self
    }

    /// Write raw bytes.
    pub fn bytes(&mut self, data: &[u8]) -> &mut Self {
        self.reserve(data.len()).copy_from_slice(data);
        self
    }

    /// Write `count` zero bytes.
    pub fn zeros(&mut self, count: usize) -> &mut Self {
        self.reserve(count).fill(0);
        self
    }

    /// Write four little-endian i16 values.
    pub fn i16x4(&mut self, values: &[i16; 4]) -> &mut Self {
        for &v in values {
            self.i16(v);
        }
        self
    }

    /// Write four little-endian u16 values.
    pub fn u16x4(&mut self, values: &[u16; 4]) -> &mut Self {
        for &v in values {
            self.u16(v);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_scalars() {
        let mut writer = Pd0Writer::new();
        writer.u8(0x42).i16(-2).u32(0x12345678);
        assert_eq!(writer.size(), 7);
        assert_eq!(
            writer.finish(),
            vec![0x42, 0xFE, 0xFF, 0x78, 0x56, 0x34, 0x12]
        );
    }

    #[test]
    fn test_write_groups() {
        let mut writer = Pd0Writer::with_capacity(4);
        writer.i16x4(&[1, -1, 0, i16::MIN]).zeros(2).bytes(&[9]);
        assert_eq!(
            writer.data(),
            &[1, 0, 0xFF, 0xFF, 0, 0, 0x00, 0x80, 0, 0, 9]
        );
    }

    #[test]
    fn test_u16_le() {
        let mut writer = Pd0Writer::new();
        writer.u16x4(&[0x0102, 0, 0, 0xFFFF]);
        assert_eq!(writer.data()[..2], [0x02, 0x01]);
        assert_eq!(writer.data()[6..], [0xFF, 0xFF]);
    }
}
