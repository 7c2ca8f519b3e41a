// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Bounds-checked little-endian reader for PD0 record slices.

use byteorder::{ByteOrder, LittleEndian};

use crate::core::{Pd0Error, Result};

/// Cursor over one record's bytes.
///
/// The cursor tracks:
/// - `offset`: current read position within the slice
/// - `base`: absolute position of the slice in the ensemble (for errors)
/// - `context`: record name reported in truncation errors
///
/// # Example
///
/// ```
/// use pd0codec::encoding::Pd0Cursor;
///
/// let data = [0x00, 0x00, 0x34, 0x12];
/// let mut cursor = Pd0Cursor::new(&data, "FixedLeader");
/// cursor.skip(2).unwrap();
/// assert_eq!(cursor.read_u16().unwrap(), 0x1234);
/// ```
pub struct Pd0Cursor<'a> {
    data: &'a [u8],
    offset: usize,
    base: usize,
    context: &'static str,
}

impl<'a> Pd0Cursor<'a> {
    /// Create a cursor at the start of `data`.
    pub fn new(data: &'a [u8], context: &'static str) -> Self {
        Self {
            data,
            offset: 0,
            base: 0,
            context,
        }
    }

    /// Create a cursor whose errors report positions relative to `base`.
    pub fn at(data: &'a [u8], base: usize, context: &'static str) -> Self {
        Self {
            data,
            offset: 0,
            base,
            context,
        }
    }

    /// Get the current position relative to the slice start.
    #[inline]
    pub fn position(&self) -> usize {
        self.offset
    }

    /// Get the remaining bytes available to read.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.offset)
    }

    /// Check if at end of buffer.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.offset >= self.data.len()
    }

    fn ensure(&self, count: usize) -> Result<()> {
        if count > self.remaining() {
            return Err(Pd0Error::truncated(
                self.context,
                count,
                self.remaining(),
                self.base + self.offset,
            ));
        }
        Ok(())
    }

    /// Read a single byte.
    pub fn read_u8(&mut self) -> Result<u8> {
        self.ensure(1)?;
        let value = self.data[self.offset];
        self.offset += 1;
        Ok(value)
    }

    /// Read a signed byte.
    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_u8()? as i8)
    }

    /// Read a little-endian u16.
    pub fn read_u16(&mut self) -> Result<u16> {
        self.ensure(2)?;
        let value = LittleEndian::read_u16(&self.data[self.offset..]);
        self.offset += 2;
        Ok(value)
    }

    /// Read a little-endian i16.
    pub fn read_i16(&mut self) -> Result<i16> {
        Ok(self.read_u16()? as i16)
    }

    /// Read a little-endian u32.
    pub fn read_u32(&mut self) -> Result<u32> {
        self.ensure(4)?;
        let value = LittleEndian::read_u32(&self.data[self.offset..]);
        self.offset += 4;
        Ok(value)
    }

    /// Read a fixed-size byte array.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        self.ensure(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(&self.data[self.offset..self.offset + N]);
        self.offset += N;
        Ok(out)
    }

    /// Read four consecutive little-endian i16 values.
    pub fn read_i16x4(&mut self) -> Result<[i16; 4]> {
        Ok([
            self.read_i16()?,
            self.read_i16()?,
            self.read_i16()?,
            self.read_i16()?,
        ])
    }

    /// Read four consecutive little-endian u16 values.
    pub fn read_u16x4(&mut self) -> Result<[u16; 4]> {
        Ok([
            self.read_u16()?,
            self.read_u16()?,
            self.read_u16()?,
            self.read_u16()?,
        ])
    }

    /// Read a byte slice.
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        self.ensure(count)?;
        let start = self.offset;
        self.offset += count;
        Ok(&self.data[start..self.offset])
    }

    /// Skip bytes.
    pub fn skip(&mut self, count: usize) -> Result<()> {
        self.ensure(count)?;
        self.offset += count;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_scalars() {
        let data = [0x42, 0xFE, 0xFF, 0x78, 0x56, 0x34, 0x12];
        let mut cursor = Pd0Cursor::new(&data, "test");
        assert_eq!(cursor.read_u8().unwrap(), 0x42);
        assert_eq!(cursor.read_i16().unwrap(), -2);
        assert_eq!(cursor.read_u32().unwrap(), 0x12345678);
        assert!(cursor.is_at_end());
    }

    #[test]
    fn test_read_i8() {
        let data = [0xFF, 0x7F];
        let mut cursor = Pd0Cursor::new(&data, "test");
        assert_eq!(cursor.read_i8().unwrap(), -1);
        assert_eq!(cursor.read_i8().unwrap(), 127);
    }

    #[test]
    fn test_read_array_and_groups() {
        let data = [1, 0, 2, 0, 3, 0, 0, 0x80, 9, 8];
        let mut cursor = Pd0Cursor::new(&data, "test");
        assert_eq!(cursor.read_i16x4().unwrap(), [1, 2, 3, i16::MIN]);
        assert_eq!(cursor.read_array::<2>().unwrap(), [9, 8]);
    }

    #[test]
    fn test_truncated_reports_absolute_offset() {
        let data = [0x01];
        let mut cursor = Pd0Cursor::at(&data, 100, "Velocity");
        let err = cursor.read_u16().unwrap_err();
        assert_eq!(err, Pd0Error::truncated("Velocity", 2, 1, 100));
    }

    #[test]
    fn test_short_read_leaves_position() {
        let data = [0x01, 0x02, 0x03, 0x04, 0x05];
        let mut cursor = Pd0Cursor::at(&data, 20, "VariableLeader");
        cursor.skip(2).unwrap();
        let err = cursor.read_u32().unwrap_err();
        assert_eq!(err, Pd0Error::truncated("VariableLeader", 4, 3, 22));
        assert_eq!(cursor.position(), 2);
        assert_eq!(cursor.read_u16().unwrap(), 0x0403);
    }

    #[test]
    fn test_skip_and_remaining() {
        let data = [0u8; 8];
        let mut cursor = Pd0Cursor::new(&data, "test");
        cursor.skip(5).unwrap();
        assert_eq!(cursor.position(), 5);
        assert_eq!(cursor.remaining(), 3);
        assert!(cursor.skip(4).is_err());
        assert_eq!(cursor.read_bytes(3).unwrap(), &[0, 0, 0]);
    }
}
