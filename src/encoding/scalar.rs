// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Scalar packing, bit and scaling helpers.
//!
//! All multi-byte PD0 integers are little-endian. The scaling helpers never
//! fail: out-of-range results saturate at the target type's bounds.

use byteorder::{ByteOrder, LittleEndian};

/// Combine an LSB/MSB pair into a u16.
#[inline]
pub fn u16_from_pair(lsb: u8, msb: u8) -> u16 {
    LittleEndian::read_u16(&[lsb, msb])
}

/// Combine an LSB/MSB pair into an i16 (two's complement).
#[inline]
pub fn i16_from_pair(lsb: u8, msb: u8) -> i16 {
    LittleEndian::read_i16(&[lsb, msb])
}

/// Split a u16 into its LSB/MSB pair.
#[inline]
pub fn u16_to_pair(value: u16) -> [u8; 2] {
    let mut bytes = [0u8; 2];
    LittleEndian::write_u16(&mut bytes, value);
    bytes
}

/// Split an i16 into its LSB/MSB pair.
#[inline]
pub fn i16_to_pair(value: i16) -> [u8; 2] {
    let mut bytes = [0u8; 2];
    LittleEndian::write_i16(&mut bytes, value);
    bytes
}

/// Read a little-endian u32 from four bytes.
#[inline]
pub fn u32_from_bytes(bytes: [u8; 4]) -> u32 {
    LittleEndian::read_u32(&bytes)
}

/// Write a u32 as four little-endian bytes.
#[inline]
pub fn u32_to_bytes(value: u32) -> [u8; 4] {
    let mut bytes = [0u8; 4];
    LittleEndian::write_u32(&mut bytes, value);
    bytes
}

/// Test bit `bit` (0 = least significant) of a byte.
#[inline]
pub fn is_bit_set_u8(value: u8, bit: u8) -> bool {
    bit < 8 && (value >> bit) & 1 == 1
}

/// Return `value` with bit `bit` set or cleared.
#[inline]
pub fn set_bit_u8(value: u8, bit: u8, on: bool) -> u8 {
    if bit >= 8 {
        return value;
    }
    if on {
        value | (1 << bit)
    } else {
        value & !(1 << bit)
    }
}

/// Test bit `bit` (0 = least significant) of a 16-bit word.
#[inline]
pub fn is_bit_set_u16(value: u16, bit: u8) -> bool {
    bit < 16 && (value >> bit) & 1 == 1
}

/// Return `value` with bit `bit` set or cleared.
#[inline]
pub fn set_bit_u16(value: u16, bit: u8, on: bool) -> u16 {
    if bit >= 16 {
        return value;
    }
    if on {
        value | (1 << bit)
    } else {
        value & !(1 << bit)
    }
}

/// Extract `width` bits starting at `shift` from a byte.
#[inline]
pub fn bits_u8(value: u8, shift: u8, width: u8) -> u8 {
    let mask = ((1u16 << width) - 1) as u8;
    (value >> shift) & mask
}

/// Replace `width` bits starting at `shift` in a byte.
#[inline]
pub fn with_bits_u8(value: u8, shift: u8, width: u8, field: u8) -> u8 {
    let mask = (((1u16 << width) - 1) as u8) << shift;
    (value & !mask) | ((field << shift) & mask)
}

/// Round to nearest, halves away from zero.
#[inline]
pub fn round_nearest(value: f64) -> f64 {
    value.round()
}

/// Scale and round into an i16, saturating at the type bounds.
#[inline]
pub fn scale_to_i16(value: f64, factor: f64) -> i16 {
    let scaled = round_nearest(value * factor);
    if scaled.is_nan() {
        return 0;
    }
    scaled.clamp(i16::MIN as f64, i16::MAX as f64) as i16
}

/// Scale and round into a u16, saturating at the type bounds.
#[inline]
pub fn scale_to_u16(value: f64, factor: f64) -> u16 {
    let scaled = round_nearest(value * factor);
    if scaled.is_nan() {
        return 0;
    }
    scaled.clamp(0.0, u16::MAX as f64) as u16
}

/// Scale and round into a u32, saturating at the type bounds.
#[inline]
pub fn scale_to_u32(value: f64, factor: f64) -> u32 {
    let scaled = round_nearest(value * factor);
    if scaled.is_nan() {
        return 0;
    }
    scaled.clamp(0.0, u32::MAX as f64) as u32
}

/// Round an already-scaled value into a byte, clamping to `0..=255`.
#[inline]
pub fn clamp_to_u8(value: f64) -> u8 {
    let rounded = round_nearest(value);
    if rounded.is_nan() {
        return 0;
    }
    rounded.clamp(0.0, u8::MAX as f64) as u8
}
