// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Bottom track record (85 bytes).
//!
//! Four per-beam groups (range, velocity, correlation, amplitude, percent
//! good), a reference-layer sub-block and the range MSB bytes. A beam's range
//! in centimetres is `msb * 65535 + lsb`.

use serde::{Deserialize, Serialize};

use crate::core::Result;
use crate::encoding::{Pd0Cursor, Pd0Writer};

use super::registry::RecordKind;

/// Bottom track size in bytes, including the ID.
pub const BOTTOM_TRACK_SIZE: usize = 85;

/// Range LSB modulus.
pub const RANGE_MSB_SCALE: u32 = 65535;

/// Water reference layer sub-block.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReferenceLayer {
    /// Minimum layer size (dm)
    pub min: u16,
    /// Near boundary (dm)
    pub near: u16,
    /// Far boundary (dm)
    pub far: u16,
    /// Layer velocity per beam (mm/s)
    pub velocity: [i16; 4],
    /// Layer correlation per beam
    pub correlation: [u8; 4],
    /// Layer echo intensity per beam
    pub intensity: [u8; 4],
    /// Layer percent good per beam
    pub percent_good: [u8; 4],
}

/// Bottom track record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BottomTrack {
    /// Bottom pings per ensemble
    pub pings_per_ensemble: u16,
    /// Delay before reacquire (ensembles)
    pub delay_before_reacquire: u16,
    /// Correlation magnitude minimum
    pub correlation_mag_min: u8,
    /// Evaluation amplitude minimum
    pub eval_amplitude_min: u8,
    /// Percent good minimum
    pub percent_good_min: u8,
    /// Bottom track mode
    pub mode: u8,
    /// Error velocity maximum (mm/s)
    pub error_velocity_max: u16,
    /// Reserved bytes 12-15
    pub reserved: [u8; 4],
    /// Range LSB per beam (cm)
    pub range_lsb: [u16; 4],
    /// Velocity per beam (mm/s)
    pub velocity: [i16; 4],
    /// Correlation per beam
    pub correlation: [u8; 4],
    /// Evaluation amplitude per beam
    pub amplitude: [u8; 4],
    /// Percent good per beam
    pub percent_good: [u8; 4],
    /// Water reference layer
    pub reference_layer: ReferenceLayer,
    /// Maximum tracking depth (dm)
    pub max_depth: u16,
    /// Receiver signal strength per beam
    pub rssi: [u8; 4],
    /// Gain level
    pub gain: u8,
    /// Range MSB per beam
    pub range_msb: [u8; 4],
    /// Reserved bytes 81-84
    pub reserved_tail: [u8; 4],
}

impl BottomTrack {
    /// Record kind.
    pub const KIND: RecordKind = RecordKind::BottomTrack;

    /// Size in bytes, including the ID.
    pub const fn size() -> usize {
        BOTTOM_TRACK_SIZE
    }

    /// Decode from a slice starting at the record ID.
    pub fn decode(data: &[u8], base: usize) -> Result<Self> {
        let mut cursor = Pd0Cursor::at(data, base, "BottomTrack");
        cursor.skip(2)?;

        Ok(Self {
            pings_per_ensemble: cursor.read_u16()?,
            delay_before_reacquire: cursor.read_u16()?,
            correlation_mag_min: cursor.read_u8()?,
            eval_amplitude_min: cursor.read_u8()?,
            percent_good_min: cursor.read_u8()?,
            mode: cursor.read_u8()?,
            error_velocity_max: cursor.read_u16()?,
            reserved: cursor.read_array::<4>()?,
            range_lsb: cursor.read_u16x4()?,
            velocity: cursor.read_i16x4()?,
            correlation: cursor.read_array::<4>()?,
            amplitude: cursor.read_array::<4>()?,
            percent_good: cursor.read_array::<4>()?,
            reference_layer: ReferenceLayer {
                min: cursor.read_u16()?,
                near: cursor.read_u16()?,
                far: cursor.read_u16()?,
                velocity: cursor.read_i16x4()?,
                correlation: cursor.read_array::<4>()?,
                intensity: cursor.read_array::<4>()?,
                percent_good: cursor.read_array::<4>()?,
            },
            max_depth: cursor.read_u16()?,
            rssi: cursor.read_array::<4>()?,
            gain: cursor.read_u8()?,
            range_msb: cursor.read_array::<4>()?,
            reserved_tail: cursor.read_array::<4>()?,
        })
    }

    /// Append the encoded record to `writer`.
    pub fn encode(&self, writer: &mut Pd0Writer) {
        let layer = &self.reference_layer;
        writer
            .u8(0x00)
            .u8(0x06)
            .u16(self.pings_per_ensemble)
            .u16(self.delay_before_reacquire)
            .u8(self.correlation_mag_min)
            .u8(self.eval_amplitude_min)
            .u8(self.percent_good_min)
            .u8(self.mode)
            .u16(self.error_velocity_max)
            .bytes(&self.reserved)
            .u16x4(&self.range_lsb)
            .i16x4(&self.velocity)
            .bytes(&self.correlation)
            .bytes(&self.amplitude)
            .bytes(&self.percent_good)
            .u16(layer.min)
            .u16(layer.near)
            .u16(layer.far)
            .i16x4(&layer.velocity)
            .bytes(&layer.correlation)
            .bytes(&layer.intensity)
            .bytes(&layer.percent_good)
            .u16(self.max_depth)
            .bytes(&self.rssi)
            .u8(self.gain)
            .bytes(&self.range_msb)
            .bytes(&self.reserved_tail);
    }

    /// Range of `beam` in centimetres, `None` for beams past the fourth.
    pub fn range_beam(&self, beam: usize) -> Option<u32> {
        let lsb = u32::from(*self.range_lsb.get(beam)?);
        let msb = u32::from(*self.range_msb.get(beam)?);
        Some(msb * RANGE_MSB_SCALE + lsb)
    }

    /// Range of `beam` in metres.
    pub fn range_m(&self, beam: usize) -> Option<f64> {
        self.range_beam(beam).map(|cm| f64::from(cm) / 100.0)
    }

    /// Store a range in centimetres, split into MSB and LSB.
    ///
    /// Ranges past `255 * 65535 + 65534` saturate.
    pub fn set_range_cm(&mut self, beam: usize, range_cm: u32) {
        if beam >= self.range_lsb.len() {
            return;
        }
        let msb = (range_cm / RANGE_MSB_SCALE).min(u32::from(u8::MAX));
        let lsb = (range_cm - msb * RANGE_MSB_SCALE).min(u32::from(u16::MAX));
        self.range_msb[beam] = msb as u8;
        self.range_lsb[beam] = lsb as u16;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BottomTrack {
        let mut bt = BottomTrack {
            pings_per_ensemble: 1,
            correlation_mag_min: 220,
            percent_good_min: 75,
            velocity: [100, -200, 300, i16::MIN],
            correlation: [1, 2, 3, 4],
            amplitude: [10, 20, 30, 40],
            percent_good: [100, 100, 0, 50],
            max_depth: 2000,
            rssi: [5, 6, 7, 8],
            gain: 1,
            ..BottomTrack::default()
        };
        bt.reference_layer.velocity = [1, 2, 3, 4];
        bt.set_range_cm(0, 12_345);
        bt.set_range_cm(1, 70_000);
        bt
    }

    #[test]
    fn test_size() {
        let mut writer = Pd0Writer::new();
        sample().encode(&mut writer);
        assert_eq!(writer.size(), BOTTOM_TRACK_SIZE);
        assert_eq!(writer.data()[..2], [0x00, 0x06]);
    }

    #[test]
    fn test_decode_encode() {
        let bt = sample();
        let mut writer = Pd0Writer::new();
        bt.encode(&mut writer);
        assert_eq!(BottomTrack::decode(writer.data(), 0).unwrap(), bt);
    }

    #[test]
    fn test_field_offsets() {
        let mut writer = Pd0Writer::new();
        sample().encode(&mut writer);
        let bytes = writer.finish();
        assert_eq!(bytes[6], 220);
        assert_eq!(&bytes[16..18], &12_345u16.to_le_bytes());
        assert_eq!(&bytes[24..26], &100i16.to_le_bytes());
        assert_eq!(bytes[32], 1);
        assert_eq!(bytes[36], 10);
        assert_eq!(bytes[40], 100);
        assert_eq!(&bytes[50..52], &1i16.to_le_bytes());
        assert_eq!(&bytes[70..72], &2000u16.to_le_bytes());
        assert_eq!(bytes[72], 5);
        assert_eq!(bytes[76], 1);
        assert_eq!(bytes[78], 1); // range MSB beam 1
    }

    #[test]
    fn test_range_split() {
        let bt = sample();
        assert_eq!(bt.range_beam(0), Some(12_345));
        assert_eq!(bt.range_msb[1], 1);
        assert_eq!(bt.range_lsb[1], (70_000u32 - 65_535) as u16);
        assert_eq!(bt.range_beam(1), Some(70_000));
        assert_eq!(bt.range_m(0), Some(123.45));
        assert_eq!(bt.range_beam(4), None);
    }

    #[test]
    fn test_truncated() {
        let data = [0x00, 0x06, 0x01];
        assert!(BottomTrack::decode(&data, 0).unwrap_err().is_truncated());
    }
}
