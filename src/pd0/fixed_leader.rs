// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Fixed leader record: instrument configuration.
//!
//! # Layout (59 bytes)
//!
//! | Bytes | Field |
//! |-------|-------|
//! | 0-1   | ID `00 00` |
//! | 2-3   | CPU firmware version, revision |
//! | 4-5   | System configuration |
//! | 6-9   | Real/sim flag, lag length, beams, cells |
//! | 10-15 | Pings per ensemble, depth cell length (cm), blank (cm) |
//! | 16-19 | Profiling mode, low correlation threshold, code reps, %GD minimum |
//! | 20-21 | Error velocity maximum (mm/s) |
//! | 22-24 | Time between ping groups (min, s, 1/100 s) |
//! | 25    | Coordinate transform (EX) |
//! | 26-29 | Heading alignment, heading bias (0.01°) |
//! | 30-31 | Sensor source, sensors available |
//! | 32-35 | Bin 1 distance (cm), transmit pulse length (cm) |
//! | 36-39 | Reference layer start/end cell, false target threshold, spare |
//! | 40-41 | Transmit lag distance (cm) |
//! | 42-49 | CPU board serial number |
//! | 50-53 | System bandwidth, system power, spare |
//! | 54-57 | Instrument serial number |
//! | 58    | Beam angle (degrees) |

use serde::{Deserialize, Serialize};

use crate::core::Result;
use crate::encoding::{Pd0Cursor, Pd0Writer};

use super::bitfields::{CoordinateTransformByte, SensorFlags, SystemConfiguration};
use super::registry::RecordKind;

/// Fixed leader size in bytes, including the ID.
pub const FIXED_LEADER_SIZE: usize = 59;

/// Instrument configuration record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FixedLeader {
    /// CPU firmware version
    pub cpu_firmware_version: u8,
    /// CPU firmware revision
    pub cpu_firmware_revision: u8,
    /// System configuration word
    pub system_configuration: SystemConfiguration,
    /// 0 = real data, 1 = simulated
    pub real_sim_flag: u8,
    /// Lag length in transmit-pulse units
    pub lag_length: u8,
    /// Number of beams
    pub number_of_beams: u8,
    /// Number of depth cells
    pub number_of_cells: u8,
    /// Pings per ensemble
    pub pings_per_ensemble: u16,
    /// Depth cell length in centimetres
    pub depth_cell_length_cm: u16,
    /// Blank after transmit in centimetres
    pub blank_after_transmit_cm: u16,
    /// Profiling mode
    pub profiling_mode: u8,
    /// Low correlation threshold (counts)
    pub low_correlation_threshold: u8,
    /// Number of code repetitions in the transmit pulse
    pub number_of_code_repetitions: u8,
    /// Minimum percent good
    pub percent_good_minimum: u8,
    /// Error velocity maximum in mm/s
    pub error_velocity_maximum: u16,
    /// Time between ping groups: minutes
    pub tpp_minutes: u8,
    /// Time between ping groups: seconds
    pub tpp_seconds: u8,
    /// Time between ping groups: hundredths of seconds
    pub tpp_hundredths: u8,
    /// Coordinate transform (EX)
    pub coordinate_transform: CoordinateTransformByte,
    /// Heading alignment in 0.01°
    pub heading_alignment: i16,
    /// Heading bias in 0.01°
    pub heading_bias: i16,
    /// Sensor source (EZ)
    pub sensor_source: SensorFlags,
    /// Sensors available
    pub sensors_available: SensorFlags,
    /// Distance to the middle of the first depth cell in centimetres
    pub bin1_distance_cm: u16,
    /// Transmit pulse length in centimetres
    pub transmit_pulse_length_cm: u16,
    /// Reference layer averaging start cell
    pub reference_layer_start: u8,
    /// Reference layer averaging end cell
    pub reference_layer_end: u8,
    /// False target threshold
    pub false_target_threshold: u8,
    /// Spare byte 39
    pub spare_39: u8,
    /// Transmit lag distance in centimetres
    pub transmit_lag_distance_cm: u16,
    /// CPU board serial number
    pub cpu_board_serial_number: [u8; 8],
    /// System bandwidth (0 wide, 1 narrow)
    pub system_bandwidth: u16,
    /// System power level
    pub system_power: u8,
    /// Spare byte 53
    pub spare_53: u8,
    /// Instrument serial number
    pub serial_number: u32,
    /// Beam angle in degrees
    pub beam_angle: u8,
}

impl FixedLeader {
    /// Record kind.
    pub const KIND: RecordKind = RecordKind::FixedLeader;

    /// Size in bytes, including the ID.
    pub const fn size() -> usize {
        FIXED_LEADER_SIZE
    }

    /// Decode from a slice starting at the record ID.
    ///
    /// `base` is the absolute position of the slice, used in errors.
    pub fn decode(data: &[u8], base: usize) -> Result<Self> {
        let mut cursor = Pd0Cursor::at(data, base, "FixedLeader");
        cursor.skip(2)?;

        let cpu_firmware_version = cursor.read_u8()?;
        let cpu_firmware_revision = cursor.read_u8()?;
        let [config_lsb, config_msb] = cursor.read_array::<2>()?;

        Ok(Self {
            cpu_firmware_version,
            cpu_firmware_revision,
            system_configuration: SystemConfiguration::from_bytes(config_lsb, config_msb),
            real_sim_flag: cursor.read_u8()?,
            lag_length: cursor.read_u8()?,
            number_of_beams: cursor.read_u8()?,
            number_of_cells: cursor.read_u8()?,
            pings_per_ensemble: cursor.read_u16()?,
            depth_cell_length_cm: cursor.read_u16()?,
            blank_after_transmit_cm: cursor.read_u16()?,
            profiling_mode: cursor.read_u8()?,
            low_correlation_threshold: cursor.read_u8()?,
            number_of_code_repetitions: cursor.read_u8()?,
            percent_good_minimum: cursor.read_u8()?,
            error_velocity_maximum: cursor.read_u16()?,
            tpp_minutes: cursor.read_u8()?,
            tpp_seconds: cursor.read_u8()?,
            tpp_hundredths: cursor.read_u8()?,
            coordinate_transform: CoordinateTransformByte(cursor.read_u8()?),
            heading_alignment: cursor.read_i16()?,
            heading_bias: cursor.read_i16()?,
            sensor_source: SensorFlags(cursor.read_u8()?),
            sensors_available: SensorFlags(cursor.read_u8()?),
            bin1_distance_cm: cursor.read_u16()?,
            transmit_pulse_length_cm: cursor.read_u16()?,
            reference_layer_start: cursor.read_u8()?,
            reference_layer_end: cursor.read_u8()?,
            false_target_threshold: cursor.read_u8()?,
            spare_39: cursor.read_u8()?,
            transmit_lag_distance_cm: cursor.read_u16()?,
            cpu_board_serial_number: cursor.read_array::<8>()?,
            system_bandwidth: cursor.read_u16()?,
            system_power: cursor.read_u8()?,
            spare_53: cursor.read_u8()?,
            serial_number: cursor.read_u32()?,
            beam_angle: cursor.read_u8()?,
        })
    }

    /// Append the encoded record to `writer`.
    pub fn encode(&self, writer: &mut Pd0Writer) {
        writer
            .u8(0x00)
            .u8(0x00)
            .u8(self.cpu_firmware_version)
            .u8(self.cpu_firmware_revision)
            .u8(self.system_configuration.lsb)
            .u8(self.system_configuration.msb)
            .u8(self.real_sim_flag)
            .u8(self.lag_length)
            .u8(self.number_of_beams)
            .u8(self.number_of_cells)
            .u16(self.pings_per_ensemble)
            .u16(self.depth_cell_length_cm)
            .u16(self.blank_after_transmit_cm)
            .u8(self.profiling_mode)
            .u8(self.low_correlation_threshold)
            .u8(self.number_of_code_repetitions)
            .u8(self.percent_good_minimum)
            .u16(self.error_velocity_maximum)
            .u8(self.tpp_minutes)
            .u8(self.tpp_seconds)
            .u8(self.tpp_hundredths)
            .u8(self.coordinate_transform.0)
            .i16(self.heading_alignment)
            .i16(self.heading_bias)
            .u8(self.sensor_source.0)
            .u8(self.sensors_available.0)
            .u16(self.bin1_distance_cm)
            .u16(self.transmit_pulse_length_cm)
            .u8(self.reference_layer_start)
            .u8(self.reference_layer_end)
            .u8(self.false_target_threshold)
            .u8(self.spare_39)
            .u16(self.transmit_lag_distance_cm)
            .bytes(&self.cpu_board_serial_number)
            .u16(self.system_bandwidth)
            .u8(self.system_power)
            .u8(self.spare_53)
            .u32(self.serial_number)
            .u8(self.beam_angle);
    }

    /// Firmware as `(version, revision)`.
    pub fn firmware_version(&self) -> (u8, u8) {
        (self.cpu_firmware_version, self.cpu_firmware_revision)
    }

    /// Number of depth cells, as used to size the array records.
    pub fn cell_count(&self) -> usize {
        self.number_of_cells as usize
    }

    /// Number of beams, as used to size the array records.
    pub fn beam_count(&self) -> usize {
        self.number_of_beams as usize
    }

    /// Depth cell length in metres.
    pub fn depth_cell_length_m(&self) -> f64 {
        f64::from(self.depth_cell_length_cm) / 100.0
    }

    /// Blank after transmit in metres.
    pub fn blank_m(&self) -> f64 {
        f64::from(self.blank_after_transmit_cm) / 100.0
    }

    /// Distance to the middle of the first depth cell in metres.
    pub fn bin1_distance_m(&self) -> f64 {
        f64::from(self.bin1_distance_cm) / 100.0
    }

    /// Heading alignment in degrees.
    pub fn heading_alignment_deg(&self) -> f64 {
        f64::from(self.heading_alignment) * 0.01
    }

    /// Heading bias in degrees.
    pub fn heading_bias_deg(&self) -> f64 {
        f64::from(self.heading_bias) * 0.01
    }

    /// Time between ping groups in seconds.
    pub fn time_between_ping_groups_s(&self) -> f64 {
        f64::from(self.tpp_minutes) * 60.0
            + f64::from(self.tpp_seconds)
            + f64::from(self.tpp_hundredths) / 100.0
    }
}
