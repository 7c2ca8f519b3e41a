// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Variable leader record: per-ensemble scalars.
//!
//! # Layout (65 bytes)
//!
//! | Bytes | Field |
//! |-------|-------|
//! | 0-1   | ID `80 00` |
//! | 2-3   | Ensemble number |
//! | 4-10  | RTC year (2 digit), month, day, hour, minute, second, 1/100 s |
//! | 11    | Ensemble number rollover count |
//! | 12-13 | Built-in test result |
//! | 14-17 | Speed of sound (m/s), transducer depth (dm) |
//! | 18-23 | Heading (0.01°), pitch (0.01°), roll (0.01°) |
//! | 24-27 | Salinity (ppt), temperature (0.01 °C) |
//! | 28-30 | Minimum pre-ping wait (min, s, 1/100 s) |
//! | 31-33 | Heading, pitch, roll standard deviation |
//! | 34-41 | ADC channels 0-7 |
//! | 42-45 | Error status word |
//! | 46-47 | Reserved |
//! | 48-51 | Pressure (decapascals) |
//! | 52-55 | Pressure variance (decapascals) |
//! | 56    | Spare |
//! | 57-64 | Y2K RTC century, year, month, day, hour, minute, second, 1/100 s |

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::core::Result;
use crate::encoding::{Pd0Cursor, Pd0Writer};

use super::registry::RecordKind;

/// Variable leader size in bytes, including the ID.
pub const VARIABLE_LEADER_SIZE: usize = 65;

/// Ensemble numbers wrap every 65536 ensembles.
const ENSEMBLE_NUMBER_SPAN: u32 = 65536;

/// Clock fields stored as one byte each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClockFields {
    /// Year within the century (or full century for the Y2K clock)
    pub year: u8,
    /// Month (1-12)
    pub month: u8,
    /// Day of month (1-31)
    pub day: u8,
    /// Hour (0-23)
    pub hour: u8,
    /// Minute (0-59)
    pub minute: u8,
    /// Second (0-59)
    pub second: u8,
    /// Hundredths of a second (0-99)
    pub hundredths: u8,
}

/// Per-ensemble scalar record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VariableLeader {
    /// Ensemble number within the current rollover
    pub ensemble_number: u16,
    /// Real-time clock, two-digit year
    pub rtc: ClockFields,
    /// Number of times the ensemble number rolled over
    pub ensemble_rollover: u8,
    /// Built-in test result
    pub bit_result: u16,
    /// Speed of sound in m/s
    pub speed_of_sound: u16,
    /// Transducer depth in decimetres
    pub depth_of_transducer_dm: u16,
    /// Heading in 0.01°
    pub heading: u16,
    /// Pitch in 0.01°
    pub pitch: i16,
    /// Roll in 0.01°
    pub roll: i16,
    /// Salinity in parts per thousand
    pub salinity: u16,
    /// Temperature in 0.01 °C
    pub temperature: i16,
    /// Minimum pre-ping wait: minutes
    pub mpt_minutes: u8,
    /// Minimum pre-ping wait: seconds
    pub mpt_seconds: u8,
    /// Minimum pre-ping wait: hundredths
    pub mpt_hundredths: u8,
    /// Heading standard deviation (degrees)
    pub heading_std_dev: u8,
    /// Pitch standard deviation (0.1°)
    pub pitch_std_dev: u8,
    /// Roll standard deviation (0.1°)
    pub roll_std_dev: u8,
    /// ADC channels 0-7
    pub adc_channels: [u8; 8],
    /// Error status word
    pub error_status_word: u32,
    /// Reserved bytes 46-47
    pub reserved: u16,
    /// Pressure in decapascals
    pub pressure: u32,
    /// Pressure variance in decapascals
    pub pressure_variance: u32,
    /// Spare byte 56
    pub spare: u8,
    /// Y2K clock century (e.g. 20)
    pub rtc_century: u8,
    /// Y2K real-time clock, year within the century
    pub rtc_y2k: ClockFields,
}

impl VariableLeader {
    /// Record kind.
    pub const KIND: RecordKind = RecordKind::VariableLeader;

    /// Size in bytes, including the ID.
    pub const fn size() -> usize {
        VARIABLE_LEADER_SIZE
    }

    /// Decode from a slice starting at the record ID.
    pub fn decode(data: &[u8], base: usize) -> Result<Self> {
        let mut cursor = Pd0Cursor::at(data, base, "VariableLeader");
        cursor.skip(2)?;

        let ensemble_number = cursor.read_u16()?;
        let rtc = read_clock(&mut cursor)?;

        Ok(Self {
            ensemble_number,
            rtc,
            ensemble_rollover: cursor.read_u8()?,
            bit_result: cursor.read_u16()?,
            speed_of_sound: cursor.read_u16()?,
            depth_of_transducer_dm: cursor.read_u16()?,
            heading: cursor.read_u16()?,
            pitch: cursor.read_i16()?,
            roll: cursor.read_i16()?,
            salinity: cursor.read_u16()?,
            temperature: cursor.read_i16()?,
            mpt_minutes: cursor.read_u8()?,
            mpt_seconds: cursor.read_u8()?,
            mpt_hundredths: cursor.read_u8()?,
            heading_std_dev: cursor.read_u8()?,
            pitch_std_dev: cursor.read_u8()?,
            roll_std_dev: cursor.read_u8()?,
            adc_channels: cursor.read_array::<8>()?,
            error_status_word: cursor.read_u32()?,
            reserved: cursor.read_u16()?,
            pressure: cursor.read_u32()?,
            pressure_variance: cursor.read_u32()?,
            spare: cursor.read_u8()?,
            rtc_century: cursor.read_u8()?,
            rtc_y2k: read_clock(&mut cursor)?,
        })
    }

    /// Append the encoded record to `writer`.
    pub fn encode(&self, writer: &mut Pd0Writer) {
        writer.u8(0x80).u8(0x00).u16(self.ensemble_number);
        write_clock(writer, &self.rtc);
        writer
            .u8(self.ensemble_rollover)
            .u16(self.bit_result)
            .u16(self.speed_of_sound)
            .u16(self.depth_of_transducer_dm)
            .u16(self.heading)
            .i16(self.pitch)
            .i16(self.roll)
            .u16(self.salinity)
            .i16(self.temperature)
            .u8(self.mpt_minutes)
            .u8(self.mpt_seconds)
            .u8(self.mpt_hundredths)
            .u8(self.heading_std_dev)
            .u8(self.pitch_std_dev)
            .u8(self.roll_std_dev)
            .bytes(&self.adc_channels)
            .u32(self.error_status_word)
            .u16(self.reserved)
            .u32(self.pressure)
            .u32(self.pressure_variance)
            .u8(self.spare)
            .u8(self.rtc_century);
        write_clock(writer, &self.rtc_y2k);
    }

    /// Logical ensemble number including rollovers.
    ///
    /// `rollover * 65536 + raw`, plus one once the counter has rolled over.
    pub fn ensemble_number(&self) -> u32 {
        let rollover = u32::from(self.ensemble_rollover);
        let raw = u32::from(self.ensemble_number);
        if rollover > 0 {
            rollover * ENSEMBLE_NUMBER_SPAN + raw + 1
        } else {
            raw
        }
    }

    /// Split a logical ensemble number into `(raw, rollover)`.
    ///
    /// Inverse of [`ensemble_number`](Self::ensemble_number). The value 65536
    /// has no exact representation and is stored as `(65535, 0)`; values past
    /// the largest representable number saturate.
    pub fn split_ensemble_number(number: u32) -> (u16, u8) {
        if number < ENSEMBLE_NUMBER_SPAN {
            return (number as u16, 0);
        }
        let adjusted = number - 1;
        let rollover = adjusted / ENSEMBLE_NUMBER_SPAN;
        if rollover == 0 {
            return (u16::MAX, 0);
        }
        if rollover > u32::from(u8::MAX) {
            return (u16::MAX, u8::MAX);
        }
        ((adjusted % ENSEMBLE_NUMBER_SPAN) as u16, rollover as u8)
    }

    /// Set the raw number and rollover from a logical ensemble number.
    pub fn set_ensemble_number(&mut self, number: u32) {
        let (raw, rollover) = Self::split_ensemble_number(number);
        self.ensemble_number = raw;
        self.ensemble_rollover = rollover;
    }

    /// Heading in degrees.
    pub fn heading_deg(&self) -> f64 {
        f64::from(self.heading) * 0.01
    }

    /// Pitch in degrees.
    pub fn pitch_deg(&self) -> f64 {
        f64::from(self.pitch) * 0.01
    }

    /// Roll in degrees.
    pub fn roll_deg(&self) -> f64 {
        f64::from(self.roll) * 0.01
    }

    /// Temperature in °C.
    pub fn temperature_c(&self) -> f64 {
        f64::from(self.temperature) * 0.01
    }

    /// Pressure in pascals.
    pub fn pressure_pa(&self) -> f64 {
        f64::from(self.pressure) * 10.0
    }

    /// Transducer depth in metres.
    pub fn transducer_depth_m(&self) -> f64 {
        f64::from(self.depth_of_transducer_dm) / 10.0
    }

    /// Timestamp from the Y2K clock, `None` if the fields are not a valid date.
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        let year = i32::from(self.rtc_century) * 100 + i32::from(self.rtc_y2k.year);
        NaiveDate::from_ymd_opt(
            year,
            u32::from(self.rtc_y2k.month),
            u32::from(self.rtc_y2k.day),
        )?
        .and_hms_milli_opt(
            u32::from(self.rtc_y2k.hour),
            u32::from(self.rtc_y2k.minute),
            u32::from(self.rtc_y2k.second),
            u32::from(self.rtc_y2k.hundredths) * 10,
        )
    }

    /// Set both clocks from a timestamp.
    pub fn set_timestamp(&mut self, time: NaiveDateTime) {
        let year = time.year().clamp(0, 25599);
        let fields = ClockFields {
            year: (year % 100) as u8,
            month: time.month() as u8,
            day: time.day() as u8,
            hour: time.hour() as u8,
            minute: time.minute() as u8,
            second: time.second().min(59) as u8,
            hundredths: (time.nanosecond() % 1_000_000_000 / 10_000_000) as u8,
        };
        self.rtc = fields;
        self.rtc_y2k = fields;
        self.rtc_century = (year / 100) as u8;
    }
}

fn read_clock(cursor: &mut Pd0Cursor<'_>) -> Result<ClockFields> {
    Ok(ClockFields {
        year: cursor.read_u8()?,
        month: cursor.read_u8()?,
        day: cursor.read_u8()?,
        hour: cursor.read_u8()?,
        minute: cursor.read_u8()?,
        second: cursor.read_u8()?,
        hundredths: cursor.read_u8()?,
    })
}

fn write_clock(writer: &mut Pd0Writer, clock: &ClockFields) {
    writer
        .u8(clock.year)
        .u8(clock.month)
        .u8(clock.day)
        .u8(clock.hour)
        .u8(clock.minute)
        .u8(clock.second)
        .u8(clock.hundredths);
}
