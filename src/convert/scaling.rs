// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Native to PD0 unit scaling.
//!
//! Scaling never fails: out-of-range results saturate and non-finite inputs
//! map to the PD0 bad value of the target field.

use crate::encoding::scalar::{clamp_to_u8, round_nearest};
use crate::native::is_bad_velocity;
use crate::pd0::{BAD_BYTE, BAD_VELOCITY};

/// Largest magnitude a valid PD0 velocity may take.
const VELOCITY_LIMIT: f64 = i16::MAX as f64;

/// Velocity in m/s to signed mm/s.
///
/// The native bad sentinel and non-finite values become [`BAD_VELOCITY`].
/// Valid values saturate at ±32767 so they never alias the sentinel.
pub fn velocity(value: f64, sign: i8) -> i16 {
    if is_bad_velocity(value) || !value.is_finite() {
        return BAD_VELOCITY;
    }
    let scaled = round_nearest(value * 1000.0) * f64::from(sign);
    if scaled.abs() > VELOCITY_LIMIT {
        tracing::warn!(
            context = "velocity_scaling",
            value,
            "Velocity out of range, saturating"
        );
    }
    scaled.clamp(-VELOCITY_LIMIT, VELOCITY_LIMIT) as i16
}

/// Correlation divisor for a code repeat count.
///
/// `(repeats - 1) / repeats`, with a repeat count of 0 treated as 1 and a
/// divisor of 0 treated as 1.
pub fn correlation_divisor(code_repeats: u16) -> f64 {
    let repeats = f64::from(code_repeats.max(1));
    let n = (repeats - 1.0) / repeats;
    if n == 0.0 {
        1.0
    } else {
        n
    }
}

/// Normalized correlation to PD0 counts.
pub fn correlation(value: f64, code_repeats: u16) -> u8 {
    if !value.is_finite() {
        return BAD_BYTE;
    }
    clamp_to_u8((value * 128.0) / correlation_divisor(code_repeats))
}

/// Amplitude in dB to PD0 counts (0.5 dB per count).
pub fn amplitude(value: f64) -> u8 {
    if !value.is_finite() {
        return BAD_BYTE;
    }
    clamp_to_u8(value * 2.0)
}

/// Good ping count to percent good.
///
/// A ping count of 0 yields the bad value.
pub fn percent_good(good_pings: f64, pings: u16) -> u8 {
    if pings == 0 || !good_pings.is_finite() {
        return BAD_BYTE;
    }
    clamp_to_u8((good_pings * 100.0) / f64::from(pings))
}

/// Range in metres to centimetres, split into `(msb, lsb)`.
pub fn range_split(range_m: f64) -> (u8, u16) {
    let cm = if range_m.is_finite() {
        round_nearest(range_m * 100.0).max(0.0)
    } else {
        0.0
    };
    let msb = (cm / 65535.0).floor().min(f64::from(u8::MAX));
    let lsb = (cm - msb * 65535.0).clamp(0.0, f64::from(u16::MAX));
    (msb as u8, lsb as u16)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::native::BAD_VELOCITY as NATIVE_BAD;

    #[test]
    fn test_velocity() {
        assert_eq!(velocity(1.2346, 1), 1235);
        assert_eq!(velocity(1.2346, -1), -1235);
        assert_eq!(velocity(-0.5, 1), -500);
        assert_eq!(velocity(0.0, -1), 0);
    }

    #[test]
    fn test_velocity_bad_and_saturation() {
        assert_eq!(velocity(NATIVE_BAD, 1), BAD_VELOCITY);
        assert_eq!(velocity(NATIVE_BAD, -1), BAD_VELOCITY);
        assert_eq!(velocity(f64::NAN, 1), BAD_VELOCITY);
        assert_eq!(velocity(50.0, 1), 32767);
        assert_eq!(velocity(50.0, -1), -32767);
    }

    #[test]
    fn test_correlation_divisor() {
        assert_eq!(correlation_divisor(0), 1.0);
        assert_eq!(correlation_divisor(1), 1.0);
        assert_eq!(correlation_divisor(2), 0.5);
        assert_eq!(correlation_divisor(4), 0.75);
    }

    #[test]
    fn test_correlation() {
        assert_eq!(correlation(0.5, 1), 64);
        assert_eq!(correlation(0.25, 2), 64);
        assert_eq!(correlation(1.0, 2), 255);
        assert_eq!(correlation(0.0, 0), 0);
    }

    #[test]
    fn test_amplitude() {
        assert_eq!(amplitude(40.25), 81);
        assert_eq!(amplitude(200.0), 255);
        assert_eq!(amplitude(-3.0), 0);
    }

    #[test]
    fn test_percent_good() {
        assert_eq!(percent_good(5.0, 10), 50);
        assert_eq!(percent_good(10.0, 10), 100);
        assert_eq!(percent_good(30.0, 10), 255);
        assert_eq!(percent_good(3.0, 0), BAD_BYTE);
    }

    #[test]
    fn test_range_split() {
        assert_eq!(range_split(123.45), (0, 12_345));
        assert_eq!(range_split(700.0), (1, 4_465));
        assert_eq!(range_split(-1.0), (0, 0));
    }
}
