// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core error types for pd0codec.
//!
//! Provides error types for:
//! - Ensemble header and offset table parsing
//! - Record slicing and checksum verification
//! - Encoding limits of the PD0 length fields
//! - Native-to-PD0 conversion

use thiserror::Error;

/// Errors that can occur while decoding, encoding or converting ensembles.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Pd0Error {
    /// Bytes [0,1] of the buffer are not the `0x7F 0x7F` header ID
    #[error("Invalid ensemble sentinel: expected 7f7f, found {found}")]
    InvalidSentinel {
        /// Hex rendering of the two bytes that were found
        found: String,
    },

    /// Buffer shorter than a header or record requires
    #[error("Truncated {context}: requested {requested} bytes at offset {offset}, but only {available} bytes available")]
    Truncated {
        /// What was being read
        context: String,
        /// Requested bytes
        requested: usize,
        /// Available bytes from `offset`
        available: usize,
        /// Offset in the ensemble buffer
        offset: usize,
    },

    /// The ensemble has no fixed or variable leader
    #[error("Ensemble is missing its {kind} record")]
    MissingLeader {
        /// Name of the missing leader
        kind: String,
    },

    /// Trailing checksum does not match the computed sum
    #[error("Checksum mismatch: stored {stored:#06x}, computed {computed:#06x}")]
    ChecksumMismatch {
        /// Checksum read from the buffer
        stored: u16,
        /// Checksum computed over the ensemble bytes
        computed: u16,
    },

    /// Encoded ensemble would not fit the 16-bit length and offset fields
    #[error("Ensemble too large to encode: {length} bytes exceeds {max}")]
    RecordTooLarge {
        /// Byte length the ensemble would have
        length: usize,
        /// Largest representable length
        max: usize,
    },

    /// Array record dimensions disagree with the fixed leader
    #[error("{record} is {cells} cells x {beams} beams, fixed leader requires {expected_cells} x {expected_beams}")]
    DimensionMismatch {
        /// Array record name
        record: String,
        /// Cells held by the record
        cells: usize,
        /// Beam slots held by the record
        beams: usize,
        /// Cells required by the fixed leader
        expected_cells: usize,
        /// Beam slots required by the fixed leader
        expected_beams: usize,
    },

    /// Cell grid value count does not equal cells x beams
    #[error("Malformed cell grid: {cells} cells x {beams} beams but {values} values")]
    MalformedGrid {
        /// Declared cells
        cells: usize,
        /// Declared beam slots
        beams: usize,
        /// Values present
        values: usize,
    },

    /// Native ensemble lacks a data group needed to build a leader
    #[error("Native ensemble is missing its {group} group")]
    MissingNativeGroup {
        /// Name of the missing native group
        group: String,
    },

    /// Options could not be parsed or are inconsistent
    #[error("Invalid options: {message}")]
    InvalidOptions {
        /// Error message
        message: String,
    },
}

impl Pd0Error {
    /// Create an invalid sentinel error from the two leading bytes.
    pub fn invalid_sentinel(bytes: [u8; 2]) -> Self {
        Pd0Error::InvalidSentinel {
            found: hex::encode(bytes),
        }
    }

    /// Create a truncation error.
    pub fn truncated(
        context: impl Into<String>,
        requested: usize,
        available: usize,
        offset: usize,
    ) -> Self {
        Pd0Error::Truncated {
            context: context.into(),
            requested,
            available,
            offset,
        }
    }

    /// Create a missing leader error.
    pub fn missing_leader(kind: impl Into<String>) -> Self {
        Pd0Error::MissingLeader { kind: kind.into() }
    }

    /// Create a checksum mismatch error.
    pub fn checksum_mismatch(stored: u16, computed: u16) -> Self {
        Pd0Error::ChecksumMismatch { stored, computed }
    }

    /// Create an oversized ensemble error.
    pub fn record_too_large(length: usize, max: usize) -> Self {
        Pd0Error::RecordTooLarge { length, max }
    }

    /// Create an array dimension mismatch error.
    pub fn dimension_mismatch(
        record: impl Into<String>,
        found: (usize, usize),
        expected: (usize, usize),
    ) -> Self {
        Pd0Error::DimensionMismatch {
            record: record.into(),
            cells: found.0,
            beams: found.1,
            expected_cells: expected.0,
            expected_beams: expected.1,
        }
    }

    /// Create a malformed grid error.
    pub fn malformed_grid(cells: usize, beams: usize, values: usize) -> Self {
        Pd0Error::MalformedGrid {
            cells,
            beams,
            values,
        }
    }

    /// Create a missing native group error.
    pub fn missing_native_group(group: impl Into<String>) -> Self {
        Pd0Error::MissingNativeGroup {
            group: group.into(),
        }
    }

    /// Create an invalid options error.
    pub fn invalid_options(message: impl Into<String>) -> Self {
        Pd0Error::InvalidOptions {
            message: message.into(),
        }
    }

    /// Whether the error comes from a short buffer.
    pub fn is_truncated(&self) -> bool {
        matches!(self, Pd0Error::Truncated { .. })
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            Pd0Error::InvalidSentinel { found } => vec![("found", found.clone())],
            Pd0Error::Truncated {
                context,
                requested,
                available,
                offset,
            } => vec![
                ("context", context.clone()),
                ("requested", requested.to_string()),
                ("available", available.to_string()),
                ("offset", offset.to_string()),
            ],
            Pd0Error::MissingLeader { kind } => vec![("kind", kind.clone())],
            Pd0Error::ChecksumMismatch { stored, computed } => vec![
                ("stored", format!("{stored:#06x}")),
                ("computed", format!("{computed:#06x}")),
            ],
            Pd0Error::RecordTooLarge { length, max } => {
                vec![("length", length.to_string()), ("max", max.to_string())]
            }
            Pd0Error::DimensionMismatch {
                record,
                cells,
                beams,
                expected_cells,
                expected_beams,
            } => vec![
                ("record", record.clone()),
                ("cells", cells.to_string()),
                ("beams", beams.to_string()),
                ("expected_cells", expected_cells.to_string()),
                ("expected_beams", expected_beams.to_string()),
            ],
            Pd0Error::MalformedGrid {
                cells,
                beams,
                values,
            } => vec![
                ("cells", cells.to_string()),
                ("beams", beams.to_string()),
                ("values", values.to_string()),
            ],
            Pd0Error::MissingNativeGroup { group } => vec![("group", group.clone())],
            Pd0Error::InvalidOptions { message } => vec![("message", message.clone())],
        }
    }
}

/// Result type for pd0codec operations.
pub type Result<T> = std::result::Result<T, Pd0Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_sentinel_error() {
        let err = Pd0Error::invalid_sentinel([0x12, 0xAB]);
        assert!(matches!(err, Pd0Error::InvalidSentinel { .. }));
        assert_eq!(
            err.to_string(),
            "Invalid ensemble sentinel: expected 7f7f, found 12ab"
        );
    }

    #[test]
    fn test_truncated_error() {
        let err = Pd0Error::truncated("FixedLeader", 59, 20, 10);
        assert!(err.is_truncated());
        assert_eq!(
            err.to_string(),
            "Truncated FixedLeader: requested 59 bytes at offset 10, but only 20 bytes available"
        );
    }

    #[test]
    fn test_missing_leader_error() {
        let err = Pd0Error::missing_leader("VariableLeader");
        assert_eq!(err.to_string(), "Ensemble is missing its VariableLeader record");
    }

    #[test]
    fn test_checksum_mismatch_error() {
        let err = Pd0Error::checksum_mismatch(0x1234, 0x0001);
        assert_eq!(
            err.to_string(),
            "Checksum mismatch: stored 0x1234, computed 0x0001"
        );
    }

    #[test]
    fn test_record_too_large_error() {
        let err = Pd0Error::record_too_large(70000, 65535);
        assert_eq!(
            err.to_string(),
            "Ensemble too large to encode: 70000 bytes exceeds 65535"
        );
    }

    #[test]
    fn test_dimension_mismatch_error() {
        let err = Pd0Error::dimension_mismatch("PercentGood", (2, 3), (2, 4));
        assert_eq!(
            err.to_string(),
            "PercentGood is 2 cells x 3 beams, fixed leader requires 2 x 4"
        );
        assert_eq!(err.log_fields()[0], ("record", "PercentGood".to_string()));
    }

    #[test]
    fn test_log_fields_truncated() {
        let err = Pd0Error::truncated("Velocity", 100, 50, 200);
        let fields = err.log_fields();
        assert_eq!(fields.len(), 4);
        assert_eq!(fields[0], ("context", "Velocity".to_string()));
        assert_eq!(fields[1], ("requested", "100".to_string()));
        assert_eq!(fields[2], ("available", "50".to_string()));
        assert_eq!(fields[3], ("offset", "200".to_string()));
    }

    #[test]
    fn test_log_fields_checksum() {
        let err = Pd0Error::checksum_mismatch(0x00FF, 0x0100);
        let fields = err.log_fields();
        assert_eq!(fields[0], ("stored", "0x00ff".to_string()));
        assert_eq!(fields[1], ("computed", "0x0100".to_string()));
    }

    #[test]
    fn test_log_fields_native_group() {
        let err = Pd0Error::missing_native_group("ancillary");
        let fields = err.log_fields();
        assert_eq!(fields, vec![("group", "ancillary".to_string())]);
    }

    #[test]
    fn test_error_clone() {
        let err1 = Pd0Error::invalid_options("bad strictness");
        let err2 = err1.clone();
        assert_eq!(err1, err2);
    }
}
