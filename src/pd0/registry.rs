// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Record identifier registry.
//!
//! Every PD0 record starts with a 2-byte little-endian identifier. This module
//! maps identifiers to [`RecordKind`] and back. The table is closed: unknown
//! identifiers resolve to [`RecordKind::Unknown`] and never fail, so newer
//! record kinds pass through decoders that do not know them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of a record inside an ensemble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RecordKind {
    /// Ensemble header (`7F 7F`)
    Header,
    /// Instrument configuration
    FixedLeader,
    /// Per-ensemble scalars
    VariableLeader,
    /// Velocity per depth cell and beam
    Velocity,
    /// Correlation magnitude per depth cell and beam
    Correlation,
    /// Echo intensity per depth cell and beam
    EchoIntensity,
    /// Percent good per depth cell
    PercentGood,
    /// Bottom track
    BottomTrack,
    /// Opaque NMEA text
    NmeaData,
    /// Identifier not in the table
    Unknown,
}

/// Identifier table as `(lsb, msb)` pairs.
const ID_TABLE: [(RecordKind, [u8; 2]); 9] = [
    (RecordKind::Header, [0x7F, 0x7F]),
    (RecordKind::FixedLeader, [0x00, 0x00]),
    (RecordKind::VariableLeader, [0x80, 0x00]),
    (RecordKind::Velocity, [0x00, 0x01]),
    (RecordKind::Correlation, [0x00, 0x02]),
    (RecordKind::EchoIntensity, [0x00, 0x03]),
    (RecordKind::PercentGood, [0x00, 0x04]),
    (RecordKind::BottomTrack, [0x00, 0x06]),
    (RecordKind::NmeaData, [0x22, 0x20]),
];

/// Resolve a record kind from its identifier bytes.
pub fn kind_of(id_lsb: u8, id_msb: u8) -> RecordKind {
    ID_TABLE
        .iter()
        .find(|(_, id)| id[0] == id_lsb && id[1] == id_msb)
        .map(|(kind, _)| *kind)
        .unwrap_or(RecordKind::Unknown)
}

/// Identifier bytes `(lsb, msb)` for a record kind, `None` for `Unknown`.
pub fn id_of(kind: RecordKind) -> Option<[u8; 2]> {
    ID_TABLE
        .iter()
        .find(|(k, _)| *k == kind)
        .map(|(_, id)| *id)
}

impl RecordKind {
    /// Identifier bytes for this kind.
    pub fn id(&self) -> Option<[u8; 2]> {
        id_of(*self)
    }

    /// Whether the kind is a depth-cell array record.
    pub fn is_array(&self) -> bool {
        matches!(
            self,
            RecordKind::Velocity
                | RecordKind::Correlation
                | RecordKind::EchoIntensity
                | RecordKind::PercentGood
        )
    }

    /// Whether the kind is one of the two leaders.
    pub fn is_leader(&self) -> bool {
        matches!(self, RecordKind::FixedLeader | RecordKind::VariableLeader)
    }

    /// Static name used in logs and errors.
    pub fn name(&self) -> &'static str {
        match self {
            RecordKind::Header => "Header",
            RecordKind::FixedLeader => "FixedLeader",
            RecordKind::VariableLeader => "VariableLeader",
            RecordKind::Velocity => "Velocity",
            RecordKind::Correlation => "Correlation",
            RecordKind::EchoIntensity => "EchoIntensity",
            RecordKind::PercentGood => "PercentGood",
            RecordKind::BottomTrack => "BottomTrack",
            RecordKind::NmeaData => "NmeaData",
            RecordKind::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
