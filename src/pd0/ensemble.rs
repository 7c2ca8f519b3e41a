// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Ensemble aggregate: decode and encode of a complete PD0 ensemble.
//!
//! Decoding runs in two phases. The offset table is scanned and both leaders
//! are decoded first, then the remaining records are decoded with the cell
//! and beam counts taken from the fixed leader. Encoding lays records out in
//! order (fixed leader, variable leader, then the data records), builds the
//! offset table from their sizes and appends the spare bytes and checksum.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::{DecodeOptions, Pd0Error, Result};
use crate::encoding::{checksum, verify_checksum, Pd0Writer};

use super::arrays::{Correlation, EchoIntensity, PercentGood, Velocity, PERCENT_GOOD_BEAMS};
use super::bottom_track::BottomTrack;
use super::fixed_leader::FixedLeader;
use super::header::{EnsembleHeader, TRAILER_SPARE};
use super::nmea::NmeaData;
use super::registry::{kind_of, RecordKind};
use super::variable_leader::VariableLeader;

/// One record of an ensemble.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Record {
    /// Instrument configuration
    FixedLeader(FixedLeader),
    /// Per-ensemble scalars
    VariableLeader(VariableLeader),
    /// Velocity array
    Velocity(Velocity),
    /// Correlation array
    Correlation(Correlation),
    /// Echo intensity array
    EchoIntensity(EchoIntensity),
    /// Percent good array
    PercentGood(PercentGood),
    /// Bottom track
    BottomTrack(BottomTrack),
    /// Opaque NMEA text
    NmeaData(NmeaData),
}

impl Record {
    /// Kind of this record.
    pub fn kind(&self) -> RecordKind {
        match self {
            Record::FixedLeader(_) => RecordKind::FixedLeader,
            Record::VariableLeader(_) => RecordKind::VariableLeader,
            Record::Velocity(_) => RecordKind::Velocity,
            Record::Correlation(_) => RecordKind::Correlation,
            Record::EchoIntensity(_) => RecordKind::EchoIntensity,
            Record::PercentGood(_) => RecordKind::PercentGood,
            Record::BottomTrack(_) => RecordKind::BottomTrack,
            Record::NmeaData(_) => RecordKind::NmeaData,
        }
    }

    /// Encoded size including the ID.
    pub fn size(&self) -> usize {
        match self {
            Record::FixedLeader(_) => FixedLeader::size(),
            Record::VariableLeader(_) => VariableLeader::size(),
            Record::Velocity(r) => r.size(),
            Record::Correlation(r) => r.size(),
            Record::EchoIntensity(r) => r.size(),
            Record::PercentGood(r) => r.size(),
            Record::BottomTrack(_) => BottomTrack::size(),
            Record::NmeaData(r) => r.size(),
        }
    }

    /// `(cells, beam slots)` of an array record, `None` for the others.
    pub fn grid_dimensions(&self) -> Option<(usize, usize)> {
        match self {
            Record::Velocity(r) => Some(r.grid.dimensions()),
            Record::Correlation(r) => Some(r.grid.dimensions()),
            Record::EchoIntensity(r) => Some(r.grid.dimensions()),
            Record::PercentGood(r) => Some(r.grid.dimensions()),
            _ => None,
        }
    }

    /// Append the encoded record to `writer`.
    pub fn encode(&self, writer: &mut Pd0Writer) {
        match self {
            Record::FixedLeader(r) => r.encode(writer),
            Record::VariableLeader(r) => r.encode(writer),
            Record::Velocity(r) => r.encode(writer),
            Record::Correlation(r) => r.encode(writer),
            Record::EchoIntensity(r) => r.encode(writer),
            Record::PercentGood(r) => r.encode(writer),
            Record::BottomTrack(r) => r.encode(writer),
            Record::NmeaData(r) => r.encode(writer),
        }
    }
}

/// A complete PD0 ensemble.
///
/// Always holds exactly one fixed leader and one variable leader; every other
/// kind appears at most once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ensemble {
    fixed_leader: FixedLeader,
    variable_leader: VariableLeader,
    records: Vec<Record>,
}

/// Offset table entry located during the first decode phase.
struct Located {
    kind: RecordKind,
    start: usize,
    end: usize,
}

impl Ensemble {
    /// Create an ensemble from its two leaders.
    pub fn new(fixed_leader: FixedLeader, variable_leader: VariableLeader) -> Self {
        Self {
            fixed_leader,
            variable_leader,
            records: Vec::new(),
        }
    }

    /// Add a record, replacing any record of the same kind.
    ///
    /// Array dimensions are checked against the fixed leader by
    /// [`validate`](Self::validate) when the ensemble is encoded.
    pub fn with_record(mut self, record: Record) -> Self {
        self.insert(record);
        self
    }

    fn insert(&mut self, record: Record) {
        match record {
            Record::FixedLeader(r) => self.fixed_leader = r,
            Record::VariableLeader(r) => self.variable_leader = r,
            other => {
                let kind = other.kind();
                match self.records.iter_mut().find(|r| r.kind() == kind) {
                    Some(slot) => *slot = other,
                    None => self.records.push(other),
                }
            }
        }
    }

    /// Fixed leader.
    pub fn fixed_leader(&self) -> &FixedLeader {
        &self.fixed_leader
    }

    /// Variable leader.
    pub fn variable_leader(&self) -> &VariableLeader {
        &self.variable_leader
    }

    /// Data records after the leaders, in encode order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Record kinds in encode order, leaders first.
    pub fn kinds(&self) -> Vec<RecordKind> {
        let mut kinds = vec![RecordKind::FixedLeader, RecordKind::VariableLeader];
        kinds.extend(self.records.iter().map(Record::kind));
        kinds
    }

    /// Whether a record of `kind` is present.
    pub fn contains(&self, kind: RecordKind) -> bool {
        self.kinds().contains(&kind)
    }

    /// Depth cells per array record.
    pub fn cell_count(&self) -> usize {
        self.fixed_leader.cell_count()
    }

    /// Beams per array record.
    pub fn beam_count(&self) -> usize {
        self.fixed_leader.beam_count()
    }

    /// Logical ensemble number.
    pub fn ensemble_number(&self) -> u32 {
        self.variable_leader.ensemble_number()
    }

    /// Velocity array, if present.
    pub fn velocity(&self) -> Option<&Velocity> {
        self.records.iter().find_map(|r| match r {
            Record::Velocity(v) => Some(v),
            _ => None,
        })
    }

    /// Correlation array, if present.
    pub fn correlation(&self) -> Option<&Correlation> {
        self.records.iter().find_map(|r| match r {
            Record::Correlation(v) => Some(v),
            _ => None,
        })
    }

    /// Echo intensity array, if present.
    pub fn echo_intensity(&self) -> Option<&EchoIntensity> {
        self.records.iter().find_map(|r| match r {
            Record::EchoIntensity(v) => Some(v),
            _ => None,
        })
    }

    /// Percent good array, if present.
    pub fn percent_good(&self) -> Option<&PercentGood> {
        self.records.iter().find_map(|r| match r {
            Record::PercentGood(v) => Some(v),
            _ => None,
        })
    }

    /// Bottom track record, if present.
    pub fn bottom_track(&self) -> Option<&BottomTrack> {
        self.records.iter().find_map(|r| match r {
            Record::BottomTrack(v) => Some(v),
            _ => None,
        })
    }

    /// NMEA record, if present.
    pub fn nmea(&self) -> Option<&NmeaData> {
        self.records.iter().find_map(|r| match r {
            Record::NmeaData(v) => Some(v),
            _ => None,
        })
    }

    /// Check every array record against the fixed leader.
    ///
    /// Velocity, correlation and echo intensity must be `cells x beams`;
    /// percent good must be `cells x 4`.
    pub fn validate(&self) -> Result<()> {
        let cells = self.cell_count();
        let beams = self.beam_count();
        for record in &self.records {
            let Some(found) = record.grid_dimensions() else {
                continue;
            };
            let expected = match record {
                Record::PercentGood(_) => (cells, PERCENT_GOOD_BEAMS),
                _ => (cells, beams),
            };
            if found != expected {
                return Err(Pd0Error::dimension_mismatch(
                    record.kind().name(),
                    found,
                    expected,
                ));
            }
        }
        Ok(())
    }

    /// Build the header for the current records.
    pub fn header(&self) -> Result<EnsembleHeader> {
        self.validate()?;
        let mut sizes = vec![FixedLeader::size(), VariableLeader::size()];
        sizes.extend(self.records.iter().map(Record::size));
        EnsembleHeader::from_sizes(&sizes)
    }

    /// Encode the ensemble, including the trailing checksum.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let header = self.header()?;
        let mut writer = Pd0Writer::with_capacity(header.ensemble_len());

        header.encode(&mut writer);
        self.fixed_leader.encode(&mut writer);
        self.variable_leader.encode(&mut writer);
        for record in &self.records {
            record.encode(&mut writer);
        }
        writer.bytes(&TRAILER_SPARE);

        let sum = checksum(writer.data(), writer.size());
        writer.u16(sum);

        tracing::trace!(
            ensemble = self.ensemble_number(),
            records = header.record_count(),
            bytes = writer.size(),
            "Encoded ensemble"
        );
        Ok(writer.finish())
    }

    /// Decode with default (lenient) options.
    pub fn decode(buffer: &[u8]) -> Result<Self> {
        Self::decode_with(buffer, &DecodeOptions::default())
    }

    /// Decode with explicit options.
    pub fn decode_with(buffer: &[u8], options: &DecodeOptions) -> Result<Self> {
        let header = EnsembleHeader::decode(buffer)?;
        if options.verify_checksum {
            verify_checksum(buffer, usize::from(header.total_byte_length))?;
        }

        let located = Self::locate(buffer, &header, options)?;

        // Phase 1: leaders.
        let mut fixed_leader = None;
        let mut variable_leader = None;
        for entry in &located {
            let slice = &buffer[entry.start..];
            let decoded = match entry.kind {
                RecordKind::FixedLeader => {
                    FixedLeader::decode(slice, entry.start).map(|r| fixed_leader = Some(r))
                }
                RecordKind::VariableLeader => {
                    VariableLeader::decode(slice, entry.start).map(|r| variable_leader = Some(r))
                }
                _ => continue,
            };
            Self::check(decoded, entry, options)?;
        }

        let fixed_leader =
            fixed_leader.ok_or_else(|| Pd0Error::missing_leader(RecordKind::FixedLeader.name()))?;
        let variable_leader = variable_leader
            .ok_or_else(|| Pd0Error::missing_leader(RecordKind::VariableLeader.name()))?;

        // Phase 2: records sized by the fixed leader.
        let cells = fixed_leader.cell_count();
        let beams = fixed_leader.beam_count();
        let mut ensemble = Self::new(fixed_leader, variable_leader);

        for entry in &located {
            let slice = &buffer[entry.start..];
            let base = entry.start;
            let record = match entry.kind {
                RecordKind::Velocity => {
                    Velocity::decode(slice, base, cells, beams).map(Record::Velocity)
                }
                RecordKind::Correlation => {
                    Correlation::decode(slice, base, cells, beams).map(Record::Correlation)
                }
                RecordKind::EchoIntensity => {
                    EchoIntensity::decode(slice, base, cells, beams).map(Record::EchoIntensity)
                }
                RecordKind::PercentGood => {
                    PercentGood::decode(slice, base, cells).map(Record::PercentGood)
                }
                RecordKind::BottomTrack => BottomTrack::decode(slice, base).map(Record::BottomTrack),
                RecordKind::NmeaData => {
                    NmeaData::decode(slice, base, entry.end - entry.start).map(Record::NmeaData)
                }
                _ => continue,
            };
            if let Some(record) = Self::check(record, entry, options)? {
                tracing::trace!(kind = %entry.kind, offset = entry.start, "Decoded record");
                ensemble.insert(record);
            }
        }

        tracing::debug!(
            ensemble = ensemble.ensemble_number(),
            cells,
            beams,
            records = header.record_count(),
            "Decoded ensemble"
        );
        Ok(ensemble)
    }

    /// Resolve every offset table entry to a kind and byte span.
    fn locate(
        buffer: &[u8],
        header: &EnsembleHeader,
        options: &DecodeOptions,
    ) -> Result<Vec<Located>> {
        let mut located = Vec::with_capacity(header.record_count());
        for index in 0..header.record_count() {
            let Some((start, end)) = header.record_span(index) else {
                continue;
            };
            if start + 2 > buffer.len() {
                let available = buffer.len().saturating_sub(start);
                let err = Pd0Error::truncated("record ID", 2, available, start);
                if options.is_strict() {
                    return Err(err);
                }
                warn!(
                    context = "ensemble_decode",
                    index,
                    offset = start,
                    error = %err,
                    "Skipping record outside the buffer"
                );
                continue;
            }

            let kind = kind_of(buffer[start], buffer[start + 1]);
            match kind {
                RecordKind::Unknown | RecordKind::Header => {
                    tracing::debug!(
                        id = %hex::encode(&buffer[start..start + 2]),
                        offset = start,
                        "Skipping unknown record"
                    );
                }
                _ => located.push(Located { kind, start, end }),
            }
        }
        Ok(located)
    }

    /// Apply the strictness policy to a record decode result.
    fn check<T>(result: Result<T>, entry: &Located, options: &DecodeOptions) -> Result<Option<T>> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(err) if options.is_strict() => Err(err),
            Err(err) => {
                warn!(
                    context = "ensemble_decode",
                    kind = %entry.kind,
                    offset = entry.start,
                    error = %err,
                    "Skipping truncated record"
                );
                Ok(None)
            }
        }
    }

    /// Full encoded length of the ensemble starting at `buffer[0]`.
    pub fn peek_len(buffer: &[u8]) -> Result<usize> {
        EnsembleHeader::decode(buffer).map(|h| h.ensemble_len())
    }
}
