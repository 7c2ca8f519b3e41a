// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! PD0 record model and ensemble codec.
//!
//! - [`registry`] - record identifiers
//! - [`header`] - ensemble header and offset table
//! - [`fixed_leader`], [`variable_leader`] - the two leader records
//! - [`arrays`] - depth-cell arrays
//! - [`bottom_track`] - bottom track record
//! - [`nmea`] - opaque NMEA passthrough
//! - [`ensemble`] - the complete ensemble

pub mod arrays;
pub mod bitfields;
pub mod bottom_track;
pub mod ensemble;
pub mod fixed_leader;
pub mod header;
pub mod nmea;
pub mod registry;
pub mod variable_leader;

pub use arrays::{
    CellGrid, Correlation, EchoIntensity, PercentGood, Velocity, BAD_BYTE, BAD_VELOCITY,
    PERCENT_GOOD_BEAMS,
};
pub use bitfields::{
    BeamAngle, BeamConfiguration, CoordinateTransformByte, FrequencyBand, SensorFlags,
    SystemConfiguration,
};
pub use bottom_track::{BottomTrack, ReferenceLayer, BOTTOM_TRACK_SIZE};
pub use ensemble::{Ensemble, Record};
pub use fixed_leader::{FixedLeader, FIXED_LEADER_SIZE};
pub use header::EnsembleHeader;
pub use nmea::NmeaData;
pub use registry::{id_of, kind_of, RecordKind};
pub use variable_leader::{ClockFields, VariableLeader, VARIABLE_LEADER_SIZE};
