// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Native beam to PD0 slot mapping.
//!
//! The native instrument numbers its beams differently from the PD0 slot
//! order, and its instrument frame uses a different axis convention. Each
//! table maps a native beam index to a PD0 slot and a sign.

use serde::Serialize;

use crate::core::CoordinateTransform;

/// One entry of a beam map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BeamSlot {
    /// PD0 slot the native beam is written to
    pub slot: usize,
    /// Sign applied to the value
    pub sign: i8,
}

const fn slot(slot: usize, sign: i8) -> BeamSlot {
    BeamSlot { slot, sign }
}

/// 4-beam canonical order, used for everything but instrument/ship velocity.
const FOUR_BEAM_CANONICAL: [BeamSlot; 4] = [slot(3, 1), slot(2, 1), slot(0, 1), slot(1, 1)];

/// 4-beam instrument/ship profile velocity.
const FOUR_BEAM_INSTRUMENT: [BeamSlot; 4] = [slot(1, 1), slot(0, 1), slot(2, -1), slot(3, 1)];

/// 3-beam order is the identity.
const THREE_BEAM_CANONICAL: [BeamSlot; 3] = [slot(0, 1), slot(1, 1), slot(2, 1)];

/// 3-beam instrument/ship profile velocity.
const THREE_BEAM_INSTRUMENT: [BeamSlot; 3] = [slot(0, 1), slot(1, 1), slot(2, -1)];

/// 4-beam instrument/ship bottom track velocity.
const FOUR_BEAM_BT_INSTRUMENT: [BeamSlot; 4] = [slot(1, 1), slot(0, 1), slot(2, -1), slot(3, 1)];

/// 3-beam instrument/ship bottom track velocity.
const THREE_BEAM_BT_INSTRUMENT: [BeamSlot; 3] = [slot(0, 1), slot(1, 1), slot(2, -1)];

const SINGLE_BEAM: [BeamSlot; 1] = [slot(0, 1)];

/// Mapping from native beam index to PD0 slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BeamMap {
    slots: Vec<BeamSlot>,
}

impl BeamMap {
    fn from_table(table: &[BeamSlot]) -> Self {
        Self {
            slots: table.to_vec(),
        }
    }

    /// Identity map with positive signs.
    pub fn identity(beam_count: usize) -> Self {
        Self {
            slots: (0..beam_count).map(|i| slot(i, 1)).collect(),
        }
    }

    /// Order used for correlation, intensity, percent good, beam and earth
    /// velocity, and bottom track per-beam groups.
    ///
    /// Beam counts other than 1, 3 and 4 map to the identity.
    pub fn canonical(beam_count: usize) -> Self {
        match beam_count {
            4 => Self::from_table(&FOUR_BEAM_CANONICAL),
            3 => Self::from_table(&THREE_BEAM_CANONICAL),
            1 => Self::from_table(&SINGLE_BEAM),
            n => Self::identity(n),
        }
    }

    /// Profile velocity map for a frame.
    pub fn velocity(beam_count: usize, transform: CoordinateTransform) -> Self {
        if !transform.is_instrument_like() {
            return Self::canonical(beam_count);
        }
        match beam_count {
            4 => Self::from_table(&FOUR_BEAM_INSTRUMENT),
            3 => Self::from_table(&THREE_BEAM_INSTRUMENT),
            n => Self::canonical(n),
        }
    }

    /// Bottom track velocity map for a frame.
    pub fn bottom_track_velocity(beam_count: usize, transform: CoordinateTransform) -> Self {
        if !transform.is_instrument_like() {
            return Self::canonical(beam_count);
        }
        match beam_count {
            4 => Self::from_table(&FOUR_BEAM_BT_INSTRUMENT),
            3 => Self::from_table(&THREE_BEAM_BT_INSTRUMENT),
            n => Self::canonical(n),
        }
    }

    /// Number of native beams covered.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Entry for a native beam.
    pub fn get(&self, native_beam: usize) -> Option<BeamSlot> {
        self.slots.get(native_beam).copied()
    }

    /// PD0 slot for a native beam.
    pub fn slot(&self, native_beam: usize) -> Option<usize> {
        self.get(native_beam).map(|s| s.slot)
    }

    /// Native beam written to a PD0 slot.
    pub fn inverse(&self, pd0_slot: usize) -> Option<usize> {
        self.slots.iter().position(|s| s.slot == pd0_slot)
    }

    /// Iterate `(native_beam, entry)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, BeamSlot)> + '_ {
        self.slots.iter().copied().enumerate()
    }
}
