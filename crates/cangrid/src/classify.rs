#![forbid(unsafe_code)]

//! Cell-state classification.
//!
//! Each cell compares the current and reference bit it displays; when the bit
//! is clear in both, the used mask and (in signal view) the owning signal
//! decide between plain background, an anonymous hatch, and a signal color.
//!
//! Priority, highest first:
//!
//! | current | reference | state |
//! |:-:|:-:|---|
//! | 1 | 1 | [`CellState::SetStable`] |
//! | 1 | 0 | [`CellState::SetNew`] |
//! | 0 | 1 | [`CellState::Cleared`] |
//! | 0 | 0 | used mask / signal lookup |
//!
//! Classification is total: every cell of every layout maps to a state.

use cangrid_core::CellPos;

use crate::store::{BitPlanes, GridStore, SignalId};

/// What the grid is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GridMode {
    /// Highlight bit changes; signal identity is never resolved.
    #[default]
    ChangedBits,
    /// Color idle used bits by the signal that owns them.
    SignalView,
}

/// Visual state of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellState {
    /// Set before and now.
    SetStable,
    /// Rising edge.
    SetNew,
    /// Falling edge. Never carries signal identity.
    Cleared,
    /// Clear in both snapshots and not used by any signal.
    UnusedZero,
    /// Clear in both snapshots, used, but no signal is shown for it.
    UsedUnknownSignal,
    /// Clear in both snapshots and owned by a known signal.
    UsedSignal(SignalId),
}

impl CellState {
    /// Check if the bit is set in the current payload.
    #[inline]
    pub const fn is_set(self) -> bool {
        matches!(self, Self::SetStable | Self::SetNew)
    }

    /// Check if the bit differs between the two snapshots.
    #[inline]
    pub const fn is_change(self) -> bool {
        matches!(self, Self::SetNew | Self::Cleared)
    }

    /// Owning signal, for [`CellState::UsedSignal`] cells.
    #[inline]
    pub const fn signal(self) -> Option<SignalId> {
        match self {
            Self::UsedSignal(id) => Some(id),
            _ => None,
        }
    }
}

/// Classify a cell from its plane bits and owner.
///
/// `owner` is only consulted in [`GridMode::SignalView`] for used, idle bits.
pub fn classify_bits(planes: BitPlanes, owner: Option<SignalId>, mode: GridMode) -> CellState {
    match (planes.current, planes.reference) {
        (true, true) => CellState::SetStable,
        (true, false) => CellState::SetNew,
        (false, true) => CellState::Cleared,
        (false, false) if !planes.used => CellState::UnusedZero,
        (false, false) => match (mode, owner) {
            (GridMode::SignalView, Some(id)) => CellState::UsedSignal(id),
            _ => CellState::UsedUnknownSignal,
        },
    }
}

/// Classify the cell at `pos` in the store's active layout.
///
/// Owners without a slot in the signal table count as unassigned.
pub fn classify_cell(store: &GridStore, pos: CellPos, mode: GridMode) -> CellState {
    let addr = store.mapper().address_of(pos);
    let planes = store.bits_at(addr);
    let owner = if planes.used && mode == GridMode::SignalView {
        store.known_signal_owner(addr.index())
    } else {
        None
    };
    classify_bits(planes, owner, mode)
}
