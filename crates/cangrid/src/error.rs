#![forbid(unsafe_code)]

//! Error type for grid store updates.
//!
//! Only plane updates can fail. Reads clamp to sentinels and the
//! classification path is total over the grid.

use std::fmt;

/// One of the three bit planes held by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Plane {
    /// Latest observed payload.
    Current,
    /// Snapshot the current payload is diffed against.
    Reference,
    /// Mask of bits assigned to some signal.
    Used,
}

impl fmt::Display for Plane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Current => "current",
            Self::Reference => "reference",
            Self::Used => "used",
        })
    }
}

/// Errors reported by [`GridStore`](crate::store::GridStore) updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// The caller's buffer holds fewer bytes than the active frame size
    /// copies. The plane is left unchanged.
    BufferTooShort {
        /// Plane being updated.
        plane: Plane,
        /// Bytes the active frame size copies.
        needed: usize,
        /// Bytes supplied.
        actual: usize,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BufferTooShort {
                plane,
                needed,
                actual,
            } => write!(
                f,
                "{plane} plane update needs {needed} bytes, buffer has {actual}"
            ),
        }
    }
}

impl std::error::Error for GridError {}

/// Standard result type for grid APIs.
pub type Result<T> = std::result::Result<T, GridError>;
