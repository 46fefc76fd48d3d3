#![forbid(unsafe_code)]

//! Frame layouts: how many grid columns and rows a frame size needs.
//!
//! Classic CAN frames carry 8 bytes; CAN-FD adds 12, 16, 20, 24, 32, 48 and
//! 64. The grid only supports the four power-of-two sizes. Each step doubles
//! the addressable bits and alternates between splitting columns and rows so
//! cells stay roughly square:
//!
//! | bytes | columns | rows |
//! |------:|--------:|-----:|
//! |     8 |       8 |    8 |
//! |    16 |      16 |    8 |
//! |    32 |      16 |   16 |
//! |    64 |      32 |   16 |
//!
//! Intermediate CAN-FD sizes reuse the next layout up. The trailing bits
//! exist in the grid but the host never populates them.

use std::fmt;

/// Largest frame payload the grid can display, in bytes.
pub const MAX_FRAME_BYTES: usize = 64;

/// Largest number of addressable bits.
pub const MAX_FRAME_BITS: usize = MAX_FRAME_BYTES * 8;

/// A supported grid frame size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub enum FrameSize {
    /// Classic CAN, 8 bytes.
    #[default]
    Bytes8,
    /// CAN-FD up to 16 bytes (covers 12).
    Bytes16,
    /// CAN-FD up to 32 bytes (covers 20 and 24).
    Bytes32,
    /// CAN-FD up to 64 bytes (covers 48).
    Bytes64,
}

impl FrameSize {
    /// Every supported size, smallest first.
    pub const ALL: [FrameSize; 4] = [
        FrameSize::Bytes8,
        FrameSize::Bytes16,
        FrameSize::Bytes32,
        FrameSize::Bytes64,
    ];

    /// Normalize a requested byte count to the smallest supported size that
    /// holds it. Zero selects 8 bytes; anything above 64 clamps to 64.
    #[must_use]
    pub const fn from_byte_count(bytes: usize) -> Self {
        if bytes <= 8 {
            Self::Bytes8
        } else if bytes <= 16 {
            Self::Bytes16
        } else if bytes <= 32 {
            Self::Bytes32
        } else {
            Self::Bytes64
        }
    }

    /// Number of payload bytes this size addresses.
    #[must_use]
    pub const fn byte_count(self) -> usize {
        match self {
            Self::Bytes8 => 8,
            Self::Bytes16 => 16,
            Self::Bytes32 => 32,
            Self::Bytes64 => 64,
        }
    }

    /// Number of addressable bits.
    #[must_use]
    pub const fn bit_count(self) -> usize {
        self.byte_count() * 8
    }

    /// Bytes copied by a plane update: the byte count rounded up to a whole
    /// number of 8-byte rows.
    #[must_use]
    pub const fn copy_len(self) -> usize {
        (self.byte_count() + 7) & !7
    }

    /// Grid divisions for this size.
    #[must_use]
    pub const fn divisions(self) -> Divisions {
        match self {
            Self::Bytes8 => Divisions::new(8, 8),
            Self::Bytes16 => Divisions::new(16, 8),
            Self::Bytes32 => Divisions::new(16, 16),
            Self::Bytes64 => Divisions::new(32, 16),
        }
    }

    /// The next size in the display cycle; 64 wraps back to 8.
    #[must_use]
    pub const fn cycle(self) -> Self {
        match self {
            Self::Bytes8 => Self::Bytes16,
            Self::Bytes16 => Self::Bytes32,
            Self::Bytes32 => Self::Bytes64,
            Self::Bytes64 => Self::Bytes8,
        }
    }
}

impl fmt::Display for FrameSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bytes", self.byte_count())
    }
}

/// Column and row counts of a grid layout.
///
/// Both axes are powers of two between 8 and 32, and `columns` is always a
/// multiple of 8 so every row holds whole bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Divisions {
    /// Cells per row.
    pub columns: u16,
    /// Rows in the grid.
    pub rows: u16,
}

impl Divisions {
    const fn new(columns: u16, rows: u16) -> Self {
        Self { columns, rows }
    }

    /// Bytes displayed on one row.
    #[inline]
    #[must_use]
    pub const fn bytes_per_row(self) -> u16 {
        self.columns / 8
    }

    /// Total number of cells.
    #[inline]
    #[must_use]
    pub const fn cell_count(self) -> usize {
        self.columns as usize * self.rows as usize
    }

    /// The larger of the two axes, used by hosts to scale label fonts.
    #[inline]
    #[must_use]
    pub const fn max_axis(self) -> u16 {
        if self.columns > self.rows {
            self.columns
        } else {
            self.rows
        }
    }
}

impl Default for Divisions {
    fn default() -> Self {
        FrameSize::default().divisions()
    }
}

/// Grid divisions for a requested byte count.
#[must_use]
pub const fn divisions(byte_count: usize) -> Divisions {
    FrameSize::from_byte_count(byte_count).divisions()
}
