#![forbid(unsafe_code)]

//! Bidirectional mapping between frame bit indices and grid cells.
//!
//! Bit 0 is the least significant bit of byte 0. Each row holds
//! `columns / 8` whole bytes, left to right, and within a byte the most
//! significant bit is drawn first. A 16-column row therefore reads
//!
//! ```text
//! x:    0 1 2 3 4 5 6 7 | 8 9 ...
//! bit:  7 6 5 4 3 2 1 0 | 15 14 ...
//! ```
//!
//! which is the "stairstep" numbering CAN tools conventionally display.
//!
//! # Invariants
//!
//! For every layout, [`BitGridMapper::bit_from_cell`] and
//! [`BitGridMapper::cell_from_bit`] are exact inverses over
//! `0..columns * rows`. Inputs outside that range are a caller bug: they
//! trip a debug assertion and otherwise produce an unspecified cell.

use crate::geometry::CellPos;
use crate::layout::{Divisions, FrameSize};

/// Byte and bit-within-byte of a frame bit.
///
/// This is the semantic address used by the bit planes and the annotation
/// table. It coincides with a grid position only through the mapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitAddress {
    /// Byte index within the frame.
    pub byte: usize,
    /// Bit within the byte, 0 = least significant.
    pub bit: u8,
}

impl BitAddress {
    /// Address of a linear bit index.
    #[inline]
    #[must_use]
    pub const fn from_index(index: u16) -> Self {
        Self {
            byte: (index / 8) as usize,
            bit: (index & 7) as u8,
        }
    }

    /// Linear bit index of this address.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u16 {
        (self.byte * 8) as u16 + self.bit as u16
    }

    /// Mask selecting this bit within its byte.
    #[inline]
    #[must_use]
    pub const fn mask(self) -> u8 {
        1 << self.bit
    }

    /// Test this bit in a byte plane. Bytes past the end of the plane read
    /// as clear.
    #[inline]
    #[must_use]
    pub fn is_set_in(self, plane: &[u8]) -> bool {
        plane.get(self.byte).is_some_and(|b| b & self.mask() != 0)
    }
}

/// Pure mapping between bit indices and grid cells for one layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BitGridMapper {
    divisions: Divisions,
}

impl BitGridMapper {
    /// Create a mapper for the given divisions.
    #[must_use]
    pub const fn new(divisions: Divisions) -> Self {
        Self { divisions }
    }

    /// Create a mapper for a frame size.
    #[must_use]
    pub const fn for_frame(size: FrameSize) -> Self {
        Self::new(size.divisions())
    }

    /// Divisions this mapper was built for.
    #[inline]
    pub const fn divisions(&self) -> Divisions {
        self.divisions
    }

    /// Number of cells (and therefore bits) in the grid.
    #[inline]
    pub const fn cell_count(&self) -> usize {
        self.divisions.cell_count()
    }

    /// Check if a cell lies inside the grid.
    #[inline]
    pub const fn contains(&self, pos: CellPos) -> bool {
        pos.x < self.divisions.columns && pos.y < self.divisions.rows
    }

    /// Semantic byte/bit address displayed at a cell.
    #[inline]
    pub fn address_of(&self, pos: CellPos) -> BitAddress {
        debug_assert!(self.contains(pos), "cell {pos:?} outside grid");
        let columns = self.divisions.columns;
        let byte = pos.y as usize * self.divisions.bytes_per_row() as usize + (pos.x / 8) as usize;
        let bit = ((columns - 1 - pos.x) & 7) as u8;
        BitAddress { byte, bit }
    }

    /// Linear bit index displayed at a cell.
    #[inline]
    pub fn bit_from_cell(&self, pos: CellPos) -> u16 {
        self.address_of(pos).index()
    }

    /// Cell that displays a linear bit index.
    #[inline]
    pub fn cell_from_bit(&self, bit: u16) -> CellPos {
        debug_assert!(
            (bit as usize) < self.cell_count(),
            "bit {bit} outside {}-cell grid",
            self.cell_count()
        );
        let columns = self.divisions.columns;
        let y = bit / columns;
        let rem = bit - columns * y;
        let x = (rem & !7) + (7 - (rem & 7));
        CellPos::new(x, y)
    }

    /// Header label for column `x`: the bit-within-byte it displays.
    #[inline]
    pub const fn column_label(&self, x: u16) -> u8 {
        ((self.divisions.columns - 1 - x) & 7) as u8
    }

    /// Header label for row `y`: the index of the first byte on that row.
    #[inline]
    pub const fn row_label(&self, y: u16) -> u16 {
        y * self.divisions.bytes_per_row()
    }

    /// Every cell in raster order (rows outer, columns inner).
    pub fn cells(&self) -> impl Iterator<Item = CellPos> + use<> {
        let Divisions { columns, rows } = self.divisions;
        (0..rows).flat_map(move |y| (0..columns).map(move |x| CellPos::new(x, y)))
    }
}
