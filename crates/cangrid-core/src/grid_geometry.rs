#![forbid(unsafe_code)]

//! Pixel placement of grid cells inside a host viewport.
//!
//! The host measures its header font and passes the header strip size; this
//! module carves the remaining space into equal integer-sized sectors, one
//! per cell, and answers "which cell is under this pixel?" for clicks.
//!
//! ```text
//!  viewport.left
//!  |  header.width
//!  v<---->|<- sector ->|
//!  +------+------------+----
//!  |      |  col hdr   |        <- header.height
//!  +------+------------+----   <- origin.y
//!  | row  |  cell 0,0  | ...
//!  | hdr  |            |
//! ```
//!
//! Leftover pixels that do not fill a whole sector stay unused at the right
//! and bottom edges.

use crate::geometry::{CellPos, Point, Rect, Size};
use crate::layout::Divisions;

/// Computed pixel layout of a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GridGeometry {
    viewport: Rect,
    header: Size,
    divisions: Divisions,
    origin: Point,
    sector: Size,
}

impl GridGeometry {
    /// Lay out `divisions` inside `viewport`, reserving `header.width` pixels
    /// on the left for row headers and `header.height` on top for column
    /// headers.
    #[must_use]
    pub fn compute(viewport: Rect, header: Size, divisions: Divisions) -> Self {
        let span_x = viewport.width.saturating_sub(header.width);
        let span_y = viewport.height.saturating_sub(header.height);
        let sector = Size::new(
            span_x / u32::from(divisions.columns),
            span_y / u32::from(divisions.rows),
        );
        let origin = Point::new(
            viewport.left().saturating_add(header.width as i32),
            viewport.top().saturating_add(header.height as i32),
        );

        crate::trace!(
            sector_w = sector.width,
            sector_h = sector.height,
            columns = divisions.columns,
            rows = divisions.rows,
            "grid geometry computed"
        );

        Self {
            viewport,
            header,
            divisions,
            origin,
            sector,
        }
    }

    /// Viewport the geometry was computed for.
    #[inline]
    pub const fn viewport(&self) -> Rect {
        self.viewport
    }

    /// Divisions the geometry was computed for.
    #[inline]
    pub const fn divisions(&self) -> Divisions {
        self.divisions
    }

    /// Top-left pixel of cell (0, 0).
    #[inline]
    pub const fn origin(&self) -> Point {
        self.origin
    }

    /// Pixel size of one cell.
    #[inline]
    pub const fn sector(&self) -> Size {
        self.sector
    }

    /// Bounds of the whole cell area (excludes headers and leftover pixels).
    pub fn grid_rect(&self) -> Rect {
        Rect::new(
            self.origin.x,
            self.origin.y,
            self.sector.width * u32::from(self.divisions.columns),
            self.sector.height * u32::from(self.divisions.rows),
        )
    }

    /// Pixel bounds of a cell.
    pub fn cell_rect(&self, pos: CellPos) -> Rect {
        Rect::new(
            self.origin.x + (u32::from(pos.x) * self.sector.width) as i32,
            self.origin.y + (u32::from(pos.y) * self.sector.height) as i32,
            self.sector.width,
            self.sector.height,
        )
    }

    /// Header strip above column `x`.
    pub fn column_header_rect(&self, x: u16) -> Rect {
        Rect::new(
            self.origin.x + (u32::from(x) * self.sector.width) as i32,
            self.viewport.top(),
            self.sector.width,
            self.header.height,
        )
    }

    /// Header strip left of row `y`.
    pub fn row_header_rect(&self, y: u16) -> Rect {
        Rect::new(
            self.viewport.left(),
            self.origin.y + (u32::from(y) * self.sector.height) as i32,
            self.header.width,
            self.sector.height,
        )
    }

    /// Cell under a pixel, or `None` if the pixel is outside the cell area
    /// or the viewport is too small to hold any cells.
    pub fn hit_test(&self, point: Point) -> Option<CellPos> {
        if self.sector.is_empty() {
            return None;
        }
        let dx = point.x.checked_sub(self.origin.x)?;
        let dy = point.y.checked_sub(self.origin.y)?;
        if dx < 0 || dy < 0 {
            return None;
        }
        let x = dx as u32 / self.sector.width;
        let y = dy as u32 / self.sector.height;
        if x >= u32::from(self.divisions.columns) || y >= u32::from(self.divisions.rows) {
            return None;
        }
        Some(CellPos::new(x as u16, y as u16))
    }
}
