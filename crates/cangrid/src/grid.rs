#![forbid(unsafe_code)]

//! The host-facing grid.
//!
//! [`CanDataGrid`] bundles the store with everything a display needs between
//! frames: the mode, theme, palette settings, the random source for signal
//! colors, and the last pixel layout. A redraw goes through [`GridPass`],
//! which generates signal colors first (if due) and then borrows the grid
//! immutably, so colors cannot change while cells are being classified.
//!
//! # Example
//!
//! ```
//! use cangrid::{CanDataGrid, CellPos, CellState, GridMode};
//!
//! let mut grid = CanDataGrid::new();
//! grid.update_current(&[0x01, 0, 0, 0, 0, 0, 0, 0]).unwrap();
//!
//! let pass = grid.pass();
//! assert_eq!(pass.cell(CellPos::new(7, 0)).state, CellState::SetNew);
//! assert_eq!(pass.mode(), GridMode::ChangedBits);
//! ```

use std::fmt;

use cangrid_core::{BitGridMapper, CellPos, Divisions, FrameSize, GridGeometry, Point, Rect, Size};
use cangrid_style::{ColorSource, GridTheme, PaletteConfig, Rgb, SeededRng};

use crate::classify::{CellState, GridMode, classify_cell};
use crate::config::GridConfig;
use crate::error::Result;
use crate::overlay::{SignalLabel, TextMetrics, signal_labels};
use crate::store::{GridStore, SignalId, TextState};
use crate::style::{ClassifiedCell, style_cell};

/// A CAN data grid: bit planes, signals, and display state.
pub struct CanDataGrid {
    store: GridStore,
    mode: GridMode,
    theme: GridTheme,
    palette: PaletteConfig,
    color_source: Box<dyn ColorSource>,
    viewport: Option<(Rect, Size)>,
    geometry: Option<GridGeometry>,
}

impl fmt::Debug for CanDataGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CanDataGrid")
            .field("frame_size", &self.store.frame_size())
            .field("mode", &self.mode)
            .field("signals", &self.store.signals().len())
            .field("geometry", &self.geometry)
            .finish_non_exhaustive()
    }
}

impl Default for CanDataGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl CanDataGrid {
    /// Create a grid with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(GridConfig::default())
    }

    /// Create a grid from a configuration.
    #[must_use]
    pub fn with_config(config: GridConfig) -> Self {
        let mut store = GridStore::with_signal_slots(config.signal_slots);
        store.set_frame_size(config.frame_bytes);
        let color_source: Box<dyn ColorSource> = match config.seed {
            Some(seed) => Box::new(SeededRng::new(seed)),
            None => Box::new(SeededRng::from_clock()),
        };
        Self {
            store,
            mode: config.mode,
            theme: config.theme,
            palette: config.palette,
            color_source,
            viewport: None,
            geometry: None,
        }
    }

    /// Replace the random source used for signal colors.
    #[must_use]
    pub fn with_color_source(mut self, source: impl ColorSource + 'static) -> Self {
        self.color_source = Box::new(source);
        self
    }

    /// Underlying store.
    #[inline]
    pub fn store(&self) -> &GridStore {
        &self.store
    }

    /// Active theme.
    #[inline]
    pub fn theme(&self) -> &GridTheme {
        &self.theme
    }

    /// Replace the theme.
    pub fn set_theme(&mut self, theme: GridTheme) {
        self.theme = theme;
    }

    // ── Mode ────────────────────────────────────────────────────────

    /// Current display mode.
    #[inline]
    pub fn mode(&self) -> GridMode {
        self.mode
    }

    /// Switch the display mode.
    pub fn set_mode(&mut self, mode: GridMode) {
        self.mode = mode;
    }

    // ── Frame size ──────────────────────────────────────────────────

    /// Select the layout for a requested byte count; returns the normalized
    /// size.
    pub fn set_frame_size(&mut self, byte_count: usize) -> FrameSize {
        self.store.set_frame_size(byte_count)
    }

    /// Active frame size.
    #[inline]
    pub fn frame_size(&self) -> FrameSize {
        self.store.frame_size()
    }

    /// Advance to the next larger layout, wrapping from 64 back to 8.
    pub fn cycle_frame_size(&mut self) -> FrameSize {
        let next = self.store.frame_size().cycle();
        self.store.set_frame_size(next.byte_count())
    }

    /// Grid divisions of the active layout.
    #[inline]
    pub fn divisions(&self) -> Divisions {
        self.store.frame_size().divisions()
    }

    /// Mapper for the active layout.
    #[inline]
    pub fn mapper(&self) -> BitGridMapper {
        self.store.mapper()
    }

    /// Cell showing `bit` in the active layout.
    pub fn cell_from_bit(&self, bit: u16) -> CellPos {
        self.store.mapper().cell_from_bit(bit)
    }

    /// Bit shown at `pos` in the active layout.
    pub fn bit_from_cell(&self, pos: CellPos) -> u16 {
        self.store.mapper().bit_from_cell(pos)
    }

    // ── Frame data ──────────────────────────────────────────────────

    /// Replace the current payload.
    pub fn update_current(&mut self, bytes: &[u8]) -> Result<()> {
        self.store.update_current(bytes)
    }

    /// Replace the reference snapshot.
    pub fn update_reference(&mut self, bytes: &[u8]) -> Result<()> {
        self.store.update_reference(bytes)
    }

    /// Replace the used-bit mask.
    pub fn update_used_mask(&mut self, bytes: &[u8]) -> Result<()> {
        self.store.update_used_mask(bytes)
    }

    // ── Signals ─────────────────────────────────────────────────────

    /// Assign the signal owning `bit`; `None` unassigns it.
    pub fn set_signal_owner(&mut self, bit: u16, signal: Option<SignalId>) {
        self.store.set_signal_owner(bit, signal);
    }

    /// Signal owning `bit`.
    pub fn signal_owner(&self, bit: u16) -> Option<SignalId> {
        self.store.signal_owner(bit)
    }

    /// Unassign every bit.
    pub fn clear_signal_owners(&mut self) {
        self.store.clear_signal_owners();
    }

    /// Reload the signal name table. Colors regenerate on the next signal-view
    /// pass.
    pub fn set_signal_names<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.store.set_signal_names(names);
    }

    /// Name one signal slot.
    pub fn set_signal_name(&mut self, index: usize, name: impl Into<String>) {
        self.store.set_signal_name(index, name);
    }

    /// Reset the name table.
    pub fn clear_signal_names(&mut self) {
        self.store.clear_signal_names();
    }

    /// Name of a signal.
    pub fn signal_name(&self, id: SignalId) -> Option<&str> {
        self.store.signals().name(id)
    }

    /// Generated color of a signal.
    pub fn signal_color(&self, id: SignalId) -> Option<Rgb> {
        self.store.signals().color(id)
    }

    // ── Annotations ─────────────────────────────────────────────────

    /// Set the label annotation of `bit`.
    pub fn set_cell_annotation(&mut self, bit: u16, state: TextState) {
        self.store.set_cell_annotation(bit, state);
    }

    /// Label annotation of `bit`.
    pub fn cell_annotation(&self, bit: u16) -> TextState {
        self.store.cell_annotation(bit)
    }

    // ── Geometry ────────────────────────────────────────────────────

    /// Lay the grid out in `viewport` with `header` pixels reserved for the
    /// row (left) and column (top) headers. The result is kept for clicks.
    pub fn layout(&mut self, viewport: Rect, header: Size) -> GridGeometry {
        let geometry = GridGeometry::compute(viewport, header, self.divisions());
        self.viewport = Some((viewport, header));
        self.geometry = Some(geometry);
        geometry
    }

    /// Last computed layout, if the grid has been laid out.
    #[inline]
    pub fn geometry(&self) -> Option<GridGeometry> {
        self.geometry
    }

    /// Bit under a clicked pixel, or `None` if the click misses the cells or
    /// the grid was never laid out.
    pub fn click(&mut self, point: Point) -> Option<u16> {
        let (viewport, header) = self.viewport?;
        let geometry = match self.geometry {
            Some(g) if g.divisions() == self.divisions() => g,
            _ => self.layout(viewport, header),
        };
        let pos = geometry.hit_test(point)?;
        let bit = self.bit_from_cell(pos);
        cangrid_core::debug!(x = pos.x, y = pos.y, bit, "cell clicked");
        Some(bit)
    }

    // ── Classification ──────────────────────────────────────────────

    /// Generate signal colors if the grid is in signal view and names exist
    /// without colors. Returns whether colors were generated.
    pub fn prepare_colors(&mut self) -> bool {
        if self.mode != GridMode::SignalView {
            return false;
        }
        self.store
            .ensure_signal_colors(&self.palette, &mut self.color_source)
    }

    /// Classify one cell with the current mode. Colors are not generated.
    pub fn classify(&self, pos: CellPos) -> CellState {
        classify_cell(&self.store, pos, self.mode)
    }

    /// Start a redraw: generate colors if due, then freeze the grid for
    /// reading.
    pub fn pass(&mut self) -> GridPass<'_> {
        self.prepare_colors();
        GridPass {
            store: &self.store,
            mode: self.mode,
            theme: &self.theme,
        }
    }
}

/// Read-only view of a grid for one redraw.
#[derive(Debug, Clone, Copy)]
pub struct GridPass<'a> {
    store: &'a GridStore,
    mode: GridMode,
    theme: &'a GridTheme,
}

impl<'a> GridPass<'a> {
    /// Mode of this pass.
    #[inline]
    pub fn mode(&self) -> GridMode {
        self.mode
    }

    /// Divisions of this pass.
    #[inline]
    pub fn divisions(&self) -> Divisions {
        self.store.mapper().divisions()
    }

    /// Classify and style one cell.
    pub fn cell(&self, pos: CellPos) -> ClassifiedCell {
        style_cell(self.store, pos, self.mode, self.theme)
    }

    /// Every cell in raster order.
    pub fn cells(&self) -> Vec<ClassifiedCell> {
        let span = cangrid_core::debug_span!(
            "classify_pass",
            columns = self.divisions().columns,
            rows = self.divisions().rows
        );
        let _guard = span.enter();
        self.store
            .mapper()
            .cells()
            .map(|pos| self.cell(pos))
            .collect()
    }

    /// Header labels above each column (bit within byte).
    pub fn column_headers(&self) -> impl Iterator<Item = (u16, u8)> + 'a {
        let mapper = self.store.mapper();
        (0..mapper.divisions().columns).map(move |x| (x, mapper.column_label(x)))
    }

    /// Header labels left of each row (first byte of the row).
    pub fn row_headers(&self) -> impl Iterator<Item = (u16, u16)> + 'a {
        let mapper = self.store.mapper();
        (0..mapper.divisions().rows).map(move |y| (y, mapper.row_label(y)))
    }

    /// Signal name labels for cells `cell_width` pixels wide.
    pub fn signal_labels(&self, cell_width: u32, metrics: &dyn TextMetrics) -> Vec<SignalLabel> {
        signal_labels(self.store, cell_width, metrics)
    }
}
