#![forbid(unsafe_code)]

//! CAN data grid.
//!
//! Shows a CAN or CAN-FD payload (8 to 64 bytes) as a grid with one cell per
//! bit. Each cell is classified from the current payload, a reference
//! snapshot, and a used-bit mask; in signal view, idle used bits take the
//! color of the signal that owns them and a name label marks every signal
//! run. The host draws; this crate answers what to draw where, and which bit
//! a click landed on.
//!
//! Start with [`CanDataGrid`]; the lower-level pieces ([`GridStore`],
//! [`classify_cell`], [`style_cell`], [`signal_labels`]) are public for hosts
//! that keep their own state.

pub mod classify;
pub mod config;
pub mod error;
pub mod grid;
pub mod overlay;
pub mod store;
pub mod style;

// --- Core re-exports -------------------------------------------------------

pub use cangrid_core::{
    BitAddress, BitGridMapper, CellPos, Divisions, FrameSize, GridGeometry, MAX_FRAME_BITS,
    MAX_FRAME_BYTES, Point, Rect, Size, divisions,
};

// --- Style re-exports ------------------------------------------------------

pub use cangrid_style::{
    ColorSource, Fill, FillPattern, GridTheme, PaletteConfig, Rgb, SeededRng, generate_color,
};

// --- Crate items -----------------------------------------------------------

pub use classify::{CellState, GridMode, classify_bits, classify_cell};
pub use config::GridConfig;
pub use error::{GridError, Plane, Result};
pub use grid::{CanDataGrid, GridPass};
pub use overlay::{MonospaceMetrics, SignalLabel, TextMetrics, signal_labels, signal_runs};
pub use store::{BitPlanes, DEFAULT_SIGNAL_SLOTS, GridStore, SignalId, SignalTable, TextState};
pub use style::{CellStyle, ClassifiedCell, LabelAlignment, LabelStyle, style_cell};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        CanDataGrid, CellPos, CellState, FrameSize, GridConfig, GridError, GridMode, Point, Rect,
        Result, SignalId, Size, TextState,
    };
}
