#![forbid(unsafe_code)]

//! Core: frame layouts, the bit-to-cell mapping, and grid geometry.
//!
//! Everything here is pure arithmetic over a frame size. The richer grid
//! model (bit planes, classification, signal overlay) lives in `cangrid`.

pub mod geometry;
pub mod grid_geometry;
pub mod layout;
pub mod logging;
pub mod mapper;

pub use geometry::{CellPos, Point, Rect, Size};
pub use grid_geometry::GridGeometry;
pub use layout::{Divisions, FrameSize, MAX_FRAME_BITS, MAX_FRAME_BYTES, divisions};
pub use mapper::{BitAddress, BitGridMapper};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
