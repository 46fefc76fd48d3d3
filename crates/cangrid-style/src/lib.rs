#![forbid(unsafe_code)]

//! Colors, fills, themes, and signal palettes for the CAN data grid.

pub mod color;
pub mod fill;
pub mod palette;
pub mod theme;

pub use color::Rgb;
pub use fill::{Fill, FillPattern};
pub use palette::{ColorSource, PaletteConfig, SeededRng, generate_color, generate_palette};
pub use theme::GridTheme;
