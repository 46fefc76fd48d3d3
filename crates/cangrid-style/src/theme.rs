//! Semantic color slots for bit-grid cells and labels.
//!
//! The defaults follow the long-standing convention of CAN bit viewers:
//! black for bits that stayed set, green for rising edges, red for falling
//! edges, white for idle padding, and a gray hatch for bits that belong to
//! some signal the view cannot name.
//!
//! # Example
//! ```
//! use cangrid_style::{GridTheme, Rgb};
//!
//! let theme = GridTheme {
//!     cleared: Rgb::new(200, 40, 40),
//!     ..GridTheme::default()
//! };
//! assert_eq!(theme.cleared_fill().color, Rgb::new(200, 40, 40));
//! ```

use crate::color::Rgb;
use crate::fill::{Fill, FillPattern};

/// Colors used to paint grid cells and their bit labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridTheme {
    // Cell fills
    /// Bit set in both snapshots.
    pub set_stable: Rgb,
    /// Bit newly set (rising edge).
    pub set_new: Rgb,
    /// Rising-edge color when drawn hatched over signal colors.
    pub set_new_hatch: Rgb,
    /// Bit newly cleared (falling edge).
    pub cleared: Rgb,
    /// Bit clear in both snapshots and not used by any signal.
    pub unused: Rgb,
    /// Hatch for used bits whose signal is unknown or not shown.
    pub unknown_signal: Rgb,

    // Labels
    /// Default bit label color.
    pub label: Rgb,
    /// Bit label drawn over a stable set bit.
    pub label_dim: Rgb,
    /// Emphasized bit label.
    pub label_emphasis: Rgb,
}

impl Default for GridTheme {
    fn default() -> Self {
        Self {
            set_stable: Rgb::BLACK,
            set_new: Rgb::GREEN,
            set_new_hatch: Rgb::new(0, 0xB6, 0),
            cleared: Rgb::RED,
            unused: Rgb::WHITE,
            unknown_signal: Rgb::gray(0xB6),
            label: Rgb::BLACK,
            label_dim: Rgb::GRAY,
            label_emphasis: Rgb::BLUE,
        }
    }
}

impl GridTheme {
    /// Fill for a bit that stayed set. Hatched when it has to share the grid
    /// with solid signal colors.
    #[must_use]
    pub const fn stable_fill(&self, hatched: bool) -> Fill {
        if hatched {
            Fill::hatched(self.set_stable, FillPattern::ForwardDiagonal)
        } else {
            Fill::solid(self.set_stable)
        }
    }

    /// Fill for a rising edge.
    #[must_use]
    pub const fn new_fill(&self, hatched: bool) -> Fill {
        if hatched {
            Fill::hatched(self.set_new_hatch, FillPattern::BackwardDiagonal)
        } else {
            Fill::solid(self.set_new)
        }
    }

    /// Fill for a falling edge. Never hatched.
    #[must_use]
    pub const fn cleared_fill(&self) -> Fill {
        Fill::solid(self.cleared)
    }

    /// Fill for an idle, unused bit.
    #[must_use]
    pub const fn unused_fill(&self) -> Fill {
        Fill::solid(self.unused)
    }

    /// Fill for a used bit without a resolvable signal.
    #[must_use]
    pub const fn unknown_signal_fill(&self) -> Fill {
        Fill::hatched(self.unknown_signal, FillPattern::BackwardDiagonal)
    }
}
