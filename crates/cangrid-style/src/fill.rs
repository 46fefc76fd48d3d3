//! Cell fills: a color plus the pattern it is painted with.

use crate::color::Rgb;

/// How a fill color covers a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FillPattern {
    /// Uniform color.
    #[default]
    Solid,
    /// Hatch strokes running top-left to bottom-right.
    ForwardDiagonal,
    /// Hatch strokes running bottom-left to top-right.
    BackwardDiagonal,
}

impl FillPattern {
    /// Check if the pattern leaves background showing through.
    #[inline]
    pub const fn is_hatched(self) -> bool {
        !matches!(self, Self::Solid)
    }
}

/// A resolved cell fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fill {
    /// Paint color.
    pub color: Rgb,
    /// Paint pattern.
    pub pattern: FillPattern,
}

impl Fill {
    /// Solid fill.
    #[must_use]
    pub const fn solid(color: Rgb) -> Self {
        Self {
            color,
            pattern: FillPattern::Solid,
        }
    }

    /// Hatched fill with the given pattern.
    #[must_use]
    pub const fn hatched(color: Rgb, pattern: FillPattern) -> Self {
        Self { color, pattern }
    }
}
