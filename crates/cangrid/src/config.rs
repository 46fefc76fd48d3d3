#![forbid(unsafe_code)]

//! Grid configuration.

use cangrid_style::{GridTheme, PaletteConfig};

use crate::classify::GridMode;
use crate::store::DEFAULT_SIGNAL_SLOTS;

/// Construction-time settings for a [`CanDataGrid`](crate::grid::CanDataGrid).
///
/// # Example
/// ```
/// use cangrid::{CanDataGrid, GridConfig, GridMode};
///
/// let grid = CanDataGrid::with_config(
///     GridConfig::default()
///         .with_frame_bytes(64)
///         .with_mode(GridMode::SignalView)
///         .with_seed(7),
/// );
/// assert_eq!(grid.frame_size().byte_count(), 64);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridConfig {
    /// Requested frame size in bytes; normalized to 8, 16, 32 or 64.
    pub frame_bytes: usize,
    /// Initial display mode.
    pub mode: GridMode,
    /// Size of the empty signal table.
    pub signal_slots: usize,
    /// Signal color generation settings.
    pub palette: PaletteConfig,
    /// Cell and label colors.
    pub theme: GridTheme,
    /// Seed for signal colors. `None` seeds from the clock.
    pub seed: Option<u64>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            frame_bytes: 8,
            mode: GridMode::ChangedBits,
            signal_slots: DEFAULT_SIGNAL_SLOTS,
            palette: PaletteConfig::default(),
            theme: GridTheme::default(),
            seed: None,
        }
    }
}

impl GridConfig {
    /// Set the requested frame size.
    #[must_use]
    pub fn with_frame_bytes(mut self, bytes: usize) -> Self {
        self.frame_bytes = bytes;
        self
    }

    /// Set the initial mode.
    #[must_use]
    pub fn with_mode(mut self, mode: GridMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the empty signal-table size.
    #[must_use]
    pub fn with_signal_slots(mut self, slots: usize) -> Self {
        self.signal_slots = slots;
        self
    }

    /// Set palette settings.
    #[must_use]
    pub fn with_palette(mut self, palette: PaletteConfig) -> Self {
        self.palette = palette;
        self
    }

    /// Set the theme.
    #[must_use]
    pub fn with_theme(mut self, theme: GridTheme) -> Self {
        self.theme = theme;
        self
    }

    /// Seed signal colors deterministically.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
