//! Opaque RGB colors and the few color operations the grid needs.

use std::fmt;

/// RGB color (opaque).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgb {
    /// Red channel (0–255).
    pub r: u8,
    /// Green channel (0–255).
    pub g: u8,
    /// Blue channel (0–255).
    pub b: u8,
}

impl Rgb {
    /// Black.
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    /// White.
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    /// Pure red.
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    /// Pure green.
    pub const GREEN: Rgb = Rgb::new(0, 255, 0);
    /// Pure blue.
    pub const BLUE: Rgb = Rgb::new(0, 0, 255);
    /// Medium gray used for de-emphasized labels.
    pub const GRAY: Rgb = Rgb::new(160, 160, 164);

    /// Create a new RGB color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a gray with all channels equal.
    #[must_use]
    pub const fn gray(level: u8) -> Self {
        Self::new(level, level, level)
    }

    /// HSV saturation on a 0–255 scale.
    ///
    /// `(max - min) * 255 / max`, rounded; black is fully unsaturated.
    #[must_use]
    pub fn saturation(self) -> u8 {
        let max = self.r.max(self.g).max(self.b) as u32;
        let min = self.r.min(self.g).min(self.b) as u32;
        if max == 0 {
            return 0;
        }
        (((max - min) * 255 + max / 2) / max) as u8
    }

    /// Photometric inverse: every channel reflected through 255.
    #[must_use]
    pub const fn inverted(self) -> Self {
        Self::new(255 - self.r, 255 - self.g, 255 - self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}
