//! Signal color generation.
//!
//! Each named signal gets a random mid-brightness color. Candidates whose
//! HSV saturation does not exceed [`PaletteConfig::saturation_floor`] look
//! washed out next to the gray "unknown signal" hatch, so they are rejected
//! and resampled. Sampling is capped at [`PaletteConfig::max_attempts`]; when
//! the cap is hit the last candidate is kept.
//!
//! The random source is injected through [`ColorSource`], so tests can seed
//! it (or script it) and assert on the saturation invariant rather than on
//! exact colors.

use crate::color::Rgb;

/// Source of uniformly distributed integers for color sampling.
pub trait ColorSource {
    /// Return a value in `0..bound`. `bound` is never zero.
    fn next_below(&mut self, bound: u32) -> u32;
}

impl<T: ColorSource + ?Sized> ColorSource for &mut T {
    fn next_below(&mut self, bound: u32) -> u32 {
        (**self).next_below(bound)
    }
}

impl<T: ColorSource + ?Sized> ColorSource for Box<T> {
    fn next_below(&mut self, bound: u32) -> u32 {
        (**self).next_below(bound)
    }
}

/// Deterministic xorshift64* generator.
#[derive(Debug, Clone)]
pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    /// Create a generator from a seed. Equal seeds give equal sequences.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        let state = seed.wrapping_add(1);
        Self {
            // xorshift never leaves the all-zero state.
            state: if state == 0 { 0x9E37_79B9_7F4A_7C15 } else { state },
        }
    }

    /// Create a generator seeded from the system clock.
    #[must_use]
    pub fn from_clock() -> Self {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0x5EED);
        Self::new(seed)
    }

    /// Next raw 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state >> 12;
        self.state ^= self.state << 25;
        self.state ^= self.state >> 27;
        self.state.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }
}

impl ColorSource for SeededRng {
    fn next_below(&mut self, bound: u32) -> u32 {
        debug_assert!(bound > 0);
        ((self.next_u64() >> 32) % u64::from(bound.max(1))) as u32
    }
}

/// Tuning for signal color generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PaletteConfig {
    /// Accepted colors have saturation strictly above this (0–255 scale).
    pub saturation_floor: u8,
    /// Lowest value of each channel.
    pub channel_min: u8,
    /// Number of distinct values above `channel_min` each channel may take.
    pub channel_span: u8,
    /// Samples drawn per color before the last candidate is accepted as-is.
    pub max_attempts: u32,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            saturation_floor: 40,
            channel_min: 60,
            channel_span: 160,
            max_attempts: 64,
        }
    }
}

impl PaletteConfig {
    /// Set the saturation floor.
    #[must_use]
    pub fn with_saturation_floor(mut self, floor: u8) -> Self {
        self.saturation_floor = floor;
        self
    }

    /// Set the channel range as `min..min + span`.
    #[must_use]
    pub fn with_channel_range(mut self, min: u8, span: u8) -> Self {
        self.channel_min = min;
        self.channel_span = span;
        self
    }

    /// Set the sampling cap (at least one sample is always drawn).
    #[must_use]
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    fn sample_channel(&self, source: &mut dyn ColorSource) -> u8 {
        let span = u32::from(self.channel_span).max(1);
        let value = u32::from(self.channel_min) + source.next_below(span);
        value.min(255) as u8
    }

    fn sample(&self, source: &mut dyn ColorSource) -> Rgb {
        let r = self.sample_channel(source);
        let g = self.sample_channel(source);
        let b = self.sample_channel(source);
        Rgb::new(r, g, b)
    }

    /// Check whether a color clears the saturation floor.
    #[inline]
    pub fn accepts(&self, color: Rgb) -> bool {
        color.saturation() > self.saturation_floor
    }
}

/// Draw one signal color, resampling until it clears the saturation floor
/// or the attempt cap is reached.
pub fn generate_color(config: &PaletteConfig, source: &mut dyn ColorSource) -> Rgb {
    let attempts = config.max_attempts.max(1);
    let mut candidate = config.sample(source);
    for _ in 1..attempts {
        if config.accepts(candidate) {
            return candidate;
        }
        candidate = config.sample(source);
    }
    if !config.accepts(candidate) {
        cangrid_core::warn!(
            %candidate,
            attempts,
            floor = config.saturation_floor,
            "color sampling capped; keeping last candidate"
        );
    }
    candidate
}

/// Draw `count` signal colors.
pub fn generate_palette(
    count: usize,
    config: &PaletteConfig,
    source: &mut dyn ColorSource,
) -> Vec<Rgb> {
    (0..count).map(|_| generate_color(config, source)).collect()
}
