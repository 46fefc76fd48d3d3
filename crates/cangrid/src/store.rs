#![forbid(unsafe_code)]

//! Grid store: bit planes, signal ownership, annotations, and signal tables.
//!
//! The store is owned by the host and mutated in place as frames arrive.
//! Everything is indexed by *frame* coordinates (linear bit index, or
//! byte/bit-within-byte); grid coordinates only enter through
//! [`BitGridMapper`].
//!
//! # Invariants
//!
//! - The active frame size is always one of 8, 16, 32 or 64 bytes.
//! - Generated signal colors are tied to the name table: every operation
//!   that changes names drops the colors so they regenerate on the next
//!   signal-view pass.

use cangrid_core::{BitAddress, BitGridMapper, FrameSize, MAX_FRAME_BITS, MAX_FRAME_BYTES};
use cangrid_style::{ColorSource, PaletteConfig, Rgb, generate_palette};

use crate::error::{GridError, Plane, Result};

/// Signal-table size restored by a reload with no names.
pub const DEFAULT_SIGNAL_SLOTS: usize = 40;

/// Identifier of a signal: its index in the signal table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SignalId(pub u16);

impl SignalId {
    /// Table index of this signal.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Per-bit label annotation, independent of the cell fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextState {
    /// Plain label.
    #[default]
    Normal,
    /// Bold label in the emphasis color.
    BoldBlue,
    /// Label drawn in the inverse of the cell fill.
    Invert,
}

/// The three plane bits behind one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BitPlanes {
    /// Set in the current payload.
    pub current: bool,
    /// Set in the reference snapshot.
    pub reference: bool,
    /// Assigned to some signal.
    pub used: bool,
}

/// Signal names and their lazily generated colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalTable {
    names: Vec<Option<String>>,
    colors: Vec<Rgb>,
    default_slots: usize,
}

impl Default for SignalTable {
    fn default() -> Self {
        Self::new(DEFAULT_SIGNAL_SLOTS)
    }
}

impl SignalTable {
    /// Create an empty table with `default_slots` unnamed entries.
    #[must_use]
    pub fn new(default_slots: usize) -> Self {
        Self {
            names: vec![None; default_slots],
            colors: Vec::new(),
            default_slots,
        }
    }

    /// Number of slots, named or not.
    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if the table has no slots at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Check if at least one slot carries a name.
    pub fn has_names(&self) -> bool {
        self.names.iter().any(Option::is_some)
    }

    /// Name of a signal, if its slot exists and is named.
    pub fn name(&self, id: SignalId) -> Option<&str> {
        self.names.get(id.index())?.as_deref()
    }

    /// Generated color of a signal, if colors exist and cover it.
    pub fn color(&self, id: SignalId) -> Option<Rgb> {
        self.colors.get(id.index()).copied()
    }

    /// All generated colors, index-aligned with signal ids.
    #[inline]
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Replace every name at once. Slot `i` takes the `i`-th name; the table
    /// never drops below its default size. Colors are dropped.
    pub fn reload<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names.clear();
        self.names.extend(names.into_iter().map(|n| Some(n.into())));
        if self.names.len() < self.default_slots {
            self.names.resize(self.default_slots, None);
        }
        self.colors.clear();
    }

    /// Reset to the default-sized unnamed table.
    pub fn clear(&mut self) {
        self.reload(std::iter::empty::<String>());
    }

    /// Name a single slot, growing the table if `index` is past its end.
    /// Colors are dropped.
    pub fn set_name(&mut self, index: usize, name: impl Into<String>) {
        if index >= self.names.len() {
            self.names.resize(grown_len(index), None);
        }
        self.names[index] = Some(name.into());
        self.colors.clear();
    }

    /// Check if a signal-view pass has to generate colors first.
    #[inline]
    pub fn needs_colors(&self) -> bool {
        self.colors.is_empty() && self.has_names()
    }

    /// Generate one color per slot unless colors already exist. Returns
    /// whether colors were generated.
    pub fn ensure_colors(&mut self, config: &PaletteConfig, source: &mut dyn ColorSource) -> bool {
        if !self.needs_colors() {
            return false;
        }
        cangrid_core::debug!(signals = self.names.len(), "generating signal colors");
        self.colors = generate_palette(self.names.len(), config, source);
        true
    }
}

/// Table length after growing to hold `index`: twice the index, never
/// below `index + 1`.
fn grown_len(index: usize) -> usize {
    index.saturating_mul(2).max(index.saturating_add(1))
}

/// Host-owned state behind one grid display.
#[derive(Debug, Clone)]
pub struct GridStore {
    frame_size: FrameSize,
    current: [u8; MAX_FRAME_BYTES],
    reference: [u8; MAX_FRAME_BYTES],
    used: [u8; MAX_FRAME_BYTES],
    signal_of: [Option<SignalId>; MAX_FRAME_BITS],
    text_states: [[TextState; 8]; MAX_FRAME_BYTES],
    signals: SignalTable,
}

impl Default for GridStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GridStore {
    /// Create a store for classic 8-byte frames with cleared planes.
    #[must_use]
    pub fn new() -> Self {
        Self::with_signal_slots(DEFAULT_SIGNAL_SLOTS)
    }

    /// Create a store whose empty signal table has `slots` entries.
    #[must_use]
    pub fn with_signal_slots(slots: usize) -> Self {
        Self {
            frame_size: FrameSize::default(),
            current: [0; MAX_FRAME_BYTES],
            reference: [0; MAX_FRAME_BYTES],
            used: [0; MAX_FRAME_BYTES],
            signal_of: [None; MAX_FRAME_BITS],
            text_states: [[TextState::Normal; 8]; MAX_FRAME_BYTES],
            signals: SignalTable::new(slots),
        }
    }

    // ── Frame size ──────────────────────────────────────────────────

    /// Select the layout for a requested byte count and return the
    /// normalized size.
    pub fn set_frame_size(&mut self, byte_count: usize) -> FrameSize {
        let size = FrameSize::from_byte_count(byte_count);
        if size != self.frame_size {
            cangrid_core::debug!(requested = byte_count, %size, "frame size changed");
        }
        self.frame_size = size;
        size
    }

    /// Active frame size.
    #[inline]
    pub fn frame_size(&self) -> FrameSize {
        self.frame_size
    }

    /// Mapper for the active layout.
    #[inline]
    pub fn mapper(&self) -> BitGridMapper {
        BitGridMapper::for_frame(self.frame_size)
    }

    // ── Bit planes ──────────────────────────────────────────────────

    fn plane_mut(&mut self, plane: Plane) -> &mut [u8; MAX_FRAME_BYTES] {
        match plane {
            Plane::Current => &mut self.current,
            Plane::Reference => &mut self.reference,
            Plane::Used => &mut self.used,
        }
    }

    /// Copy one active frame's worth of bytes into a plane. Bytes past the
    /// active size keep their previous contents.
    pub fn update_plane(&mut self, plane: Plane, bytes: &[u8]) -> Result<()> {
        let needed = self.frame_size.copy_len();
        let src = bytes.get(..needed).ok_or(GridError::BufferTooShort {
            plane,
            needed,
            actual: bytes.len(),
        })?;
        self.plane_mut(plane)[..needed].copy_from_slice(src);
        Ok(())
    }

    /// Replace the current payload.
    pub fn update_current(&mut self, bytes: &[u8]) -> Result<()> {
        self.update_plane(Plane::Current, bytes)
    }

    /// Replace the reference snapshot.
    pub fn update_reference(&mut self, bytes: &[u8]) -> Result<()> {
        self.update_plane(Plane::Reference, bytes)
    }

    /// Replace the used-bit mask.
    pub fn update_used_mask(&mut self, bytes: &[u8]) -> Result<()> {
        self.update_plane(Plane::Used, bytes)
    }

    /// Raw contents of a plane (all 64 bytes).
    pub fn plane(&self, plane: Plane) -> &[u8; MAX_FRAME_BYTES] {
        match plane {
            Plane::Current => &self.current,
            Plane::Reference => &self.reference,
            Plane::Used => &self.used,
        }
    }

    /// Plane bits at a frame address.
    pub fn bits_at(&self, addr: BitAddress) -> BitPlanes {
        BitPlanes {
            current: addr.is_set_in(&self.current),
            reference: addr.is_set_in(&self.reference),
            used: addr.is_set_in(&self.used),
        }
    }

    // ── Signal ownership ────────────────────────────────────────────

    /// Assign (or with `None`, unassign) the signal owning `bit`. Bits past
    /// the largest frame are ignored.
    pub fn set_signal_owner(&mut self, bit: u16, signal: Option<SignalId>) {
        if let Some(slot) = self.signal_of.get_mut(bit as usize) {
            *slot = signal;
        }
    }

    /// Signal owning `bit`; `None` when unassigned or out of range.
    pub fn signal_owner(&self, bit: u16) -> Option<SignalId> {
        self.signal_of.get(bit as usize).copied().flatten()
    }

    /// Signal owning `bit`, if it has a slot in the signal table. Owners
    /// left behind by a shorter reload read as unassigned.
    pub fn known_signal_owner(&self, bit: u16) -> Option<SignalId> {
        self.signal_owner(bit).filter(|id| id.index() < self.signals.len())
    }

    /// Unassign every bit.
    pub fn clear_signal_owners(&mut self) {
        self.signal_of = [None; MAX_FRAME_BITS];
    }

    // ── Signal table ────────────────────────────────────────────────

    /// Signal names and colors.
    #[inline]
    pub fn signals(&self) -> &SignalTable {
        &self.signals
    }

    /// Reload the whole name table; drops colors.
    pub fn set_signal_names<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.signals.reload(names);
    }

    /// Name a single signal slot; drops colors.
    pub fn set_signal_name(&mut self, index: usize, name: impl Into<String>) {
        self.signals.set_name(index, name);
    }

    /// Reset the name table to its default-sized unnamed state; drops colors.
    pub fn clear_signal_names(&mut self) {
        self.signals.clear();
    }

    /// Generate signal colors if names exist and colors do not.
    pub fn ensure_signal_colors(
        &mut self,
        config: &PaletteConfig,
        source: &mut dyn ColorSource,
    ) -> bool {
        self.signals.ensure_colors(config, source)
    }

    // ── Annotations ─────────────────────────────────────────────────

    /// Set the label annotation of `bit`. Bits past the largest frame are
    /// ignored.
    pub fn set_cell_annotation(&mut self, bit: u16, state: TextState) {
        if (bit as usize) < MAX_FRAME_BITS {
            let addr = BitAddress::from_index(bit);
            self.text_states[addr.byte][addr.bit as usize] = state;
        }
    }

    /// Label annotation of `bit`; [`TextState::Normal`] when out of range.
    pub fn cell_annotation(&self, bit: u16) -> TextState {
        if (bit as usize) < MAX_FRAME_BITS {
            self.annotation_at(BitAddress::from_index(bit))
        } else {
            TextState::Normal
        }
    }

    /// Label annotation at a frame address.
    pub fn annotation_at(&self, addr: BitAddress) -> TextState {
        self.text_states
            .get(addr.byte)
            .and_then(|bits| bits.get(addr.bit as usize))
            .copied()
            .unwrap_or_default()
    }
}
