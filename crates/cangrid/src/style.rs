#![forbid(unsafe_code)]

//! Turning a classified cell into paint instructions.
//!
//! The host still draws everything; this module decides *what* to draw: the
//! fill, the bit label color and weight, and where the label sits.

use cangrid_core::CellPos;
use cangrid_style::{Fill, GridTheme, Rgb};

use crate::classify::{CellState, GridMode, classify_cell};
use crate::store::{GridStore, TextState};

/// Bit label placement inside a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LabelAlignment {
    /// Centered on both axes.
    #[default]
    Center,
    /// Upper-left corner.
    TopLeft,
}

/// Bit label color and weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LabelStyle {
    /// Text color.
    pub color: Rgb,
    /// Bold weight.
    pub bold: bool,
}

/// Everything the host needs to paint one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellStyle {
    /// Cell background.
    pub fill: Fill,
    /// Bit label style.
    pub label: LabelStyle,
    /// Bit label placement.
    pub align: LabelAlignment,
}

/// Fill for a state.
///
/// Set bits are hatched in signal view once signal colors exist, so they
/// cannot be mistaken for a solid signal color. Signals without a generated
/// color fall back to the unknown-signal hatch.
pub fn resolve_fill(
    state: CellState,
    mode: GridMode,
    theme: &GridTheme,
    signal_colors: &[Rgb],
) -> Fill {
    let hatch_set_bits = mode == GridMode::SignalView && !signal_colors.is_empty();
    match state {
        CellState::SetStable => theme.stable_fill(hatch_set_bits),
        CellState::SetNew => theme.new_fill(hatch_set_bits),
        CellState::Cleared => theme.cleared_fill(),
        CellState::UnusedZero => theme.unused_fill(),
        CellState::UsedUnknownSignal => theme.unknown_signal_fill(),
        CellState::UsedSignal(id) => signal_colors
            .get(id.index())
            .map_or_else(|| theme.unknown_signal_fill(), |c| Fill::solid(*c)),
    }
}

/// Label style for a state, annotation, and the fill it sits on.
pub fn resolve_label(
    state: CellState,
    annotation: TextState,
    fill: Fill,
    theme: &GridTheme,
) -> LabelStyle {
    match annotation {
        TextState::Normal => LabelStyle {
            color: if state == CellState::SetStable {
                theme.label_dim
            } else {
                theme.label
            },
            bold: false,
        },
        TextState::BoldBlue => LabelStyle {
            color: theme.label_emphasis,
            bold: true,
        },
        TextState::Invert => LabelStyle {
            color: fill.color.inverted(),
            bold: false,
        },
    }
}

/// Bit label placement for a mode: centered when showing changes, tucked in
/// the corner in signal view to leave room for signal names.
pub const fn label_alignment(mode: GridMode) -> LabelAlignment {
    match mode {
        GridMode::ChangedBits => LabelAlignment::Center,
        GridMode::SignalView => LabelAlignment::TopLeft,
    }
}

/// A fully resolved cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassifiedCell {
    /// Grid position.
    pub pos: CellPos,
    /// Frame bit displayed here.
    pub bit: u16,
    /// Classification.
    pub state: CellState,
    /// Label annotation.
    pub annotation: TextState,
    /// Paint instructions.
    pub style: CellStyle,
}

impl ClassifiedCell {
    /// Label text: the decimal bit index.
    pub fn label_text(&self) -> String {
        self.bit.to_string()
    }
}

/// Classify and style the cell at `pos`.
pub fn style_cell(store: &GridStore, pos: CellPos, mode: GridMode, theme: &GridTheme) -> ClassifiedCell {
    let addr = store.mapper().address_of(pos);
    let state = classify_cell(store, pos, mode);
    let annotation = store.annotation_at(addr);
    let fill = resolve_fill(state, mode, theme, store.signals().colors());
    ClassifiedCell {
        pos,
        bit: addr.index(),
        state,
        annotation,
        style: CellStyle {
            fill,
            label: resolve_label(state, annotation, fill, theme),
            align: label_alignment(mode),
        },
    }
}
