//! End-to-end scenarios for the CAN data grid.
//!
//! Each test drives [`CanDataGrid`] the way a host would: push frame bytes,
//! configure signals, then read cells back through a redraw pass.

use cangrid::{
    CanDataGrid, CellPos, CellState, ColorSource, DEFAULT_SIGNAL_SLOTS, FillPattern, FrameSize,
    GridConfig, GridError, GridMode, LabelAlignment, MonospaceMetrics, PaletteConfig, Plane,
    Point, Rect, SignalId, Size, TextState,
};
use proptest::prelude::*;

fn grid() -> CanDataGrid {
    CanDataGrid::with_config(GridConfig::default().with_seed(0xC0FFEE))
}

/// Always returns the same value, so every color is gray.
struct Stuck;

impl ColorSource for Stuck {
    fn next_below(&mut self, _bound: u32) -> u32 {
        0
    }
}

// ═════════════════════════════════════════════════════════════════════════
// Classic 8-byte frame
// ═════════════════════════════════════════════════════════════════════════

#[test]
fn single_rising_bit_in_classic_frame() {
    let mut grid = grid();
    grid.update_current(&[0x01, 0, 0, 0, 0, 0, 0, 0]).unwrap();
    grid.update_reference(&[0; 8]).unwrap();
    grid.update_used_mask(&[0; 8]).unwrap();

    let cells = grid.pass().cells();
    assert_eq!(cells.len(), 64);
    for cell in &cells {
        if cell.pos == CellPos::new(7, 0) {
            assert_eq!(cell.bit, 0);
            assert_eq!(cell.state, CellState::SetNew);
        } else {
            assert_eq!(cell.state, CellState::UnusedZero, "cell {:?}", cell.pos);
        }
    }
}

#[test]
fn labels_are_bit_indices() {
    let mut grid = grid();
    let cells = grid.pass().cells();
    let first_row: Vec<String> = cells[..8].iter().map(|c| c.label_text()).collect();
    assert_eq!(first_row, ["7", "6", "5", "4", "3", "2", "1", "0"]);
    assert_eq!(cells[8].label_text(), "15");
}

#[test]
fn alignment_follows_mode() {
    let mut grid = grid();
    assert_eq!(grid.pass().cell(CellPos::new(0, 0)).style.align, LabelAlignment::Center);
    grid.set_mode(GridMode::SignalView);
    assert_eq!(grid.pass().cell(CellPos::new(0, 0)).style.align, LabelAlignment::TopLeft);
}

// ═════════════════════════════════════════════════════════════════════════
// Priority and mode sensitivity
// ═════════════════════════════════════════════════════════════════════════

#[test]
fn mode_decides_signal_identity() {
    let mut grid = grid();
    grid.set_signal_names(["s0", "s1", "s2", "s3", "s4", "s5", "s6"]);
    grid.update_used_mask(&[0x10, 0, 0, 0, 0, 0, 0, 0]).unwrap();
    grid.set_signal_owner(4, Some(SignalId(5)));
    let pos = grid.cell_from_bit(4);

    assert_eq!(grid.pass().cell(pos).state, CellState::UsedUnknownSignal);
    grid.set_mode(GridMode::SignalView);
    assert_eq!(grid.pass().cell(pos).state, CellState::UsedSignal(SignalId(5)));
}

#[test]
fn set_and_cleared_bits_outrank_signals() {
    let mut grid = grid();
    grid.set_mode(GridMode::SignalView);
    grid.set_signal_names(["a", "b"]);
    grid.update_used_mask(&[0xFF; 8]).unwrap();
    for bit in 0..64 {
        grid.set_signal_owner(bit, Some(SignalId(1)));
    }
    grid.update_reference(&[0b0000_0011, 0, 0, 0, 0, 0, 0, 0]).unwrap();
    grid.update_current(&[0b0000_0101, 0, 0, 0, 0, 0, 0, 0]).unwrap();

    let pass = grid.pass();
    let at = |bit: u16| pass.cell(grid_cell(bit)).state;
    assert_eq!(at(0), CellState::SetStable);
    assert_eq!(at(1), CellState::Cleared);
    assert_eq!(at(2), CellState::SetNew);
    assert_eq!(at(3), CellState::UsedSignal(SignalId(1)));
}

fn grid_cell(bit: u16) -> CellPos {
    cangrid::BitGridMapper::for_frame(FrameSize::Bytes8).cell_from_bit(bit)
}

#[test]
fn cleared_renders_flat_in_signal_view() {
    let mut grid = grid();
    grid.set_mode(GridMode::SignalView);
    grid.set_signal_names(["a"]);
    grid.update_reference(&[0x01, 0, 0, 0, 0, 0, 0, 0]).unwrap();
    let cell = grid.pass().cell(CellPos::new(7, 0));
    assert_eq!(cell.state, CellState::Cleared);
    assert_eq!(cell.style.fill.pattern, FillPattern::Solid);
}

// ═════════════════════════════════════════════════════════════════════════
// Frame sizes
// ═════════════════════════════════════════════════════════════════════════

#[test]
fn fd_frame_fills_every_cell() {
    let mut grid = grid();
    grid.set_frame_size(64);
    grid.update_current(&[0xFF; 64]).unwrap();
    let cells = grid.pass().cells();
    assert_eq!(cells.len(), 512);
    assert!(cells.iter().all(|c| c.state == CellState::SetNew));
}

#[test]
fn padded_frame_sizes_leave_tail_unused() {
    let mut grid = grid();
    assert_eq!(grid.set_frame_size(12), FrameSize::Bytes16);
    grid.update_current(&[0xFF; 16]).unwrap();
    // Only twelve bytes of a 12-byte frame carry data; the host never sets
    // the rest, but the grid still shows 128 cells.
    let cells = grid.pass().cells();
    assert_eq!(cells.len(), 128);
}

#[test]
fn short_buffer_is_an_error() {
    let mut grid = grid();
    grid.set_frame_size(32);
    let err = grid.update_used_mask(&[0; 20]).unwrap_err();
    assert_eq!(
        err,
        GridError::BufferTooShort {
            plane: Plane::Used,
            needed: 32,
            actual: 20
        }
    );
    assert_eq!(
        err.to_string(),
        "used plane update needs 32 bytes, buffer has 20"
    );
}

#[test]
fn cycling_visits_every_layout() {
    let mut grid = grid();
    let mut columns = Vec::new();
    for _ in 0..4 {
        grid.cycle_frame_size();
        columns.push((grid.divisions().columns, grid.divisions().rows));
    }
    assert_eq!(columns, [(16, 8), (16, 16), (32, 16), (8, 8)]);
}

// ═════════════════════════════════════════════════════════════════════════
// Interaction
// ═════════════════════════════════════════════════════════════════════════

#[test]
fn click_maps_pixel_to_bit() {
    let mut grid = grid();
    grid.set_frame_size(16);
    // 16x8 grid, 10px sectors after a 20px header.
    grid.layout(Rect::new(0, 0, 180, 100), Size::new(20, 20));

    assert_eq!(grid.click(Point::new(25, 25)), Some(7));
    assert_eq!(grid.click(Point::new(175, 25)), Some(8));
    assert_eq!(grid.click(Point::new(95, 95)), Some(112));
    assert_eq!(grid.click(Point::new(10, 10)), None);
}

#[test]
fn annotations_survive_layout_changes() {
    let mut grid = grid();
    grid.set_cell_annotation(9, TextState::BoldBlue);
    grid.set_frame_size(64);
    assert_eq!(grid.cell_annotation(9), TextState::BoldBlue);
    let pos = grid.cell_from_bit(9);
    let cell = grid.pass().cell(pos);
    assert_eq!(cell.annotation, TextState::BoldBlue);
    assert!(cell.style.label.bold);
}

// ═════════════════════════════════════════════════════════════════════════
// Signal table
// ═════════════════════════════════════════════════════════════════════════

#[test]
fn reload_twice_is_stable() {
    let mut grid = grid();
    grid.set_signal_names(["x", "y", "z"]);

    grid.clear_signal_names();
    grid.set_signal_names(Vec::<String>::new());
    let first = grid.store().signals().clone();

    grid.clear_signal_names();
    grid.set_signal_names(Vec::<String>::new());
    assert_eq!(grid.store().signals(), &first);
    assert_eq!(first.len(), DEFAULT_SIGNAL_SLOTS);
}

#[test]
fn generated_colors_clear_saturation_floor() {
    let mut grid = grid();
    grid.set_mode(GridMode::SignalView);
    grid.set_signal_names((0..40).map(|i| format!("sig{i}")));
    let _ = grid.pass();
    for i in 0..40 {
        let color = grid.signal_color(SignalId(i)).unwrap();
        assert!(color.saturation() > 40, "signal {i}: {color}");
    }
}

#[test]
fn stuck_source_still_produces_colors() {
    let mut grid = CanDataGrid::with_config(
        GridConfig::default()
            .with_mode(GridMode::SignalView)
            .with_palette(PaletteConfig::default().with_max_attempts(4)),
    )
    .with_color_source(Stuck);
    grid.set_signal_names(["only"]);
    let _ = grid.pass();
    assert_eq!(grid.signal_color(SignalId(0)), Some(cangrid::Rgb::gray(60)));
}

#[test]
fn renaming_regenerates_colors() {
    let mut grid = grid();
    grid.set_mode(GridMode::SignalView);
    grid.set_signal_names(["a", "b"]);
    let _ = grid.pass();
    assert!(grid.signal_color(SignalId(0)).is_some());

    grid.set_signal_name(60, "late");
    assert_eq!(grid.signal_color(SignalId(0)), None);
    assert_eq!(grid.store().signals().len(), 120);
    let _ = grid.pass();
    assert!(grid.signal_color(SignalId(60)).is_some());
}

#[test]
fn one_label_per_signal_run() {
    let mut grid = grid();
    grid.set_frame_size(16);
    let mut used = [0u8; 16];
    used[0] = 0xFF;
    used[1] = 0xFF;
    used[2] = 0x0F;
    grid.update_used_mask(&used).unwrap();
    // Signal 0 spans bytes 0..2 (row 0), signal 1 the low nibble of byte 2.
    for bit in 0..16 {
        grid.set_signal_owner(bit, Some(SignalId(0)));
    }
    for bit in 16..20 {
        grid.set_signal_owner(bit, Some(SignalId(1)));
    }
    grid.set_signal_names(["Speed", "Gear"]);

    let labels = grid.pass().signal_labels(40, &MonospaceMetrics::new(6));
    let names: Vec<(CellPos, &str)> = labels
        .iter()
        .map(|l| (l.pos, l.lines[0].as_str()))
        .collect();
    assert_eq!(
        names,
        [(CellPos::new(0, 0), "Speed"), (CellPos::new(4, 1), "Gear")]
    );
}

#[test]
fn stale_owner_paints_as_unknown_signal() {
    let mut grid = grid();
    grid.set_mode(GridMode::SignalView);
    grid.set_signal_names(["a", "b"]);
    grid.update_used_mask(&[0x03, 0, 0, 0, 0, 0, 0, 0]).unwrap();
    grid.set_signal_owner(0, Some(SignalId(99)));
    grid.set_signal_owner(1, Some(SignalId(1)));

    let pass = grid.pass();
    let stale = pass.cell(CellPos::new(7, 0));
    assert_eq!(stale.state, CellState::UsedUnknownSignal);
    assert_eq!(stale.style.fill, cangrid::GridTheme::default().unknown_signal_fill());

    let known = pass.cell(CellPos::new(6, 0));
    assert_eq!(known.state, CellState::UsedSignal(SignalId(1)));
    assert_eq!(known.style.fill.pattern, FillPattern::Solid);
}

#[test]
fn clearing_owners_removes_signal_cells() {
    let mut grid = grid();
    grid.set_mode(GridMode::SignalView);
    grid.update_used_mask(&[0x01, 0, 0, 0, 0, 0, 0, 0]).unwrap();
    grid.set_signal_owner(0, Some(SignalId(0)));
    grid.clear_signal_owners();
    assert_eq!(grid.signal_owner(0), None);
    assert_eq!(grid.classify(CellPos::new(7, 0)), CellState::UsedUnknownSignal);
}

// ═════════════════════════════════════════════════════════════════════════
// Properties
// ═════════════════════════════════════════════════════════════════════════

fn frame_sizes() -> impl Strategy<Value = usize> {
    prop_oneof![Just(8usize), Just(16), Just(32), Just(64)]
}

proptest! {
    #[test]
    fn priority_holds_for_any_frame(
        bytes in frame_sizes(),
        current in prop::collection::vec(any::<u8>(), 64),
        reference in prop::collection::vec(any::<u8>(), 64),
        used in prop::collection::vec(any::<u8>(), 64),
        signal_view in any::<bool>(),
    ) {
        let mut grid = grid();
        grid.set_frame_size(bytes);
        grid.update_current(&current).unwrap();
        grid.update_reference(&reference).unwrap();
        grid.update_used_mask(&used).unwrap();
        for bit in 0..512u16 {
            if bit % 3 == 0 {
                grid.set_signal_owner(bit, Some(SignalId(bit % 7)));
            }
        }
        if signal_view {
            grid.set_mode(GridMode::SignalView);
        }

        let cells = grid.pass().cells();
        prop_assert_eq!(cells.len(), bytes * 8);
        for cell in cells {
            let byte = usize::from(cell.bit / 8);
            let mask = 1u8 << (cell.bit % 8);
            let (c, r, u) = (current[byte] & mask != 0, reference[byte] & mask != 0, used[byte] & mask != 0);
            let expected = match (c, r, u) {
                (true, true, _) => CellState::SetStable,
                (true, false, _) => CellState::SetNew,
                (false, true, _) => CellState::Cleared,
                (false, false, false) => CellState::UnusedZero,
                (false, false, true) if signal_view && cell.bit % 3 == 0 => {
                    CellState::UsedSignal(SignalId(cell.bit % 7))
                }
                (false, false, true) => CellState::UsedUnknownSignal,
            };
            prop_assert_eq!(cell.state, expected, "bit {}", cell.bit);
        }
    }

    #[test]
    fn click_on_cell_center_returns_its_bit(bytes in frame_sizes(), bit in 0u16..512) {
        let mut grid = grid();
        grid.set_frame_size(bytes);
        let bit = bit % (bytes as u16 * 8);
        let geometry = grid.layout(Rect::new(3, 7, 700, 400), Size::new(24, 18));
        let rect = geometry.cell_rect(grid.cell_from_bit(bit));
        let center = Point::new(
            rect.x + (rect.width / 2) as i32,
            rect.y + (rect.height / 2) as i32,
        );
        prop_assert_eq!(grid.click(center), Some(bit));
    }
}
