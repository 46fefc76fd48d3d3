//! Property-based invariant tests for frame layouts and the bit mapper.
//!
//! 1. bit -> cell -> bit is the identity for every layout.
//! 2. cell -> bit -> cell is the identity for every layout.
//! 3. Mapped cells always lie inside the grid; mapped bits inside the frame.
//! 4. Cells on one row only show bits of that row's bytes.
//! 5. Byte-count normalization picks the smallest layout that fits.
//! 6. Hit-testing a cell's pixel interior returns that cell.

use cangrid_core::{BitGridMapper, CellPos, FrameSize, GridGeometry, Point, Rect, Size};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn frame_size_strategy() -> impl Strategy<Value = FrameSize> {
    prop_oneof![
        Just(FrameSize::Bytes8),
        Just(FrameSize::Bytes16),
        Just(FrameSize::Bytes32),
        Just(FrameSize::Bytes64),
    ]
}

fn bit_in_frame() -> impl Strategy<Value = (FrameSize, u16)> {
    frame_size_strategy()
        .prop_flat_map(|size| (Just(size), 0..size.bit_count() as u16))
}

fn cell_in_frame() -> impl Strategy<Value = (FrameSize, CellPos)> {
    frame_size_strategy().prop_flat_map(|size| {
        let d = size.divisions();
        (Just(size), (0..d.columns, 0..d.rows).prop_map(|(x, y)| CellPos::new(x, y)))
    })
}

// ═════════════════════════════════════════════════════════════════════════
// 1-2. Bijection
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn bit_round_trips_through_cell((size, bit) in bit_in_frame()) {
        let m = BitGridMapper::for_frame(size);
        let cell = m.cell_from_bit(bit);
        prop_assert_eq!(m.bit_from_cell(cell), bit, "{} via {:?}", size, cell);
    }

    #[test]
    fn cell_round_trips_through_bit((size, cell) in cell_in_frame()) {
        let m = BitGridMapper::for_frame(size);
        let bit = m.bit_from_cell(cell);
        prop_assert_eq!(m.cell_from_bit(bit), cell, "{} via bit {}", size, bit);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3-4. Range and row locality
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn mapped_values_stay_in_range((size, bit) in bit_in_frame()) {
        let m = BitGridMapper::for_frame(size);
        let cell = m.cell_from_bit(bit);
        prop_assert!(m.contains(cell));
        prop_assert!((m.bit_from_cell(cell) as usize) < size.bit_count());
    }

    #[test]
    fn rows_hold_whole_bytes((size, cell) in cell_in_frame()) {
        let m = BitGridMapper::for_frame(size);
        let addr = m.address_of(cell);
        let per_row = m.divisions().bytes_per_row() as usize;
        prop_assert_eq!(addr.byte / per_row, cell.y as usize);
        prop_assert_eq!(m.row_label(cell.y) as usize, cell.y as usize * per_row);
        prop_assert_eq!(m.column_label(cell.x), addr.bit);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Normalization
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn normalization_is_smallest_fit(bytes in 1usize..=64) {
        let size = FrameSize::from_byte_count(bytes);
        prop_assert!(size.byte_count() >= bytes);
        for smaller in FrameSize::ALL.iter().filter(|s| **s < size) {
            prop_assert!(smaller.byte_count() < bytes);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Hit-testing
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn hit_test_inverts_cell_rect(
        (size, cell) in cell_in_frame(),
        left in -500i32..500,
        top in -500i32..500,
        width in 300u32..2000,
        height in 300u32..2000,
        fx in 0u32..100,
        fy in 0u32..100,
    ) {
        let g = GridGeometry::compute(
            Rect::new(left, top, width, height),
            Size::new(12, 12),
            size.divisions(),
        );
        prop_assume!(!g.sector().is_empty());
        let r = g.cell_rect(cell);
        let p = Point::new(
            r.x + (r.width * fx / 100) as i32,
            r.y + (r.height * fy / 100) as i32,
        );
        prop_assert_eq!(g.hit_test(p), Some(cell));
    }
}
