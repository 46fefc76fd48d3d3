#![forbid(unsafe_code)]

//! Signal name labels drawn over the grid.
//!
//! Cells are walked in raster order (rows outer, columns inner). A cell
//! "resolves" to a signal when its used bit is set and a signal owns it;
//! every other cell resolves to nothing. A label is placed on the first cell
//! of each run of equal resolutions, so a signal spanning a row break keeps
//! a single label while one split by foreign bits is labeled again.
//!
//! Names wider than a cell are split into at most two lines using the
//! font's average character width; overflow past the second line is
//! dropped. This is placement by heuristic, not text layout.

use smallvec::SmallVec;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use cangrid_core::CellPos;

use crate::store::{GridStore, SignalId};

/// Text measurement supplied by the host's font system.
pub trait TextMetrics {
    /// Rendered width of `text` in pixels.
    fn text_width(&self, text: &str) -> u32;

    /// Average character advance in pixels.
    fn average_char_width(&self) -> u32;
}

/// Metrics for a fixed-pitch font: every terminal column is `char_width`
/// pixels wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonospaceMetrics {
    /// Advance of one column in pixels.
    pub char_width: u32,
}

impl MonospaceMetrics {
    /// Create metrics for the given column advance.
    #[must_use]
    pub const fn new(char_width: u32) -> Self {
        Self { char_width }
    }
}

impl TextMetrics for MonospaceMetrics {
    fn text_width(&self, text: &str) -> u32 {
        text.width() as u32 * self.char_width
    }

    fn average_char_width(&self) -> u32 {
        self.char_width
    }
}

/// A signal name placed on the first cell of its run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalLabel {
    /// Cell the label is anchored to.
    pub pos: CellPos,
    /// Frame bit displayed at that cell.
    pub bit: u16,
    /// Labeled signal.
    pub signal: SignalId,
    /// One or two lines of text.
    pub lines: SmallVec<[String; 2]>,
}

/// First cell of every signal run, in raster order, with its bit and
/// signal. Runs of signals without a name are included; owners past the
/// signal table are not.
pub fn signal_runs(store: &GridStore) -> Vec<(CellPos, u16, SignalId)> {
    let mapper = store.mapper();
    let mut runs = Vec::new();
    let mut prev: Option<SignalId> = None;
    for pos in mapper.cells() {
        let addr = mapper.address_of(pos);
        let resolved = if store.bits_at(addr).used {
            store.known_signal_owner(addr.index())
        } else {
            None
        };
        if resolved != prev {
            if let Some(signal) = resolved {
                runs.push((pos, addr.index(), signal));
            }
        }
        prev = resolved;
    }
    runs
}

/// Labels for every named signal run. Empty unless some signal is named.
pub fn signal_labels(
    store: &GridStore,
    cell_width: u32,
    metrics: &dyn TextMetrics,
) -> Vec<SignalLabel> {
    let signals = store.signals();
    if !signals.has_names() {
        return Vec::new();
    }
    signal_runs(store)
        .into_iter()
        .filter_map(|(pos, bit, signal)| {
            let name = signals.name(signal)?;
            Some(SignalLabel {
                pos,
                bit,
                signal,
                lines: split_label(name, cell_width, metrics),
            })
        })
        .collect()
}

/// Fit a name into a cell: one line if it fits, otherwise a first line of
/// as many characters as the average width allows (less one) and a second
/// line with the remainder, truncated the same way if still too wide.
pub fn split_label(name: &str, cell_width: u32, metrics: &dyn TextMetrics) -> SmallVec<[String; 2]> {
    let mut lines = SmallVec::new();
    if metrics.text_width(name) <= cell_width {
        lines.push(name.to_string());
        return lines;
    }

    let per_line = (cell_width / metrics.average_char_width().max(1)) as usize;
    let keep = per_line.saturating_sub(1).max(1);

    let graphemes: Vec<&str> = name.graphemes(true).collect();
    let split = keep.min(graphemes.len());
    lines.push(graphemes[..split].concat());

    let rest = &graphemes[split..];
    if rest.is_empty() {
        return lines;
    }
    let remainder = rest.concat();
    if metrics.text_width(&remainder) > cell_width {
        lines.push(rest[..keep.min(rest.len())].concat());
    } else {
        lines.push(remainder);
    }
    lines
}
