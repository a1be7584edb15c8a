//! Row window - which rows to materialize for the current scroll position
//!
//! The window knows every row slot's size (measured, or the estimate until measured), the
//! viewport height and the scroll offset. From those it produces the contiguous run of
//! [`VirtualRow`]s that cover the viewport plus `overscan` rows on each side.
//!
//! Sizes live in a [`HeightIndex`], so locating the first visible row is a binary search over
//! prefix sums rather than a walk over all rows.

use super::height_index::HeightIndex;
use super::measure::to_extent;
use super::types::RowKey;
use std::collections::HashMap;
use std::ops::RangeInclusive;
use tracing::trace;

/// Size assumed for a row that has not been measured yet.
pub const DEFAULT_ROW_ESTIMATE: usize = 52;

/// Window configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowOptions {
    /// Size used for unmeasured rows.
    pub estimate_size: usize,
    /// Extra rows materialized above and below the viewport.
    pub overscan: usize,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            estimate_size: DEFAULT_ROW_ESTIMATE,
            overscan: 0,
        }
    }
}

/// One materialized row slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualRow {
    /// Position in the row set.
    pub index: usize,
    /// Measurement cache key.
    pub key: RowKey,
    /// Offset of the row's top edge from the top of the content.
    pub start: usize,
    /// Measured or estimated size.
    pub size: usize,
}

impl VirtualRow {
    /// Offset of the row's bottom edge.
    pub fn end(&self) -> usize {
        self.start + self.size
    }

    /// Identity used to decide whether a boundary row changed between renders.
    pub fn identity(&self) -> RowIdentity {
        RowIdentity {
            index: self.index,
            key: self.key.clone(),
            start: self.start,
        }
    }
}

/// Explicit identity of a virtual row across renders: same slot, same data, same position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RowIdentity {
    /// Row slot index.
    pub index: usize,
    /// Row key in that slot.
    pub key: RowKey,
    /// Offset of the row's top edge.
    pub start: usize,
}

/// Alignment for [`RowWindow::scroll_to_index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    /// Row's top edge at the viewport's top edge.
    Start,
    /// Row centered in the viewport.
    Center,
    /// Row's bottom edge at the viewport's bottom edge.
    End,
    /// Scroll the least amount that brings the row fully into view.
    #[default]
    Auto,
}

/// Windowing state for one scroll container.
///
/// # Invariants
/// - `keys.len() == sizes.len()`
/// - `scroll_offset <= max_scroll_offset()` after every mutation
/// - `measured` only holds keys present in `keys`
#[derive(Debug, Clone)]
pub struct RowWindow {
    options: WindowOptions,
    keys: Vec<RowKey>,
    sizes: HeightIndex,
    /// Measurement cache, keyed by row so measurements survive reordering.
    measured: HashMap<RowKey, usize>,
    viewport_height: usize,
    scroll_offset: usize,
}

impl RowWindow {
    /// Create an empty window.
    pub fn new(options: WindowOptions) -> Self {
        Self {
            options,
            keys: Vec::new(),
            sizes: HeightIndex::new(0),
            measured: HashMap::new(),
            viewport_height: 0,
            scroll_offset: 0,
        }
    }

    /// Current options.
    pub fn options(&self) -> WindowOptions {
        self.options
    }

    /// Change overscan. Takes effect on the next `virtual_rows()` call.
    pub fn set_overscan(&mut self, overscan: usize) {
        self.options.overscan = overscan;
    }

    /// Replace the row set.
    ///
    /// Each slot takes its cached measurement if its key was measured before, otherwise the
    /// estimate. Measurements for keys that are no longer present are dropped.
    pub fn set_rows(&mut self, keys: Vec<RowKey>) {
        let before = self.measured.len();
        {
            let present: std::collections::HashSet<&RowKey> = keys.iter().collect();
            self.measured.retain(|key, _| present.contains(key));
        }
        if self.measured.len() != before {
            trace!(
                pruned = before - self.measured.len(),
                "dropped measurements for removed rows"
            );
        }

        let estimate = self.options.estimate_size;
        self.sizes = HeightIndex::from_heights(
            keys.iter()
                .map(|key| self.measured.get(key).copied().unwrap_or(estimate)),
        );
        self.keys = keys;
        self.clamp_scroll();
    }

    /// Number of row slots.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// No row slots.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Key of the slot at `index`.
    pub fn key(&self, index: usize) -> Option<&RowKey> {
        self.keys.get(index)
    }

    /// Cached measurement for a key, if the row was measured.
    pub fn measured_size(&self, key: &RowKey) -> Option<usize> {
        self.measured.get(key).copied()
    }

    /// Viewport height.
    pub fn viewport_height(&self) -> usize {
        self.viewport_height
    }

    /// Resize the viewport. The scroll offset is re-clamped.
    pub fn set_viewport_height(&mut self, height: usize) {
        self.viewport_height = height;
        self.clamp_scroll();
    }

    /// Current scroll offset.
    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Scroll to an absolute offset, clamped to `[0, max_scroll_offset()]`.
    pub fn set_scroll_offset(&mut self, offset: usize) {
        self.scroll_offset = offset;
        self.clamp_scroll();
    }

    /// Scroll by a signed amount, clamped.
    pub fn scroll_by(&mut self, delta: isize) {
        let offset = if delta < 0 {
            self.scroll_offset.saturating_sub(delta.unsigned_abs())
        } else {
            self.scroll_offset.saturating_add(delta as usize)
        };
        self.set_scroll_offset(offset);
    }

    /// Total content height.
    pub fn total_size(&self) -> usize {
        self.sizes.total()
    }

    /// Largest offset that still fills the viewport.
    pub fn max_scroll_offset(&self) -> usize {
        self.total_size().saturating_sub(self.viewport_height)
    }

    fn clamp_scroll(&mut self) {
        self.scroll_offset = self.scroll_offset.min(self.max_scroll_offset());
    }

    /// Start offset of a row, if it exists.
    pub fn row_start(&self, index: usize) -> Option<usize> {
        (index < self.len()).then(|| self.sizes.start_of(index))
    }

    /// Current size of a row, if it exists.
    pub fn row_size(&self, index: usize) -> Option<usize> {
        (index < self.len()).then(|| self.sizes.height(index))
    }

    /// Record a measured height for the row at `index`.
    ///
    /// When the row starts above the current scroll offset its size change would shift all
    /// visible content, so the scroll offset moves by the same delta and the viewport stays
    /// on the same rows.
    ///
    /// An infinite reading is not a measurement and is ignored.
    ///
    /// # Returns
    /// The scroll adjustment applied (0 when the row is at or below the offset, when the
    /// index is out of range, or when the reading was ignored).
    pub fn measure(&mut self, index: usize, px: f64) -> isize {
        if px.is_infinite() {
            return 0;
        }
        let Some(key) = self.keys.get(index).cloned() else {
            return 0;
        };
        let size = to_extent(px);
        self.measured.insert(key, size);

        let previous = self.sizes.height(index);
        if previous == size {
            return 0;
        }
        let start = self.sizes.start_of(index);
        self.sizes.set(index, size);

        let delta = size as isize - previous as isize;
        if start < self.scroll_offset {
            let before = self.scroll_offset;
            self.scroll_by(delta);
            let applied = self.scroll_offset as isize - before as isize;
            trace!(index, delta, applied, "anchored scroll after measurement above viewport");
            applied
        } else {
            self.clamp_scroll();
            0
        }
    }

    /// Scroll so the row at `index` is placed according to `align`.
    ///
    /// Out-of-range indices are clamped to the last row. No-op on an empty window.
    pub fn scroll_to_index(&mut self, index: usize, align: Align) {
        if self.is_empty() {
            return;
        }
        let index = index.min(self.len() - 1);
        let start = self.sizes.start_of(index);
        let end = self.sizes.prefix_sum(index);
        let viewport = self.viewport_height;

        let offset = match align {
            Align::Start => start,
            Align::End => end.saturating_sub(viewport),
            Align::Center => (start + end).div_ceil(2).saturating_sub(viewport / 2),
            Align::Auto => {
                if start < self.scroll_offset {
                    start
                } else if end > self.scroll_offset + viewport {
                    end.saturating_sub(viewport)
                } else {
                    self.scroll_offset
                }
            }
        };
        self.set_scroll_offset(offset);
    }

    /// Inclusive index range to materialize, or `None` when there are no rows.
    ///
    /// The first row covers the scroll offset; the last covers the final visible unit. Both
    /// are widened by overscan and clamped to the row set. A zero-height viewport still
    /// yields the row at the offset.
    pub fn visible_range(&self) -> Option<RangeInclusive<usize>> {
        if self.is_empty() {
            return None;
        }
        let last_index = self.len() - 1;
        let first = self
            .sizes
            .lower_bound(self.scroll_offset)
            .unwrap_or(last_index);
        let last = if self.viewport_height == 0 {
            first
        } else {
            self.sizes
                .lower_bound(self.scroll_offset + self.viewport_height - 1)
                .unwrap_or(last_index)
                .max(first)
        };

        let start = first.saturating_sub(self.options.overscan);
        let end = last.saturating_add(self.options.overscan).min(last_index);
        Some(start..=end)
    }

    /// Rows to materialize, ascending and contiguous.
    pub fn virtual_rows(&self) -> Vec<VirtualRow> {
        let Some(range) = self.visible_range() else {
            return Vec::new();
        };
        let mut start = self.sizes.start_of(*range.start());
        range
            .map(|index| {
                let size = self.sizes.height(index);
                let row = VirtualRow {
                    index,
                    key: self.keys[index].clone(),
                    start,
                    size,
                };
                start += size;
                row
            })
            .collect()
    }

    /// Filler heights above and below the materialized rows.
    pub fn padding(&self, rows: &[VirtualRow]) -> (usize, usize) {
        match (rows.first(), rows.last()) {
            (Some(first), Some(last)) => {
                (first.start, self.total_size().saturating_sub(last.end()))
            }
            _ => (0, 0),
        }
    }
}

impl Default for RowWindow {
    fn default() -> Self {
        Self::new(WindowOptions::default())
    }
}
