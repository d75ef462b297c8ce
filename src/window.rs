//! Windowed-rendering geometry.
//!
//! The full item list stays in memory; only the rows intersecting the
//! viewport, plus `overscan` rows on each side, are built into widgets.
//! Every row has the same height and is followed by a fixed gap, so
//! row `i` starts at `i * stride` and the whole list is
//! `item_count * stride` units tall. Units are terminal lines.

use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowConfig {
    /// Height of the visible area. Measured from the terminal every frame.
    pub viewport_height: u32,
    /// Height of one row, excluding the gap below it.
    pub row_height: u32,
    /// Blank space after each row.
    pub row_gap: u32,
    /// Extra rows built above and below the visible ones.
    pub overscan: usize,
    /// Remaining distance to the end at or below which more items are
    /// requested.
    pub load_threshold: u32,
}

impl WindowConfig {
    /// Distance from the top of one row to the top of the next.
    pub fn stride(&self) -> u32 {
        self.row_height.saturating_add(self.row_gap).max(1)
    }

    /// Top of row `index`, relative to the top of the list.
    pub fn row_top(&self, index: usize) -> u64 {
        index as u64 * u64::from(self.stride())
    }

    /// Total scrollable height of `item_count` rows.
    pub fn scroll_extent(&self, item_count: usize) -> u64 {
        self.row_top(item_count)
    }

    /// Largest valid scroll offset.
    pub fn max_scroll_offset(&self, item_count: usize) -> u64 {
        self.scroll_extent(item_count)
            .saturating_sub(u64::from(self.viewport_height))
    }

    /// Clamp a scroll offset into `[0, max_scroll_offset]`.
    pub fn clamp_offset(&self, offset: u64, item_count: usize) -> u64 {
        offset.min(self.max_scroll_offset(item_count))
    }

    /// Rows intersecting `[offset, offset + viewport_height)`.
    pub fn visible_range(&self, offset: u64, item_count: usize) -> Range<usize> {
        if item_count == 0 || self.viewport_height == 0 {
            return 0..0;
        }
        let stride = u64::from(self.stride());
        let bottom = offset + u64::from(self.viewport_height);

        let start = usize::try_from(offset / stride).unwrap_or(usize::MAX);
        let end = usize::try_from(bottom.div_ceil(stride)).unwrap_or(usize::MAX);
        start.min(item_count)..end.min(item_count)
    }

    /// Upper bound on the rows [`render_range`](Self::render_range) yields.
    pub fn max_rendered_rows(&self) -> usize {
        let visible = self.viewport_height.div_ceil(self.stride()) as usize;
        visible + 2 * self.overscan
    }

    /// Rows to build: the visible range widened by `overscan` on both sides.
    ///
    /// An unaligned offset can expose one row more than
    /// `ceil(viewport / stride)`; the leading overscan then gives up a row so
    /// the total stays within [`max_rendered_rows`](Self::max_rendered_rows).
    pub fn render_range(&self, offset: u64, item_count: usize) -> Range<usize> {
        let visible = self.visible_range(offset, item_count);
        if visible.is_empty() {
            return visible;
        }

        let end = visible.end.saturating_add(self.overscan).min(item_count);
        let mut start = visible.start.saturating_sub(self.overscan);
        let cap = self.max_rendered_rows().max(visible.len());
        if end - start > cap {
            start = end - cap;
        }
        start..end
    }

    /// Distance between the bottom of the viewport and the end of the list.
    pub fn remaining_distance(&self, offset: u64, item_count: usize) -> u64 {
        self.scroll_extent(item_count)
            .saturating_sub(offset)
            .saturating_sub(u64::from(self.viewport_height))
    }

    /// Whether the viewport is within `load_threshold` of the end.
    ///
    /// The boundary counts: a remaining distance equal to the threshold is
    /// near the end.
    pub fn near_end(&self, offset: u64, item_count: usize) -> bool {
        self.remaining_distance(offset, item_count) <= u64::from(self.load_threshold)
    }
}
