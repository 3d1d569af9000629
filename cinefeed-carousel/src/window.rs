//! SlidingWindow: the clamped index state behind every sliding carousel

use std::ops::Range;

use cinefeed_model::{ListRevision, ListShape};
use tracing::debug;

use crate::types::WrapMode;

/// Fixed-size window over an ordered list.
///
/// Invariant: `0 <= current_index <= max_index()` where
/// `max_index = max(0, item_count - visible_count)` and `visible_count >= 1`.
/// Every mutator restores the invariant before returning and reports whether
/// `current_index` moved. Inputs that would be nonsensical (negative counts or
/// indices) are clamped rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlidingWindow {
    current_index: usize,
    visible_count: usize,
    item_count: usize,
    revision: ListRevision,
}

impl Default for SlidingWindow {
    fn default() -> Self {
        Self::new(0, 1)
    }
}

impl SlidingWindow {
    pub fn new(item_count: usize, visible_count: usize) -> Self {
        Self {
            current_index: 0,
            visible_count: visible_count.max(1),
            item_count,
            revision: ListRevision::empty(),
        }
    }

    pub fn from_shape(shape: ListShape, visible_count: usize) -> Self {
        let mut window = Self::new(shape.len, visible_count);
        window.revision = shape.revision;
        window
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn revision(&self) -> ListRevision {
        self.revision
    }

    /// Largest index at which a full window still fits.
    pub fn max_index(&self) -> usize {
        self.item_count.saturating_sub(self.visible_count)
    }

    pub fn can_go_next(&self) -> bool {
        self.current_index < self.max_index()
    }

    pub fn can_go_previous(&self) -> bool {
        self.current_index > 0
    }

    /// Indices of the items currently inside the window.
    pub fn visible_range(&self) -> Range<usize> {
        let end =
            (self.current_index + self.visible_count).min(self.item_count);
        self.current_index.min(end)..end
    }

    pub fn next(&mut self) -> bool {
        if !self.can_go_next() {
            return false;
        }
        self.set_index(self.current_index + 1)
    }

    pub fn prev(&mut self) -> bool {
        if !self.can_go_previous() {
            return false;
        }
        self.set_index(self.current_index - 1)
    }

    /// Jump to `index`, clamped to `[0, max_index]`.
    pub fn go_to(&mut self, index: i64) -> bool {
        let max = self.max_index() as i64;
        let clamped = index.clamp(0, max) as usize;
        self.set_index(clamped)
    }

    /// Change the window size. Values below 1 are treated as 1. The index
    /// only moves when it no longer fits under the new `max_index`.
    pub fn set_visible_count(&mut self, visible_count: i64) -> bool {
        let visible_count = visible_count.max(1) as usize;
        if visible_count == self.visible_count {
            return false;
        }
        debug!(
            "Carousel window resized: {} -> {} items (total={})",
            self.visible_count, visible_count, self.item_count
        );
        self.visible_count = visible_count;
        self.reclamp()
    }

    /// Change the item count without changing list identity. Negative
    /// counts are treated as empty.
    pub fn set_item_count(&mut self, item_count: i64) -> bool {
        let item_count = item_count.max(0) as usize;
        if item_count == self.item_count {
            return false;
        }
        self.item_count = item_count;
        self.reclamp()
    }

    /// Take a new list shape. A different revision is a new data set and
    /// sends the window back to the start; the same revision only re-clamps.
    pub fn replace_list(&mut self, shape: ListShape) -> bool {
        if shape.revision != self.revision {
            debug!(
                "Carousel list replaced ({} items), resetting to start",
                shape.len
            );
            self.revision = shape.revision;
            self.item_count = shape.len;
            return self.set_index(0);
        }
        self.set_item_count(shape.len as i64)
    }

    /// One auto-advance step: forward by one, and at the end either wrap to
    /// the start or stay put depending on `wrap_mode`.
    pub fn advance(&mut self, wrap_mode: WrapMode) -> bool {
        if self.can_go_next() {
            return self.set_index(self.current_index + 1);
        }
        match wrap_mode {
            WrapMode::Wrap => self.set_index(0),
            WrapMode::Finite => false,
        }
    }

    fn reclamp(&mut self) -> bool {
        let max = self.max_index();
        if self.current_index > max {
            self.set_index(max)
        } else {
            false
        }
    }

    fn set_index(&mut self, index: usize) -> bool {
        if index == self.current_index {
            return false;
        }
        self.current_index = index;
        true
    }
}
