//! View models for the two presentation modes.
//!
//! Nothing here draws; these are the numbers a view needs. A sliding carousel
//! renders the *whole* list on one track and translates it, so items keep
//! their widget state while sliding. A reveal grid renders a prefix slice.

use std::ops::Range;

use cinefeed_model::ItemList;

/// Horizontal track geometry for sliding-window mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackLayout {
    pub item_width: f32,
    pub item_spacing: f32,
    pub item_count: usize,
    pub current_index: usize,
}

impl TrackLayout {
    pub fn stride(&self) -> f32 {
        (self.item_width + self.item_spacing).max(0.0)
    }

    /// Distance the track is shifted left, in pixels.
    pub fn offset_px(&self) -> f32 {
        self.current_index as f32 * self.stride()
    }

    /// Horizontal translation to apply to the track (negative = left).
    pub fn translate_x(&self) -> f32 {
        -self.offset_px()
    }

    /// Width of the full track including gaps between items.
    pub fn track_width(&self) -> f32 {
        if self.item_count == 0 {
            return 0.0;
        }
        self.item_count as f32 * self.item_width.max(0.0)
            + self.item_count.saturating_sub(1) as f32 * self.item_spacing
    }

    /// Left edge of item `index` on the track.
    pub fn item_x(&self, index: usize) -> f32 {
        index as f32 * self.stride()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dot {
    pub index: usize,
    pub active: bool,
}

impl Dot {
    /// Index to hand to `go_to` when this dot is clicked.
    pub fn target(&self) -> i64 {
        self.index as i64
    }
}

/// One dot per valid window start, `0..=max_index`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationDots {
    dots: Vec<Dot>,
}

impl PaginationDots {
    /// Dots for a sliding window, or `None` when everything already fits
    /// (`item_count <= visible_count`) and there is nothing to page through.
    pub fn for_window(
        current_index: usize,
        visible_count: usize,
        item_count: usize,
    ) -> Option<Self> {
        if item_count <= visible_count {
            return None;
        }
        let max_index = item_count - visible_count;
        let dots = (0..=max_index)
            .map(|index| Dot {
                index,
                active: index == current_index,
            })
            .collect();
        Some(Self { dots })
    }

    pub fn dots(&self) -> &[Dot] {
        &self.dots
    }

    pub fn len(&self) -> usize {
        self.dots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dots.is_empty()
    }

    pub fn active(&self) -> Option<usize> {
        self.dots.iter().find(|dot| dot.active).map(|dot| dot.index)
    }
}

/// State of the "Load More" button under a reveal grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMoreButton {
    Enabled,
    /// A load is in flight; clicks are ignored.
    Loading,
    /// Everything is already shown.
    Exhausted,
}

impl LoadMoreButton {
    pub fn is_enabled(&self) -> bool {
        matches!(self, LoadMoreButton::Enabled)
    }
}

/// Prefix slice for growing-reveal mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealView {
    pub range: Range<usize>,
    pub button: LoadMoreButton,
}

impl RevealView {
    pub fn slice<'a, T>(&self, items: &'a ItemList<T>) -> &'a [T] {
        items.window(self.range.clone())
    }
}
