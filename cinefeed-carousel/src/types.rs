//! Keys, modes and configuration presets for carousels.

use std::time::Duration;

use cinefeed_model::UserID;

use crate::breakpoints::BreakpointTable;
use crate::constants;

/// Which row a carousel backs. The registry mounts one carousel per key,
/// and pointer events name the key they were raised over.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CarouselKey {
    Trending,
    Popular,
    TopRated,
    Recommended,
    SearchResults,
    FollowSuggestions,
    Followers(UserID), // profile owner
    Watchlist(UserID), // profile owner
    Custom(&'static str),
}

/// What auto-advance does once it reaches the last window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WrapMode {
    /// Stop at the last window; the timer keeps running but steps are no-ops.
    Finite,
    /// Jump back to the first window.
    #[default]
    Wrap,
}

/// How a carousel presents its list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresentationMode {
    /// Fixed-size window translated across the full track. `auto_advance`
    /// of `None` disables the timer.
    SlidingWindow {
        auto_advance: Option<Duration>,
        wrap_mode: WrapMode,
    },
    /// Monotonically growing prefix driven by a "Load More" action.
    GrowingReveal { page_size: usize, load_delay: Duration },
}

impl PresentationMode {
    pub fn is_sliding(&self) -> bool {
        matches!(self, PresentationMode::SlidingWindow { .. })
    }

    pub fn auto_advance(&self) -> Option<Duration> {
        match self {
            PresentationMode::SlidingWindow { auto_advance, .. } => {
                auto_advance.filter(|period| !period.is_zero())
            }
            PresentationMode::GrowingReveal { .. } => None,
        }
    }

    pub fn wrap_mode(&self) -> WrapMode {
        match self {
            PresentationMode::SlidingWindow { wrap_mode, .. } => *wrap_mode,
            PresentationMode::GrowingReveal { .. } => WrapMode::Finite,
        }
    }
}

/// Static configuration for a carousel instance. Presets cover the screens
/// we have; callsites can still build one ad-hoc.
#[derive(Debug, Clone)]
pub struct CarouselConfig {
    pub mode: PresentationMode,
    pub breakpoints: BreakpointTable,
    /// Fixed slide width. When `None`, the width comes from the breakpoint
    /// row for the current viewport.
    pub item_width: Option<f32>,
    pub item_spacing: f32,
}

impl CarouselConfig {
    /// Hero carousel on the home screen: breakpoint-sized slides, wrapping
    /// auto-advance.
    pub fn hero_defaults() -> Self {
        Self {
            mode: PresentationMode::SlidingWindow {
                auto_advance: Some(Duration::from_millis(
                    constants::auto_advance::INTERVAL_MS,
                )),
                wrap_mode: WrapMode::Wrap,
            },
            breakpoints: BreakpointTable::default(),
            item_width: None,
            item_spacing: constants::layout::ITEM_SPACING,
        }
    }

    /// Follower / suggestion rows: manual navigation only.
    pub fn user_row_defaults() -> Self {
        Self {
            mode: PresentationMode::SlidingWindow {
                auto_advance: None,
                wrap_mode: WrapMode::Finite,
            },
            breakpoints: BreakpointTable::default(),
            item_width: Some(constants::layout::PROFILE_ITEM_WIDTH),
            item_spacing: constants::layout::ITEM_SPACING,
        }
    }

    /// Paginated search / watchlist grids with a "Load More" button.
    pub fn grid_defaults() -> Self {
        Self {
            mode: PresentationMode::GrowingReveal {
                page_size: constants::reveal::PAGE_SIZE,
                load_delay: Duration::from_millis(
                    constants::reveal::LOAD_DELAY_MS,
                ),
            },
            breakpoints: BreakpointTable::default(),
            item_width: None,
            item_spacing: constants::layout::ITEM_SPACING,
        }
    }

    pub fn with_auto_advance(mut self, period: Option<Duration>) -> Self {
        if let PresentationMode::SlidingWindow { auto_advance, .. } =
            &mut self.mode
        {
            *auto_advance = period;
        }
        self
    }

    /// Slide width at `viewport_width`: the fixed width if configured,
    /// otherwise the breakpoint row's width, otherwise the hero default.
    pub fn item_width_at(&self, viewport_width: f32) -> f32 {
        self.item_width
            .or_else(|| self.breakpoints.item_width_for(viewport_width))
            .unwrap_or(constants::layout::HERO_ITEM_WIDTH)
    }
}
