//! Carousel constants
//!
//! Shared defaults for every carousel in the client. Tuning should happen
//! here (or through `CarouselSettings`) so all screens update consistently.

/// Responsive breakpoints mapping viewport width to window size.
pub mod breakpoints {
    /// `(min_width_px, visible_items, item_width_px)`, ascending by width.
    /// Widths below the first entry use the first entry.
    pub const DEFAULT_TABLE: [(u32, usize, f32); 4] = [
        (0, 1, 320.0),
        (640, 2, 300.0),
        (768, 3, 280.0),
        (1024, 4, 260.0),
    ];
}

/// Timed advancement for sliding-window carousels.
pub mod auto_advance {
    /// Interval between automatic steps (ms).
    pub const INTERVAL_MS: u64 = 4000;
}

/// Growing-reveal ("Load More") grids.
pub mod reveal {
    /// Items revealed initially and added per load-more action.
    pub const PAGE_SIZE: usize = 12;
    /// Simulated load delay while the button is disabled (ms).
    pub const LOAD_DELAY_MS: u64 = 600;
}

/// Track geometry defaults.
pub mod layout {
    /// Hero slide width when no breakpoint width applies.
    pub const HERO_ITEM_WIDTH: f32 = 260.0;
    /// Poster width for user/profile rows.
    pub const PROFILE_ITEM_WIDTH: f32 = 160.0;
    /// Gap between adjacent items on the track.
    pub const ITEM_SPACING: f32 = 16.0;
}

/// Mailbox sizing for controller tasks.
pub mod channels {
    pub const COMMAND_CAPACITY: usize = 64;
    /// Broadcast capacity of the window input bus. Slow carousels that lag
    /// behind this many events skip ahead rather than block the bus.
    pub const INPUT_CAPACITY: usize = 128;
}
