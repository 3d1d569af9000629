//! Carousel controller shared by the cinefeed screens.
//!
//! One parameterized state machine backs every "trending", "recommended" and
//! follower row in the client:
//!
//! - [`window::SlidingWindow`] is the pure clamped index state.
//! - [`controller::CarouselController`] mounts it as a task that serializes
//!   user commands, window input ([`input::InputBus`]) and the auto-advance
//!   [`timer::AdvanceTimer`].
//! - [`reveal`] covers "Load More" grids that grow a visible prefix instead.
//! - [`render`] turns state into track offsets, pagination dots and slices.
//! - [`registry::CarouselRegistry`] keeps one mounted carousel per
//!   [`types::CarouselKey`].

pub mod breakpoints;
pub mod constants;
pub mod controller;
pub mod error;
pub mod input;
pub mod registry;
pub mod render;
pub mod reveal;
pub mod settings;
pub mod timer;
pub mod types;
pub mod window;

pub use breakpoints::{Breakpoint, BreakpointTable, ResponsiveTracker};
pub use controller::{CarouselController, CarouselHandle, CarouselSnapshot};
pub use error::{CarouselError, RegistryError, SettingsError};
pub use input::{InputBus, InputEvent, NavKey};
pub use registry::{CarouselRegistry, MountedCarousel};
pub use render::{LoadMoreButton, PaginationDots, RevealView, TrackLayout};
pub use reveal::{RevealController, RevealHandle, RevealSnapshot, RevealState};
pub use settings::CarouselSettings;
pub use types::{CarouselConfig, CarouselKey, PresentationMode, WrapMode};
pub use window::SlidingWindow;
