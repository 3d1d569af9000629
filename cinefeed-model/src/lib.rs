//! Data model shared by cinefeed views and carousels.
#![allow(missing_docs)]

pub mod cards;
pub mod ids;
pub mod list;

pub use cards::{CarouselItem, MovieCard, UserCard};
pub use ids::{ItemKey, MovieID, UserID};
pub use list::{ItemList, ListRevision, ListShape};
