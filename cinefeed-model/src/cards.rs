//! Display records rendered by carousels and grids.
//!
//! These are view-side projections of API responses. They carry only what a
//! card needs to draw itself; the full records stay behind the API.

use crate::ids::{ItemKey, MovieID, UserID};

/// Anything a carousel can show. The carousel itself only ever sees the list
/// length; `key` exists for the caller's per-item renderer.
pub trait CarouselItem {
    fn key(&self) -> ItemKey;
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MovieCard {
    pub id: MovieID,
    pub title: String,
    pub release_year: Option<u16>,
    pub poster_path: Option<String>,
    /// Average rating on a 0-10 scale.
    pub vote_average: Option<f32>,
}

impl MovieCard {
    pub fn new(id: impl Into<MovieID>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            release_year: None,
            poster_path: None,
            vote_average: None,
        }
    }

    pub fn with_release_year(mut self, year: u16) -> Self {
        self.release_year = Some(year);
        self
    }

    pub fn with_poster(mut self, path: impl Into<String>) -> Self {
        self.poster_path = Some(path.into());
        self
    }

    pub fn with_vote_average(mut self, vote: f32) -> Self {
        self.vote_average = Some(vote.clamp(0.0, 10.0));
        self
    }

    /// "Title (1999)" when the year is known.
    pub fn display_title(&self) -> String {
        match self.release_year {
            Some(year) => format!("{} ({})", self.title, year),
            None => self.title.clone(),
        }
    }
}

impl CarouselItem for MovieCard {
    fn key(&self) -> ItemKey {
        ItemKey::Movie(self.id)
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UserCard {
    pub id: UserID,
    pub username: String,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub is_following: bool,
}

impl UserCard {
    pub fn new(id: UserID, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            display_name: None,
            avatar_url: None,
            is_following: false,
        }
    }

    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.username)
    }
}

impl CarouselItem for UserCard {
    fn key(&self) -> ItemKey {
        ItemKey::User(self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_title_includes_year_when_known() {
        let card = MovieCard::new(27205, "Inception");
        assert_eq!(card.display_title(), "Inception");

        let card = card.with_release_year(2010);
        assert_eq!(card.display_title(), "Inception (2010)");
    }

    #[test]
    fn vote_average_is_clamped_to_scale() {
        let card = MovieCard::new(1, "x").with_vote_average(14.0);
        assert_eq!(card.vote_average, Some(10.0));
    }

    #[test]
    fn user_label_prefers_display_name() {
        let mut card = UserCard::new(UserID::new(), "reelfan");
        assert_eq!(card.label(), "reelfan");

        card.display_name = Some("Reel Fan".into());
        assert_eq!(card.label(), "Reel Fan");
    }

    #[test]
    fn keys_follow_record_kind() {
        let movie = MovieCard::new(11, "Star Wars");
        assert_eq!(movie.key(), ItemKey::Movie(MovieID(11)));

        let id = UserID::new();
        assert_eq!(UserCard::new(id, "han").key(), ItemKey::User(id));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn movie_card_reads_api_json() {
        let card: MovieCard = serde_json::from_str(
            r#"{
                "id": 550,
                "title": "Fight Club",
                "release_year": 1999,
                "poster_path": "/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg",
                "vote_average": 8.4
            }"#,
        )
        .expect("valid card");
        assert_eq!(card.id, MovieID(550));
        assert_eq!(card.display_title(), "Fight Club (1999)");
    }
}
