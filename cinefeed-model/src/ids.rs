use uuid::Uuid;

/// External catalogue id for a movie (the id the metadata provider assigns).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MovieID(pub u64);

impl MovieID {
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for MovieID {
    fn from(value: u64) -> Self {
        MovieID(value)
    }
}

impl std::fmt::Display for MovieID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Strongly typed ID for users issued by the identity provider
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UserID(pub Uuid);

impl Default for UserID {
    fn default() -> Self {
        Self::new()
    }
}

impl UserID {
    pub fn new() -> Self {
        UserID(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    pub fn to_uuid(&self) -> Uuid {
        self.0
    }
}

impl AsRef<Uuid> for UserID {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for UserID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Rendering identity of a carousel item. Carousel logic never looks at it;
/// views use it to keep per-item widget state stable across re-renders.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemKey {
    Movie(MovieID),
    User(UserID),
}

impl From<MovieID> for ItemKey {
    fn from(id: MovieID) -> Self {
        ItemKey::Movie(id)
    }
}

impl From<UserID> for ItemKey {
    fn from(id: UserID) -> Self {
        ItemKey::User(id)
    }
}

impl std::fmt::Display for ItemKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemKey::Movie(id) => write!(f, "movie:{id}"),
            ItemKey::User(id) => write!(f, "user:{id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_key_display_is_namespaced() {
        let movie = ItemKey::from(MovieID(603));
        assert_eq!(movie.to_string(), "movie:603");

        let user = UserID(Uuid::nil());
        assert_eq!(
            ItemKey::from(user).to_string(),
            "user:00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn fresh_user_ids_are_distinct() {
        assert_ne!(UserID::new(), UserID::new());
    }
}
