//! Ordered item lists with a revision stamp.
//!
//! A carousel resets to the first item whenever it is handed a *different*
//! data set, but keeps its position when the same data set merely grows or
//! shrinks (e.g. an optimistic remove). `ListRevision` is how the two cases are
//! told apart without comparing items.

use std::ops::{Deref, Range};
use std::sync::Arc;

use uuid::Uuid;

use crate::cards::CarouselItem;
use crate::ids::ItemKey;

/// Identity of one fetched data set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ListRevision(pub Uuid);

impl ListRevision {
    pub fn new() -> Self {
        ListRevision(Uuid::new_v4())
    }

    /// Revision used before any data has arrived.
    pub const fn empty() -> Self {
        ListRevision(Uuid::nil())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_nil()
    }
}

impl Default for ListRevision {
    fn default() -> Self {
        Self::empty()
    }
}

/// The only view of a list the carousel controller consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListShape {
    pub revision: ListRevision,
    pub len: usize,
}

impl ListShape {
    pub fn new(revision: ListRevision, len: usize) -> Self {
        Self { revision, len }
    }
}

/// An ordered, cheaply clonable list of display records.
#[derive(Debug)]
pub struct ItemList<T> {
    revision: ListRevision,
    items: Arc<[T]>,
}

impl<T> Clone for ItemList<T> {
    fn clone(&self) -> Self {
        Self {
            revision: self.revision,
            items: Arc::clone(&self.items),
        }
    }
}

impl<T> Default for ItemList<T> {
    fn default() -> Self {
        Self {
            revision: ListRevision::empty(),
            items: Arc::from(Vec::new()),
        }
    }
}

impl<T> ItemList<T> {
    /// Wrap a freshly fetched data set. Always mints a new revision.
    pub fn new(items: Vec<T>) -> Self {
        Self {
            revision: ListRevision::new(),
            items: Arc::from(items),
        }
    }

    /// Edit the list in place while keeping its revision, for local
    /// optimistic updates that should not move the carousel back to the start.
    pub fn edited<F>(&self, edit: F) -> Self
    where
        T: Clone,
        F: FnOnce(&mut Vec<T>),
    {
        let mut items = self.items.to_vec();
        edit(&mut items);
        Self {
            revision: self.revision,
            items: Arc::from(items),
        }
    }

    pub fn revision(&self) -> ListRevision {
        self.revision
    }

    pub fn shape(&self) -> ListShape {
        ListShape::new(self.revision, self.items.len())
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Items in `range`, clamped to the list bounds.
    pub fn window(&self, range: Range<usize>) -> &[T] {
        let end = range.end.min(self.items.len());
        let start = range.start.min(end);
        &self.items[start..end]
    }
}

impl<T: CarouselItem> ItemList<T> {
    pub fn keys(&self) -> Vec<ItemKey> {
        self.items.iter().map(CarouselItem::key).collect()
    }
}

impl<T> Deref for ItemList<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

impl<T> From<Vec<T>> for ItemList<T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::MovieCard;

    fn movies(n: u64) -> Vec<MovieCard> {
        (0..n).map(|i| MovieCard::new(i, format!("Movie {i}"))).collect()
    }

    #[test]
    fn new_lists_get_distinct_revisions() {
        let a = ItemList::new(movies(3));
        let b = ItemList::new(movies(3));
        assert_ne!(a.revision(), b.revision());
        assert!(!a.revision().is_empty());
    }

    #[test]
    fn clones_and_edits_share_revision() {
        let list = ItemList::new(movies(5));
        let clone = list.clone();
        assert_eq!(list.shape(), clone.shape());

        let trimmed = list.edited(|items| {
            items.remove(0);
        });
        assert_eq!(trimmed.revision(), list.revision());
        assert_eq!(trimmed.len(), 4);
    }

    #[test]
    fn default_list_is_empty_revision() {
        let list: ItemList<MovieCard> = ItemList::default();
        assert!(list.revision().is_empty());
        assert_eq!(list.shape().len, 0);
    }

    #[test]
    fn window_clamps_to_bounds() {
        let list = ItemList::new(movies(5));
        assert_eq!(list.window(3..10).len(), 2);
        assert!(list.window(7..9).is_empty());
    }

    #[test]
    fn keys_preserve_order() {
        let list = ItemList::new(movies(3));
        let keys = list.keys();
        assert_eq!(keys.len(), 3);
        assert_eq!(keys[2], list[2].key());
    }
}
