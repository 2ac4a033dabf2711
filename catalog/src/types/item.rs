//! Catalog item and its composite sort key.
//!
//! An item is ordered by `(title, author, genre)`, compared field by field.
//! The `id` is an externally assigned payload and never takes part in the
//! ordering.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier assigned to an item by the persistence store.
///
/// Ids are unique across the catalog but are not part of the sort key.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl ItemId {
    /// The id that follows this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ItemId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A cataloged entity.
///
/// # Invariants
///
/// - Two items with equal `(title, author, genre)` are the same index entry.
/// - `genre` may hold several comma-separated values, e.g. `"Action, Comedy"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    pub author: String,
    pub genre: String,
}

impl Item {
    #[must_use]
    pub fn new(
        id: impl Into<ItemId>,
        title: impl Into<String>,
        author: impl Into<String>,
        genre: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            genre: genre.into(),
        }
    }

    /// Borrow the composite sort key of this item.
    #[must_use]
    pub fn key(&self) -> SortKey<'_> {
        SortKey {
            title: &self.title,
            author: &self.author,
            genre: &self.genre,
        }
    }

    /// Split the genre field into its individual values.
    ///
    /// Empty segments are skipped and surrounding whitespace is trimmed.
    pub fn genres(&self) -> impl Iterator<Item = &str> {
        self.genre
            .split(',')
            .map(str::trim)
            .filter(|genre| !genre.is_empty())
    }

    /// Set the author to `new` if it is exactly `old`.
    ///
    /// Returns whether the item changed.
    pub fn rename_author(&mut self, old: &str, new: &str) -> bool {
        if self.author != old || old == new {
            return false;
        }
        new.clone_into(&mut self.author);
        true
    }

    /// Replace the genre value `old` with `new` wherever it appears in the
    /// genre list.
    ///
    /// Values are matched exactly after trimming. The rewritten list is
    /// joined with `", "` and keeps its order; a value that would appear
    /// twice is kept only at its first position. Returns whether the item
    /// changed.
    pub fn rename_genre(&mut self, old: &str, new: &str) -> bool {
        if old == new || !self.genres().any(|genre| genre == old) {
            return false;
        }
        let mut renamed: Vec<&str> = Vec::new();
        for genre in self.genres() {
            let genre = if genre == old { new } else { genre };
            if !renamed.contains(&genre) {
                renamed.push(genre);
            }
        }
        self.genre = renamed.join(", ");
        true
    }
}

/// Borrowed `(title, author, genre)` triple.
///
/// The derived ordering compares `title` first, then `author`, then `genre`,
/// which is the order every index operation relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SortKey<'a> {
    pub title: &'a str,
    pub author: &'a str,
    pub genre: &'a str,
}

impl fmt::Display for SortKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.title, self.author, self.genre)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_orders_by_title_first() {
        let a = Item::new(9, "Bleach", "Zed", "Zzz");
        let b = Item::new(1, "Naruto", "Abe", "Aaa");
        assert!(a.key() < b.key());
    }

    #[test]
    fn test_key_falls_back_to_author_then_genre() {
        let a = Item::new(1, "Naruto", "Kishimoto", "Action");
        let b = Item::new(2, "Naruto", "Kishimoto", "Drama");
        let c = Item::new(3, "Naruto", "Oda", "Action");
        assert!(a.key() < b.key());
        assert!(b.key() < c.key());
    }

    #[test]
    fn test_key_ignores_id() {
        let a = Item::new(1, "Naruto", "Kishimoto", "Action");
        let b = Item::new(2, "Naruto", "Kishimoto", "Action");
        assert_eq!(a.key(), b.key());
        assert_ne!(a, b);
    }

    #[test]
    fn test_genres_splits_multi_value_field() {
        let item = Item::new(1, "Naruto", "Kishimoto", "Action, Comedy,, Drama ");
        let genres: Vec<&str> = item.genres().collect();
        assert_eq!(genres, vec!["Action", "Comedy", "Drama"]);
    }

    #[test]
    fn test_rename_author_exact_match_only() {
        let mut item = Item::new(1, "Naruto", "Masashi Kishimoto", "Action");
        assert!(!item.rename_author("Kishimoto", "M. Kishimoto"));
        assert!(!item.rename_author("Masashi Kishimoto", "Masashi Kishimoto"));
        assert!(item.rename_author("Masashi Kishimoto", "M. Kishimoto"));
        assert_eq!(item.author, "M. Kishimoto");
    }

    #[test]
    fn test_rename_genre_in_multi_value_field() {
        let mut item = Item::new(1, "Gintama", "Sorachi", "Action, Comedy");
        assert!(item.rename_genre("Comedy", "Gag"));
        assert_eq!(item.genre, "Action, Gag");

        // Substrings of a value are not renamed.
        assert!(!item.rename_genre("Act", "Battle"));
        assert_eq!(item.genre, "Action, Gag");
    }

    #[test]
    fn test_rename_genre_merges_duplicate_values() {
        let mut item = Item::new(1, "Gintama", "Sorachi", "Comedy,  Action ,Gag");
        assert!(item.rename_genre("Gag", "Comedy"));
        assert_eq!(item.genre, "Comedy, Action");
    }

    #[test]
    fn test_item_id_next_saturates() {
        assert_eq!(ItemId(4).next(), ItemId(5));
        assert_eq!(ItemId(u64::MAX).next(), ItemId(u64::MAX));
    }

    #[test]
    fn test_item_serde_shape() {
        let item = Item::new(3, "One Piece", "Oda", "Action");
        let json = serde_json::to_string(&item).expect("serialize");
        assert_eq!(
            json,
            r#"{"id":3,"title":"One Piece","author":"Oda","genre":"Action"}"#
        );
        let back: Item = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, item);
    }
}
