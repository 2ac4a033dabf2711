//! Partial-match lookup over an [`OrderedIndex`].
//!
//! Every function here is read-only and stateless: it walks the index in
//! order and keeps the items whose chosen field contains the keyword,
//! ignoring case. Results follow ascending key order unless they are
//! explicitly ranked.

mod field;
mod rank;

pub use field::{FinderError, Needle, SearchField};
pub use rank::{compare_titles, rank_matches};

use crate::index::OrderedIndex;
use crate::types::Item;

/// Items whose `field` contains `keyword`, case-insensitively.
///
/// An empty keyword matches every item.
#[must_use]
pub fn search_by_field<'a>(
    index: &'a OrderedIndex,
    keyword: &str,
    field: SearchField,
) -> Vec<&'a Item> {
    let needle = Needle::new(keyword);
    index
        .in_order()
        .filter(|item| needle.found_in(field.value_of(item)))
        .collect()
}

/// Like [`search_by_field`], with the field given as a tag string.
///
/// # Errors
///
/// Returns `InvalidField` if `field` is not `title`, `author` or `genre`.
pub fn search_by_field_name<'a>(
    index: &'a OrderedIndex,
    keyword: &str,
    field: &str,
) -> Result<Vec<&'a Item>, FinderError> {
    let field: SearchField = field.parse()?;
    Ok(search_by_field(index, keyword, field))
}

#[must_use]
pub fn search_by_title<'a>(index: &'a OrderedIndex, keyword: &str) -> Vec<&'a Item> {
    search_by_field(index, keyword, SearchField::Title)
}

#[must_use]
pub fn search_by_author<'a>(index: &'a OrderedIndex, keyword: &str) -> Vec<&'a Item> {
    search_by_field(index, keyword, SearchField::Author)
}

#[must_use]
pub fn search_by_genre<'a>(index: &'a OrderedIndex, keyword: &str) -> Vec<&'a Item> {
    search_by_field(index, keyword, SearchField::Genre)
}

/// Items carrying at least one of the selected genres.
///
/// The item's genre field is split on commas and each value is matched by
/// case-insensitive containment. An empty selection matches nothing.
#[must_use]
pub fn filter_by_genres<'a, S: AsRef<str>>(index: &'a OrderedIndex, genres: &[S]) -> Vec<&'a Item> {
    let needles: Vec<Needle> = genres
        .iter()
        .map(|genre| Needle::new(genre.as_ref()))
        .collect();
    index
        .in_order()
        .filter(|item| {
            item.genres()
                .any(|value| needles.iter().any(|needle| needle.found_in(value)))
        })
        .collect()
}

/// Items whose author contains `author` and whose genre contains `genre`.
#[must_use]
pub fn filter_by_author_and_genre<'a>(
    index: &'a OrderedIndex,
    author: &str,
    genre: &str,
) -> Vec<&'a Item> {
    let author = Needle::new(author);
    let genre = Needle::new(genre);
    index
        .in_order()
        .filter(|item| author.found_in(&item.author) && genre.found_in(&item.genre))
        .collect()
}

/// Result of resolving a keyword to a single item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disambiguation<'a> {
    /// No title contains the keyword.
    NoMatch,
    /// Exactly one title contains the keyword.
    Unique(&'a Item),
    /// Several titles contain the keyword; ranked best-first.
    Ambiguous(Vec<&'a Item>),
}

impl<'a> Disambiguation<'a> {
    /// The single match, or the top-ranked one when ambiguous.
    #[must_use]
    pub fn best(&self) -> Option<&'a Item> {
        match self {
            Self::NoMatch => None,
            Self::Unique(item) => Some(*item),
            Self::Ambiguous(ranked) => ranked.first().copied(),
        }
    }

    /// All candidates, best-first.
    #[must_use]
    pub fn candidates(&self) -> &[&'a Item] {
        match self {
            Self::NoMatch => &[],
            Self::Unique(item) => std::slice::from_ref(item),
            Self::Ambiguous(ranked) => ranked,
        }
    }

    /// Resolve a 1-based choice made by the caller among the candidates.
    #[must_use]
    pub fn select(&self, ordinal: usize) -> Option<&'a Item> {
        ordinal
            .checked_sub(1)
            .and_then(|i| self.candidates().get(i).copied())
    }

    #[must_use]
    pub const fn is_ambiguous(&self) -> bool {
        matches!(self, Self::Ambiguous(_))
    }
}

/// Resolve `keyword` against titles.
///
/// Zero matches yields `NoMatch` and one yields `Unique`. Several matches
/// are ranked with [`rank_matches`] and handed back for the caller to pick
/// from.
#[must_use]
pub fn disambiguate<'a>(index: &'a OrderedIndex, keyword: &str) -> Disambiguation<'a> {
    let mut matches = search_by_title(index, keyword);
    match matches.len() {
        0 => Disambiguation::NoMatch,
        1 => matches.pop().map_or(Disambiguation::NoMatch, Disambiguation::Unique),
        _ => Disambiguation::Ambiguous(rank_matches(keyword, matches)),
    }
}
