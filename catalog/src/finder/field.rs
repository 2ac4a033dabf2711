//! Searchable item fields and case-insensitive substring matching.

use std::fmt;
use std::str::FromStr;

use crate::types::Item;

/// A field that partial searches can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchField {
    Title,
    Author,
    Genre,
}

impl SearchField {
    pub const ALL: [Self; 3] = [Self::Title, Self::Author, Self::Genre];

    /// The field's value on `item`.
    #[must_use]
    pub fn value_of(self, item: &Item) -> &str {
        match self {
            Self::Title => &item.title,
            Self::Author => &item.author,
            Self::Genre => &item.genre,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Author => "author",
            Self::Genre => "genre",
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchField {
    type Err = FinderError;

    /// Parse a field tag. Tags are matched case-insensitively.
    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(tag.trim()))
            .ok_or_else(|| FinderError::InvalidField(tag.to_string()))
    }
}

/// A lower-cased keyword, prepared once and matched against many values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Needle {
    lowered: String,
}

impl Needle {
    #[must_use]
    pub fn new(keyword: &str) -> Self {
        Self {
            lowered: keyword.to_lowercase(),
        }
    }

    /// Whether `haystack`, lower-cased, contains the keyword anywhere.
    ///
    /// An empty keyword is contained in every value.
    #[must_use]
    pub fn found_in(&self, haystack: &str) -> bool {
        self.lowered.is_empty() || haystack.to_lowercase().contains(&self.lowered)
    }
}

/// Errors raised by the finder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinderError {
    /// The field tag is not one of `title`, `author` or `genre`.
    InvalidField(String),
}

impl fmt::Display for FinderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidField(tag) => {
                write!(f, "invalid search field '{tag}': expected title, author or genre")
            }
        }
    }
}

impl std::error::Error for FinderError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_field_tags() {
        assert_eq!("title".parse::<SearchField>(), Ok(SearchField::Title));
        assert_eq!("Author".parse::<SearchField>(), Ok(SearchField::Author));
        assert_eq!(" GENRE ".parse::<SearchField>(), Ok(SearchField::Genre));
    }

    #[test]
    fn test_parse_invalid_field() {
        let err = "publisher".parse::<SearchField>().expect_err("invalid");
        assert_eq!(err, FinderError::InvalidField("publisher".to_string()));
        assert_eq!(
            err.to_string(),
            "invalid search field 'publisher': expected title, author or genre"
        );
    }

    #[test]
    fn test_value_of() {
        let item = Item::new(1, "Naruto", "Kishimoto", "Action");
        assert_eq!(SearchField::Title.value_of(&item), "Naruto");
        assert_eq!(SearchField::Author.value_of(&item), "Kishimoto");
        assert_eq!(SearchField::Genre.value_of(&item), "Action");
    }

    #[test]
    fn test_needle_is_case_insensitive_substring() {
        let needle = Needle::new("NaR");
        assert!(needle.found_in("Naruto"));
        assert!(needle.found_in("The Chronicles of Narnia"));
        assert!(needle.found_in("sonar"));
        assert!(!needle.found_in("Bleach"));
    }

    #[test]
    fn test_empty_needle_matches_everything() {
        let needle = Needle::new("");
        assert!(needle.found_in(""));
        assert!(needle.found_in("anything"));
    }
}
