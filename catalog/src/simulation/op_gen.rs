//! Operation generator for deterministic simulation testing.
//!
//! This module generates random but reproducible sequences of index
//! operations. Titles, authors and genres are drawn from small pools so that
//! key collisions, duplicate titles and removals of present items happen
//! often.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::finder::SearchField;
use crate::types::{Item, ItemId};

/// Configuration for operation generation.
#[derive(Debug, Clone)]
pub struct OpGenConfig {
    /// Relative weight of inserts.
    pub insert_weight: u32,
    /// Relative weight of removals.
    pub remove_weight: u32,
    /// Relative weight of updates.
    pub update_weight: u32,
    /// Relative weight of exact and partial lookups.
    pub lookup_weight: u32,
    /// Probability that an operation clears the whole index (0.0 - 1.0).
    pub clear_rate: f64,
    /// Number of distinct titles to draw from.
    pub title_pool_size: usize,
    /// Number of distinct authors to draw from.
    pub author_pool_size: usize,
}

impl Default for OpGenConfig {
    fn default() -> Self {
        Self {
            insert_weight: 5,
            remove_weight: 2,
            update_weight: 2,
            lookup_weight: 3,
            clear_rate: 0.002,
            title_pool_size: 64,
            author_pool_size: 6,
        }
    }
}

/// A single operation applied to the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Insert(Item),
    Remove(String),
    Update { old_title: String, item: Item },
    Search(String),
    Fuzzy { field: SearchField, keyword: String },
    Disambiguate(String),
    Clear,
}

const GENRES: [&str; 5] = ["Action", "Drama", "Fantasy", "Action, Comedy", "Mystery"];
const SYLLABLES: [&str; 8] = ["na", "ru", "to", "ble", "ach", "pie", "ce", "on"];

/// Generator for random `Operation` instances.
///
/// This generator produces deterministic sequences of operations
/// given the same seed, enabling reproducible testing.
pub struct OperationGenerator {
    rng: StdRng,
    config: OpGenConfig,
    titles: Vec<String>,
    authors: Vec<String>,
    next_id: u64,
}

impl OperationGenerator {
    /// Create a new operation generator with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, OpGenConfig::default())
    }

    /// Create a new operation generator with custom configuration.
    #[must_use]
    pub fn with_config(seed: u64, config: OpGenConfig) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);

        let titles = (0..config.title_pool_size.max(1))
            .map(|i| {
                let word: String = (0..rng.random_range(1..=3))
                    .map(|_| SYLLABLES[rng.random_range(0..SYLLABLES.len())])
                    .collect();
                // Mixed case keeps case-insensitive matching honest.
                if i % 2 == 0 {
                    format!("{word} {i}")
                } else {
                    format!("{} {i}", word.to_uppercase())
                }
            })
            .collect();
        let authors = (0..config.author_pool_size.max(1))
            .map(|i| format!("Author {i}"))
            .collect();

        Self {
            rng,
            config,
            titles,
            authors,
            next_id: 1,
        }
    }

    /// Generate the next operation.
    pub fn next_operation(&mut self) -> Operation {
        if self.rng.random::<f64>() < self.config.clear_rate {
            return Operation::Clear;
        }

        let c = &self.config;
        let total = c.insert_weight + c.remove_weight + c.update_weight + c.lookup_weight;
        let mut roll = self.rng.random_range(0..total.max(1));

        if roll < c.insert_weight {
            return Operation::Insert(self.random_item());
        }
        roll -= c.insert_weight;
        if roll < c.remove_weight {
            return Operation::Remove(self.random_title());
        }
        roll -= c.remove_weight;
        if roll < c.update_weight {
            let old_title = self.random_title();
            // Half of the updates keep the title to exercise the in-place path.
            let mut item = self.random_item();
            if self.rng.random_bool(0.5) {
                item.title.clone_from(&old_title);
            }
            return Operation::Update { old_title, item };
        }
        self.random_lookup()
    }

    fn random_lookup(&mut self) -> Operation {
        match self.rng.random_range(0..3) {
            0 => Operation::Search(self.random_title()),
            1 => {
                let field = SearchField::ALL[self.rng.random_range(0..SearchField::ALL.len())];
                let keyword = self.random_keyword(field);
                Operation::Fuzzy { field, keyword }
            }
            _ => {
                let keyword = self.random_keyword(SearchField::Title);
                Operation::Disambiguate(keyword)
            }
        }
    }

    /// A substring of a pooled value, possibly re-cased.
    fn random_keyword(&mut self, field: SearchField) -> String {
        let source = match field {
            SearchField::Title => self.random_title(),
            SearchField::Author => self.random_author(),
            SearchField::Genre => GENRES[self.rng.random_range(0..GENRES.len())].to_string(),
        };
        let chars: Vec<char> = source.chars().collect();
        let start = self.rng.random_range(0..=chars.len());
        let end = self.rng.random_range(start..=chars.len());
        let keyword: String = chars[start..end].iter().collect();
        if self.rng.random_bool(0.5) {
            keyword.to_uppercase()
        } else {
            keyword
        }
    }

    fn random_item(&mut self) -> Item {
        let id = ItemId(self.next_id);
        self.next_id += 1;
        let title = self.random_title();
        let author = self.random_author();
        let genre = GENRES[self.rng.random_range(0..GENRES.len())];
        Item::new(id, title, author, genre)
    }

    fn random_title(&mut self) -> String {
        self.titles[self.rng.random_range(0..self.titles.len())].clone()
    }

    fn random_author(&mut self) -> String {
        self.authors[self.rng.random_range(0..self.authors.len())].clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_operations() {
        let mut a = OperationGenerator::new(7);
        let mut b = OperationGenerator::new(7);
        for _ in 0..200 {
            assert_eq!(a.next_operation(), b.next_operation());
        }
    }

    #[test]
    fn test_generates_every_kind() {
        let config = OpGenConfig {
            clear_rate: 0.05,
            ..OpGenConfig::default()
        };
        let mut generator = OperationGenerator::with_config(11, config);
        let (mut inserts, mut removes, mut updates, mut lookups, mut clears) = (0, 0, 0, 0, 0);
        for _ in 0..2_000 {
            match generator.next_operation() {
                Operation::Insert(_) => inserts += 1,
                Operation::Remove(_) => removes += 1,
                Operation::Update { .. } => updates += 1,
                Operation::Search(_) | Operation::Fuzzy { .. } | Operation::Disambiguate(_) => {
                    lookups += 1;
                }
                Operation::Clear => clears += 1,
            }
        }
        assert!(inserts > 0 && removes > 0 && updates > 0 && lookups > 0 && clears > 0);
    }

    #[test]
    fn test_item_ids_are_unique() {
        let mut generator = OperationGenerator::new(3);
        let mut ids = std::collections::HashSet::new();
        for _ in 0..500 {
            if let Operation::Insert(item) | Operation::Update { item, .. } =
                generator.next_operation()
            {
                assert!(ids.insert(item.id));
            }
        }
    }
}
