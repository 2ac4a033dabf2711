//! Ranking of multiple title matches.

use std::cmp::Ordering;

use crate::types::Item;

/// Ranking key for one candidate title against a lower-cased keyword.
///
/// Field order is the comparison order: exact match, then prefix match,
/// then shorter title, then case-insensitive lexicographic title.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct Rank {
    not_exact: bool,
    not_prefix: bool,
    length: usize,
    lowered: String,
}

impl Rank {
    fn new(title: &str, keyword: &str) -> Self {
        let lowered = title.to_lowercase();
        Self {
            not_exact: lowered != keyword,
            not_prefix: !lowered.starts_with(keyword),
            length: title.chars().count(),
            lowered,
        }
    }
}

/// Compare two titles by how well they answer `keyword`.
///
/// `keyword` is lower-cased before comparing.
#[must_use]
pub fn compare_titles(keyword: &str, a: &str, b: &str) -> Ordering {
    let keyword = keyword.to_lowercase();
    Rank::new(a, &keyword).cmp(&Rank::new(b, &keyword))
}

/// Sort matches best-first.
///
/// The sort is stable, so items with identical rank keep their input
/// (ascending key) order.
#[must_use]
pub fn rank_matches<'a>(keyword: &str, mut matches: Vec<&'a Item>) -> Vec<&'a Item> {
    let keyword = keyword.to_lowercase();
    matches.sort_by_cached_key(|item| Rank::new(&item.title, &keyword));
    matches
}
