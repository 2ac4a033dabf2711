//! Invariant checking for deterministic simulation testing.
//!
//! This module keeps a reference model of what the index should contain and
//! verifies the index against it after each operation.

use std::collections::BTreeMap;

use crate::finder::{Needle, SearchField};
use crate::index::{IndexError, Insertion, OrderedIndex};
use crate::types::Item;

/// Reference model: a map from title to item.
///
/// Titles are unique in the index and lead the composite key, so iterating
/// the model by title yields the index's in-order sequence.
#[derive(Debug, Default, Clone)]
pub struct ReferenceModel {
    items: BTreeMap<String, Item>,
}

impl ReferenceModel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Expected outcome of `OrderedIndex::insert`.
    pub fn insert(&mut self, item: Item) -> Result<Insertion, IndexError> {
        match self.items.get_mut(&item.title) {
            Some(existing) if existing.key() == item.key() => {
                let previous = std::mem::replace(existing, item);
                Ok(Insertion::Replaced { previous })
            }
            Some(_) => Err(IndexError::DuplicateTitle { title: item.title }),
            None => {
                self.items.insert(item.title.clone(), item);
                Ok(Insertion::Inserted)
            }
        }
    }

    /// Expected outcome of `OrderedIndex::remove`.
    pub fn remove(&mut self, title: &str) -> Option<Item> {
        self.items.remove(title)
    }

    /// Expected outcome of `OrderedIndex::update`.
    pub fn update(&mut self, old_title: &str, item: Item) -> Result<Option<Item>, IndexError> {
        if !self.items.contains_key(old_title) {
            return Ok(None);
        }
        if item.title != old_title && self.items.contains_key(&item.title) {
            return Err(IndexError::DuplicateTitle { title: item.title });
        }
        let previous = self.items.remove(old_title);
        self.items.insert(item.title.clone(), item);
        Ok(previous)
    }

    #[must_use]
    pub fn get(&self, title: &str) -> Option<&Item> {
        self.items.get(title)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in key order.
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    /// Items whose `field` contains `keyword`, in key order.
    #[must_use]
    pub fn matching(&self, field: SearchField, keyword: &str) -> Vec<&Item> {
        let needle = Needle::new(keyword);
        self.iter()
            .filter(|item| needle.found_in(field.value_of(item)))
            .collect()
    }
}

/// An invariant violation detected during simulation.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violation.
    pub description: String,
    /// Operation index where it was detected.
    pub operation_index: usize,
    /// Additional context.
    pub context: String,
}

/// Checker for index invariants.
#[derive(Debug, Default)]
pub struct InvariantChecker {
    /// Detected violations.
    violations: Vec<InvariantViolation>,
}

impl InvariantChecker {
    /// Create a new invariant checker.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            violations: Vec::new(),
        }
    }

    /// Get all violations.
    #[must_use]
    pub fn violations(&self) -> &[InvariantViolation] {
        &self.violations
    }

    /// Take all violations, leaving the checker empty.
    pub fn take_violations(&mut self) -> Vec<InvariantViolation> {
        std::mem::take(&mut self.violations)
    }

    /// Check if any violations were detected.
    #[must_use]
    pub const fn has_violations(&self) -> bool {
        !self.violations.is_empty()
    }

    fn violation(&mut self, operation_index: usize, description: &str, context: String) {
        self.violations.push(InvariantViolation {
            description: description.to_string(),
            operation_index,
            context,
        });
    }

    /// In-order traversal must be strictly ascending by composite key.
    pub fn check_ordering(&mut self, index: &OrderedIndex, operation_index: usize) {
        let mut previous: Option<&Item> = None;
        for item in index.in_order() {
            if let Some(prev) = previous {
                if prev.key() >= item.key() {
                    self.violation(
                        operation_index,
                        "In-order traversal not strictly ascending",
                        format!("{} then {}", prev.key(), item.key()),
                    );
                }
                if prev.title == item.title {
                    self.violation(
                        operation_index,
                        "Title appears twice",
                        prev.title.clone(),
                    );
                }
            }
            previous = Some(item);
        }
    }

    /// `count()` and all three traversals must agree on the size.
    pub fn check_count(&mut self, index: &OrderedIndex, operation_index: usize) {
        let count = index.count();
        let sizes = [
            index.pre_order().count(),
            index.in_order().count(),
            index.post_order().count(),
        ];
        if sizes.iter().any(|&size| size != count) {
            self.violation(
                operation_index,
                "Traversal size disagrees with count()",
                format!("count={count} pre/in/post={sizes:?}"),
            );
        }
        if index.is_empty() != (count == 0) {
            self.violation(
                operation_index,
                "is_empty() disagrees with count()",
                format!("count={count}"),
            );
        }
    }

    /// The index must hold exactly the model's items, in the same order.
    pub fn check_model_agreement(
        &mut self,
        index: &OrderedIndex,
        model: &ReferenceModel,
        operation_index: usize,
    ) {
        if index.count() != model.len() {
            self.violation(
                operation_index,
                "Item count differs from model",
                format!("index={} model={}", index.count(), model.len()),
            );
            return;
        }
        if let Some((actual, expected)) = index.in_order().zip(model.iter()).find(|(a, e)| a != e) {
            self.violation(
                operation_index,
                "Item differs from model",
                format!("index={actual:?} model={expected:?}"),
            );
        }
    }

    /// Compare an operation's actual result with the model's expectation.
    pub fn check_outcome<T: PartialEq + std::fmt::Debug>(
        &mut self,
        actual: &T,
        expected: &T,
        operation_index: usize,
    ) {
        if actual != expected {
            self.violation(
                operation_index,
                "Operation result differs from model",
                format!("index={actual:?} model={expected:?}"),
            );
        }
    }
}
