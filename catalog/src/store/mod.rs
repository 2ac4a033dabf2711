//! Persistence boundary.
//!
//! The index owns no durable state. A store hands the full item set to the
//! catalog at startup and receives every successful change afterwards as an
//! opaque upsert or delete keyed by item id.

mod memory;
mod sample;
mod seed;

pub use memory::MemoryStore;
pub use sample::sample_items;
pub use seed::{SeedError, load_seed_file, parse_seed};

use std::fmt;

use crate::types::{Item, ItemId};

/// Durable storage for catalog items.
pub trait ItemStore {
    /// Load every stored item. Order is irrelevant.
    fn load_all(&self) -> Result<Vec<Item>, StoreError>;

    /// Insert or replace the item with `item.id`.
    fn upsert(&mut self, item: &Item) -> Result<(), StoreError>;

    /// Delete the item with `id`. Deleting a missing id is not an error.
    fn delete(&mut self, id: ItemId) -> Result<(), StoreError>;
}

/// Errors reported by a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backing storage is unavailable.
    Unavailable(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable(message) => write!(f, "store unavailable: {message}"),
        }
    }
}

impl std::error::Error for StoreError {}
