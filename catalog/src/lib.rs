// Life of a request:
// 1. The store hands every item to the catalog at startup
// 2. Items are inserted into the ordered index (BST over title, author, genre)
// 3. For lookups:
//     - Exact title: descend the index
//     - Partial: walk the index in order and filter, optionally rank
//    For mutations:
//     - Check the caller's role
//     - Apply to the index
//     - If accepted, forward the item to the store
//
// System components:
//  - Ordered index
//  - Fuzzy finder
//  - Catalog facade over an item store

pub mod catalog;
pub mod config;
pub mod finder;
pub mod index;
pub mod simulation;
pub mod store;
pub mod types;

pub use catalog::{Catalog, CatalogError, Role, SharedCatalog};
pub use finder::{Disambiguation, SearchField};
pub use index::{OrderedIndex, TraversalOrder};
pub use types::{Item, ItemId};
