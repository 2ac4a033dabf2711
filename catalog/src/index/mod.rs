//! Ordered in-memory index.
//!
//! A binary search tree keyed by the composite `(title, author, genre)` key.
//! Nodes are owned through `Box` links, so every node has exactly one owner
//! and references handed out by the index borrow it immutably. Mutation
//! (insert, remove, update, clear) therefore cannot happen while any of those
//! references is alive.
//!
//! # Usage
//!
//! ```
//! use catalog::index::OrderedIndex;
//! use catalog::types::Item;
//!
//! let mut index = OrderedIndex::new();
//! index.insert(Item::new(1, "Naruto", "Kishimoto", "Action")).unwrap();
//! index.insert(Item::new(2, "Bleach", "Kubo", "Action")).unwrap();
//!
//! let titles: Vec<&str> = index.in_order().map(|i| i.title.as_str()).collect();
//! assert_eq!(titles, ["Bleach", "Naruto"]);
//! ```

mod node;
mod traversal;
mod tree;

pub use traversal::{InOrder, PostOrder, PreOrder, Traversal, TraversalOrder};
pub use tree::{IndexError, Insertion, OrderedIndex};
