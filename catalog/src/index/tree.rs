//! Binary search tree over the composite `(title, author, genre)` key.
//!
//! # Invariants
//!
//! - For every node, all keys in its left subtree are smaller and all keys in
//!   its right subtree are larger under the composite ordering.
//! - No two nodes share a composite key.
//! - No two nodes share a title. Lookups, removals and updates address items
//!   by title alone, so the index refuses a second item with a title already
//!   in use under a different author or genre.
//! - `len` always equals the number of nodes reachable from `root`.
//!
//! Because titles are unique and the title is the leading key component,
//! changing an item's author or genre in place never moves it relative to
//! any other node.

use std::cmp::Ordering;
use std::fmt;

use crate::index::node::{Link, Node, take_min, teardown};
use crate::index::traversal::{InOrder, PostOrder, PreOrder, Traversal, TraversalOrder};
use crate::types::Item;

/// Outcome of a successful insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Insertion {
    /// A new node was created.
    Inserted,
    /// A node with the same composite key existed; its payload was
    /// overwritten and the previous item is returned.
    Replaced { previous: Item },
}

/// Ordered, mutable, in-memory index of items.
#[derive(Default)]
pub struct OrderedIndex {
    root: Link,
    len: usize,
}

impl OrderedIndex {
    /// Create an empty index.
    #[must_use]
    pub const fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Build an index by inserting every item in order.
    ///
    /// Later items with an identical composite key overwrite earlier ones.
    pub fn from_items(items: impl IntoIterator<Item = Item>) -> Result<Self, IndexError> {
        let mut index = Self::new();
        for item in items {
            index.insert(item)?;
        }
        Ok(index)
    }

    /// Insert an item.
    ///
    /// Descends by composite key. If a node with an identical key exists its
    /// id is overwritten (last write wins) and no node is added.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateTitle` if another node already uses `item.title`
    /// with a different author or genre. The index is unchanged in that case.
    pub fn insert(&mut self, item: Item) -> Result<Insertion, IndexError> {
        let mut slot = &mut self.root;
        loop {
            let step = match slot.as_deref() {
                Some(node) => {
                    let ordering = item.key().cmp(&node.item.key());
                    if ordering != Ordering::Equal && node.item.title == item.title {
                        return Err(IndexError::DuplicateTitle { title: item.title });
                    }
                    ordering
                }
                None => break,
            };
            let Some(node) = slot else { break };
            slot = match step {
                Ordering::Less => &mut node.left,
                Ordering::Greater => &mut node.right,
                Ordering::Equal => {
                    let previous = std::mem::replace(&mut node.item, item);
                    return Ok(Insertion::Replaced { previous });
                }
            };
        }

        *slot = Node::leaf(item);
        self.len += 1;
        Ok(Insertion::Inserted)
    }

    /// Find the item with exactly this title.
    ///
    /// Descends by plain title comparison, O(height).
    #[must_use]
    pub fn search(&self, title: &str) -> Option<&Item> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match title.cmp(&node.item.title) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return Some(&node.item),
            };
        }
        None
    }

    /// Whether an item with exactly this title is present.
    #[must_use]
    pub fn contains_title(&self, title: &str) -> bool {
        self.search(title).is_some()
    }

    /// Remove the item with exactly this title.
    ///
    /// Returns the removed item, or `None` (and leaves the tree untouched) if
    /// no item has that title.
    ///
    /// - A leaf is simply unlinked.
    /// - A node with one child is replaced by that child.
    /// - A node with two children takes over the payload of its in-order
    ///   successor (the minimum of its right subtree), and the successor's
    ///   original node is unlinked from the right subtree.
    pub fn remove(&mut self, title: &str) -> Option<Item> {
        let slot = Self::seek_title(&mut self.root, title);
        let mut node = slot.take()?;

        let removed = match (node.left.take(), node.right.take()) {
            (None, None) => node.item,
            (Some(child), None) | (None, Some(child)) => {
                *slot = Some(child);
                node.item
            }
            (Some(left), Some(right)) => {
                let mut right = Some(right);
                let Some(successor) = take_min(&mut right) else {
                    // A present right subtree always has a minimum.
                    node.left = Some(left);
                    node.right = right;
                    *slot = Some(node);
                    return None;
                };
                let removed = std::mem::replace(&mut node.item, successor.item);
                node.left = Some(left);
                node.right = right;
                *slot = Some(node);
                removed
            }
        };

        self.len -= 1;
        Some(removed)
    }

    /// Replace the item titled `old_title` with `item`.
    ///
    /// If the title is unchanged the node is updated in place (id, author and
    /// genre), keeping the tree shape. Otherwise the old item is removed and
    /// `item` is inserted at its new position.
    ///
    /// Returns the previous item, or `None` if `old_title` is not present.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateTitle` if the new title already belongs to a
    /// different item. The index is unchanged in that case.
    pub fn update(&mut self, old_title: &str, item: Item) -> Result<Option<Item>, IndexError> {
        if item.title == old_title {
            let slot = Self::seek_title(&mut self.root, old_title);
            return Ok(slot
                .as_deref_mut()
                .map(|node| std::mem::replace(&mut node.item, item)));
        }

        if !self.contains_title(old_title) {
            return Ok(None);
        }
        if self.contains_title(&item.title) {
            return Err(IndexError::DuplicateTitle { title: item.title });
        }

        let previous = self.remove(old_title);
        self.insert(item)?;
        Ok(previous)
    }

    /// Rename an author on every item that has exactly that author.
    ///
    /// Rewrites nodes in place. Returns the changed items in ascending key
    /// order.
    pub fn rename_author(&mut self, old: &str, new: &str) -> Vec<Item> {
        self.rewrite_each(|item| item.rename_author(old, new))
    }

    /// Rename a genre value on every item whose genre list contains it.
    ///
    /// Returns the changed items in ascending key order.
    pub fn rename_genre(&mut self, old: &str, new: &str) -> Vec<Item> {
        self.rewrite_each(|item| item.rename_genre(old, new))
    }

    /// Remove every item.
    pub fn clear(&mut self) {
        teardown(self.root.take());
        self.len = 0;
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of items in the index.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.len
    }

    /// Number of nodes on the longest root-to-leaf path (0 when empty).
    #[must_use]
    pub fn height(&self) -> usize {
        let mut deepest = 0;
        let mut pending: Vec<(&Node, usize)> =
            self.root.as_deref().map(|root| (root, 1)).into_iter().collect();
        while let Some((node, depth)) = pending.pop() {
            deepest = deepest.max(depth);
            pending.extend(node.left.as_deref().map(|left| (left, depth + 1)));
            pending.extend(node.right.as_deref().map(|right| (right, depth + 1)));
        }
        deepest
    }

    /// Item with the smallest composite key.
    #[must_use]
    pub fn first(&self) -> Option<&Item> {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Some(&node.item)
    }

    /// Item with the largest composite key.
    #[must_use]
    pub fn last(&self) -> Option<&Item> {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Some(&node.item)
    }

    /// Snapshot of all items in ascending key order.
    #[must_use]
    pub fn get_all(&self) -> Vec<&Item> {
        self.in_order().collect()
    }

    pub fn pre_order(&self) -> PreOrder<'_> {
        PreOrder::new(&self.root)
    }

    /// Items in ascending composite-key order.
    pub fn in_order(&self) -> InOrder<'_> {
        InOrder::new(&self.root)
    }

    pub fn post_order(&self) -> PostOrder<'_> {
        PostOrder::new(&self.root)
    }

    /// Traverse in the requested order.
    pub fn traverse(&self, order: TraversalOrder) -> Traversal<'_> {
        Traversal::new(&self.root, order)
    }

    /// Apply `rewrite` to every item in key order, collecting the items it
    /// reports as changed.
    ///
    /// `rewrite` must leave titles alone; with unique titles leading the key,
    /// no node then moves relative to another.
    fn rewrite_each(&mut self, mut rewrite: impl FnMut(&mut Item) -> bool) -> Vec<Item> {
        let mut changed = Vec::new();
        let mut pending: Vec<(&mut Item, &mut Link)> = Vec::new();
        let mut cursor = self.root.as_deref_mut();
        loop {
            while let Some(node) = cursor {
                let Node { item, left, right } = node;
                pending.push((item, right));
                cursor = left.as_deref_mut();
            }
            let Some((item, right)) = pending.pop() else {
                break;
            };
            if rewrite(item) {
                changed.push(item.clone());
            }
            cursor = right.as_deref_mut();
        }
        changed
    }

    /// Locate the link holding `title`, or the empty link where it would be.
    fn seek_title<'a>(mut slot: &'a mut Link, title: &str) -> &'a mut Link {
        loop {
            let step = match slot.as_deref() {
                Some(node) => title.cmp(&node.item.title),
                None => return slot,
            };
            if step == Ordering::Equal {
                return slot;
            }
            let Some(node) = slot else { return slot };
            slot = if step == Ordering::Less {
                &mut node.left
            } else {
                &mut node.right
            };
        }
    }
}

impl Drop for OrderedIndex {
    fn drop(&mut self) {
        teardown(self.root.take());
    }
}

impl fmt::Debug for OrderedIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.in_order()).finish()
    }
}

impl<'a> IntoIterator for &'a OrderedIndex {
    type Item = &'a Item;
    type IntoIter = InOrder<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.in_order()
    }
}

/// Errors that can occur when mutating the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexError {
    /// The title is already used by an item with a different author or genre.
    DuplicateTitle { title: String },
}

impl fmt::Display for IndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateTitle { title } => {
                write!(f, "title '{title}' is already used by another item")
            }
        }
    }
}

impl std::error::Error for IndexError {}
