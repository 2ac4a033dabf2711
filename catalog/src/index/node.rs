//! Tree node storage.
//!
//! Every node is exclusively owned by its parent link (or by the index root),
//! so there is no shared ownership and no way to reach a node twice.

use crate::types::Item;

/// An owned, possibly empty, child slot.
pub type Link = Option<Box<Node>>;

/// A single tree node: the item payload plus its two child links.
#[derive(Debug)]
pub struct Node {
    pub item: Item,
    pub left: Link,
    pub right: Link,
}

impl Node {
    #[must_use]
    pub const fn new(item: Item) -> Self {
        Self {
            item,
            left: None,
            right: None,
        }
    }

    /// Wrap an item into a fresh leaf link.
    #[must_use]
    pub fn leaf(item: Item) -> Link {
        Some(Box::new(Self::new(item)))
    }
}

/// Detach the minimum node of a non-empty subtree.
///
/// The detached node's right subtree takes its place. Returns `None` only if
/// `slot` is empty.
pub fn take_min(mut slot: &mut Link) -> Option<Box<Node>> {
    loop {
        let has_left = match slot.as_deref() {
            Some(node) => node.left.is_some(),
            None => return None,
        };
        if !has_left {
            break;
        }
        let Some(node) = slot else { return None };
        slot = &mut node.left;
    }

    let mut min = slot.take()?;
    *slot = min.right.take();
    Some(min)
}

/// Release a subtree without recursing.
///
/// Each node's children are detached before the node itself is dropped, so
/// dropping a node never cascades into its descendants.
pub fn teardown(root: Link) {
    let mut pending: Vec<Box<Node>> = root.into_iter().collect();
    while let Some(mut node) = pending.pop() {
        pending.extend(node.left.take());
        pending.extend(node.right.take());
    }
}
