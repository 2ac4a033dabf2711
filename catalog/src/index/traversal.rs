//! Depth-first traversals as lazy iterators.
//!
//! Each iterator keeps an explicit stack, borrows the tree immutably, and
//! can be restarted by asking the index for a new one.

use crate::index::node::{Link, Node};
use crate::types::Item;

/// The three depth-first visiting orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraversalOrder {
    /// Node, then left subtree, then right subtree.
    PreOrder,
    /// Left subtree, node, right subtree. Yields ascending key order.
    InOrder,
    /// Left subtree, right subtree, then node.
    PostOrder,
}

impl TraversalOrder {
    pub const ALL: [Self; 3] = [Self::PreOrder, Self::InOrder, Self::PostOrder];
}

/// Pre-order iterator (root, left, right).
#[derive(Debug, Clone)]
pub struct PreOrder<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> PreOrder<'a> {
    pub(crate) fn new(root: &'a Link) -> Self {
        Self {
            stack: root.as_deref().into_iter().collect(),
        }
    }
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a Item;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.right.as_deref());
        self.stack.extend(node.left.as_deref());
        Some(&node.item)
    }
}

/// In-order iterator (left, root, right).
#[derive(Debug, Clone)]
pub struct InOrder<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> InOrder<'a> {
    pub(crate) fn new(root: &'a Link) -> Self {
        let mut iter = Self { stack: Vec::new() };
        iter.push_left_spine(root.as_deref());
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a Node>) {
        while let Some(current) = node {
            self.stack.push(current);
            node = current.left.as_deref();
        }
    }
}

impl<'a> Iterator for InOrder<'a> {
    type Item = &'a Item;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        Some(&node.item)
    }
}

/// Post-order iterator (left, right, root).
#[derive(Debug, Clone)]
pub struct PostOrder<'a> {
    /// Nodes paired with whether their children were already scheduled.
    stack: Vec<(&'a Node, bool)>,
}

impl<'a> PostOrder<'a> {
    pub(crate) fn new(root: &'a Link) -> Self {
        Self {
            stack: root.as_deref().map(|node| (node, false)).into_iter().collect(),
        }
    }
}

impl<'a> Iterator for PostOrder<'a> {
    type Item = &'a Item;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (node, expanded) = self.stack.pop()?;
            if expanded {
                return Some(&node.item);
            }
            self.stack.push((node, true));
            self.stack
                .extend(node.right.as_deref().map(|right| (right, false)));
            self.stack
                .extend(node.left.as_deref().map(|left| (left, false)));
        }
    }
}

/// A traversal in any of the three orders.
#[derive(Debug, Clone)]
pub enum Traversal<'a> {
    PreOrder(PreOrder<'a>),
    InOrder(InOrder<'a>),
    PostOrder(PostOrder<'a>),
}

impl<'a> Traversal<'a> {
    pub(crate) fn new(root: &'a Link, order: TraversalOrder) -> Self {
        match order {
            TraversalOrder::PreOrder => Self::PreOrder(PreOrder::new(root)),
            TraversalOrder::InOrder => Self::InOrder(InOrder::new(root)),
            TraversalOrder::PostOrder => Self::PostOrder(PostOrder::new(root)),
        }
    }
}

impl<'a> Iterator for Traversal<'a> {
    type Item = &'a Item;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::PreOrder(iter) => iter.next(),
            Self::InOrder(iter) => iter.next(),
            Self::PostOrder(iter) => iter.next(),
        }
    }
}
