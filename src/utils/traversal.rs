use alloc::vec::Vec;
use core::iter::FusedIterator;

use super::rb_tree::{Link, RbTree};

/// Ascending (in-order) iterator over the keys of an
/// [`OrderedSet`](crate::OrderedSet).
///
/// Created by [`OrderedSet::inorder`](crate::OrderedSet::inorder) and
/// [`OrderedSet::iter`](crate::OrderedSet::iter).
#[derive(Debug, Clone)]
pub struct Inorder<'a> {
    tree: &'a RbTree,
    stack: Vec<usize>,
    current: Link,
    remaining: usize,
}

impl<'a> Inorder<'a> {
    pub(crate) fn new(tree: &'a RbTree) -> Self {
        Self {
            tree,
            stack: Vec::new(),
            current: tree.root(),
            remaining: tree.len(),
        }
    }
}

impl Iterator for Inorder<'_> {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        while let Some(idx) = self.current {
            self.stack.push(idx);
            self.current = self.tree.node(idx).left;
        }

        let idx = self.stack.pop()?;
        let node = self.tree.node(idx);
        self.current = node.right;
        self.remaining -= 1;
        Some(node.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Inorder<'_> {}

impl FusedIterator for Inorder<'_> {}

/// Pre-order (node, left, right) iterator over the keys of an
/// [`OrderedSet`](crate::OrderedSet).
#[derive(Debug, Clone)]
pub struct Preorder<'a> {
    tree: &'a RbTree,
    stack: Vec<usize>,
}

impl<'a> Preorder<'a> {
    pub(crate) fn new(tree: &'a RbTree) -> Self {
        Self {
            tree,
            stack: tree.root().into_iter().collect(),
        }
    }
}

impl Iterator for Preorder<'_> {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        let idx = self.stack.pop()?;
        let node = self.tree.node(idx);
        self.stack.extend(node.right);
        self.stack.extend(node.left);
        Some(node.key)
    }
}

impl FusedIterator for Preorder<'_> {}

/// Post-order (left, right, node) iterator over the keys of an
/// [`OrderedSet`](crate::OrderedSet).
#[derive(Debug, Clone)]
pub struct Postorder<'a> {
    tree: &'a RbTree,
    stack: Vec<usize>,
    current: Link,
    last_visited: Link,
}

impl<'a> Postorder<'a> {
    pub(crate) fn new(tree: &'a RbTree) -> Self {
        Self {
            tree,
            stack: Vec::new(),
            current: tree.root(),
            last_visited: None,
        }
    }
}

impl Iterator for Postorder<'_> {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        loop {
            while let Some(idx) = self.current {
                self.stack.push(idx);
                self.current = self.tree.node(idx).left;
            }

            let top = *self.stack.last()?;
            let node = self.tree.node(top);

            // descend right unless we are coming back up from it
            if node.right.is_some() && node.right != self.last_visited {
                self.current = node.right;
                continue;
            }

            self.stack.pop();
            self.last_visited = Some(top);
            return Some(node.key);
        }
    }
}

impl FusedIterator for Postorder<'_> {}
