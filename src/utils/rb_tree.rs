use alloc::vec::Vec;
use core::cmp::Ordering;

use log::{debug, trace};

/// Link to another node in the arena. `None` is the absent child (or absent
/// parent of the root) and always counts as black.
pub(crate) type Link = Option<usize>;

/// Red-Black tree node colors used to maintain tree balance properties.
///
/// Red-Black trees maintain balance by ensuring:
/// - Red nodes have black children
/// - All paths from root to leaves have equal black node counts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Color {
    /// Red node - must have black children, cannot be adjacent to other red nodes
    Red,
    /// Black node - can have children of any color, contributes to black height
    Black,
}

impl Color {
    pub(crate) const fn as_str(self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Black => "black",
        }
    }
}

/// A node in the Red-Black tree containing a key and structural information.
#[derive(Debug, Clone)]
pub(crate) struct Node {
    /// The stored key. Only rewritten when a two-child node takes over the key
    /// of its in-order successor during removal.
    pub(crate) key: i64,

    /// Index of parent node in the arena (`None` if this is root)
    pub(crate) parent: Link,

    /// Index of left child node in the arena (`None` if no left child)
    pub(crate) left: Link,

    /// Index of right child node in the arena (`None` if no right child)
    pub(crate) right: Link,

    /// Color of this node (Red or Black) used for Red-Black tree balancing
    pub(crate) color: Color,
}

/// An arena backed Red-Black tree of unique `i64` keys.
///
/// Nodes live in a growable vector and refer to each other by index, so the
/// parent back-reference never owns anything. Slots vacated by removal are
/// kept on a free list and handed out again by later insertions.
#[derive(Debug, Clone, Default)]
pub(crate) struct RbTree {
    /// Node slots, live and vacated
    nodes: Vec<Node>,

    /// Stack of vacated slot indices available for reuse
    free_list: Vec<usize>,

    /// Number of keys currently stored in the tree
    len: usize,

    /// Index of the root node, `None` when the tree is empty
    root: Link,
}

impl RbTree {
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            root: None,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            free_list: Vec::with_capacity(capacity),
            len: 0,
            root: None,
        }
    }

    #[inline]
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    #[inline]
    pub(crate) const fn root(&self) -> Link {
        self.root
    }

    #[inline]
    pub(crate) fn node(&self, idx: usize) -> &Node {
        &self.nodes[idx]
    }

    #[cfg(test)]
    pub(crate) fn node_mut(&mut self, idx: usize) -> &mut Node {
        &mut self.nodes[idx]
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.free_list.clear();
        self.len = 0;
        self.root = None;
    }

    /// Inserts `key`, returning `false` when it was already present.
    pub(crate) fn insert(&mut self, key: i64) -> bool {
        let mut parent = None;
        let mut current = self.root;

        while let Some(idx) = current {
            parent = current;
            let node = &self.nodes[idx];
            current = match key.cmp(&node.key) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return false,
            };
        }

        let new_idx = self.allocate_node(key, parent);
        self.link_to_parent(new_idx, parent, key);
        self.len += 1;

        self.fix_insertion_violations(new_idx);

        debug_assert_eq!(
            self.validate(),
            Ok(()),
            "RB tree invariants violated after inserting {key}"
        );

        true
    }

    /// Removes `key`, returning `false` when it was not present.
    pub(crate) fn remove(&mut self, key: i64) -> bool {
        let Some(node_idx) = self.find_node(key) else {
            return false;
        };

        self.delete_node(node_idx);
        self.len -= 1;

        debug_assert_eq!(
            self.validate(),
            Ok(()),
            "RB tree invariants violated after removing {key}"
        );

        true
    }

    pub(crate) fn find_node(&self, key: i64) -> Link {
        let mut current = self.root;

        while let Some(idx) = current {
            let node = &self.nodes[idx];
            match key.cmp(&node.key) {
                Ordering::Equal => return current,
                Ordering::Less => current = node.left,
                Ordering::Greater => current = node.right,
            }
        }
        None
    }

    pub(crate) fn min(&self) -> Option<i64> {
        self.root.map(|root| self.nodes[self.find_minimum(root)].key)
    }

    pub(crate) fn max(&self) -> Option<i64> {
        self.root.map(|root| self.nodes[self.find_maximum(root)].key)
    }

    /// In-order successor of the node at `idx`.
    pub(crate) fn successor_of(&self, idx: usize) -> Link {
        if let Some(right) = self.nodes[idx].right {
            return Some(self.find_minimum(right));
        }

        let mut child = idx;
        let mut ancestor = self.nodes[idx].parent;
        while let Some(up) = ancestor {
            if self.nodes[up].left == Some(child) {
                break;
            }
            child = up;
            ancestor = self.nodes[up].parent;
        }
        ancestor
    }

    /// In-order predecessor of the node at `idx`.
    pub(crate) fn predecessor_of(&self, idx: usize) -> Link {
        if let Some(left) = self.nodes[idx].left {
            return Some(self.find_maximum(left));
        }

        let mut child = idx;
        let mut ancestor = self.nodes[idx].parent;
        while let Some(up) = ancestor {
            if self.nodes[up].right == Some(child) {
                break;
            }
            child = up;
            ancestor = self.nodes[up].parent;
        }
        ancestor
    }

    /// Number of nodes on the longest path from the root to an absent child.
    pub(crate) fn height(&self) -> usize {
        let Some(root) = self.root else {
            return 0;
        };

        let mut tallest = 0;
        let mut stack = vec![(root, 1usize)];
        while let Some((idx, depth)) = stack.pop() {
            tallest = tallest.max(depth);
            let node = &self.nodes[idx];
            stack.extend(node.left.map(|left| (left, depth + 1)));
            stack.extend(node.right.map(|right| (right, depth + 1)));
        }
        tallest
    }

    /// Black nodes on the leftmost root-to-absent-child path, root included.
    pub(crate) fn black_height(&self) -> usize {
        let mut count = 0;
        let mut current = self.root;
        while let Some(idx) = current {
            if self.nodes[idx].color == Color::Black {
                count += 1;
            }
            current = self.nodes[idx].left;
        }
        count
    }

    fn allocate_node(&mut self, key: i64, parent: Link) -> usize {
        let node = Node {
            key,
            parent,
            left: None,
            right: None,
            color: Color::Red,
        };

        if let Some(idx) = self.free_list.pop() {
            self.nodes[idx] = node;
            return idx;
        }

        if self.nodes.len() == self.nodes.capacity() {
            debug!("growing node arena beyond {} slots", self.nodes.len());
        }
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    #[inline]
    fn deallocate_node(&mut self, node_idx: usize) {
        debug_assert!(node_idx < self.nodes.len());
        self.nodes[node_idx].parent = None;
        self.nodes[node_idx].left = None;
        self.nodes[node_idx].right = None;
        self.free_list.push(node_idx);
    }

    fn link_to_parent(&mut self, node_idx: usize, parent: Link, key: i64) {
        match parent {
            None => self.root = Some(node_idx),
            Some(parent_idx) if key < self.nodes[parent_idx].key => {
                self.nodes[parent_idx].left = Some(node_idx);
            }
            Some(parent_idx) => self.nodes[parent_idx].right = Some(node_idx),
        }
    }

    const fn find_minimum(&self, mut node: usize) -> usize {
        let nodes = self.nodes.as_slice();
        while let Some(left) = nodes[node].left {
            node = left;
        }
        node
    }

    const fn find_maximum(&self, mut node: usize) -> usize {
        let nodes = self.nodes.as_slice();
        while let Some(right) = nodes[node].right {
            node = right;
        }
        node
    }

    #[inline]
    const fn get_color(&self, link: Link) -> Color {
        match link {
            Some(idx) => self.nodes.as_slice()[idx].color,
            None => Color::Black,
        }
    }

    #[inline]
    const fn set_color(&mut self, link: Link, color: Color) {
        if let Some(idx) = link {
            self.nodes.as_mut_slice()[idx].color = color;
        }
    }

    #[inline]
    const fn is_red(&self, link: Link) -> bool {
        matches!(self.get_color(link), Color::Red)
    }

    #[inline]
    const fn is_black(&self, link: Link) -> bool {
        matches!(self.get_color(link), Color::Black)
    }

    #[inline]
    const fn get_left(&self, link: Link) -> Link {
        match link {
            Some(idx) => self.nodes.as_slice()[idx].left,
            None => None,
        }
    }

    #[inline]
    const fn get_right(&self, link: Link) -> Link {
        match link {
            Some(idx) => self.nodes.as_slice()[idx].right,
            None => None,
        }
    }

    fn rotate_left(&mut self, x: usize) {
        let y = present(self.nodes[x].right, "right child for rotate_left");
        trace!("rotate left at {}", self.nodes[x].key);

        let y_left = self.nodes[y].left;
        self.nodes[x].right = y_left;
        if let Some(y_left) = y_left {
            self.nodes[y_left].parent = Some(x);
        }

        let x_parent = self.nodes[x].parent;
        self.nodes[y].parent = x_parent;
        self.replace_child(x_parent, x, y);

        self.nodes[y].left = Some(x);
        self.nodes[x].parent = Some(y);
    }

    fn rotate_right(&mut self, y: usize) {
        let x = present(self.nodes[y].left, "left child for rotate_right");
        trace!("rotate right at {}", self.nodes[y].key);

        let x_right = self.nodes[x].right;
        self.nodes[y].left = x_right;
        if let Some(x_right) = x_right {
            self.nodes[x_right].parent = Some(y);
        }

        let y_parent = self.nodes[y].parent;
        self.nodes[x].parent = y_parent;
        self.replace_child(y_parent, y, x);

        self.nodes[x].right = Some(y);
        self.nodes[y].parent = Some(x);
    }

    /// Points `parent`'s link to `old` (or the root) at `new` instead.
    fn replace_child(&mut self, parent: Link, old: usize, new: usize) {
        match parent {
            None => self.root = Some(new),
            Some(parent) if self.nodes[parent].left == Some(old) => {
                self.nodes[parent].left = Some(new);
            }
            Some(parent) => self.nodes[parent].right = Some(new),
        }
    }

    fn fix_insertion_violations(&mut self, mut node: usize) {
        while let Some(mut parent) = self.nodes[node].parent {
            if self.is_black(Some(parent)) {
                break;
            }
            // a red parent is never the root, so the grandparent exists
            let grandparent = present(self.nodes[parent].parent, "grandparent of red parent");

            if self.nodes[grandparent].left == Some(parent) {
                let uncle = self.nodes[grandparent].right;

                if self.is_red(uncle) {
                    trace!("insert fix-up: red uncle under {}", self.nodes[grandparent].key);
                    self.set_color(Some(parent), Color::Black);
                    self.set_color(uncle, Color::Black);
                    self.set_color(Some(grandparent), Color::Red);
                    node = grandparent;
                    continue;
                }

                if self.nodes[parent].right == Some(node) {
                    trace!("insert fix-up: inner grandchild {}", self.nodes[node].key);
                    self.rotate_left(parent);
                    core::mem::swap(&mut node, &mut parent);
                }
                trace!("insert fix-up: outer grandchild {}", self.nodes[node].key);
                self.set_color(Some(parent), Color::Black);
                self.set_color(Some(grandparent), Color::Red);
                self.rotate_right(grandparent);
            } else {
                let uncle = self.nodes[grandparent].left;

                if self.is_red(uncle) {
                    trace!("insert fix-up: red uncle under {}", self.nodes[grandparent].key);
                    self.set_color(Some(parent), Color::Black);
                    self.set_color(uncle, Color::Black);
                    self.set_color(Some(grandparent), Color::Red);
                    node = grandparent;
                    continue;
                }

                if self.nodes[parent].left == Some(node) {
                    trace!("insert fix-up: inner grandchild {}", self.nodes[node].key);
                    self.rotate_right(parent);
                    core::mem::swap(&mut node, &mut parent);
                }
                trace!("insert fix-up: outer grandchild {}", self.nodes[node].key);
                self.set_color(Some(parent), Color::Black);
                self.set_color(Some(grandparent), Color::Red);
                self.rotate_left(grandparent);
            }
            break;
        }
        self.set_color(self.root, Color::Black);
    }

    fn delete_node(&mut self, node: usize) {
        // Two children: take over the successor's key and splice the successor
        // out instead, which has no left child.
        let target = match (self.nodes[node].left, self.nodes[node].right) {
            (Some(_), Some(right)) => {
                let successor = self.find_minimum(right);
                self.nodes[node].key = self.nodes[successor].key;
                successor
            }
            _ => node,
        };

        let target_node = &self.nodes[target];
        let child = target_node.left.or(target_node.right);
        let parent = target_node.parent;
        let removed_color = target_node.color;

        self.transplant(target, child);
        if parent.is_none() {
            debug!("root replaced by {:?}", child.map(|idx| self.nodes[idx].key));
        }

        if removed_color == Color::Black {
            self.fix_deletion_violations(child, parent);
        }

        self.deallocate_node(target);
    }

    fn transplant(&mut self, old_node: usize, new_node: Link) {
        let parent = self.nodes[old_node].parent;

        match parent {
            None => self.root = new_node,
            Some(parent) if self.nodes[parent].left == Some(old_node) => {
                self.nodes[parent].left = new_node;
            }
            Some(parent) => self.nodes[parent].right = new_node,
        }

        if let Some(new_node) = new_node {
            self.nodes[new_node].parent = parent;
        }
    }

    /// Resolves the missing black at `node`, whose parent is tracked separately
    /// because `node` may be an absent child.
    fn fix_deletion_violations(&mut self, mut node: Link, mut parent: Link) {
        while node != self.root && self.is_black(node) {
            let Some(parent_idx) = parent else {
                break;
            };

            if node == self.nodes[parent_idx].left {
                let mut sibling = self.nodes[parent_idx].right;

                if self.is_red(sibling) {
                    trace!("delete fix-up: red sibling under {}", self.nodes[parent_idx].key);
                    self.set_color(sibling, Color::Black);
                    self.set_color(parent, Color::Red);
                    self.rotate_left(parent_idx);
                    sibling = self.nodes[parent_idx].right;
                }

                if self.is_black(self.get_left(sibling)) && self.is_black(self.get_right(sibling)) {
                    trace!("delete fix-up: black sibling with black children");
                    self.set_color(sibling, Color::Red);
                    node = parent;
                    parent = self.nodes[parent_idx].parent;
                    continue;
                }

                if self.is_black(self.get_right(sibling)) {
                    trace!("delete fix-up: red near nephew");
                    let sibling_idx = present(sibling, "sibling with a red child");
                    self.set_color(self.get_left(sibling), Color::Black);
                    self.set_color(sibling, Color::Red);
                    self.rotate_right(sibling_idx);
                    sibling = self.nodes[parent_idx].right;
                }

                trace!("delete fix-up: red far nephew");
                self.set_color(sibling, self.get_color(parent));
                self.set_color(parent, Color::Black);
                self.set_color(self.get_right(sibling), Color::Black);
                self.rotate_left(parent_idx);
            } else {
                let mut sibling = self.nodes[parent_idx].left;

                if self.is_red(sibling) {
                    trace!("delete fix-up: red sibling under {}", self.nodes[parent_idx].key);
                    self.set_color(sibling, Color::Black);
                    self.set_color(parent, Color::Red);
                    self.rotate_right(parent_idx);
                    sibling = self.nodes[parent_idx].left;
                }

                if self.is_black(self.get_right(sibling)) && self.is_black(self.get_left(sibling)) {
                    trace!("delete fix-up: black sibling with black children");
                    self.set_color(sibling, Color::Red);
                    node = parent;
                    parent = self.nodes[parent_idx].parent;
                    continue;
                }

                if self.is_black(self.get_left(sibling)) {
                    trace!("delete fix-up: red near nephew");
                    let sibling_idx = present(sibling, "sibling with a red child");
                    self.set_color(self.get_right(sibling), Color::Black);
                    self.set_color(sibling, Color::Red);
                    self.rotate_left(sibling_idx);
                    sibling = self.nodes[parent_idx].left;
                }

                trace!("delete fix-up: red far nephew");
                self.set_color(sibling, self.get_color(parent));
                self.set_color(parent, Color::Black);
                self.set_color(self.get_left(sibling), Color::Black);
                self.rotate_right(parent_idx);
            }

            node = self.root;
            parent = None;
        }

        self.set_color(node, Color::Black);
    }
}

/// Unwraps a link the balancing protocol guarantees to exist.
#[inline]
#[track_caller]
fn present(link: Link, what: &str) -> usize {
    match link {
        Some(idx) => idx,
        None => panic!("red-black tree corrupted: missing {what}"),
    }
}
