use core::fmt;

use crate::{
    InvariantViolation,
    utils::{Inorder, Postorder, Preorder, RbTree, TreeDisplay},
};

/// An ordered set of unique `i64` keys backed by a red-black tree.
///
/// Insertion, removal, membership and neighbor queries run in O(log n). No
/// operation recurses, so deep trees cannot exhaust the stack.
///
/// Mutation takes `&mut self`: share the set freely for reading, and put it
/// behind a lock of your choosing when several threads must write.
#[derive(Clone, Default)]
pub struct OrderedSet {
    /// Arena backed tree holding the keys
    tree: RbTree,
}

impl OrderedSet {
    /// Creates an empty set.
    pub const fn new() -> Self {
        Self {
            tree: RbTree::new(),
        }
    }

    /// Creates an empty set with room for `capacity` keys before the node
    /// arena reallocates.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Number of node slots to preallocate
    ///
    /// # Returns
    ///
    /// * `Self` - The empty set
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tree: RbTree::with_capacity(capacity),
        }
    }

    /// Returns the number of keys in the set.
    #[inline]
    pub const fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the set holds no keys.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Returns the number of keys the set can hold without reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.tree.capacity()
    }

    /// Removes every key, keeping the allocated capacity.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Inserts `key`. Inserting a key that is already present does nothing.
    pub fn insert(&mut self, key: i64) {
        self.tree.insert(key);
    }

    /// Inserts `key` and reports whether it was new.
    ///
    /// # Returns
    ///
    /// * `bool` - `true` if a node was created, `false` if `key` was already present
    pub fn try_insert(&mut self, key: i64) -> bool {
        self.tree.insert(key)
    }

    /// Inserts every key of `keys`, skipping those already present.
    pub fn insert_all(&mut self, keys: &[i64]) {
        for &key in keys {
            self.tree.insert(key);
        }
    }

    /// Removes `key` from the set.
    ///
    /// # Returns
    ///
    /// * `bool` - `true` if `key` was present and removed, `false` otherwise
    pub fn delete(&mut self, key: i64) -> bool {
        self.tree.remove(key)
    }

    /// Same as [`delete`](Self::delete).
    #[inline]
    pub fn remove(&mut self, key: i64) -> bool {
        self.delete(key)
    }

    /// Returns `true` if `key` is in the set.
    pub fn search(&self, key: i64) -> bool {
        self.tree.find_node(key).is_some()
    }

    /// Same as [`search`](Self::search).
    #[inline]
    pub fn contains(&self, key: i64) -> bool {
        self.search(key)
    }

    /// Returns the smallest key in the set strictly greater than `key`.
    ///
    /// # Arguments
    ///
    /// * `key` - A key of the set
    ///
    /// # Returns
    ///
    /// * `Option<i64>` - The next larger key, or `None` if `key` is not in the
    ///   set or is its maximum
    pub fn successor(&self, key: i64) -> Option<i64> {
        let idx = self.tree.find_node(key)?;
        self.tree.successor_of(idx).map(|next| self.tree.node(next).key)
    }

    /// Returns the largest key in the set strictly smaller than `key`.
    ///
    /// # Arguments
    ///
    /// * `key` - A key of the set
    ///
    /// # Returns
    ///
    /// * `Option<i64>` - The next smaller key, or `None` if `key` is not in the
    ///   set or is its minimum
    pub fn predecessor(&self, key: i64) -> Option<i64> {
        let idx = self.tree.find_node(key)?;
        self.tree
            .predecessor_of(idx)
            .map(|prev| self.tree.node(prev).key)
    }

    /// Returns the smallest key, or `None` if the set is empty.
    pub fn min(&self) -> Option<i64> {
        self.tree.min()
    }

    /// Returns the largest key, or `None` if the set is empty.
    pub fn max(&self) -> Option<i64> {
        self.tree.max()
    }

    /// Iterates the keys in ascending order.
    pub fn inorder(&self) -> Inorder<'_> {
        Inorder::new(&self.tree)
    }

    /// Iterates the keys node first, then left subtree, then right subtree.
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder::new(&self.tree)
    }

    /// Iterates the keys left subtree first, then right subtree, then node.
    pub fn postorder(&self) -> Postorder<'_> {
        Postorder::new(&self.tree)
    }

    /// Iterates the keys in ascending order. Same as [`inorder`](Self::inorder).
    #[inline]
    pub fn iter(&self) -> Inorder<'_> {
        self.inorder()
    }

    /// Number of nodes on the longest root-to-leaf path, `0` when empty.
    ///
    /// Never exceeds `2 * log2(len + 1)`.
    pub fn height(&self) -> usize {
        self.tree.height()
    }

    /// Number of black nodes on every path from the root down to an absent
    /// child, the root included. `0` when empty.
    pub fn black_height(&self) -> usize {
        self.tree.black_height()
    }

    /// Checks every structural invariant of the underlying red-black tree.
    ///
    /// Debug builds run this after each mutation. It is O(n).
    ///
    /// # Returns
    ///
    /// * `Result<(), InvariantViolation>` - The first broken invariant found, if any
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        self.tree.validate()
    }

    /// Returns a [`Display`](fmt::Display) adapter that prints the tree shape
    /// with node colors.
    pub fn display_tree(&self) -> TreeDisplay<'_> {
        TreeDisplay::new(&self.tree)
    }
}

impl fmt::Debug for OrderedSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.inorder()).finish()
    }
}

impl PartialEq for OrderedSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.inorder().eq(other.inorder())
    }
}

impl Eq for OrderedSet {}

impl Extend<i64> for OrderedSet {
    fn extend<I: IntoIterator<Item = i64>>(&mut self, iter: I) {
        for key in iter {
            self.tree.insert(key);
        }
    }
}

impl<'a> Extend<&'a i64> for OrderedSet {
    fn extend<I: IntoIterator<Item = &'a i64>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl FromIterator<i64> for OrderedSet {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut set = Self::with_capacity(iter.size_hint().0);
        set.extend(iter);
        set
    }
}

impl<const N: usize> From<[i64; N]> for OrderedSet {
    fn from(keys: [i64; N]) -> Self {
        let mut set = Self::with_capacity(N);
        set.insert_all(&keys);
        set
    }
}

impl<'a> IntoIterator for &'a OrderedSet {
    type Item = i64;
    type IntoIter = Inorder<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.inorder()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::{format, string::ToString, vec::Vec};

    #[test]
    fn test_new_set_is_empty() {
        let set = OrderedSet::new();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
        assert_eq!(set.min(), None);
        assert_eq!(set.max(), None);
        assert_eq!(set.height(), 0);
        assert_eq!(set.validate(), Ok(()));
    }

    #[test]
    fn test_try_insert_reports_novelty() {
        let mut set = OrderedSet::new();
        assert!(set.try_insert(4));
        assert!(!set.try_insert(4));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_insert_all_and_from_array() {
        let mut set = OrderedSet::new();
        set.insert_all(&[3, 1, 2, 3, 1]);
        assert_eq!(set, OrderedSet::from([1, 2, 3]));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_single_key_constructor() {
        let set = OrderedSet::from([42]);
        assert_eq!(set.len(), 1);
        assert!(set.search(42));
        assert_eq!(set.black_height(), 1);
    }

    #[test]
    fn test_successor_predecessor_of_missing_key() {
        let set = OrderedSet::from([10, 20, 30]);
        assert_eq!(set.successor(15), None);
        assert_eq!(set.predecessor(15), None);
        assert_eq!(set.successor(10), Some(20));
        assert_eq!(set.predecessor(30), Some(20));
        assert_eq!(set.successor(30), None);
        assert_eq!(set.predecessor(10), None);
    }

    #[test]
    fn test_aliases_match() {
        let mut set = OrderedSet::from([1, 2]);
        assert_eq!(set.contains(1), set.search(1));
        assert!(set.remove(1));
        assert!(!set.delete(1));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_collect_and_extend() {
        let mut set: OrderedSet = (0..10).rev().collect();
        set.extend(&[20, 5, 30]);
        assert_eq!(set.len(), 12);
        assert_eq!(set.max(), Some(30));
        assert_eq!((&set).into_iter().next(), Some(0));
    }

    #[test]
    fn test_equality_ignores_shape() {
        let ascending: OrderedSet = (1..=8).collect();
        let descending: OrderedSet = (1..=8).rev().collect();
        assert_ne!(
            ascending.preorder().collect::<Vec<_>>(),
            descending.preorder().collect::<Vec<_>>()
        );
        assert_eq!(ascending, descending);
    }

    #[test]
    fn test_debug_formats_as_set() {
        let set = OrderedSet::from([3, 1, 2]);
        assert_eq!(format!("{set:?}"), "{1, 2, 3}");
    }

    #[test]
    fn test_display_tree() {
        let set = OrderedSet::from([10, 20, 30]);
        assert_eq!(
            set.display_tree().to_string(),
            "20 black\n├─ 10 red\n└─ 30 red"
        );
    }

    #[test]
    fn test_clear_keeps_capacity() {
        let mut set = OrderedSet::with_capacity(32);
        set.insert_all(&[1, 2, 3]);
        set.clear();
        assert!(set.is_empty());
        assert!(set.capacity() >= 32);
        assert!(!set.search(1));
    }
}
