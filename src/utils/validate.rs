use ahash::RandomState;
use alloc::vec::Vec;
use hashbrown::HashSet;

use super::rb_tree::{Color, RbTree};
use crate::InvariantViolation;

/// Pending node of the validation walk, with the open key interval it must
/// fall in and the black nodes seen above it.
struct Frame {
    idx: usize,
    lower: Option<i64>,
    upper: Option<i64>,
    blacks_above: usize,
}

impl RbTree {
    /// Checks every red-black and binary-search-tree invariant in one
    /// iterative pre-order walk.
    ///
    /// Equal black counts on every root-to-absent-child path imply equal black
    /// height below every node, since all paths through a node share the
    /// prefix above it.
    pub(crate) fn validate(&self) -> Result<(), InvariantViolation> {
        let Some(root) = self.root() else {
            return match self.len() {
                0 => Ok(()),
                expected => Err(InvariantViolation::LengthMismatch { expected, found: 0 }),
            };
        };

        let root_node = self.node(root);
        if root_node.color == Color::Red {
            return Err(InvariantViolation::RedRoot { key: root_node.key });
        }
        if root_node.parent.is_some() {
            return Err(InvariantViolation::BrokenParentLink { key: root_node.key });
        }

        let mut visited = HashSet::with_capacity_and_hasher(self.len(), RandomState::default());
        let mut keys = HashSet::with_capacity_and_hasher(self.len(), RandomState::default());
        let mut leaf_blacks: Option<usize> = None;
        let mut stack: Vec<Frame> = vec![Frame {
            idx: root,
            lower: None,
            upper: None,
            blacks_above: 0,
        }];

        while let Some(frame) = stack.pop() {
            let node = self.node(frame.idx);
            let key = node.key;

            if !visited.insert(frame.idx) {
                return Err(InvariantViolation::BrokenParentLink { key });
            }
            if !keys.insert(key) {
                return Err(InvariantViolation::DuplicateKey { key });
            }
            if frame.lower.is_some_and(|lower| key <= lower)
                || frame.upper.is_some_and(|upper| key >= upper)
            {
                return Err(InvariantViolation::OrderViolation { key });
            }

            let blacks = frame.blacks_above + usize::from(node.color == Color::Black);

            for child in [node.left, node.right] {
                match child {
                    None => match leaf_blacks {
                        None => leaf_blacks = Some(blacks),
                        Some(expected) if expected != blacks => {
                            return Err(InvariantViolation::BlackHeightMismatch {
                                key,
                                expected,
                                found: blacks,
                            });
                        }
                        Some(_) => {}
                    },
                    Some(child_idx) => {
                        let child_node = self.node(child_idx);
                        if child_node.parent != Some(frame.idx) {
                            return Err(InvariantViolation::BrokenParentLink {
                                key: child_node.key,
                            });
                        }
                        if node.color == Color::Red && child_node.color == Color::Red {
                            return Err(InvariantViolation::RedRedEdge {
                                parent: key,
                                child: child_node.key,
                            });
                        }
                    }
                }
            }

            if let Some(right) = node.right {
                stack.push(Frame {
                    idx: right,
                    lower: Some(key),
                    upper: frame.upper,
                    blacks_above: blacks,
                });
            }
            if let Some(left) = node.left {
                stack.push(Frame {
                    idx: left,
                    lower: frame.lower,
                    upper: Some(key),
                    blacks_above: blacks,
                });
            }
        }

        if visited.len() != self.len() {
            return Err(InvariantViolation::LengthMismatch {
                expected: self.len(),
                found: visited.len(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    /// 20 black with red children 10 and 30.
    fn three_node_tree() -> RbTree {
        let mut tree = RbTree::new();
        for key in [10, 20, 30] {
            tree.insert(key);
        }
        tree
    }

    fn idx(tree: &RbTree, key: i64) -> usize {
        tree.find_node(key).unwrap()
    }

    #[test]
    fn test_empty_tree_is_valid() {
        assert_eq!(RbTree::new().validate(), Ok(()));
    }

    #[test]
    fn test_balanced_tree_is_valid() {
        let mut tree = RbTree::new();
        for key in 0..200 {
            tree.insert((key * 37) % 211);
        }
        assert_eq!(tree.validate(), Ok(()));
    }

    #[test]
    fn test_detects_red_root() {
        let mut tree = three_node_tree();
        let root = tree.root().unwrap();
        tree.node_mut(root).color = Color::Red;

        assert_eq!(tree.validate(), Err(InvariantViolation::RedRoot { key: 20 }));
    }

    #[test]
    fn test_detects_red_red_edge() {
        let mut tree = three_node_tree();
        tree.insert(5);
        let ten = idx(&tree, 10);
        tree.node_mut(ten).color = Color::Red;

        assert_eq!(
            tree.validate(),
            Err(InvariantViolation::RedRedEdge {
                parent: 10,
                child: 5
            })
        );
    }

    #[test]
    fn test_detects_black_height_mismatch() {
        let mut tree = three_node_tree();
        let ten = idx(&tree, 10);
        tree.node_mut(ten).color = Color::Black;

        assert_eq!(
            tree.validate(),
            Err(InvariantViolation::BlackHeightMismatch {
                key: 30,
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn test_detects_order_violation() {
        let mut tree = three_node_tree();
        let ten = idx(&tree, 10);
        tree.node_mut(ten).key = 25;

        assert_eq!(
            tree.validate(),
            Err(InvariantViolation::OrderViolation { key: 25 })
        );
    }

    #[test]
    fn test_detects_duplicate_key() {
        let mut tree = three_node_tree();
        let thirty = idx(&tree, 30);
        tree.node_mut(thirty).key = 20;

        assert_eq!(
            tree.validate(),
            Err(InvariantViolation::DuplicateKey { key: 20 })
        );
    }

    #[test]
    fn test_detects_broken_parent_link() {
        let mut tree = three_node_tree();
        let ten = idx(&tree, 10);
        let thirty = idx(&tree, 30);
        tree.node_mut(ten).parent = Some(thirty);

        assert_eq!(
            tree.validate(),
            Err(InvariantViolation::BrokenParentLink { key: 10 })
        );
    }

    #[test]
    fn test_detects_detached_subtree() {
        let mut tree = three_node_tree();
        let root = tree.root().unwrap();
        tree.node_mut(root).left = None;

        assert_eq!(
            tree.validate(),
            Err(InvariantViolation::LengthMismatch {
                expected: 3,
                found: 2
            })
        );
    }
}
