use alloc::{string::String, vec::Vec};
use core::fmt;

use super::rb_tree::{Link, RbTree};

/// Structural dump of an [`OrderedSet`](crate::OrderedSet): one node per line
/// with its color, children indented below it, left before right.
///
/// ```text
/// 20 black
/// ├─ 10 black
/// │  ├─ 5 red
/// │  └─ ∅
/// └─ 30 black
/// ```
///
/// An absent child is printed as `∅` when its sibling exists, so left and
/// right stay distinguishable.
#[derive(Debug, Clone, Copy)]
pub struct TreeDisplay<'a> {
    tree: &'a RbTree,
}

impl<'a> TreeDisplay<'a> {
    pub(crate) const fn new(tree: &'a RbTree) -> Self {
        Self { tree }
    }
}

impl fmt::Display for TreeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(root) = self.tree.root() else {
            return f.write_str("∅");
        };

        // (node, indent of this line, branch glyph)
        let mut stack: Vec<(Link, String, &str)> = vec![(Some(root), String::new(), "")];
        let mut first = true;

        while let Some((link, indent, branch)) = stack.pop() {
            if !first {
                f.write_str("\n")?;
            }
            first = false;
            write!(f, "{indent}{branch}")?;

            let Some(idx) = link else {
                f.write_str("∅")?;
                continue;
            };

            let node = self.tree.node(idx);
            write!(f, "{} {}", node.key, node.color.as_str())?;

            if node.left.is_none() && node.right.is_none() {
                continue;
            }

            let child_indent = match branch {
                "├─ " => format!("{indent}│  "),
                "└─ " => format!("{indent}   "),
                _ => indent,
            };
            stack.push((node.right, child_indent.clone(), "└─ "));
            stack.push((node.left, child_indent, "├─ "));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    fn tree_of(keys: &[i64]) -> RbTree {
        let mut tree = RbTree::new();
        for &key in keys {
            tree.insert(key);
        }
        tree
    }

    #[test]
    fn test_print_empty_tree() {
        assert_eq!(TreeDisplay::new(&RbTree::new()).to_string(), "∅");
    }

    #[test]
    fn test_print_single_node() {
        assert_eq!(TreeDisplay::new(&tree_of(&[7])).to_string(), "7 black");
    }

    #[test]
    fn test_print_three_nodes() {
        let tree = tree_of(&[10, 20, 30]);
        assert_eq!(
            TreeDisplay::new(&tree).to_string(),
            "20 black\n├─ 10 red\n└─ 30 red"
        );
    }

    #[test]
    fn test_print_nested_with_absent_child() {
        let tree = tree_of(&[20, 10, 30, 5]);
        assert_eq!(
            TreeDisplay::new(&tree).to_string(),
            "20 black\n├─ 10 black\n│  ├─ 5 red\n│  └─ ∅\n└─ 30 black"
        );
    }
}
