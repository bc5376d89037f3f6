use core::fmt;

/// A broken red-black tree invariant, as reported by
/// [`OrderedSet::validate`](crate::OrderedSet::validate).
///
/// Public operations never produce these on a healthy tree. Seeing one means
/// the balancing code has a bug.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantViolation {
    /// The root node is red.
    RedRoot {
        /// Key held by the root
        key: i64,
    },
    /// A red node has a red child.
    RedRedEdge {
        /// Key of the red parent
        parent: i64,
        /// Key of the red child
        child: i64,
    },
    /// Two root-to-leaf paths pass through different numbers of black nodes.
    BlackHeightMismatch {
        /// Key of the node owning the absent child where the mismatch showed up
        key: i64,
        /// Black count of the first path seen
        expected: usize,
        /// Black count of the offending path
        found: usize,
    },
    /// A key sits on the wrong side of one of its ancestors.
    OrderViolation {
        /// The misplaced key
        key: i64,
    },
    /// The same key is stored in two nodes.
    DuplicateKey {
        /// The repeated key
        key: i64,
    },
    /// A node's parent link does not point at the node holding it, or a node
    /// is reachable twice.
    BrokenParentLink {
        /// Key of the node with the bad link
        key: i64,
    },
    /// The number of reachable nodes differs from the stored length.
    LengthMismatch {
        /// Stored length
        expected: usize,
        /// Reachable node count
        found: usize,
    },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RedRoot { key } => write!(f, "root {key} is red"),
            Self::RedRedEdge { parent, child } => {
                write!(f, "red node {parent} has red child {child}")
            }
            Self::BlackHeightMismatch {
                key,
                expected,
                found,
            } => write!(
                f,
                "path below {key} has black height {found}, expected {expected}"
            ),
            Self::OrderViolation { key } => write!(f, "key {key} is out of order"),
            Self::DuplicateKey { key } => write!(f, "key {key} is stored twice"),
            Self::BrokenParentLink { key } => write!(f, "node {key} has a broken parent link"),
            Self::LengthMismatch { expected, found } => {
                write!(f, "tree holds {found} reachable nodes but length is {expected}")
            }
        }
    }
}

impl core::error::Error for InvariantViolation {}
