mod rb_tree;
pub(crate) use rb_tree::RbTree;

mod print;
pub use print::TreeDisplay;

mod traversal;
pub use traversal::{Inorder, Postorder, Preorder};

mod validate;
