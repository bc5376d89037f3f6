#![doc = include_str!("../README.md")]
#![no_std]
#![deny(
    unsafe_code,
    unused_imports,
    unused_variables,
    unused_must_use,
    missing_docs,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::dbg_macro,
    clippy::todo,
    clippy::unimplemented
)]

#[macro_use]
extern crate alloc;

mod error;
pub use error::InvariantViolation;

mod utils;
pub use utils::{Inorder, Postorder, Preorder, TreeDisplay};

mod ordered_set;
pub use ordered_set::OrderedSet;
