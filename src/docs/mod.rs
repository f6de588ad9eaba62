//! The static document tree and its read-only traversal.

pub mod sample;
pub mod tree;

pub use tree::{FileSubtype, TreeNode, TreeStore};
