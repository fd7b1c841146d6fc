//! Config tree data structure
//!
//! Persistent folder/file tree: nodes are shared through `Arc` and edits
//! rebuild only the path from the root to the edited parent.

pub mod hasher;
pub mod node;
pub mod path;
pub mod seed;
pub mod validate;
pub mod walk;

pub use node::{Children, ConfigNode, NodeKind};
pub use path::{Edit, NodePath, PathStep};
pub use walk::{find_chain, Walk, WalkEntry};
