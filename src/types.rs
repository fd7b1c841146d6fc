//! Core types shared across the config tree store.

/// NodeId: caller-assigned identifier, unique across the whole tree
pub type NodeId = String;

/// Ordered chain of node ids (ancestor chain or current selection chain)
pub type IdChain = Vec<NodeId>;

/// Hash: blake3 digest of a tree snapshot
pub type Hash = [u8; 32];

/// Id of the root folder. The root always exists and is never deleted.
pub const ROOT_ID: &str = "0";

/// Display name of the root folder.
pub const ROOT_NAME: &str = "root";
