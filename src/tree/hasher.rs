//! Deterministic fingerprint of a config tree snapshot

use crate::tree::node::{ConfigNode, NodeKind};
use crate::types::Hash;

/// Compute the fingerprint of a subtree.
///
/// Covers kind, id, name, content and the ordered children, so reordering a
/// folder changes the digest. Length prefixes keep field boundaries
/// unambiguous.
pub fn compute_node_hash(node: &ConfigNode) -> Hash {
    let mut hasher = blake3::Hasher::new();
    hasher.update(b"configtree-node-v1");
    hasher.update(&[match node.kind {
        NodeKind::Folder => 0u8,
        NodeKind::File => 1u8,
    }]);
    for field in [&node.id, &node.name, &node.content] {
        hasher.update(&(field.len() as u64).to_le_bytes());
        hasher.update(field.as_bytes());
    }
    hasher.update(&(node.children.len() as u64).to_le_bytes());
    for child in node.children.iter() {
        hasher.update(&compute_node_hash(child));
    }
    *hasher.finalize().as_bytes()
}

/// Hex form of a fingerprint.
pub fn fingerprint_hex(node: &ConfigNode) -> String {
    hex::encode(compute_node_hash(node))
}
