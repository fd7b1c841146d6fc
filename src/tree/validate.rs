//! Structural checks for trees loaded from outside the store

use crate::tree::hasher::fingerprint_hex;
use crate::tree::node::ConfigNode;
use crate::tree::walk::Walk;
use crate::types::{ROOT_ID, ROOT_NAME};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;

/// Result of validating a tree.
#[derive(Debug, Clone, Serialize)]
pub struct ValidateResult {
    pub valid: bool,
    pub fingerprint: String,
    pub node_count: usize,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Check root identity and id uniqueness (errors) plus leaf conventions
/// (warnings).
pub fn validate_tree(root: &Arc<ConfigNode>) -> ValidateResult {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if root.id != ROOT_ID {
        errors.push(format!("Root id is '{}', expected '{}'", root.id, ROOT_ID));
    }
    if !root.is_folder() {
        errors.push("Root must be a folder".to_string());
    }
    if root.name != ROOT_NAME {
        errors.push(format!(
            "Root name is '{}', expected '{}'",
            root.name, ROOT_NAME
        ));
    }

    let mut seen = HashSet::new();
    let mut node_count = 0;
    for entry in Walk::new(root) {
        node_count += 1;
        let node = &entry.node;
        if !seen.insert(node.id.clone()) {
            errors.push(format!("Duplicate node id '{}'", node.id));
        }
        if node.is_file() && !node.children.is_empty() {
            warnings.push(format!(
                "File '{}' ({}) has {} children",
                node.name,
                node.id,
                node.children.len()
            ));
        }
        if node.is_folder() && !node.content.is_empty() {
            warnings.push(format!("Folder '{}' ({}) has content", node.name, node.id));
        }
    }

    ValidateResult {
        valid: errors.is_empty(),
        fingerprint: fingerprint_hex(root),
        node_count,
        errors,
        warnings,
    }
}
