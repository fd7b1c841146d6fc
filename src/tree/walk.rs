//! Depth-first traversal in display order

use crate::tree::node::ConfigNode;
use std::sync::Arc;

/// A node visited during a walk, with its depth below the walk's start.
#[derive(Debug, Clone)]
pub struct WalkEntry {
    pub depth: usize,
    pub node: Arc<ConfigNode>,
}

/// Pre-order iterator over a subtree; children in insertion order.
pub struct Walk {
    stack: Vec<WalkEntry>,
}

impl Walk {
    pub fn new(root: &Arc<ConfigNode>) -> Self {
        Walk {
            stack: vec![WalkEntry {
                depth: 0,
                node: Arc::clone(root),
            }],
        }
    }
}

impl Iterator for Walk {
    type Item = WalkEntry;

    fn next(&mut self) -> Option<WalkEntry> {
        let entry = self.stack.pop()?;
        let children: Vec<&Arc<ConfigNode>> = entry.node.children.iter().collect();
        for child in children.into_iter().rev() {
            self.stack.push(WalkEntry {
                depth: entry.depth + 1,
                node: Arc::clone(child),
            });
        }
        Some(entry)
    }
}

/// Find the chain of ids from `root` down to `id`, both inclusive.
pub fn find_chain(root: &ConfigNode, id: &str) -> Option<Vec<String>> {
    if root.id == id {
        return Some(vec![root.id.clone()]);
    }
    for child in root.children.iter() {
        if let Some(mut chain) = find_chain(child, id) {
            chain.insert(0, root.id.clone());
            return Some(chain);
        }
    }
    None
}
