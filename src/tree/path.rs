//! Ancestor-chain path resolution and copy-on-write edits
//!
//! An ancestor chain names the ids from (but excluding) the root down to the
//! direct parent of a target node. The root id is tolerated anywhere in the
//! chain and resolves to nothing, so `["0", "1", "2"]` and `["1", "2"]` both
//! address the children of node "2".

use crate::tree::node::{Children, ConfigNode};
use std::sync::Arc;

/// One step of a resolved access path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathStep {
    /// Descend into the child with this id.
    Child(String),
    /// Position at the current node's children mapping.
    Children,
}

/// Access path from the root to a parent's children mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodePath {
    steps: Vec<PathStep>,
}

impl NodePath {
    /// Build the access path for `ancestor_ids`.
    ///
    /// Every ancestor contributes a `Children` step; ancestors other than
    /// the root also contribute a `Child` step before it. An empty chain
    /// resolves directly to the root's children.
    pub fn for_ancestors<S: AsRef<str>>(root_id: &str, ancestor_ids: &[S]) -> Self {
        let mut steps = Vec::with_capacity(ancestor_ids.len() * 2);
        for id in ancestor_ids {
            let id = id.as_ref();
            if id != root_id {
                steps.push(PathStep::Child(id.to_string()));
            }
            steps.push(PathStep::Children);
        }
        Self { steps }
    }

    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    /// The child ids to descend through, root first.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().filter_map(|step| match step {
            PathStep::Child(id) => Some(id.as_str()),
            PathStep::Children => None,
        })
    }

    /// Resolve the parent node this path ends at.
    pub fn resolve<'a>(&self, root: &'a Arc<ConfigNode>) -> Option<&'a Arc<ConfigNode>> {
        let mut current = root;
        for id in self.segments() {
            current = current.children.get(id)?;
        }
        Some(current)
    }

    /// Copy-on-write edit of the parent's children mapping.
    ///
    /// Rebuilds only the nodes along the path; every other subtree keeps its
    /// `Arc`. Returns `None` when the path does not resolve, and `Some(root)`
    /// unchanged (same `Arc`) when `edit` reports no change.
    pub fn edit_children<T, F>(&self, root: &Arc<ConfigNode>, edit: F) -> Option<(Arc<ConfigNode>, T)>
    where
        F: FnOnce(&ConfigNode, &mut Children) -> Edit<T>,
    {
        let segments: Vec<&str> = self.segments().collect();
        edit_along(root, &segments, edit)
    }
}

/// Outcome of an edit closure.
pub enum Edit<T> {
    Changed(T),
    Unchanged(T),
}

fn edit_along<T, F>(node: &Arc<ConfigNode>, segments: &[&str], edit: F) -> Option<(Arc<ConfigNode>, T)>
where
    F: FnOnce(&ConfigNode, &mut Children) -> Edit<T>,
{
    match segments.split_first() {
        None => {
            let mut children = node.children.clone();
            match edit(node, &mut children) {
                Edit::Unchanged(out) => Some((Arc::clone(node), out)),
                Edit::Changed(out) => {
                    let mut updated = ConfigNode::clone(node);
                    updated.children = children;
                    Some((Arc::new(updated), out))
                }
            }
        }
        Some((id, rest)) => {
            let child = node.children.get(id)?;
            let (new_child, out) = edit_along(child, rest, edit)?;
            if Arc::ptr_eq(child, &new_child) {
                return Some((Arc::clone(node), out));
            }
            let mut updated = ConfigNode::clone(node);
            updated.children.insert(new_child);
            Some((Arc::new(updated), out))
        }
    }
}
