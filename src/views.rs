//! Display views over a store snapshot
//!
//! Flattens the tree into rows in navigator order and marks the rows on the
//! current selection chain.

use crate::store::ConfigTreeState;
use crate::tree::NodeKind;
use crate::types::NodeId;
use serde::Serialize;

/// One line of the tree navigator.
#[derive(Debug, Clone, Serialize)]
pub struct TreeRow {
    pub depth: usize,
    pub id: NodeId,
    pub kind: NodeKind,
    pub name: String,
    pub content_bytes: usize,
    pub child_count: usize,
    /// On the current selection chain
    pub selected: bool,
}

/// Root-inclusive ids of the node the current chain resolves to; empty when
/// the chain is stale.
fn selected_chain(state: &ConfigTreeState) -> Vec<NodeId> {
    state
        .current_node()
        .and_then(|node| state.find_chain(&node.id))
        .unwrap_or_default()
}

/// Rows for the whole tree, pre-order, children in insertion order.
pub fn tree_rows(state: &ConfigTreeState) -> Vec<TreeRow> {
    let chain = selected_chain(state);
    state
        .walk()
        .map(|entry| {
            let node = &entry.node;
            TreeRow {
                depth: entry.depth,
                id: node.id.clone(),
                kind: node.kind,
                name: node.name.clone(),
                content_bytes: node.content.len(),
                child_count: node.children.len(),
                selected: chain.iter().any(|id| *id == node.id),
            }
        })
        .collect()
}

/// Editor pane view of the current selection.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentView {
    pub id_chain: Vec<NodeId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node: Option<TreeRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

pub fn current_view(state: &ConfigTreeState) -> CurrentView {
    let node = state.current_node();
    let depth = selected_chain(state).len().saturating_sub(1);
    CurrentView {
        id_chain: state.current_id_chain().to_vec(),
        node: node.map(|node| TreeRow {
            depth,
            id: node.id.clone(),
            kind: node.kind,
            name: node.name.clone(),
            content_bytes: node.content.len(),
            child_count: node.children.len(),
            selected: true,
        }),
        content: node.filter(|node| node.is_file()).map(|node| node.content.clone()),
    }
}
