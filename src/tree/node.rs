//! Config node types and the ordered child mapping

use crate::types::{NodeId, ROOT_ID, ROOT_NAME};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// Node kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Folder,
    #[default]
    File,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Folder => "folder",
            NodeKind::File => "file",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A folder or file in the configuration tree.
///
/// Nodes are immutable once shared: mutations build new nodes along the
/// edited path and reuse the `Arc` of every untouched child.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigNode {
    pub id: NodeId,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub name: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub children: Children,
}

impl ConfigNode {
    /// Leaf node with empty children.
    pub fn new(
        id: impl Into<NodeId>,
        kind: NodeKind,
        name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            name: name.into(),
            content: content.into(),
            children: Children::default(),
        }
    }

    pub fn folder(id: impl Into<NodeId>, name: impl Into<String>) -> Self {
        Self::new(id, NodeKind::Folder, name, "")
    }

    pub fn file(id: impl Into<NodeId>, name: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(id, NodeKind::File, name, content)
    }

    /// The empty root folder.
    pub fn root() -> Self {
        Self::folder(ROOT_ID, ROOT_NAME)
    }

    /// Builder helper used by seeds and tests.
    pub fn with_child(mut self, child: ConfigNode) -> Self {
        self.children.insert(Arc::new(child));
        self
    }

    pub fn is_folder(&self) -> bool {
        self.kind == NodeKind::Folder
    }

    pub fn is_file(&self) -> bool {
        self.kind == NodeKind::File
    }

    /// Number of nodes in this subtree, including self.
    pub fn subtree_len(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(|child| child.subtree_len())
            .sum::<usize>()
    }
}

/// Child mapping keyed by node id, iterated in insertion order.
///
/// Replacing an existing key keeps its position, so an update does not
/// reorder a folder listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Children {
    entries: Vec<(NodeId, Arc<ConfigNode>)>,
}

impl Children {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Arc<ConfigNode>> {
        self.entries
            .iter()
            .find(|(key, _)| key == id)
            .map(|(_, node)| node)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Insert or overwrite the entry keyed by `node.id`.
    ///
    /// Returns the replaced node, if any.
    pub fn insert(&mut self, node: Arc<ConfigNode>) -> Option<Arc<ConfigNode>> {
        match self.entries.iter_mut().find(|(key, _)| *key == node.id) {
            Some((_, slot)) => Some(std::mem::replace(slot, node)),
            None => {
                self.entries.push((node.id.clone(), node));
                None
            }
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<Arc<ConfigNode>> {
        let index = self.entries.iter().position(|(key, _)| key == id)?;
        Some(self.entries.remove(index).1)
    }

    pub fn ids(&self) -> impl Iterator<Item = &NodeId> {
        self.entries.iter().map(|(key, _)| key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<ConfigNode>> {
        self.entries.iter().map(|(_, node)| node)
    }
}

impl Serialize for Children {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, node) in &self.entries {
            map.serialize_entry(key, node.as_ref())?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Children {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ChildrenVisitor;

        impl<'de> Visitor<'de> for ChildrenVisitor {
            type Value = Children;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of child id to config node")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Children, A::Error> {
                let mut children = Children::default();
                while let Some((key, node)) = access.next_entry::<NodeId, ConfigNode>()? {
                    if key != node.id {
                        return Err(serde::de::Error::custom(format!(
                            "child key '{}' does not match node id '{}'",
                            key, node.id
                        )));
                    }
                    if children.contains(&key) {
                        return Err(serde::de::Error::custom(format!(
                            "duplicate child key '{}'",
                            key
                        )));
                    }
                    children.insert(Arc::new(node));
                }
                Ok(children)
            }
        }

        deserializer.deserialize_map(ChildrenVisitor)
    }
}
