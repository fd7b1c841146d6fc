//! Action messages accepted by the config tree store

use crate::tree::{ConfigNode, NodeKind};
use crate::types::{IdChain, NodeId};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Node payload carried by the mutating actions.
///
/// `ancestor_ids` runs from (excluding) the root to the target's direct
/// parent. Delete only needs `id`; the other fields default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigForm {
    #[serde(deserialize_with = "scalar_id")]
    pub id: NodeId,
    #[serde(rename = "type", default)]
    pub kind: NodeKind,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, deserialize_with = "scalar_id_chain")]
    pub ancestor_ids: IdChain,
}

impl ConfigForm {
    pub fn new(id: impl Into<NodeId>, kind: NodeKind, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            name: name.into(),
            content: String::new(),
            ancestor_ids: Vec::new(),
        }
    }

    /// Payload addressing an existing node for deletion.
    pub fn target(id: impl Into<NodeId>) -> Self {
        Self::new(id, NodeKind::default(), "")
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn under<I, S>(mut self, ancestor_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<NodeId>,
    {
        self.ancestor_ids = ancestor_ids.into_iter().map(Into::into).collect();
        self
    }

    /// Fresh node value: payload fields with empty children.
    pub fn to_node(&self) -> ConfigNode {
        ConfigNode::new(
            self.id.clone(),
            self.kind,
            self.name.clone(),
            self.content.clone(),
        )
    }
}

/// A message dispatched to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ConfigAction {
    Create { config: ConfigForm },
    Duplicate { config: ConfigForm },
    Update { config: ConfigForm },
    Delete { config: ConfigForm },
    SetCurrentChain {
        #[serde(rename = "idChain", deserialize_with = "scalar_id_chain")]
        id_chain: IdChain,
    },
}

impl ConfigAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            ConfigAction::Create { .. } => ActionKind::Create,
            ConfigAction::Duplicate { .. } => ActionKind::Duplicate,
            ConfigAction::Update { .. } => ActionKind::Update,
            ConfigAction::Delete { .. } => ActionKind::Delete,
            ConfigAction::SetCurrentChain { .. } => ActionKind::SetCurrentChain,
        }
    }

    pub fn form(&self) -> Option<&ConfigForm> {
        match self {
            ConfigAction::Create { config }
            | ConfigAction::Duplicate { config }
            | ConfigAction::Update { config }
            | ConfigAction::Delete { config } => Some(config),
            ConfigAction::SetCurrentChain { .. } => None,
        }
    }
}

/// Ids are strings, but YAML action files often write them bare (`idChain:
/// [0, 9]`). The tagged enum buffers those as integers, so accept both.
struct ScalarIdVisitor;

impl<'de> Visitor<'de> for ScalarIdVisitor {
    type Value = NodeId;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a node id string or integer")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<NodeId, E> {
        Ok(v.to_string())
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<NodeId, E> {
        Ok(v)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<NodeId, E> {
        Ok(v.to_string())
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<NodeId, E> {
        Ok(v.to_string())
    }
}

struct ScalarId(NodeId);

impl<'de> Deserialize<'de> for ScalarId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ScalarIdVisitor).map(ScalarId)
    }
}

fn scalar_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NodeId, D::Error> {
    ScalarId::deserialize(deserializer).map(|ScalarId(id)| id)
}

fn scalar_id_chain<'de, D: Deserializer<'de>>(deserializer: D) -> Result<IdChain, D::Error> {
    let ids = Vec::<ScalarId>::deserialize(deserializer)?;
    Ok(ids.into_iter().map(|ScalarId(id)| id).collect())
}

/// Discriminant of a [`ConfigAction`], used for logging and summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Create,
    Duplicate,
    Update,
    Delete,
    SetCurrentChain,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ActionKind::Create => "create",
            ActionKind::Duplicate => "duplicate",
            ActionKind::Update => "update",
            ActionKind::Delete => "delete",
            ActionKind::SetCurrentChain => "set_current_chain",
        };
        f.write_str(name)
    }
}
