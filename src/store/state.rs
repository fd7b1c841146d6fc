//! Config tree state and its reducer

use crate::error::TreeError;
use crate::store::action::{ConfigAction, ConfigForm};
use crate::tree::{self, ConfigNode, Edit, NodePath, Walk};
use crate::types::{IdChain, NodeId, ROOT_ID};
use std::sync::Arc;
use tracing::{debug, warn};

/// Immutable snapshot of the store: the tree plus the current selection.
///
/// Cloning is cheap; the tree is shared, so a clone taken before a
/// mutation keeps observing the old tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigTreeState {
    root_config: Arc<ConfigNode>,
    current_id_chain: IdChain,
}

impl Default for ConfigTreeState {
    fn default() -> Self {
        Self::seeded()
    }
}

impl ConfigTreeState {
    /// State over the default sample hierarchy.
    pub fn seeded() -> Self {
        Self::with_root(tree::seed::default_tree())
    }

    /// State over an existing tree, with the root selected.
    pub fn with_root(root: ConfigNode) -> Self {
        Self {
            root_config: Arc::new(root),
            current_id_chain: vec![ROOT_ID.to_string()],
        }
    }

    pub fn root(&self) -> &Arc<ConfigNode> {
        &self.root_config
    }

    pub fn current_id_chain(&self) -> &[NodeId] {
        &self.current_id_chain
    }

    /// Total number of nodes, root included.
    pub fn len(&self) -> usize {
        self.root_config.subtree_len()
    }

    /// True when the root has no children. The root always exists, so
    /// `len()` is at least 1 even then.
    pub fn is_empty(&self) -> bool {
        self.root_config.children.is_empty()
    }

    pub fn walk(&self) -> Walk {
        Walk::new(&self.root_config)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.walk().any(|entry| entry.node.id == id)
    }

    /// Node keyed `id` under the parent named by `ancestor_ids`.
    pub fn node_at<S: AsRef<str>>(&self, ancestor_ids: &[S], id: &str) -> Option<&Arc<ConfigNode>> {
        self.parent_path(ancestor_ids)
            .resolve(&self.root_config)?
            .children
            .get(id)
    }

    /// Id chain from the root down to `id`, both inclusive.
    pub fn find_chain(&self, id: &str) -> Option<IdChain> {
        tree::find_chain(&self.root_config, id)
    }

    /// Resolve the current selection; `None` when the chain is stale.
    pub fn current_node(&self) -> Option<&Arc<ConfigNode>> {
        self.parent_path(&self.current_id_chain)
            .resolve(&self.root_config)
    }

    fn parent_path<S: AsRef<str>>(&self, ancestor_ids: &[S]) -> NodePath {
        NodePath::for_ancestors(&self.root_config.id, ancestor_ids)
    }

    /// Apply an action. Never fails: an unresolvable parent path leaves the
    /// state unchanged.
    pub fn reduce(&self, action: &ConfigAction) -> ConfigTreeState {
        match self.apply(action, false) {
            Ok(next) => next,
            Err(err) => {
                warn!(action = %action.kind(), error = %err, "Config action ignored");
                self.clone()
            }
        }
    }

    /// Apply an action, enforcing parent existence, folder parents and id
    /// uniqueness.
    pub fn try_reduce(&self, action: &ConfigAction) -> Result<ConfigTreeState, TreeError> {
        self.apply(action, true)
    }

    pub fn create(&self, form: &ConfigForm) -> ConfigTreeState {
        self.reduce(&ConfigAction::Create {
            config: form.clone(),
        })
    }

    pub fn duplicate(&self, form: &ConfigForm) -> ConfigTreeState {
        self.reduce(&ConfigAction::Duplicate {
            config: form.clone(),
        })
    }

    pub fn update(&self, form: &ConfigForm) -> ConfigTreeState {
        self.reduce(&ConfigAction::Update {
            config: form.clone(),
        })
    }

    pub fn delete(&self, form: &ConfigForm) -> ConfigTreeState {
        self.reduce(&ConfigAction::Delete {
            config: form.clone(),
        })
    }

    /// Replace the current chain. Ids are not checked against the tree.
    pub fn set_current_chain(&self, id_chain: IdChain) -> ConfigTreeState {
        ConfigTreeState {
            root_config: Arc::clone(&self.root_config),
            current_id_chain: id_chain,
        }
    }

    fn apply(&self, action: &ConfigAction, checked: bool) -> Result<ConfigTreeState, TreeError> {
        let form = match action {
            ConfigAction::SetCurrentChain { id_chain } => {
                debug!(chain = ?id_chain, "Set current config chain");
                return Ok(self.set_current_chain(id_chain.clone()));
            }
            ConfigAction::Create { config }
            | ConfigAction::Duplicate { config }
            | ConfigAction::Update { config }
            | ConfigAction::Delete { config } => config,
        };
        debug!(
            action = %action.kind(),
            id = %form.id,
            ancestors = ?form.ancestor_ids,
            "Apply config action"
        );

        let path = self.parent_path(&form.ancestor_ids);
        let parent = path
            .resolve(&self.root_config)
            .ok_or_else(|| TreeError::ParentNotFound {
                ancestor_ids: form.ancestor_ids.clone(),
            })?;
        if checked {
            self.check_preconditions(action, form, parent)?;
        }

        let is_delete = matches!(action, ConfigAction::Delete { .. });
        let (root_config, _) = path
            .edit_children(&self.root_config, |_, children| {
                if is_delete {
                    match children.remove(&form.id) {
                        Some(_) => Edit::Changed(()),
                        None => Edit::Unchanged(()),
                    }
                } else {
                    children.insert(Arc::new(form.to_node()));
                    Edit::Changed(())
                }
            })
            .ok_or_else(|| TreeError::ParentNotFound {
                ancestor_ids: form.ancestor_ids.clone(),
            })?;

        Ok(ConfigTreeState {
            root_config,
            current_id_chain: self.current_id_chain.clone(),
        })
    }

    fn check_preconditions(
        &self,
        action: &ConfigAction,
        form: &ConfigForm,
        parent: &ConfigNode,
    ) -> Result<(), TreeError> {
        if parent.is_file() {
            return Err(TreeError::NotAFolder {
                id: parent.id.clone(),
            });
        }
        let under_parent = parent.children.contains(&form.id);
        match action {
            ConfigAction::Create { .. } => {
                if !under_parent && self.contains(&form.id) {
                    return Err(TreeError::Conflict {
                        id: form.id.clone(),
                    });
                }
            }
            ConfigAction::Duplicate { .. } => {
                if self.contains(&form.id) {
                    return Err(TreeError::Conflict {
                        id: form.id.clone(),
                    });
                }
            }
            ConfigAction::Update { .. } | ConfigAction::Delete { .. } => {
                if !under_parent {
                    return Err(TreeError::NotFound {
                        id: form.id.clone(),
                    });
                }
            }
            ConfigAction::SetCurrentChain { .. } => {}
        }
        Ok(())
    }
}
