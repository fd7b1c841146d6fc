//! Config Tree Store
//!
//! Owns the configuration tree and the current selection chain. The store is
//! an ordinary value constructed by the host and passed where it is needed;
//! every dispatch replaces the held snapshot with a new one.

pub mod action;
pub mod shared;
pub mod state;

pub use action::{ActionKind, ConfigAction, ConfigForm};
pub use shared::SharedConfigTreeStore;
pub use state::ConfigTreeState;

use crate::error::TreeError;
use crate::tree::ConfigNode;

/// Single-owner store. See [`SharedConfigTreeStore`] for multi-threaded hosts.
#[derive(Debug, Clone, Default)]
pub struct ConfigTreeStore {
    state: ConfigTreeState,
}

impl ConfigTreeStore {
    /// Store seeded with the default hierarchy.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(root: ConfigNode) -> Self {
        Self {
            state: ConfigTreeState::with_root(root),
        }
    }

    pub fn state(&self) -> &ConfigTreeState {
        &self.state
    }

    /// Detached copy of the current state.
    pub fn snapshot(&self) -> ConfigTreeState {
        self.state.clone()
    }

    pub fn dispatch(&mut self, action: &ConfigAction) -> &ConfigTreeState {
        self.state = self.state.reduce(action);
        &self.state
    }

    /// Checked dispatch; on error the held state is left as it was.
    pub fn try_dispatch(&mut self, action: &ConfigAction) -> Result<&ConfigTreeState, TreeError> {
        self.state = self.state.try_reduce(action)?;
        Ok(&self.state)
    }
}
