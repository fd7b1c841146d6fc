//! Thread-safe store handle
//!
//! Writers serialize on a write lock; readers take a snapshot under a brief
//! read lock and then work on it without holding any lock. Snapshots stay
//! valid after later dispatches because the tree is persistent.

use crate::error::TreeError;
use crate::store::action::ConfigAction;
use crate::store::state::ConfigTreeState;
use crate::tree::ConfigNode;
use parking_lot::RwLock;
use std::sync::Arc;

struct Versioned {
    version: u64,
    state: ConfigTreeState,
}

/// Cloneable handle to one shared store.
#[derive(Clone)]
pub struct SharedConfigTreeStore {
    inner: Arc<RwLock<Versioned>>,
}

impl SharedConfigTreeStore {
    pub fn new(state: ConfigTreeState) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Versioned { version: 0, state })),
        }
    }

    pub fn with_root(root: ConfigNode) -> Self {
        Self::new(ConfigTreeState::with_root(root))
    }

    pub fn snapshot(&self) -> ConfigTreeState {
        self.inner.read().state.clone()
    }

    /// Number of dispatches that produced a new state.
    pub fn version(&self) -> u64 {
        self.inner.read().version
    }

    pub fn dispatch(&self, action: &ConfigAction) -> ConfigTreeState {
        let mut guard = self.inner.write();
        let next = guard.state.reduce(action);
        if next != guard.state {
            guard.version += 1;
        }
        guard.state = next.clone();
        next
    }

    pub fn try_dispatch(&self, action: &ConfigAction) -> Result<ConfigTreeState, TreeError> {
        let mut guard = self.inner.write();
        let next = guard.state.try_reduce(action)?;
        if next != guard.state {
            guard.version += 1;
        }
        guard.state = next.clone();
        Ok(next)
    }
}

impl Default for SharedConfigTreeStore {
    fn default() -> Self {
        Self::new(ConfigTreeState::default())
    }
}
