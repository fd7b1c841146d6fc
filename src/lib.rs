//! configtree: persistent configuration tree store
//!
//! Holds the folder/file tree behind a console's config editor, applies
//! create / duplicate / update / delete actions addressed by ancestor id
//! chains, and tracks the currently selected node.

pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod snapshot;
pub mod store;
pub mod tooling;
pub mod tree;
pub mod types;
pub mod views;

pub use error::{ApiError, TreeError};
pub use store::{ConfigAction, ConfigForm, ConfigTreeState, ConfigTreeStore, SharedConfigTreeStore};
pub use tree::{ConfigNode, NodeKind};
