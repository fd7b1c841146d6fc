//! Configuration
//!
//! Layered settings for the store host and CLI: built-in defaults, the
//! global config file, an explicit file, then `CONFIGTREE__*` environment
//! variables.

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConsoleConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub tree: TreeConfig,
}

/// Where the store's initial tree comes from and how actions are applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Snapshot file to seed from; the built-in sample tree when unset
    #[serde(default)]
    pub snapshot: Option<PathBuf>,

    /// Reject ill-formed actions instead of ignoring them
    #[serde(default)]
    pub checked_dispatch: bool,
}
