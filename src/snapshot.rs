//! Snapshot files
//!
//! Reads and writes a tree in the nested node shape used by the console's
//! seed data. Format follows the file extension: `.yaml`/`.yml` for YAML,
//! anything else is JSON.

use crate::error::ApiError;
use crate::store::ConfigAction;
use crate::tree::ConfigNode;
use crate::types::{ROOT_ID, ROOT_NAME};
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Json,
    Yaml,
}

impl SnapshotFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => SnapshotFormat::Yaml,
            _ => SnapshotFormat::Json,
        }
    }
}

fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T, ApiError> {
    let raw = std::fs::read_to_string(path)?;
    match SnapshotFormat::from_path(path) {
        SnapshotFormat::Yaml => Ok(serde_yaml::from_str(&raw)?),
        SnapshotFormat::Json => Ok(serde_json::from_str(&raw)?),
    }
}

/// Load a tree. The document root must be the root folder.
pub fn load_tree(path: &Path) -> Result<ConfigNode, ApiError> {
    let root: ConfigNode = read_document(path)?;
    if root.id != ROOT_ID || !root.is_folder() || root.name != ROOT_NAME {
        return Err(ApiError::InvalidSnapshot(format!(
            "{}: document root must be folder '{}' with id '{}', found {} '{}' with id '{}'",
            path.display(),
            ROOT_NAME,
            ROOT_ID,
            root.kind,
            root.name,
            root.id
        )));
    }
    info!(path = %path.display(), nodes = root.subtree_len(), "Loaded config tree snapshot");
    Ok(root)
}

/// Write a tree, creating parent directories as needed.
pub fn save_tree(path: &Path, root: &ConfigNode) -> Result<(), ApiError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let body = match SnapshotFormat::from_path(path) {
        SnapshotFormat::Yaml => serde_yaml::to_string(root)?,
        SnapshotFormat::Json => serde_json::to_string_pretty(root)?,
    };
    std::fs::write(path, body)?;
    info!(path = %path.display(), "Saved config tree snapshot");
    Ok(())
}

/// Load a list of action messages to replay against a store.
pub fn load_actions(path: &Path) -> Result<Vec<ConfigAction>, ApiError> {
    read_document(path)
}
