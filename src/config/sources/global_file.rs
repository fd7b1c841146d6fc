//! Global config file source: `<platform config dir>/configtree/config.toml`

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File};
use std::path::PathBuf;

/// Resolve the global config file path. Honors `XDG_CONFIG_HOME`.
pub fn path() -> Option<PathBuf> {
    if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg_config_home.is_empty() {
            return Some(
                PathBuf::from(xdg_config_home)
                    .join("configtree")
                    .join("config.toml"),
            );
        }
    }
    directories::ProjectDirs::from("", "", "configtree")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Add the global file when it exists.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    match path() {
        Some(path) if path.exists() => Ok(builder.add_source(File::from(path).required(false))),
        _ => Ok(builder),
    }
}
