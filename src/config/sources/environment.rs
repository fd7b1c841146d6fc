//! Environment variable source: CONFIGTREE__* with __ separator

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Add environment variable overlay to builder.
/// `CONFIGTREE__TREE__SNAPSHOT` sets `tree.snapshot`.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let builder = builder.add_source(
        Environment::with_prefix("CONFIGTREE")
            .separator("__")
            .try_parsing(true),
    );
    Ok(builder)
}
