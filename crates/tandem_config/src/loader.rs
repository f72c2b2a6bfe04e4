//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::FlowConfig;
use std::path::Path;

/// Loads and validates a `tandem.toml` file.
pub fn load_config(path: &Path) -> Result<FlowConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    load_config_from_str(&content)
}

/// Parses and validates configuration text.
pub fn load_config_from_str(content: &str) -> Result<FlowConfig, ConfigError> {
    let config: FlowConfig = toml::from_str(content)?;
    validate_config(&config)?;
    Ok(config)
}

/// Rejects a zero stagnation limit or row window.
pub fn validate_config(config: &FlowConfig) -> Result<(), ConfigError> {
    if config.partition.stagnation_limit == 0 {
        return Err(ConfigError::Invalid {
            key: "partition.stagnation_limit",
            reason: "must be at least 1".to_string(),
        });
    }
    if config.legalize.row_window == 0 {
        return Err(ConfigError::Invalid {
            key: "legalize.row_window",
            reason: "must be at least 1".to_string(),
        });
    }
    Ok(())
}
