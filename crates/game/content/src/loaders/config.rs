//! Engine configuration loader.

use std::path::Path;

use sw5e_core::EngineConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for engine configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Keys left out of the file keep their defaults.
    pub fn load(path: &Path) -> LoadResult<EngineConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<EngineConfig> {
        let config: EngineConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if !(config.currency_per_weight > 0.0 && config.str_multiplier > 0.0) {
            anyhow::bail!(
                "Invalid config: currency_per_weight and str_multiplier must be positive"
            );
        }
        Ok(config)
    }
}
