//! Content factory for building engine inputs from a data directory.

use std::path::{Path, PathBuf};

use sw5e_core::{ActorSnapshot, EngineConfig, StandardTables};

use crate::loaders::{ActorLoader, ConfigLoader, LoadResult, TablesLoader};

/// Content factory that loads engine data from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── tables.toml
/// └── actors/
///     └── consular.json
/// ```
///
/// Both TOML files are optional; a missing file yields the built-in defaults.
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load engine configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<EngineConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            tracing::info!(path = %path.display(), "no config file, using defaults");
            return Ok(EngineConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load rule tables from `tables.toml`.
    pub fn load_tables(&self) -> LoadResult<StandardTables> {
        let path = self.data_dir.join("tables.toml");
        if !path.exists() {
            tracing::info!(path = %path.display(), "no tables file, using standard tables");
            return Ok(StandardTables::default());
        }
        TablesLoader::load(&path)
    }

    /// Load an actor document. Relative paths resolve against `actors/`.
    pub fn load_actor(&self, path: impl AsRef<Path>) -> LoadResult<ActorSnapshot> {
        let path = path.as_ref();
        if path.is_absolute() || path.exists() {
            ActorLoader::load(path)
        } else {
            ActorLoader::load(&self.data_dir.join("actors").join(path))
        }
    }
}
