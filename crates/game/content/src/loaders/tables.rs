//! Rule tables loader.

use std::path::Path;

use sw5e_core::StandardTables;

use crate::loaders::{LoadResult, read_file};

/// Loader for rule tables from TOML files.
pub struct TablesLoader;

impl TablesLoader {
    /// Load rule tables from a TOML file.
    ///
    /// The file has the shape of [`StandardTables`]; a section it omits
    /// (`experience` or `powers`) keeps the built-in data.
    pub fn load(path: &Path) -> LoadResult<StandardTables> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<StandardTables> {
        let tables: StandardTables = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse tables TOML: {}", e))?;

        if tables.experience.character.is_empty() {
            anyhow::bail!("Invalid tables: experience.character must not be empty");
        }
        tracing::debug!(
            character_levels = tables.experience.character.len(),
            challenge_ratings = tables.experience.challenge.len(),
            "rule tables loaded"
        );
        Ok(tables)
    }
}
