//! Content loaders for reading engine data from files.
//!
//! TOML for static data (tables, configuration), JSON for host actor documents.

pub mod actor;
pub mod config;
pub mod factory;
mod normalize;
pub mod tables;

pub use actor::ActorLoader;
pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use tables::TablesLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
