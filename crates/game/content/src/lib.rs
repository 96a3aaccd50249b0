//! Data-driven content and loaders for the SW5e derived-stat engine.
//!
//! This crate turns files into `sw5e-core` types:
//! - Rule tables (data-driven via TOML)
//! - Engine configuration (data-driven via TOML)
//! - Actor documents exported by the host (JSON)
//!
//! Actor documents are loosely typed: numbers arrive as strings, overrides may
//! be blank, archetype tags may be misspelled. The actor loader is the single
//! place that coerces them, so the engine only ever sees clean snapshots.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ActorLoader, ConfigLoader, ContentFactory, LoadResult, TablesLoader};
