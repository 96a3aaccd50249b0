//! The [`RulesError`] trait.
//!
//! Concrete errors such as [`SnapshotError`](crate::state::SnapshotError) live next to the
//! data they validate.
//!
//! The computation pipeline itself never fails: table misses and missing data degrade to
//! zero. Errors only exist at the boundary where an [`ActorSnapshot`](crate::ActorSnapshot)
//! is constructed.

/// Shared behaviour of every error type in sw5e-core.
///
/// Implementors derive `thiserror::Error` for `Display` and pick a stable
/// SCREAMING_SNAKE `error_code` per variant so hosts can match on it.
pub trait RulesError: core::fmt::Display + core::fmt::Debug {
    /// Stable identifier for the variant.
    fn error_code(&self) -> &'static str;
}
