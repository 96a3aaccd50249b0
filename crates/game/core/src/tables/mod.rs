//! Static rule tables consumed by the engine.
//!
//! Tables are configuration, not computation: XP thresholds and the per-archetype
//! power progressions. The engine reads them through [`RuleTables`] so hosts can
//! supply their own data without coupling to [`StandardTables`].
mod powercasting;
mod standard;

pub use powercasting::{PowerTrack, Powercasting};
pub use standard::{
    CLASS_LEVELS, CasterTable, ExperienceTables, LevelRow, LimitRow, PowerTables,
    StandardTables,
};

/// Read-only access to rule tables.
///
/// Every lookup is fail-soft: a missing row or an out-of-range index yields `0`
/// rather than an error, so a sparse table degrades to "no slots" instead of
/// aborting a recompute.
pub trait RuleTables: Send + Sync {
    /// XP threshold at `index`; indices past the end clamp to the last entry.
    fn character_xp(&self, index: usize) -> u32;

    /// XP awarded for a whole challenge rating.
    fn challenge_xp(&self, index: usize) -> u32;

    fn powers_known(&self, caster: Powercasting, index: usize) -> u32;

    fn power_points(&self, caster: Powercasting, index: usize) -> u32;

    /// Highest castable power level for `caster` at class level `index + 1`.
    fn power_max_level(&self, caster: Powercasting, index: usize) -> u32;

    /// Highest castable power level for a true multiclasser.
    fn multi_power_max_level(&self, index: usize) -> u32;

    /// Slot limit for power level `index + 1`.
    fn power_limit(&self, caster: Powercasting, index: usize) -> u32;
}
