//! Deterministic SW5e derived-stat rules.
//!
//! `sw5e-core` turns a read-only [`ActorSnapshot`] into [`DerivedStats`]:
//! ability modifiers and saves, skill totals, initiative, encumbrance,
//! experience progress and force/tech power progression. Everything is a pure
//! function of the snapshot, the [`RuleTables`] and the [`EngineConfig`];
//! [`engine::DerivedStatsEngine`] is the only entry point hosts need.
pub mod config;
pub mod engine;
pub mod error;
pub mod state;
pub mod stats;
pub mod tables;

pub use config::EngineConfig;
pub use engine::DerivedStatsEngine;
pub use error::RulesError;
pub use state::{
    Ability, AbilityScore, ActorKind, ActorSnapshot, ActorSnapshotBuilder, Attributes, ByAbility,
    ClassItem, Details, FeatFlags, FeatToggles, GlobalBonuses, Item, ItemData, PhysicalCategory,
    PhysicalItem, PolymorphDonor, Pool, PowerAttributes, PowerItem, PowerSchool, PowerSlotState,
    PowerSlots, Proficiency, Size, Skill, SkillEntry, SkillSet, SnapshotError, default_skills,
};
pub use stats::{
    AbilityStats, DerivedStats, Diagnostic, Encumbrance, Experience, Initiative, LevelStats,
    PowerDcs, PowerPool, PowerStats, Progression, ResolvedSlot, SkillStats, StatLayer, XpProgress,
};
pub use tables::{PowerTrack, Powercasting, RuleTables, StandardTables};
