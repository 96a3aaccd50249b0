//! Snapshot validation errors.
//!
//! Raised when an [`ActorSnapshot`](super::ActorSnapshot) is built from data that
//! the engine would otherwise silently coerce.

use crate::error::RulesError;
use crate::state::Ability;
use crate::tables::PowerTrack;

/// Errors that reject a snapshot before computation.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SnapshotError {
    /// Ability score outside 1..=30.
    #[error("{ability} score {value} is out of range (1..=30)")]
    AbilityOutOfRange {
        /// The offending ability.
        ability: Ability,
        /// The stored score.
        value: i32,
    },

    /// Class item levels outside 1..=20.
    #[error("class '{class}' has {levels} levels (expected 1..=20)")]
    ClassLevelsOutOfRange {
        /// Class item name.
        class: String,
        /// Stored level count.
        levels: u32,
    },

    /// Declared or summed character level above 20.
    #[error("character level {level} exceeds 20")]
    CharacterLevelOutOfRange {
        /// The offending level.
        level: u32,
    },

    /// Negative or non-finite challenge rating.
    #[error("challenge rating {cr} is not a finite non-negative number")]
    InvalidChallengeRating {
        /// The stored challenge rating.
        cr: f64,
    },

    /// Physical item with a negative or non-finite quantity or weight.
    #[error("item '{item}' has an invalid quantity or weight")]
    InvalidPhysicalItem {
        /// Item name.
        item: String,
    },

    /// Proficiency bonus override outside 0..=20.
    #[error("proficiency bonus override {value} is out of range (0..=20)")]
    ProficiencyOutOfRange {
        /// The stored override.
        value: i32,
    },

    /// Flat bonus larger than 100 in either direction.
    #[error("{field} bonus {value} is out of range (-100..=100)")]
    BonusOutOfRange {
        /// Which bonus (`check`, `save`, `skill`, `power_dc` or `skill.<code>`).
        field: String,
        /// The stored bonus.
        value: i32,
    },

    /// Stored initiative value larger than 100 in either direction.
    #[error("initiative value {value} is out of range (-100..=100)")]
    InitiativeOutOfRange {
        /// The stored value.
        value: i32,
    },

    /// Explicit NPC power-caster level above 20.
    #[error("npc {track} caster level {level} exceeds 20")]
    NpcPowerLevelOutOfRange {
        /// Track the level applies to.
        track: PowerTrack,
        /// The stored level.
        level: u32,
    },
}

impl RulesError for SnapshotError {
    fn error_code(&self) -> &'static str {
        use SnapshotError::*;
        match self {
            AbilityOutOfRange { .. } => "SNAPSHOT_ABILITY_OUT_OF_RANGE",
            ClassLevelsOutOfRange { .. } => "SNAPSHOT_CLASS_LEVELS_OUT_OF_RANGE",
            CharacterLevelOutOfRange { .. } => "SNAPSHOT_CHARACTER_LEVEL_OUT_OF_RANGE",
            InvalidChallengeRating { .. } => "SNAPSHOT_INVALID_CHALLENGE_RATING",
            InvalidPhysicalItem { .. } => "SNAPSHOT_INVALID_PHYSICAL_ITEM",
            ProficiencyOutOfRange { .. } => "SNAPSHOT_PROFICIENCY_OUT_OF_RANGE",
            BonusOutOfRange { .. } => "SNAPSHOT_BONUS_OUT_OF_RANGE",
            InitiativeOutOfRange { .. } => "SNAPSHOT_INITIATIVE_OUT_OF_RANGE",
            NpcPowerLevelOutOfRange { .. } => "SNAPSHOT_NPC_POWER_LEVEL_OUT_OF_RANGE",
        }
    }
}
