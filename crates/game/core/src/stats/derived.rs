//! The full set of derived values for one actor.

use core::fmt;

use super::abilities::AbilityTable;
use super::dcs::PowerDcs;
use super::encumbrance::Encumbrance;
use super::experience::Experience;
use super::initiative::Initiative;
use super::level::LevelStats;
use super::powers::PowerStats;
use super::skills::SkillTable;
use crate::state::FeatFlags;
use crate::tables::PowerTrack;

/// Non-fatal findings from a recompute.
///
/// Diagnostics never change derived values; they flag stored data the host may
/// want to reconcile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Diagnostic {
    /// More owned powers than the class progression allows.
    KnownPowersExceeded {
        track: PowerTrack,
        known: u32,
        max: u32,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KnownPowersExceeded { track, known, max } => {
                write!(f, "{known} {track} powers known, maximum is {max}")
            }
        }
    }
}

/// Everything the engine derives from one snapshot.
///
/// Produced whole by every recompute; nothing is carried over from a previous
/// result.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DerivedStats {
    pub level: LevelStats,
    pub abilities: AbilityTable,
    pub skills: SkillTable,
    pub initiative: Initiative,
    pub encumbrance: Encumbrance,
    pub experience: Experience,
    pub power_dcs: PowerDcs,
    /// `None` for vehicles.
    pub powers: Option<PowerStats>,
    /// Feat flags, passed through for the dice layer.
    pub flags: FeatFlags,
    pub diagnostics: Vec<Diagnostic>,
}

impl DerivedStats {
    pub fn proficiency(&self) -> i32 {
        self.level.proficiency
    }

    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}
