//! Character level, proficiency bonus and remaining hit dice.

use super::layer::StatLayer;
use crate::state::{ActorKind, ActorSnapshot};

/// Level-derived values every later layer depends on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelStats {
    /// Sum of class levels, or the declared level for a classless actor.
    pub level: u32,
    pub proficiency: i32,
    /// Unspent hit dice. Characters only.
    pub hit_dice: Option<u32>,
}

/// `floor((max(basis, 1) + 7) / 4)`.
///
/// `basis` is the character level for PCs and the challenge rating for
/// everything else, so fractional CRs share the level-1 bonus.
pub fn proficiency_bonus(basis: f64) -> i32 {
    ((basis.max(1.0) + 7.0) / 4.0).floor() as i32
}

impl StatLayer<'_> for LevelStats {
    type Base = ActorSnapshot;
    type Inputs = ();
    type Final = Self;

    fn compute(actor: &ActorSnapshot, _inputs: &()) -> Self {
        let mut class_levels = 0u32;
        let mut spent = 0u32;
        let mut has_classes = false;
        for (_, class) in actor.classes() {
            has_classes = true;
            class_levels = class_levels.saturating_add(class.levels);
            spent = spent.saturating_add(class.hit_dice_used);
        }
        let level = if has_classes {
            class_levels
        } else {
            actor.details.level
        };

        let basis = match actor.kind {
            ActorKind::Character => f64::from(level),
            ActorKind::Npc | ActorKind::Vehicle => actor.details.challenge_rating,
        };
        let proficiency = actor
            .attributes
            .proficiency
            .unwrap_or_else(|| proficiency_bonus(basis));

        let hit_dice = matches!(actor.kind, ActorKind::Character)
            .then(|| class_levels.saturating_sub(spent));

        Self {
            level,
            proficiency,
            hit_dice,
        }
    }
}
