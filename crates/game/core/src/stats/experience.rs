//! Experience progress for characters and XP value for NPCs.

use super::layer::StatLayer;
use crate::state::{ActorKind, ActorSnapshot};
use crate::tables::RuleTables;

/// Character experience progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct XpProgress {
    pub value: u32,
    /// Threshold of the current level.
    pub min: u32,
    /// Threshold of the next level.
    pub max: u32,
    /// Progress through the current level, `0..=100`.
    pub pct: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Experience {
    Character(XpProgress),
    /// XP awarded for defeating the NPC.
    Npc { value: u32 },
    /// Vehicles carry no experience.
    None,
}

/// XP for a challenge rating. Fractional CRs below 1 scale linearly with a floor of 10.
pub fn challenge_xp(tables: &dyn RuleTables, cr: f64) -> u32 {
    if cr < 1.0 {
        (200.0 * cr).max(10.0).round() as u32
    } else {
        tables.challenge_xp(cr.floor() as usize)
    }
}

#[derive(Clone, Copy)]
pub struct ExperienceInputs<'a> {
    pub level: u32,
    pub tables: &'a dyn RuleTables,
}

impl<'a> StatLayer<'a> for Experience {
    type Base = ActorSnapshot;
    type Inputs = ExperienceInputs<'a>;
    type Final = Self;

    fn compute(actor: &ActorSnapshot, inputs: &Self::Inputs) -> Self {
        let tables = inputs.tables;
        match actor.kind {
            ActorKind::Character => {
                let level = inputs.level as usize;
                let value = actor.details.xp;
                let max = tables.character_xp(level.max(1));
                let min = tables.character_xp(level.saturating_sub(1));
                let pct = if max > min {
                    let gained = f64::from(value) - f64::from(min);
                    let pct = (gained * 100.0 / f64::from(max - min)).round();
                    pct.clamp(0.0, 100.0) as u32
                } else {
                    // Final level: the next threshold equals the current one.
                    100
                };
                Experience::Character(XpProgress {
                    value,
                    min,
                    max,
                    pct,
                })
            }
            ActorKind::Npc => Experience::Npc {
                value: challenge_xp(tables, actor.details.challenge_rating),
            },
            ActorKind::Vehicle => Experience::None,
        }
    }
}
