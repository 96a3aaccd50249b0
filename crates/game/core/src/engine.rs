//! Derived-stat recompute pipeline.
//!
//! The [`DerivedStatsEngine`] is the single entry point hosts call whenever an
//! actor's stored data changes. It runs every stat layer in dependency order
//! and returns a fresh [`DerivedStats`]; the snapshot itself is never touched,
//! so recomputing the same snapshot twice yields identical output.

use tracing::{debug, debug_span};

use crate::config::EngineConfig;
use crate::state::{Ability, ActorSnapshot, SnapshotError};
use crate::stats::{
    AbilityInputs, AbilityStats, DcInputs, DerivedStats, Encumbrance, EncumbranceInputs,
    Experience, ExperienceInputs, Initiative, InitiativeInputs, LevelStats, PowerDcs, PowerInputs,
    PowerStats, SkillInputs, SkillStats, StatLayer,
};
use crate::tables::RuleTables;

/// Stateless derived-stat engine bound to one set of rule tables.
#[derive(Clone, Copy)]
pub struct DerivedStatsEngine<'a> {
    tables: &'a dyn RuleTables,
    config: &'a EngineConfig,
}

impl<'a> DerivedStatsEngine<'a> {
    pub fn new(tables: &'a dyn RuleTables, config: &'a EngineConfig) -> Self {
        Self { tables, config }
    }

    /// Validates the snapshot, then recomputes.
    ///
    /// # Errors
    ///
    /// Returns the first [`SnapshotError`] the snapshot violates.
    pub fn try_recompute(&self, actor: &ActorSnapshot) -> Result<DerivedStats, SnapshotError> {
        actor.validate()?;
        Ok(self.recompute(actor))
    }

    /// Recomputes every derived value for `actor`.
    ///
    /// Total over any snapshot: table misses read as zero and sums saturate
    /// instead of failing.
    pub fn recompute(&self, actor: &ActorSnapshot) -> DerivedStats {
        let _span = debug_span!("recompute", kind = %actor.kind).entered();
        let bonuses = actor.bonuses;
        let flags = actor.flags;
        let donor = actor.polymorph.as_ref();

        // Layer 1: Level and proficiency bonus
        let level = <LevelStats as StatLayer>::compute(actor, &());
        let proficiency = level.proficiency;

        // Layer 2: Ability modifiers, saves and DCs
        let abilities = <AbilityStats as StatLayer>::compute(
            &actor.abilities,
            &AbilityInputs {
                proficiency,
                bonuses,
                donor_saves: donor.and_then(|d| d.saves.as_ref()),
            },
        );

        // Layer 3: Skills and initiative
        let skills = <SkillStats as StatLayer>::compute(
            &actor.skills,
            &SkillInputs {
                proficiency,
                abilities: &abilities,
                bonuses,
                flags,
                donor: donor.and_then(|d| d.skills.as_ref()),
            },
        );
        let initiative = <Initiative as StatLayer>::compute(
            &actor.attributes.initiative,
            &InitiativeInputs {
                proficiency,
                dex_modifier: abilities[Ability::Dex].modifier,
                flags,
            },
        );

        // Layer 4: Encumbrance
        let encumbrance = <Encumbrance as StatLayer>::compute(
            &actor.items,
            &EncumbranceInputs {
                strength: abilities[Ability::Str].value,
                size: actor.attributes.size,
                flags,
                coins: actor.coins,
                config: self.config,
            },
        );

        // Layer 5: Experience
        let experience = <Experience as StatLayer>::compute(
            actor,
            &ExperienceInputs {
                level: level.level,
                tables: self.tables,
            },
        );

        // Layer 6: Power DCs and progression
        let power_dcs = <PowerDcs as StatLayer>::compute(
            &abilities,
            &DcInputs {
                proficiency,
                power_dc_bonus: bonuses.power_dc,
            },
        );
        let powers = <PowerStats as StatLayer>::compute(
            actor,
            &PowerInputs {
                abilities: &abilities,
                tables: self.tables,
            },
        );

        let diagnostics: Vec<_> = powers
            .iter()
            .flat_map(|powers| powers.diagnostics())
            .collect();

        debug!(
            level = level.level,
            proficiency,
            encumbered = encumbrance.encumbered,
            diagnostics = diagnostics.len(),
            "derived stats recomputed"
        );

        DerivedStats {
            level,
            abilities,
            skills,
            initiative,
            encumbrance,
            experience,
            power_dcs,
            powers,
            flags,
            diagnostics,
        }
    }
}
