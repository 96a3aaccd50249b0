//! Skill totals and passive scores.
//!
//! Effective proficiency is resolved per skill before scaling:
//!
//! 1. Remarkable Athlete lifts untrained STR/DEX/CON skills to half
//!    proficiency, rounded up.
//! 2. Otherwise Jack of All Trades lifts any untrained skill to half
//!    proficiency, rounded down.
//! 3. A polymorph donor can only raise the multiplier.

use std::collections::BTreeMap;

use super::abilities::AbilityTable;
use super::layer::StatLayer;
use super::saturating_sum;
use crate::state::{FeatFlags, GlobalBonuses, Proficiency, Skill, SkillSet};

/// Bonus the Observant feat adds to passive Perception and Investigation.
pub const OBSERVANT_PASSIVE_BONUS: i32 = 5;

/// Derived values for one skill.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillStats {
    /// Multiplier after feats and polymorph merging.
    pub proficiency: Proficiency,
    pub modifier: i32,
    pub prof: i32,
    /// Skill-specific plus global check and skill bonuses.
    pub bonus: i32,
    pub total: i32,
    pub passive: i32,
}

pub type SkillTable = BTreeMap<Skill, SkillStats>;

/// Inputs for the skill layer.
#[derive(Clone, Copy, Debug)]
pub struct SkillInputs<'a> {
    pub proficiency: i32,
    pub abilities: &'a AbilityTable,
    pub bonuses: GlobalBonuses,
    pub flags: FeatFlags,
    pub donor: Option<&'a BTreeMap<Skill, Proficiency>>,
}

impl<'a> StatLayer<'a> for SkillStats {
    type Base = SkillSet;
    type Inputs = SkillInputs<'a>;
    type Final = SkillTable;

    fn compute(skills: &SkillSet, inputs: &Self::Inputs) -> SkillTable {
        let flags = inputs.flags;
        skills
            .iter()
            .map(|(&skill, entry)| {
                let mut proficiency = entry.proficiency;
                let mut round_up = false;
                if proficiency == Proficiency::NONE {
                    if flags.remarkable_athlete() && entry.ability.is_physical() {
                        proficiency = Proficiency::HALF;
                        round_up = true;
                    } else if flags.jack_of_all_trades() {
                        proficiency = Proficiency::HALF;
                    }
                }

                if let Some(donor) = inputs.donor.and_then(|d| d.get(&skill)) {
                    proficiency = proficiency.max(*donor);
                }

                let prof = if round_up {
                    proficiency.scaled_ceil(inputs.proficiency)
                } else {
                    proficiency.scaled_floor(inputs.proficiency)
                };
                let modifier = inputs.abilities[entry.ability].modifier;
                let bonus =
                    saturating_sum([entry.bonus, inputs.bonuses.check, inputs.bonuses.skill]);
                let total = saturating_sum([modifier, prof, bonus]);

                let observant = if flags.observant() && skill.is_observant() {
                    OBSERVANT_PASSIVE_BONUS
                } else {
                    0
                };
                let passive = saturating_sum([10, total, observant]);

                let stats = SkillStats {
                    proficiency,
                    modifier,
                    prof,
                    bonus,
                    total,
                    passive,
                };
                (skill, stats)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Ability, AbilityScore, ByAbility, FeatToggles, SkillEntry, default_skills};
    use crate::stats::abilities::{AbilityInputs, AbilityStats};

    fn abilities(scores: [i32; 6]) -> AbilityTable {
        let scores = ByAbility::new(scores.map(|v| AbilityScore::new(v, false)));
        AbilityStats::compute(
            &scores,
            &AbilityInputs {
                proficiency: 3,
                ..AbilityInputs::default()
            },
        )
    }

    fn inputs(table: &AbilityTable, toggles: FeatToggles) -> SkillInputs<'_> {
        SkillInputs {
            proficiency: 3,
            abilities: table,
            bonuses: GlobalBonuses::default(),
            flags: FeatFlags::from(toggles),
            donor: None,
        }
    }

    #[test]
    fn proficient_skill_total() {
        let table = abilities([10, 16, 10, 10, 10, 10]);
        let mut skills = default_skills();
        skills.insert(
            Skill::Stealth,
            SkillEntry::new(Proficiency::EXPERT, Ability::Dex),
        );

        let result = SkillStats::compute(&skills, &inputs(&table, FeatToggles::empty()));
        let stealth = result[&Skill::Stealth];
        assert_eq!(stealth.prof, 6);
        assert_eq!(stealth.total, 9);
        assert_eq!(stealth.passive, 19);
        assert_eq!(result[&Skill::Athletics].total, 0);
    }

    #[test]
    fn jack_of_all_trades_rounds_down() {
        let table = abilities([10; 6]);
        let result = SkillStats::compute(
            &default_skills(),
            &inputs(&table, FeatToggles::JACK_OF_ALL_TRADES),
        );
        let lore = result[&Skill::Lore];
        assert_eq!(lore.proficiency, Proficiency::HALF);
        assert_eq!(lore.prof, 1);
    }

    #[test]
    fn remarkable_athlete_rounds_up_physical_only() {
        let table = abilities([10; 6]);
        let result = SkillStats::compute(
            &default_skills(),
            &inputs(&table, FeatToggles::REMARKABLE_ATHLETE),
        );
        assert_eq!(result[&Skill::Athletics].prof, 2);
        assert_eq!(result[&Skill::Acrobatics].prof, 2);
        assert_eq!(result[&Skill::Insight].prof, 0);
    }

    #[test]
    fn remarkable_athlete_takes_precedence_over_jack() {
        let table = abilities([10; 6]);
        let result = SkillStats::compute(
            &default_skills(),
            &inputs(
                &table,
                FeatToggles::REMARKABLE_ATHLETE | FeatToggles::JACK_OF_ALL_TRADES,
            ),
        );
        // Physical skills round up, the rest fall back to jack and round down
        assert_eq!(result[&Skill::Stealth].prof, 2);
        assert_eq!(result[&Skill::Insight].prof, 1);
    }

    #[test]
    fn trained_skills_ignore_half_bumps() {
        let table = abilities([10; 6]);
        let mut skills = default_skills();
        skills.insert(
            Skill::Athletics,
            SkillEntry::new(Proficiency::FULL, Ability::Str),
        );
        let result = SkillStats::compute(
            &skills,
            &inputs(&table, FeatToggles::REMARKABLE_ATHLETE),
        );
        assert_eq!(result[&Skill::Athletics].prof, 3);
    }

    #[test]
    fn observant_lifts_passive_perception_and_investigation() {
        let table = abilities([10; 6]);
        let result = SkillStats::compute(
            &default_skills(),
            &inputs(&table, FeatToggles::OBSERVANT_FEAT),
        );
        assert_eq!(result[&Skill::Perception].passive, 15);
        assert_eq!(result[&Skill::Investigation].passive, 15);
        assert_eq!(result[&Skill::Insight].passive, 10);
    }

    #[test]
    fn donor_proficiency_is_max_merged() {
        let table = abilities([10; 6]);
        let mut skills = default_skills();
        skills.insert(
            Skill::Survival,
            SkillEntry::new(Proficiency::EXPERT, Ability::Wis),
        );
        let donor = BTreeMap::from([
            (Skill::Perception, Proficiency::FULL),
            (Skill::Survival, Proficiency::HALF),
        ]);
        let mut inputs = inputs(&table, FeatToggles::empty());
        inputs.donor = Some(&donor);

        let result = SkillStats::compute(&skills, &inputs);
        assert_eq!(result[&Skill::Perception].proficiency, Proficiency::FULL);
        assert_eq!(result[&Skill::Survival].proficiency, Proficiency::EXPERT);
    }

    #[test]
    fn bonuses_stack_into_total() {
        let table = abilities([10; 6]);
        let mut skills = default_skills();
        let mut entry = SkillEntry::untrained(Skill::Piloting);
        entry.bonus = 2;
        skills.insert(Skill::Piloting, entry);
        let mut inputs = inputs(&table, FeatToggles::empty());
        inputs.bonuses = GlobalBonuses {
            check: 1,
            skill: 1,
            ..GlobalBonuses::default()
        };

        let piloting = SkillStats::compute(&skills, &inputs)[&Skill::Piloting];
        assert_eq!(piloting.bonus, 4);
        assert_eq!(piloting.total, 4);
    }
}
