//! Ability modifiers, saving throws and save DCs.

use super::layer::StatLayer;
use super::saturating_sum;
use crate::state::{AbilityScore, ByAbility, GlobalBonuses};

/// Derived values for one ability.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityStats {
    pub value: i32,
    pub modifier: i32,
    /// Proficiency contribution to the save; zero if not proficient.
    pub prof: i32,
    pub save: i32,
    /// Save DC against this ability; always includes the full proficiency bonus.
    pub dc: i32,
}

/// Per-ability results.
pub type AbilityTable = ByAbility<AbilityStats>;

/// `floor((score - 10) / 2)`.
pub const fn ability_modifier(score: i32) -> i32 {
    score.saturating_sub(10).div_euclid(2)
}

/// Inputs for the ability layer.
#[derive(Clone, Copy, Debug, Default)]
pub struct AbilityInputs<'a> {
    pub proficiency: i32,
    pub bonuses: GlobalBonuses,
    /// Polymorph donor save totals.
    pub donor_saves: Option<&'a ByAbility<i32>>,
}

impl<'a> StatLayer<'a> for AbilityStats {
    type Base = ByAbility<AbilityScore>;
    type Inputs = AbilityInputs<'a>;
    type Final = AbilityTable;

    fn compute(scores: &Self::Base, inputs: &Self::Inputs) -> AbilityTable {
        scores.map(|ability, score| {
            let modifier = ability_modifier(score.value);
            let prof = if score.proficient_save {
                inputs.proficiency
            } else {
                0
            };

            let mut save = saturating_sum([modifier, prof, inputs.bonuses.save]);
            // A proficient save keeps the better of own and donor totals.
            if score.proficient_save {
                if let Some(donor) = inputs.donor_saves {
                    save = save.max(donor[ability]);
                }
            }

            Self {
                value: score.value,
                modifier,
                prof,
                save,
                dc: saturating_sum([8, modifier, inputs.proficiency, inputs.bonuses.power_dc]),
            }
        })
    }
}
