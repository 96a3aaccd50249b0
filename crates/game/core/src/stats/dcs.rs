//! Power save DCs per school.

use super::abilities::AbilityTable;
use super::layer::StatLayer;
use super::saturating_sum;
use crate::state::Ability;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PowerDcs {
    /// Wisdom based.
    pub light: i32,
    /// Charisma based.
    pub dark: i32,
    /// Better of light and dark.
    pub universal: i32,
    /// Intelligence based.
    pub tech: i32,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct DcInputs {
    pub proficiency: i32,
    pub power_dc_bonus: i32,
}

impl StatLayer<'_> for PowerDcs {
    type Base = AbilityTable;
    type Inputs = DcInputs;
    type Final = Self;

    fn compute(abilities: &AbilityTable, inputs: &DcInputs) -> Self {
        let dc = |ability: Ability| {
            saturating_sum([
                8,
                inputs.proficiency,
                abilities[ability].modifier,
                inputs.power_dc_bonus,
            ])
        };
        let light = dc(Ability::Wis);
        let dark = dc(Ability::Cha);

        Self {
            light,
            dark,
            universal: light.max(dark),
            tech: dc(Ability::Int),
        }
    }
}
