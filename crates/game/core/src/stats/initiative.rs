//! Initiative.

use super::layer::StatLayer;
use super::saturating_sum;
use crate::state::{FeatFlags, Proficiency};

/// Flat initiative bonus granted by the Alert feat.
pub const ALERT_BONUS: i32 = 5;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Initiative {
    /// Dexterity modifier.
    pub modifier: i32,
    pub prof: i32,
    /// Stored initiative value plus Alert.
    pub bonus: i32,
    pub total: i32,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct InitiativeInputs {
    pub proficiency: i32,
    pub dex_modifier: i32,
    pub flags: FeatFlags,
}

impl StatLayer<'_> for Initiative {
    /// Stored initiative value.
    type Base = i32;
    type Inputs = InitiativeInputs;
    type Final = Self;

    fn compute(stored: &i32, inputs: &InitiativeInputs) -> Self {
        let flags = inputs.flags;
        // Jack of All Trades is checked before Remarkable Athlete, so an actor
        // with both always rounds down.
        let prof = if flags.jack_of_all_trades() {
            Proficiency::HALF.scaled_floor(inputs.proficiency)
        } else if flags.remarkable_athlete() {
            Proficiency::HALF.scaled_ceil(inputs.proficiency)
        } else {
            0
        };
        let alert = if flags.initiative_alert() { ALERT_BONUS } else { 0 };
        let bonus = stored.saturating_add(alert);

        Self {
            modifier: inputs.dex_modifier,
            prof,
            bonus,
            total: saturating_sum([inputs.dex_modifier, prof, bonus]),
        }
    }
}
