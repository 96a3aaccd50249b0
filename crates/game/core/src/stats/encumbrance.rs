//! Carried weight against carrying capacity.

use super::layer::StatLayer;
use crate::config::EngineConfig;
use crate::state::{FeatFlags, Item, Size};

/// Largest size multiplier Powerful Build can reach.
const MAX_CARRY_MULTIPLIER: f64 = 8.0;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Encumbrance {
    /// Carried weight, to the nearest 0.1.
    pub value: f64,
    pub max: f64,
    /// `value` as a percentage of `max`, clamped to `[0, 100]`.
    pub pct: f64,
    pub encumbered: bool,
}

#[derive(Clone, Copy, Debug)]
pub struct EncumbranceInputs<'a> {
    pub strength: i32,
    pub size: Size,
    pub flags: FeatFlags,
    pub coins: u64,
    pub config: &'a EngineConfig,
}

fn to_tenth(weight: f64) -> f64 {
    (weight * 10.0).round() / 10.0
}

impl<'a> StatLayer<'a> for Encumbrance {
    type Base = [Item];
    type Inputs = EncumbranceInputs<'a>;
    type Final = Self;

    fn compute(items: &[Item], inputs: &Self::Inputs) -> Self {
        let config = inputs.config;

        let mut weight: f64 = items
            .iter()
            .filter_map(Item::as_physical)
            .map(|item| to_tenth(item.total_weight()))
            .sum();
        if config.currency_weight && config.currency_per_weight > 0.0 {
            weight += inputs.coins as f64 / config.currency_per_weight;
        }
        let value = to_tenth(weight);

        let mut multiplier = inputs.size.carry_multiplier();
        if inputs.flags.powerful_build() {
            multiplier = (multiplier * 2.0).min(MAX_CARRY_MULTIPLIER);
        }
        let max = f64::from(inputs.strength) * config.str_multiplier * multiplier;

        let pct = if max > 0.0 {
            (value * 100.0 / max).clamp(0.0, 100.0)
        } else {
            100.0
        };

        Self {
            value,
            max,
            pct,
            encumbered: pct > config.encumbered_threshold_pct,
        }
    }
}
