//! Stored power slots and force/tech attribute blocks.

use crate::config::EngineConfig;

/// Stored state of one power-level bucket (`power1`..`power9`).
///
/// `None` means the host had no usable number for the field. Overrides that
/// were not numeric are normalized to `None` before they reach the engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PowerSlotState {
    pub fvalue: Option<u32>,
    pub foverride: Option<u32>,
    pub tvalue: Option<u32>,
    pub toverride: Option<u32>,
    /// Pre-split `value` field, consulted when `fvalue`/`tvalue` are absent.
    pub legacy_value: Option<u32>,
}

/// All nine power-level buckets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PowerSlots([PowerSlotState; EngineConfig::POWER_LEVELS]);

impl PowerSlots {
    /// Bucket for power level `level` (1-based).
    pub fn get(&self, level: usize) -> Option<&PowerSlotState> {
        level.checked_sub(1).and_then(|i| self.0.get(i))
    }

    pub fn get_mut(&mut self, level: usize) -> Option<&mut PowerSlotState> {
        level.checked_sub(1).and_then(|i| self.0.get_mut(i))
    }

    /// Buckets with their 1-based power level.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &PowerSlotState)> {
        self.0.iter().enumerate().map(|(i, slot)| (i + 1, slot))
    }
}

/// Current/max pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pool {
    pub value: u32,
    pub max: u32,
}

impl Pool {
    pub const fn new(value: u32, max: u32) -> Self {
        Self { value, max }
    }
}

/// Stored force or tech attribute block.
///
/// `known` is `None` for data that predates known-power tracking.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PowerAttributes {
    pub level: u32,
    pub points: Pool,
    pub known: Option<Pool>,
}

impl PowerAttributes {
    /// Block with known-power tracking enabled.
    pub fn tracked() -> Self {
        Self {
            known: Some(Pool::default()),
            ..Self::default()
        }
    }
}
