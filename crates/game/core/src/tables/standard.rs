//! Built-in SW5e rule tables.
//!
//! [`StandardTables`] carries the published progression data and is the default
//! [`RuleTables`] implementation. Loaders can deserialize a replacement with the
//! same shape (see `sw5e-content`).

use super::{Powercasting, RuleTables};
use crate::config::EngineConfig;

/// Number of class levels covered by per-level progression rows.
pub const CLASS_LEVELS: usize = EngineConfig::MAX_CLASS_LEVEL as usize;

/// A per-class-level progression row.
pub type LevelRow = [u32; CLASS_LEVELS];

/// A per-power-level limit row.
pub type LimitRow = [u32; EngineConfig::POWER_LEVELS];

/// One row per casting archetype. `none` is implicit and always zero.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CasterTable<T> {
    pub consular: T,
    pub engineer: T,
    pub guardian: T,
    pub scout: T,
    pub sentinel: T,
}

impl<T> CasterTable<T> {
    /// Row for `caster`, or `None` for the non-casting archetype.
    pub fn get(&self, caster: Powercasting) -> Option<&T> {
        match caster {
            Powercasting::Consular => Some(&self.consular),
            Powercasting::Engineer => Some(&self.engineer),
            Powercasting::Guardian => Some(&self.guardian),
            Powercasting::Scout => Some(&self.scout),
            Powercasting::Sentinel => Some(&self.sentinel),
            Powercasting::None => None,
        }
    }
}

/// Archetype-keyed power progression tables.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PowerTables {
    pub powers_known: CasterTable<LevelRow>,
    pub power_points: CasterTable<LevelRow>,
    pub power_max_level: CasterTable<LevelRow>,
    /// Max power level for true multiclassers, indexed by weighted level - 1.
    pub multi_max_level: LevelRow,
    pub power_limit: CasterTable<LimitRow>,
}

/// Experience thresholds.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExperienceTables {
    /// `character[n]` is the XP needed to reach level `n + 1`.
    pub character: Vec<u32>,
    /// XP awarded per whole challenge rating.
    pub challenge: Vec<u32>,
}

/// Complete rule-table bundle.
///
/// Deserializing a partial document keeps the built-in data for any section it
/// leaves out.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StandardTables {
    pub experience: ExperienceTables,
    pub powers: PowerTables,
}

const UNLIMITED: u32 = 1000;

impl Default for StandardTables {
    fn default() -> Self {
        Self {
            experience: ExperienceTables {
                character: vec![
                    0, 300, 900, 2700, 6500, 14000, 23000, 34000, 48000, 64000, 85000, 100000,
                    120000, 140000, 165000, 195000, 225000, 265000, 305000, 355000,
                ],
                challenge: vec![
                    10, 200, 450, 700, 1100, 1800, 2300, 2900, 3900, 5000, 5900, 7200, 8400,
                    10000, 11500, 13000, 15000, 18000, 20000, 22000, 25000, 33000, 41000, 50000,
                    62000, 75000, 90000, 105000, 120000, 135000, 155000,
                ],
            },
            powers: PowerTables {
                powers_known: CasterTable {
                    consular: [
                        9, 11, 13, 15, 17, 19, 21, 23, 25, 26, 28, 29, 31, 32, 34, 35, 37, 38, 39,
                        40,
                    ],
                    engineer: [
                        6, 7, 9, 10, 12, 13, 15, 16, 18, 19, 21, 22, 23, 24, 25, 26, 27, 28, 29,
                        30,
                    ],
                    guardian: [
                        5, 7, 8, 10, 11, 13, 14, 16, 17, 19, 20, 22, 23, 25, 26, 28, 29, 31, 32,
                        33,
                    ],
                    scout: [
                        0, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22,
                    ],
                    sentinel: [
                        7, 9, 11, 13, 15, 17, 18, 19, 21, 22, 24, 25, 26, 28, 29, 30, 32, 33, 34,
                        35,
                    ],
                },
                power_points: CasterTable {
                    consular: [
                        4, 8, 12, 16, 20, 24, 28, 32, 36, 40, 44, 48, 52, 56, 60, 64, 68, 72, 76,
                        80,
                    ],
                    engineer: [
                        2, 4, 6, 8, 10, 12, 14, 16, 18, 20, 22, 24, 26, 28, 30, 32, 34, 36, 38, 40,
                    ],
                    guardian: [
                        2, 4, 6, 8, 10, 12, 14, 16, 18, 20, 22, 24, 26, 28, 30, 32, 34, 36, 38, 40,
                    ],
                    scout: [
                        0, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20,
                    ],
                    sentinel: [
                        3, 6, 9, 12, 15, 18, 21, 24, 27, 30, 33, 36, 39, 42, 45, 48, 51, 54, 57,
                        60,
                    ],
                },
                power_max_level: CasterTable {
                    consular: [1, 1, 2, 2, 3, 3, 4, 4, 5, 5, 6, 6, 7, 7, 8, 8, 9, 9, 9, 9],
                    engineer: [1, 1, 2, 2, 3, 3, 4, 4, 5, 5, 6, 6, 7, 7, 8, 8, 9, 9, 9, 9],
                    guardian: [1, 1, 1, 1, 2, 2, 2, 2, 3, 3, 3, 3, 4, 4, 4, 4, 5, 5, 5, 5],
                    scout: [0, 1, 1, 1, 1, 2, 2, 2, 2, 3, 3, 3, 3, 4, 4, 4, 4, 5, 5, 5],
                    sentinel: [1, 1, 1, 2, 2, 2, 3, 3, 3, 4, 4, 4, 5, 5, 5, 6, 6, 6, 7, 7],
                },
                multi_max_level: [1, 1, 2, 2, 3, 3, 4, 4, 5, 5, 6, 6, 7, 7, 8, 8, 9, 9, 9, 9],
                power_limit: CasterTable {
                    consular: [UNLIMITED, UNLIMITED, UNLIMITED, UNLIMITED, UNLIMITED, 1, 1, 1, 1],
                    engineer: [UNLIMITED, UNLIMITED, UNLIMITED, UNLIMITED, UNLIMITED, 1, 1, 1, 1],
                    guardian: [UNLIMITED, UNLIMITED, UNLIMITED, UNLIMITED, UNLIMITED, 0, 0, 0, 0],
                    scout: [UNLIMITED, UNLIMITED, UNLIMITED, UNLIMITED, UNLIMITED, 0, 0, 0, 0],
                    sentinel: [UNLIMITED, UNLIMITED, UNLIMITED, UNLIMITED, UNLIMITED, 1, 1, 0, 0],
                },
            },
        }
    }
}

fn row_value(row: Option<&[u32]>, index: usize) -> u32 {
    row.and_then(|r| r.get(index)).copied().unwrap_or(0)
}

impl RuleTables for StandardTables {
    fn character_xp(&self, index: usize) -> u32 {
        let table = &self.experience.character;
        // Levels past the table clamp to the last threshold.
        match table.len() {
            0 => 0,
            len => table[index.min(len - 1)],
        }
    }

    fn challenge_xp(&self, index: usize) -> u32 {
        row_value(Some(&self.experience.challenge), index)
    }

    fn powers_known(&self, caster: Powercasting, index: usize) -> u32 {
        row_value(self.powers.powers_known.get(caster).map(|r| &r[..]), index)
    }

    fn power_points(&self, caster: Powercasting, index: usize) -> u32 {
        row_value(self.powers.power_points.get(caster).map(|r| &r[..]), index)
    }

    fn power_max_level(&self, caster: Powercasting, index: usize) -> u32 {
        row_value(self.powers.power_max_level.get(caster).map(|r| &r[..]), index)
    }

    fn multi_power_max_level(&self, index: usize) -> u32 {
        row_value(Some(&self.powers.multi_max_level), index)
    }

    fn power_limit(&self, caster: Powercasting, index: usize) -> u32 {
        row_value(self.powers.power_limit.get(caster).map(|r| &r[..]), index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_archetype_reads_zero() {
        let tables = StandardTables::default();
        assert_eq!(tables.power_points(Powercasting::None, 4), 0);
        assert_eq!(tables.power_max_level(Powercasting::None, 19), 0);
        assert_eq!(tables.power_limit(Powercasting::None, 0), 0);
    }

    #[test]
    fn out_of_range_reads_zero() {
        let tables = StandardTables::default();
        assert_eq!(tables.power_points(Powercasting::Consular, CLASS_LEVELS), 0);
        assert_eq!(tables.power_limit(Powercasting::Consular, EngineConfig::POWER_LEVELS), 0);
        assert_eq!(tables.challenge_xp(99), 0);
    }

    #[test]
    fn character_xp_clamps_to_last_level() {
        let tables = StandardTables::default();
        assert_eq!(tables.character_xp(1), 300);
        assert_eq!(tables.character_xp(19), 355000);
        assert_eq!(tables.character_xp(40), 355000);
    }

    #[test]
    fn max_level_at_twentieth() {
        let tables = StandardTables::default();
        assert_eq!(tables.power_max_level(Powercasting::Consular, 19), 9);
        assert_eq!(tables.power_max_level(Powercasting::Guardian, 19), 5);
        assert_eq!(tables.power_max_level(Powercasting::Sentinel, 19), 7);
        assert_eq!(tables.power_max_level(Powercasting::Scout, 19), 5);
    }
}
