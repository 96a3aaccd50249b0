//! Force and tech power progression.
//!
//! Each track is resolved independently:
//!
//! 1. Every caster class on the track adds its table values and its share of
//!    the weighted multiclass level.
//! 2. The controlling archetype only changes to a class with at least as many
//!    levels and a strictly higher priority.
//! 3. A PC with more than one caster class on the track uses the weighted
//!    level and the multiclass max-level table instead.
//! 4. An NPC with an explicit caster level uses it with the actor-level
//!    archetype instead of its classes.
//!
//! Slot maxima then come from the controlling archetype's limit table, clipped
//! to the highest castable power level, unless a bucket carries an override.

use arrayvec::ArrayVec;
use tracing::{trace, warn};

use super::abilities::AbilityTable;
use super::derived::Diagnostic;
use super::layer::StatLayer;
use crate::config::EngineConfig;
use crate::state::{
    Ability, ActorKind, ActorSnapshot, Pool, PowerAttributes, PowerSlotState,
};
use crate::tables::{CLASS_LEVELS, PowerTrack, Powercasting, RuleTables};

/// Row index for `levels` class levels: `clamp(levels - 1, 0, 20)`.
///
/// Index 20 is one past every row and reads as `0`.
fn table_index(levels: u32) -> usize {
    levels.saturating_sub(1).min(EngineConfig::MAX_CLASS_LEVEL) as usize
}

/// Accumulated progression for one track.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Progression {
    /// Caster classes on this track.
    pub classes: u32,
    /// Effective caster level.
    pub levels: u32,
    /// Weighted multiclass level in ninths.
    ///
    /// Each class contributes `max_level_at_20 * levels`; dividing by nine
    /// gives the weighted level without float rounding.
    pub multi_ninths: u32,
    pub max_class: Powercasting,
    pub max_class_priority: u8,
    pub max_class_levels: u32,
    /// Highest castable power level.
    pub max_class_power_level: u32,
    pub powers_known: u32,
    pub points: u32,
}

impl Progression {
    /// Weighted multiclass level.
    pub fn multi(&self) -> f64 {
        f64::from(self.multi_ninths) / 9.0
    }

    fn add_class(&mut self, caster: Powercasting, levels: u32, tables: &dyn RuleTables) {
        let index = table_index(levels);
        let weight = tables.power_max_level(caster, CLASS_LEVELS - 1);
        self.classes = self.classes.saturating_add(1);
        self.levels = self.levels.saturating_add(levels);
        self.multi_ninths = self.multi_ninths.saturating_add(weight.saturating_mul(levels));

        let priority = caster.priority();
        if levels >= self.max_class_levels && priority > self.max_class_priority {
            self.max_class = caster;
            self.max_class_priority = priority;
            self.max_class_levels = levels;
            self.max_class_power_level = tables.power_max_level(caster, index);
        }

        self.powers_known = self
            .powers_known
            .saturating_add(tables.powers_known(caster, index));
        self.points = self.points.saturating_add(tables.power_points(caster, index));
    }

    /// Switches a PC with several caster classes to the weighted level.
    fn apply_multiclass(&mut self, tables: &dyn RuleTables) {
        if self.classes <= 1 {
            return;
        }
        self.levels = self.multi_ninths / 9;
        self.max_class_power_level = match self.levels.checked_sub(1) {
            Some(index) => tables.multi_power_max_level(index as usize),
            None => 0,
        };
    }

    /// Replaces class-derived levels with an explicit NPC caster level.
    fn apply_caster_level(&mut self, level: u32, caster: Powercasting, tables: &dyn RuleTables) {
        self.levels = level;
        self.max_class = caster;
        self.max_class_priority = caster.priority();
        self.max_class_power_level = tables.power_max_level(caster, table_index(level));
    }

    /// Slot limits for power levels 1..=9.
    fn slot_limits(&self, tables: &dyn RuleTables) -> [u32; EngineConfig::POWER_LEVELS] {
        core::array::from_fn(|i| {
            if (i as u32) < self.max_class_power_level {
                tables.power_limit(self.max_class, i)
            } else {
                0
            }
        })
    }
}

/// Resolved slot values for one power level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResolvedSlot {
    pub fvalue: u32,
    pub fmax: u32,
    pub tvalue: u32,
    pub tmax: u32,
}

fn resolve_bucket(
    value: Option<u32>,
    override_max: Option<u32>,
    legacy: Option<u32>,
    limit: u32,
    npc: bool,
) -> (u32, u32) {
    let max = override_max.unwrap_or(limit);
    if npc {
        return (max, max);
    }
    // A stored zero is a spent slot, not a missing value.
    let current = value.or(legacy).unwrap_or(max).min(max);
    (current, max)
}

/// Resolved force or tech attribute block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PowerPool {
    pub level: u32,
    pub points: Pool,
    /// Known-power tally against its maximum, if the actor tracks it.
    pub known: Option<Pool>,
    /// Whether `level` and the maxima were recomputed from class progression.
    pub progressed: bool,
}

impl PowerPool {
    /// Reports a tally above a recomputed maximum.
    pub fn excess(&self, track: PowerTrack) -> Option<Diagnostic> {
        let known = self.known?;
        (self.progressed && known.value > known.max).then_some(Diagnostic::KnownPowersExceeded {
            track,
            known: known.value,
            max: known.max,
        })
    }
}

enum PoolUpdate {
    /// PC with caster levels: write back level and maxima.
    Progressed { point_bonus: i32 },
    /// NPC with an explicit caster level.
    CasterLevel(u32),
    Stored,
}

fn resolve_pool(
    stored: &PowerAttributes,
    tally: u32,
    progression: &Progression,
    update: PoolUpdate,
) -> PowerPool {
    let mut pool = PowerPool {
        level: stored.level,
        points: stored.points,
        known: stored.known.map(|known| Pool::new(tally, known.max)),
        progressed: false,
    };

    match update {
        PoolUpdate::Progressed { point_bonus } => {
            pool.level = progression.levels;
            pool.points.max = progression.points.saturating_add_signed(point_bonus);
            if let Some(known) = pool.known.as_mut() {
                known.max = progression.powers_known;
            }
            pool.progressed = true;
        }
        PoolUpdate::CasterLevel(level) => pool.level = level,
        PoolUpdate::Stored => {}
    }
    pool
}

/// Power progression, slots and pools.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PowerStats {
    pub force: Progression,
    pub tech: Progression,
    /// Slots for power levels 1..=9, in order.
    pub slots: ArrayVec<ResolvedSlot, { EngineConfig::POWER_LEVELS }>,
    pub force_pool: PowerPool,
    pub tech_pool: PowerPool,
}

impl PowerStats {
    /// Slot for power level `level` (1-based).
    pub fn slot(&self, level: usize) -> Option<&ResolvedSlot> {
        level.checked_sub(1).and_then(|i| self.slots.get(i))
    }

    pub fn pool(&self, track: PowerTrack) -> &PowerPool {
        match track {
            PowerTrack::Force => &self.force_pool,
            PowerTrack::Tech => &self.tech_pool,
        }
    }

    pub fn progression(&self, track: PowerTrack) -> &Progression {
        match track {
            PowerTrack::Force => &self.force,
            PowerTrack::Tech => &self.tech,
        }
    }

    pub fn diagnostics(&self) -> impl Iterator<Item = Diagnostic> + '_ {
        [PowerTrack::Force, PowerTrack::Tech]
            .into_iter()
            .filter_map(|track| self.pool(track).excess(track))
    }
}

#[derive(Clone, Copy)]
pub struct PowerInputs<'a> {
    pub abilities: &'a AbilityTable,
    pub tables: &'a dyn RuleTables,
}

impl<'a> StatLayer<'a> for PowerStats {
    type Base = ActorSnapshot;
    type Inputs = PowerInputs<'a>;
    /// `None` for vehicles.
    type Final = Option<Self>;

    fn compute(actor: &ActorSnapshot, inputs: &Self::Inputs) -> Option<Self> {
        if matches!(actor.kind, ActorKind::Vehicle) {
            return None;
        }
        let tables = inputs.tables;
        let npc = actor.is_npc();

        let mut force = Progression::default();
        let mut tech = Progression::default();
        for (name, class) in actor.classes() {
            let caster = class.powercasting;
            let progression = match caster.track() {
                Some(PowerTrack::Force) => &mut force,
                Some(PowerTrack::Tech) => &mut tech,
                None => continue,
            };
            progression.add_class(caster, class.levels, tables);
            trace!(
                target: "sw5e::powers",
                class = name,
                %caster,
                levels = class.levels,
                "caster class added"
            );
        }

        let archetype = actor.attributes.powercasting;
        let explicit_force = actor.details.power_force_level.filter(|l| *l > 0);
        let explicit_tech = actor.details.power_tech_level.filter(|l| *l > 0);
        if npc {
            if let Some(level) = explicit_force {
                force.apply_caster_level(level, archetype, tables);
            }
            if let Some(level) = explicit_tech {
                tech.apply_caster_level(level, archetype, tables);
            }
        } else {
            force.apply_multiclass(tables);
            tech.apply_multiclass(tables);
        }

        let force_limits = force.slot_limits(tables);
        let tech_limits = tech.slot_limits(tables);
        let slots = actor
            .power_slots
            .iter()
            .map(|(level, stored): (usize, &PowerSlotState)| {
                let i = level - 1;
                let (fvalue, fmax) = resolve_bucket(
                    stored.fvalue,
                    stored.foverride,
                    stored.legacy_value,
                    force_limits[i],
                    npc,
                );
                let (tvalue, tmax) = resolve_bucket(
                    stored.tvalue,
                    stored.toverride,
                    stored.legacy_value,
                    tech_limits[i],
                    npc,
                );
                ResolvedSlot {
                    fvalue,
                    fmax,
                    tvalue,
                    tmax,
                }
            })
            .collect();

        let mut force_known = 0u32;
        let mut tech_known = 0u32;
        for power in actor.items.iter().filter_map(|item| item.as_power()) {
            match power.school.track() {
                PowerTrack::Force => force_known += 1,
                PowerTrack::Tech => tech_known += 1,
            }
        }

        let mods = inputs.abilities;
        let update = |progression: &Progression, explicit: Option<u32>, point_bonus: i32| {
            if npc {
                explicit.map_or(PoolUpdate::Stored, PoolUpdate::CasterLevel)
            } else if progression.levels > 0 {
                PoolUpdate::Progressed { point_bonus }
            } else {
                PoolUpdate::Stored
            }
        };
        let force_bonus = mods[Ability::Wis].modifier.max(mods[Ability::Cha].modifier);
        let tech_bonus = mods[Ability::Int].modifier;

        let stats = Self {
            force_pool: resolve_pool(
                &actor.attributes.force,
                force_known,
                &force,
                update(&force, explicit_force, force_bonus),
            ),
            tech_pool: resolve_pool(
                &actor.attributes.tech,
                tech_known,
                &tech,
                update(&tech, explicit_tech, tech_bonus),
            ),
            force,
            tech,
            slots,
        };

        for diagnostic in stats.diagnostics() {
            warn!(target: "sw5e::powers", %diagnostic, "known powers exceed maximum");
        }
        Some(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Item, PowerSchool};
    use crate::stats::abilities::{AbilityInputs, AbilityStats};
    use crate::tables::StandardTables;

    const UNLIMITED: u32 = 1000;

    fn run(actor: &ActorSnapshot) -> Option<PowerStats> {
        let tables = StandardTables::default();
        let abilities = AbilityStats::compute(&actor.abilities, &AbilityInputs::default());
        PowerStats::compute(
            actor,
            &PowerInputs {
                abilities: &abilities,
                tables: &tables,
            },
        )
    }

    fn stats(actor: &ActorSnapshot) -> PowerStats {
        run(actor).expect("non-vehicle actors have power stats")
    }

    fn character() -> crate::state::ActorSnapshotBuilder {
        ActorSnapshot::builder(ActorKind::Character)
    }

    #[test]
    fn single_class_consular() {
        let actor = character()
            .ability(Ability::Wis, 16, false)
            .ability(Ability::Cha, 12, false)
            .item(Item::class("Consular", 5, Powercasting::Consular))
            .force(PowerAttributes::tracked())
            .build()
            .expect("valid");
        let stats = stats(&actor);

        assert_eq!(stats.force.levels, 5);
        assert_eq!(stats.force.max_class, Powercasting::Consular);
        assert_eq!(stats.force.max_class_power_level, 3);

        let pool = stats.force_pool;
        assert!(pool.progressed);
        assert_eq!(pool.level, 5);
        assert_eq!(pool.points.max, 23);
        assert_eq!(pool.known.map(|k| k.max), Some(17));

        for level in 1..=3 {
            let slot = stats.slot(level).expect("slot");
            assert_eq!(slot.fmax, UNLIMITED);
            assert_eq!(slot.fvalue, UNLIMITED);
        }
        for level in 4..=9 {
            assert_eq!(stats.slot(level).map(|s| s.fmax), Some(0));
        }
        assert_eq!(stats.tech_pool, PowerPool::default());
    }

    #[test]
    fn multiclass_uses_weighted_level() {
        let actor = character()
            .item(Item::class("Consular", 3, Powercasting::Consular))
            .item(Item::class("Guardian", 2, Powercasting::Guardian))
            .build()
            .expect("valid");
        let force = stats(&actor).force;

        assert_eq!(force.classes, 2);
        assert_eq!(force.multi_ninths, 37);
        assert_eq!(force.levels, 4);
        assert_eq!(force.max_class, Powercasting::Consular);
        assert_eq!(force.max_class_power_level, 2);
        // Known powers and points still sum per class
        assert_eq!(force.powers_known, 13 + 7);
        assert_eq!(force.points, 12 + 4);
    }

    #[test]
    fn tech_multiclass_uses_weighted_level() {
        let actor = character()
            .item(Item::class("Engineer", 2, Powercasting::Engineer))
            .item(Item::class("Scout", 4, Powercasting::Scout))
            .build()
            .expect("valid");
        let stats = stats(&actor);
        let tech = stats.tech;

        assert_eq!(tech.classes, 2);
        // 9 * 2 + 5 * 4
        assert_eq!(tech.multi_ninths, 38);
        assert_eq!(tech.levels, 4);
        assert_eq!(tech.max_class, Powercasting::Engineer);
        assert_eq!(tech.max_class_power_level, 2);
        assert_eq!(tech.powers_known, 7 + 6);
        assert_eq!(tech.points, 4 + 4);

        assert_eq!(stats.slot(2).map(|s| s.tmax), Some(UNLIMITED));
        assert_eq!(stats.slot(3).map(|s| s.tmax), Some(0));
        assert_eq!(stats.tech_pool.level, 4);
        assert_eq!(stats.force, Progression::default());
    }

    #[test]
    fn huge_class_levels_saturate() {
        let mut actor = character().build().expect("valid");
        actor
            .items
            .push(Item::class("Consular", u32::MAX / 4, Powercasting::Consular));
        actor
            .items
            .push(Item::class("Consular", u32::MAX / 4, Powercasting::Consular));
        let force = stats(&actor).force;

        assert_eq!(force.multi_ninths, u32::MAX);
        assert_eq!(force.levels, u32::MAX / 9);
        // Past the last table row
        assert_eq!(force.max_class_power_level, 0);
    }

    #[test]
    fn npc_multiclass_keeps_raw_levels() {
        let actor = ActorSnapshot::builder(ActorKind::Npc)
            .item(Item::class("Guardian", 5, Powercasting::Guardian))
            .item(Item::class("Sentinel", 4, Powercasting::Sentinel))
            .item(Item::class("Engineer", 2, Powercasting::Engineer))
            .item(Item::class("Scout", 4, Powercasting::Scout))
            .build()
            .expect("valid");
        let stats = stats(&actor);

        let force = stats.force;
        assert_eq!(force.classes, 2);
        // Weighted level would be 53 / 9 = 5 with max power level 3
        assert_eq!(force.multi_ninths, 53);
        assert_eq!(force.levels, 9);
        assert_eq!(force.max_class, Powercasting::Guardian);
        assert_eq!(force.max_class_power_level, 2);

        let tech = stats.tech;
        assert_eq!(tech.classes, 2);
        assert_eq!(tech.levels, 6);
        assert_eq!(tech.max_class, Powercasting::Engineer);
        assert_eq!(tech.max_class_power_level, 1);

        let first = stats.slot(1).expect("slot");
        assert_eq!((first.fvalue, first.fmax), (UNLIMITED, UNLIMITED));
        assert_eq!((first.tvalue, first.tmax), (UNLIMITED, UNLIMITED));
        assert_eq!(stats.slot(2).map(|s| (s.fmax, s.tmax)), Some((UNLIMITED, 0)));
        assert_eq!(stats.slot(3).map(|s| s.fmax), Some(0));
        assert!(!stats.force_pool.progressed);
    }

    #[test]
    fn controlling_class_needs_higher_priority() {
        let guardian_first = character()
            .item(Item::class("Guardian", 3, Powercasting::Guardian))
            .item(Item::class("Consular", 3, Powercasting::Consular))
            .build()
            .expect("valid");
        assert_eq!(stats(&guardian_first).force.max_class, Powercasting::Consular);

        let consular_first = character()
            .item(Item::class("Consular", 2, Powercasting::Consular))
            .item(Item::class("Guardian", 3, Powercasting::Guardian))
            .build()
            .expect("valid");
        // More levels alone do not take control from a higher-priority class
        assert_eq!(stats(&consular_first).force.max_class, Powercasting::Consular);

        let fewer_levels = character()
            .item(Item::class("Guardian", 4, Powercasting::Guardian))
            .item(Item::class("Sentinel", 3, Powercasting::Sentinel))
            .build()
            .expect("valid");
        assert_eq!(stats(&fewer_levels).force.max_class, Powercasting::Guardian);
    }

    #[test]
    fn tracks_are_independent() {
        let actor = character()
            .item(Item::class("Consular", 3, Powercasting::Consular))
            .item(Item::class("Engineer", 2, Powercasting::Engineer))
            .item(Item::class("Fighter", 4, Powercasting::None))
            .build()
            .expect("valid");
        let stats = stats(&actor);

        assert_eq!(stats.force.classes, 1);
        assert_eq!(stats.force.levels, 3);
        assert_eq!(stats.tech.classes, 1);
        assert_eq!(stats.tech.levels, 2);
        assert_eq!(stats.tech.max_class, Powercasting::Engineer);
        assert_eq!(stats.slot(1).map(|s| s.tmax), Some(UNLIMITED));
        assert_eq!(stats.slot(2).map(|s| s.tmax), Some(0));
    }

    #[test]
    fn npc_caster_level_fills_slots() {
        let spent = PowerSlotState {
            fvalue: Some(0),
            ..PowerSlotState::default()
        };
        let actor = ActorSnapshot::builder(ActorKind::Npc)
            .powercasting(Powercasting::Consular)
            .npc_power_levels(Some(9), None)
            .power_slot(1, spent)
            .build()
            .expect("valid");
        let stats = stats(&actor);

        assert_eq!(stats.force.levels, 9);
        assert_eq!(stats.force.max_class_power_level, 5);
        assert_eq!(stats.force_pool.level, 9);
        assert!(!stats.force_pool.progressed);
        for slot in &stats.slots[..5] {
            assert_eq!(slot.fvalue, slot.fmax);
            assert_eq!(slot.fmax, UNLIMITED);
        }
        assert!(stats.slots[5..].iter().all(|s| s.fmax == 0 && s.fvalue == 0));
    }

    #[test]
    fn override_replaces_limit() {
        let slot = PowerSlotState {
            foverride: Some(3),
            ..PowerSlotState::default()
        };
        let actor = character()
            .item(Item::class("Consular", 1, Powercasting::Consular))
            .power_slot(1, slot)
            .power_slot(7, PowerSlotState {
                foverride: Some(2),
                fvalue: Some(5),
                ..PowerSlotState::default()
            })
            .build()
            .expect("valid");
        let stats = stats(&actor);

        assert_eq!(stats.slot(1).map(|s| (s.fvalue, s.fmax)), Some((3, 3)));
        // Overrides apply even above the castable level; value is clamped
        assert_eq!(stats.slot(7).map(|s| (s.fvalue, s.fmax)), Some((2, 2)));
    }

    #[test]
    fn stored_values_and_legacy_fallback() {
        let actor = character()
            .item(Item::class("Consular", 5, Powercasting::Consular))
            .power_slot(1, PowerSlotState {
                fvalue: Some(0),
                ..PowerSlotState::default()
            })
            .power_slot(2, PowerSlotState {
                legacy_value: Some(4),
                ..PowerSlotState::default()
            })
            .build()
            .expect("valid");
        let stats = stats(&actor);

        assert_eq!(stats.slot(1).map(|s| s.fvalue), Some(0));
        assert_eq!(stats.slot(2).map(|s| s.fvalue), Some(4));
        assert_eq!(stats.slot(3).map(|s| s.fvalue), Some(UNLIMITED));
    }

    #[test]
    fn known_powers_are_tallied_by_school() {
        let actor = character()
            .item(Item::class("Scout", 2, Powercasting::Scout))
            .items([
                Item::power("Tracker droid", PowerSchool::Tech, 1),
                Item::power("Overload", PowerSchool::Tech, 1),
                Item::power("Force push", PowerSchool::Universal, 1),
            ])
            .tech(PowerAttributes::tracked())
            .build()
            .expect("valid");
        let stats = stats(&actor);

        assert_eq!(stats.tech_pool.known, Some(Pool::new(2, 4)));
        // Force block predates known tracking
        assert_eq!(stats.force_pool.known, None);
        assert_eq!(stats.diagnostics().count(), 0);
    }

    #[test]
    fn excess_known_powers_are_reported() {
        let powers = (0..8).map(|i| Item::power(format!("Power {i}"), PowerSchool::Light, 1));
        let actor = character()
            .item(Item::class("Guardian", 1, Powercasting::Guardian))
            .items(powers)
            .force(PowerAttributes::tracked())
            .build()
            .expect("valid");
        let diagnostics: Vec<_> = stats(&actor).diagnostics().collect();

        assert_eq!(
            diagnostics,
            vec![Diagnostic::KnownPowersExceeded {
                track: PowerTrack::Force,
                known: 8,
                max: 5,
            }]
        );
    }

    #[test]
    fn point_bonus_uses_better_force_ability() {
        let actor = character()
            .ability(Ability::Wis, 8, false)
            .ability(Ability::Cha, 18, false)
            .item(Item::class("Sentinel", 2, Powercasting::Sentinel))
            .build()
            .expect("valid");
        assert_eq!(stats(&actor).force_pool.points.max, 6 + 4);
    }

    #[test]
    fn point_maximum_never_goes_negative() {
        let actor = character()
            .ability(Ability::Int, 1, false)
            .item(Item::class("Scout", 1, Powercasting::Scout))
            .build()
            .expect("valid");
        // Scout 1 has no points and a -5 modifier
        assert_eq!(stats(&actor).tech_pool.points.max, 0);
    }

    #[test]
    fn no_casters_keep_stored_pools() {
        let stored = PowerAttributes {
            level: 3,
            points: Pool::new(2, 7),
            known: None,
        };
        let actor = character().force(stored).build().expect("valid");
        let pool = stats(&actor).force_pool;
        assert_eq!(pool.level, 3);
        assert_eq!(pool.points, Pool::new(2, 7));
        assert!(!pool.progressed);
    }

    #[test]
    fn vehicles_skip_powers() {
        let actor = ActorSnapshot::builder(ActorKind::Vehicle)
            .build()
            .expect("valid");
        assert!(run(&actor).is_none());
    }
}
