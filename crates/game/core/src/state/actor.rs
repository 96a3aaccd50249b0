//! The immutable actor snapshot the engine reads.

use std::collections::BTreeMap;

use super::ability::{Ability, AbilityScore, ByAbility};
use super::error::SnapshotError;
use super::flags::FeatFlags;
use super::item::{ClassItem, Item, ItemData};
use super::powers::{PowerAttributes, PowerSlotState, PowerSlots};
use super::skill::{Proficiency, Skill, SkillEntry, SkillSet, default_skills};
use crate::config::EngineConfig;
use crate::tables::{PowerTrack, Powercasting};

/// Actor kind discriminator.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ActorKind {
    #[default]
    Character,
    Npc,
    Vehicle,
}

/// Creature size, keyed by the host's size codes.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum Size {
    #[strum(serialize = "tiny")]
    #[cfg_attr(feature = "serde", serde(rename = "tiny"))]
    Tiny,
    #[strum(serialize = "sm")]
    #[cfg_attr(feature = "serde", serde(rename = "sm"))]
    Small,
    #[default]
    #[strum(serialize = "med")]
    #[cfg_attr(feature = "serde", serde(rename = "med"))]
    Medium,
    #[strum(serialize = "lg")]
    #[cfg_attr(feature = "serde", serde(rename = "lg"))]
    Large,
    #[strum(serialize = "huge")]
    #[cfg_attr(feature = "serde", serde(rename = "huge"))]
    Huge,
    #[strum(serialize = "grg")]
    #[cfg_attr(feature = "serde", serde(rename = "grg"))]
    Gargantuan,
}

impl Size {
    /// Carrying-capacity multiplier for this size.
    pub const fn carry_multiplier(self) -> f64 {
        match self {
            Self::Tiny => 0.5,
            Self::Small | Self::Medium => 1.0,
            Self::Large => 2.0,
            Self::Huge => 4.0,
            Self::Gargantuan => 8.0,
        }
    }
}

/// Actor-wide numeric bonuses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GlobalBonuses {
    /// Added to every ability check and skill.
    pub check: i32,
    /// Added to every saving throw.
    pub save: i32,
    /// Added to every skill.
    pub skill: i32,
    /// Added to ability and power save DCs.
    pub power_dc: i32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Details {
    /// Declared level, used only when the actor owns no class items.
    pub level: u32,
    pub challenge_rating: f64,
    pub xp: u32,
    /// NPC-only explicit force caster level.
    pub power_force_level: Option<u32>,
    /// NPC-only explicit tech caster level.
    pub power_tech_level: Option<u32>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attributes {
    /// Explicit proficiency bonus; derived from level or CR when absent.
    pub proficiency: Option<i32>,
    pub size: Size,
    /// Base initiative value before feats.
    pub initiative: i32,
    /// NPC-level archetype used with explicit caster levels.
    pub powercasting: Powercasting,
    pub force: PowerAttributes,
    pub tech: PowerAttributes,
}

/// Donor values merged in while the actor is polymorphed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PolymorphDonor {
    /// Donor save totals.
    pub saves: Option<ByAbility<i32>>,
    /// Donor skill proficiencies.
    pub skills: Option<BTreeMap<Skill, Proficiency>>,
}

/// Read-only snapshot of an actor's stored data.
///
/// Build through [`ActorSnapshot::builder`] so the data is validated once. The
/// engine itself is total over any snapshot, but only validated snapshots carry
/// meaningful results.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorSnapshot {
    pub kind: ActorKind,
    pub abilities: ByAbility<AbilityScore>,
    pub skills: SkillSet,
    pub flags: FeatFlags,
    pub attributes: Attributes,
    pub details: Details,
    pub bonuses: GlobalBonuses,
    pub items: Vec<Item>,
    pub power_slots: PowerSlots,
    /// Total coins across all denominations.
    pub coins: u64,
    pub polymorph: Option<PolymorphDonor>,
}

impl ActorSnapshot {
    pub fn builder(kind: ActorKind) -> ActorSnapshotBuilder {
        ActorSnapshotBuilder::new(kind)
    }

    pub const fn is_npc(&self) -> bool {
        matches!(self.kind, ActorKind::Npc)
    }

    /// Class items in owned order.
    pub fn classes(&self) -> impl Iterator<Item = (&str, &ClassItem)> {
        self.items
            .iter()
            .filter_map(|item| item.as_class().map(|class| (item.name.as_str(), class)))
    }

    /// Checks every invariant the engine relies on.
    ///
    /// # Errors
    ///
    /// Returns the first [`SnapshotError`] found.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        let score_range = EngineConfig::MIN_ABILITY_SCORE..=EngineConfig::MAX_ABILITY_SCORE;
        for (ability, score) in self.abilities.iter() {
            if !score_range.contains(&score.value) {
                return Err(SnapshotError::AbilityOutOfRange {
                    ability,
                    value: score.value,
                });
            }
        }

        if let Some(value) = self.attributes.proficiency {
            if !(0..=EngineConfig::MAX_PROFICIENCY_BONUS).contains(&value) {
                return Err(SnapshotError::ProficiencyOutOfRange { value });
            }
        }

        let flat = -EngineConfig::MAX_FLAT_BONUS..=EngineConfig::MAX_FLAT_BONUS;
        let initiative = self.attributes.initiative;
        if !flat.contains(&initiative) {
            return Err(SnapshotError::InitiativeOutOfRange { value: initiative });
        }
        let bonuses = [
            ("check", self.bonuses.check),
            ("save", self.bonuses.save),
            ("skill", self.bonuses.skill),
            ("power_dc", self.bonuses.power_dc),
        ];
        for (field, value) in bonuses {
            if !flat.contains(&value) {
                return Err(SnapshotError::BonusOutOfRange {
                    field: field.to_string(),
                    value,
                });
            }
        }
        for (skill, entry) in &self.skills {
            if !flat.contains(&entry.bonus) {
                return Err(SnapshotError::BonusOutOfRange {
                    field: format!("skill.{skill}"),
                    value: entry.bonus,
                });
            }
        }

        let mut total_levels = 0u32;
        for item in &self.items {
            match &item.data {
                ItemData::Class(class) => {
                    if !(1..=EngineConfig::MAX_CLASS_LEVEL).contains(&class.levels) {
                        return Err(SnapshotError::ClassLevelsOutOfRange {
                            class: item.name.clone(),
                            levels: class.levels,
                        });
                    }
                    total_levels = total_levels.saturating_add(class.levels);
                }
                ItemData::Physical(physical) => {
                    let valid = |v: f64| v.is_finite() && v >= 0.0;
                    if !valid(physical.quantity) || !valid(physical.weight) {
                        return Err(SnapshotError::InvalidPhysicalItem {
                            item: item.name.clone(),
                        });
                    }
                }
                ItemData::Power(_) | ItemData::Other(_) => {}
            }
        }

        let level = total_levels.max(self.details.level);
        if level > EngineConfig::MAX_CHARACTER_LEVEL {
            return Err(SnapshotError::CharacterLevelOutOfRange { level });
        }

        let cr = self.details.challenge_rating;
        if !cr.is_finite() || cr < 0.0 {
            return Err(SnapshotError::InvalidChallengeRating { cr });
        }

        let npc_levels = [
            (PowerTrack::Force, self.details.power_force_level),
            (PowerTrack::Tech, self.details.power_tech_level),
        ];
        for (track, level) in npc_levels {
            if let Some(level) = level.filter(|l| *l > EngineConfig::MAX_CLASS_LEVEL) {
                return Err(SnapshotError::NpcPowerLevelOutOfRange { track, level });
            }
        }

        Ok(())
    }

    /// SHA-256 over the bincode encoding of this snapshot.
    ///
    /// Equal snapshots always produce equal fingerprints, so hosts can key a
    /// derived-stats cache on it.
    #[cfg(feature = "serde")]
    pub fn fingerprint(&self) -> [u8; 32] {
        use sha2::{Digest, Sha256};

        let mut hasher = Sha256::new();
        if let Ok(bytes) = bincode::serialize(self) {
            hasher.update(&bytes);
        }
        hasher.finalize().into()
    }
}

/// Builder for validated snapshots.
///
/// Starts from an average actor: all abilities 10, every skill untrained (none
/// for vehicles), medium size, no items.
#[derive(Clone, Debug)]
pub struct ActorSnapshotBuilder {
    snapshot: ActorSnapshot,
}

impl ActorSnapshotBuilder {
    pub fn new(kind: ActorKind) -> Self {
        let skills = match kind {
            ActorKind::Vehicle => SkillSet::new(),
            ActorKind::Character | ActorKind::Npc => default_skills(),
        };

        Self {
            snapshot: ActorSnapshot {
                kind,
                abilities: ByAbility::default(),
                skills,
                flags: FeatFlags::default(),
                attributes: Attributes::default(),
                details: Details::default(),
                bonuses: GlobalBonuses::default(),
                items: Vec::new(),
                power_slots: PowerSlots::default(),
                coins: 0,
                polymorph: None,
            },
        }
    }

    pub fn ability(mut self, ability: Ability, value: i32, proficient_save: bool) -> Self {
        self.snapshot.abilities[ability] = AbilityScore::new(value, proficient_save);
        self
    }

    /// Sets a skill's proficiency, keeping its governing ability.
    pub fn skill(mut self, skill: Skill, proficiency: Proficiency) -> Self {
        self.snapshot
            .skills
            .entry(skill)
            .or_insert_with(|| SkillEntry::untrained(skill))
            .proficiency = proficiency;
        self
    }

    pub fn skill_entry(mut self, skill: Skill, entry: SkillEntry) -> Self {
        self.snapshot.skills.insert(skill, entry);
        self
    }

    pub fn flags(mut self, flags: impl Into<FeatFlags>) -> Self {
        self.snapshot.flags = flags.into();
        self
    }

    pub fn item(mut self, item: Item) -> Self {
        self.snapshot.items.push(item);
        self
    }

    pub fn items(mut self, items: impl IntoIterator<Item = Item>) -> Self {
        self.snapshot.items.extend(items);
        self
    }

    pub fn level(mut self, level: u32) -> Self {
        self.snapshot.details.level = level;
        self
    }

    pub fn challenge_rating(mut self, cr: f64) -> Self {
        self.snapshot.details.challenge_rating = cr;
        self
    }

    pub fn xp(mut self, xp: u32) -> Self {
        self.snapshot.details.xp = xp;
        self
    }

    pub fn proficiency(mut self, bonus: i32) -> Self {
        self.snapshot.attributes.proficiency = Some(bonus);
        self
    }

    pub fn size(mut self, size: Size) -> Self {
        self.snapshot.attributes.size = size;
        self
    }

    pub fn initiative(mut self, value: i32) -> Self {
        self.snapshot.attributes.initiative = value;
        self
    }

    pub fn powercasting(mut self, powercasting: Powercasting) -> Self {
        self.snapshot.attributes.powercasting = powercasting;
        self
    }

    /// Explicit NPC caster levels for the force and tech tracks.
    pub fn npc_power_levels(mut self, force: Option<u32>, tech: Option<u32>) -> Self {
        self.snapshot.details.power_force_level = force;
        self.snapshot.details.power_tech_level = tech;
        self
    }

    pub fn force(mut self, force: PowerAttributes) -> Self {
        self.snapshot.attributes.force = force;
        self
    }

    pub fn tech(mut self, tech: PowerAttributes) -> Self {
        self.snapshot.attributes.tech = tech;
        self
    }

    /// Replaces the bucket for power level `level` (1-based); other levels are ignored.
    pub fn power_slot(mut self, level: usize, slot: PowerSlotState) -> Self {
        if let Some(bucket) = self.snapshot.power_slots.get_mut(level) {
            *bucket = slot;
        }
        self
    }

    pub fn bonuses(mut self, bonuses: GlobalBonuses) -> Self {
        self.snapshot.bonuses = bonuses;
        self
    }

    pub fn coins(mut self, coins: u64) -> Self {
        self.snapshot.coins = coins;
        self
    }

    pub fn polymorph(mut self, donor: PolymorphDonor) -> Self {
        self.snapshot.polymorph = Some(donor);
        self
    }

    /// Validates and returns the snapshot.
    ///
    /// # Errors
    ///
    /// Returns a [`SnapshotError`] if any invariant is violated.
    pub fn build(self) -> Result<ActorSnapshot, SnapshotError> {
        self.snapshot.validate()?;
        Ok(self.snapshot)
    }
}
