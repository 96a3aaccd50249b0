//! Skills, their governing abilities and proficiency multipliers.

use std::collections::BTreeMap;

use super::ability::Ability;

/// SW5e skills, keyed by the host's three-letter codes.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum Skill {
    #[strum(serialize = "acr")]
    #[cfg_attr(feature = "serde", serde(rename = "acr"))]
    Acrobatics,
    #[strum(serialize = "ani")]
    #[cfg_attr(feature = "serde", serde(rename = "ani"))]
    AnimalHandling,
    #[strum(serialize = "ath")]
    #[cfg_attr(feature = "serde", serde(rename = "ath"))]
    Athletics,
    #[strum(serialize = "dec")]
    #[cfg_attr(feature = "serde", serde(rename = "dec"))]
    Deception,
    #[strum(serialize = "ins")]
    #[cfg_attr(feature = "serde", serde(rename = "ins"))]
    Insight,
    #[strum(serialize = "itm")]
    #[cfg_attr(feature = "serde", serde(rename = "itm"))]
    Intimidation,
    #[strum(serialize = "inv")]
    #[cfg_attr(feature = "serde", serde(rename = "inv"))]
    Investigation,
    #[strum(serialize = "lor")]
    #[cfg_attr(feature = "serde", serde(rename = "lor"))]
    Lore,
    #[strum(serialize = "med")]
    #[cfg_attr(feature = "serde", serde(rename = "med"))]
    Medicine,
    #[strum(serialize = "nat")]
    #[cfg_attr(feature = "serde", serde(rename = "nat"))]
    Nature,
    #[strum(serialize = "prc")]
    #[cfg_attr(feature = "serde", serde(rename = "prc"))]
    Perception,
    #[strum(serialize = "prf")]
    #[cfg_attr(feature = "serde", serde(rename = "prf"))]
    Performance,
    #[strum(serialize = "per")]
    #[cfg_attr(feature = "serde", serde(rename = "per"))]
    Persuasion,
    #[strum(serialize = "pil")]
    #[cfg_attr(feature = "serde", serde(rename = "pil"))]
    Piloting,
    #[strum(serialize = "slt")]
    #[cfg_attr(feature = "serde", serde(rename = "slt"))]
    SleightOfHand,
    #[strum(serialize = "ste")]
    #[cfg_attr(feature = "serde", serde(rename = "ste"))]
    Stealth,
    #[strum(serialize = "sur")]
    #[cfg_attr(feature = "serde", serde(rename = "sur"))]
    Survival,
    #[strum(serialize = "tec")]
    #[cfg_attr(feature = "serde", serde(rename = "tec"))]
    Technology,
}

impl Skill {
    /// Ability a skill uses unless the sheet overrides it.
    pub const fn default_ability(self) -> Ability {
        use Skill::*;
        match self {
            Athletics => Ability::Str,
            Acrobatics | SleightOfHand | Stealth => Ability::Dex,
            Investigation | Lore | Nature | Piloting | Technology => Ability::Int,
            AnimalHandling | Insight | Medicine | Perception | Survival => Ability::Wis,
            Deception | Intimidation | Performance | Persuasion => Ability::Cha,
        }
    }

    /// Skills whose passive score benefits from the Observant feat.
    pub const fn is_observant(self) -> bool {
        matches!(self, Self::Perception | Self::Investigation)
    }
}

/// Proficiency multiplier stored in half steps.
///
/// `0` none, `1` half, `2` proficient, `4` expertise. Any half step in `[0, 2]`
/// (multipliers `0.0..=2.0`) is representable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Proficiency(u8);

impl Proficiency {
    pub const NONE: Self = Self(0);
    pub const HALF: Self = Self(1);
    pub const FULL: Self = Self(2);
    pub const EXPERT: Self = Self(4);

    const MAX_HALVES: f64 = 4.0;

    /// Snaps a raw multiplier to the nearest half step within `[0, 2]`.
    ///
    /// Non-finite input is treated as not proficient.
    pub fn from_multiplier(value: f64) -> Self {
        if !value.is_finite() {
            return Self::NONE;
        }
        Self((value * 2.0).round().clamp(0.0, Self::MAX_HALVES) as u8)
    }

    pub const fn halves(self) -> u8 {
        self.0
    }

    /// `floor(multiplier * proficiency_bonus)`, saturating at the `i32` bounds.
    pub fn scaled_floor(self, proficiency_bonus: i32) -> i32 {
        self.scaled(proficiency_bonus).div_euclid(2)
    }

    /// `ceil(multiplier * proficiency_bonus)`, saturating at the `i32` bounds.
    pub fn scaled_ceil(self, proficiency_bonus: i32) -> i32 {
        let scaled = self.scaled(proficiency_bonus);
        scaled.div_euclid(2) + scaled.rem_euclid(2)
    }

    fn scaled(self, proficiency_bonus: i32) -> i32 {
        i32::from(self.0).saturating_mul(proficiency_bonus)
    }
}

/// Stored state for one skill.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillEntry {
    pub proficiency: Proficiency,
    pub ability: Ability,
    pub bonus: i32,
}

impl SkillEntry {
    pub const fn new(proficiency: Proficiency, ability: Ability) -> Self {
        Self {
            proficiency,
            ability,
            bonus: 0,
        }
    }

    /// Untrained entry using the skill's default ability.
    pub const fn untrained(skill: Skill) -> Self {
        Self::new(Proficiency::NONE, skill.default_ability())
    }
}

/// Skill entries by skill code.
pub type SkillSet = BTreeMap<Skill, SkillEntry>;

/// Every skill, untrained, with its default ability.
pub fn default_skills() -> SkillSet {
    use strum::IntoEnumIterator;

    Skill::iter().map(|skill| (skill, SkillEntry::untrained(skill))).collect()
}
