//! Ability codes and per-ability storage.

use core::ops::{Index, IndexMut};

/// The six abilities.
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
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Ability {
    Str,
    Dex,
    Con,
    Int,
    Wis,
    Cha,
}

impl Ability {
    pub const ALL: [Ability; 6] = [
        Self::Str,
        Self::Dex,
        Self::Con,
        Self::Int,
        Self::Wis,
        Self::Cha,
    ];

    const fn index(self) -> usize {
        self as usize
    }

    /// Strength, Dexterity and Constitution.
    pub const fn is_physical(self) -> bool {
        matches!(self, Self::Str | Self::Dex | Self::Con)
    }
}

/// A value for each ability, indexed by [`Ability`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ByAbility<T>([T; 6]);

impl<T> ByAbility<T> {
    /// Values in [`Ability::ALL`] order.
    pub const fn new(values: [T; 6]) -> Self {
        Self(values)
    }

    pub fn from_fn(f: impl FnMut(Ability) -> T) -> Self {
        Self(Ability::ALL.map(f))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Ability, &T)> {
        Ability::ALL.into_iter().zip(self.0.iter())
    }

    pub fn map<U>(&self, mut f: impl FnMut(Ability, &T) -> U) -> ByAbility<U> {
        ByAbility::from_fn(|ability| f(ability, &self[ability]))
    }
}

impl<T> Index<Ability> for ByAbility<T> {
    type Output = T;

    fn index(&self, ability: Ability) -> &T {
        &self.0[ability.index()]
    }
}

impl<T> IndexMut<Ability> for ByAbility<T> {
    fn index_mut(&mut self, ability: Ability) -> &mut T {
        &mut self.0[ability.index()]
    }
}

/// Stored score for one ability.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityScore {
    pub value: i32,
    pub proficient_save: bool,
}

impl AbilityScore {
    pub const fn new(value: i32, proficient_save: bool) -> Self {
        Self {
            value,
            proficient_save,
        }
    }
}

impl Default for AbilityScore {
    /// Average score, no save proficiency.
    fn default() -> Self {
        Self::new(10, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indexing_follows_ability_order() {
        let scores = ByAbility::new([1, 2, 3, 4, 5, 6]);
        assert_eq!(scores[Ability::Str], 1);
        assert_eq!(scores[Ability::Wis], 5);
        assert_eq!(scores[Ability::Cha], 6);
    }

    #[test]
    fn codes_round_trip_through_strum() {
        for ability in Ability::ALL {
            let code = ability.as_ref().to_string();
            assert_eq!(code.parse::<Ability>().ok(), Some(ability));
        }
        assert_eq!("DEX".parse::<Ability>().ok(), Some(Ability::Dex));
    }
}
