//! Feat-driven character flags.
//!
//! The host stores these as loose `flags.sw5e.<name>` entries. Here they are a
//! typed set, normalized once when the snapshot is built.

use bitflags::bitflags;

bitflags! {
    /// Boolean feat toggles.
    ///
    /// Each bit is an independent feat or trait. Unset means the feat is absent.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct FeatToggles: u16 {
        /// Half proficiency (rounded down) on untrained checks and initiative.
        const JACK_OF_ALL_TRADES = 1 << 0;
        /// Half proficiency (rounded up) on untrained STR/DEX/CON checks and initiative.
        const REMARKABLE_ATHLETE = 1 << 1;
        /// +5 passive Perception and Investigation.
        const OBSERVANT_FEAT     = 1 << 2;
        /// Counts as one size larger for carrying capacity.
        const POWERFUL_BUILD     = 1 << 3;
        /// +5 initiative.
        const INITIATIVE_ALERT   = 1 << 4;
        const HALFLING_LUCKY     = 1 << 5;
        const RELIABLE_TALENT    = 1 << 6;
        const ELVEN_ACCURACY     = 1 << 7;
    }
}

impl FeatToggles {
    /// Host flag keys and the toggle each one sets.
    pub const HOST_KEYS: [(&'static str, FeatToggles); 8] = [
        ("jackOfAllTrades", Self::JACK_OF_ALL_TRADES),
        ("remarkableAthlete", Self::REMARKABLE_ATHLETE),
        ("observantFeat", Self::OBSERVANT_FEAT),
        ("powerfulBuild", Self::POWERFUL_BUILD),
        ("initiativeAlert", Self::INITIATIVE_ALERT),
        ("halflingLucky", Self::HALFLING_LUCKY),
        ("reliableTalent", Self::RELIABLE_TALENT),
        ("elvenAccuracy", Self::ELVEN_ACCURACY),
    ];

    /// Looks up a toggle by its host flag key (e.g. `"jackOfAllTrades"`).
    pub fn from_host_key(key: &str) -> Option<Self> {
        Self::HOST_KEYS
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, flag)| *flag)
    }
}

/// Typed feat flags for one actor.
///
/// Critical thresholds are only meaningful to the dice layer; the engine carries
/// them through unchanged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeatFlags {
    pub toggles: FeatToggles,
    pub weapon_critical_threshold: Option<u8>,
    pub power_critical_threshold: Option<u8>,
}

impl FeatFlags {
    /// Valid range for a critical-hit threshold override.
    pub const CRITICAL_THRESHOLD_RANGE: core::ops::RangeInclusive<u8> = 15..=20;

    pub const fn new(toggles: FeatToggles) -> Self {
        Self {
            toggles,
            weapon_critical_threshold: None,
            power_critical_threshold: None,
        }
    }

    /// Sets the weapon critical threshold, dropping values outside 15..=20.
    #[must_use]
    pub fn with_weapon_critical_threshold(mut self, threshold: u8) -> Self {
        self.weapon_critical_threshold = Self::CRITICAL_THRESHOLD_RANGE
            .contains(&threshold)
            .then_some(threshold);
        self
    }

    /// Sets the power critical threshold, dropping values outside 15..=20.
    #[must_use]
    pub fn with_power_critical_threshold(mut self, threshold: u8) -> Self {
        self.power_critical_threshold = Self::CRITICAL_THRESHOLD_RANGE
            .contains(&threshold)
            .then_some(threshold);
        self
    }

    pub const fn jack_of_all_trades(&self) -> bool {
        self.toggles.contains(FeatToggles::JACK_OF_ALL_TRADES)
    }

    pub const fn remarkable_athlete(&self) -> bool {
        self.toggles.contains(FeatToggles::REMARKABLE_ATHLETE)
    }

    pub const fn observant(&self) -> bool {
        self.toggles.contains(FeatToggles::OBSERVANT_FEAT)
    }

    pub const fn powerful_build(&self) -> bool {
        self.toggles.contains(FeatToggles::POWERFUL_BUILD)
    }

    pub const fn initiative_alert(&self) -> bool {
        self.toggles.contains(FeatToggles::INITIATIVE_ALERT)
    }
}

impl From<FeatToggles> for FeatFlags {
    fn from(toggles: FeatToggles) -> Self {
        Self::new(toggles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_keys_resolve() {
        assert_eq!(
            FeatToggles::from_host_key("remarkableAthlete"),
            Some(FeatToggles::REMARKABLE_ATHLETE)
        );
        assert_eq!(FeatToggles::from_host_key("diamondSoul"), None);
    }

    #[test]
    fn critical_thresholds_outside_range_are_dropped() {
        let flags = FeatFlags::default()
            .with_weapon_critical_threshold(19)
            .with_power_critical_threshold(4);
        assert_eq!(flags.weapon_critical_threshold, Some(19));
        assert_eq!(flags.power_critical_threshold, None);
    }

    #[test]
    fn accessors_read_toggles() {
        let flags = FeatFlags::from(FeatToggles::JACK_OF_ALL_TRADES | FeatToggles::POWERFUL_BUILD);
        assert!(flags.jack_of_all_trades());
        assert!(flags.powerful_build());
        assert!(!flags.remarkable_athlete());
    }
}
