//! Powercasting archetypes and the resource track each one feeds.

/// The two independent power resource tracks.
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
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PowerTrack {
    Force,
    Tech,
}

/// Powercasting archetype carried by a class item.
///
/// Each archetype feeds exactly one [`PowerTrack`] and has a fixed priority used
/// to decide which class controls the highest castable power level when several
/// classes share a track.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
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
pub enum Powercasting {
    #[default]
    None,
    Consular,
    Engineer,
    Guardian,
    Scout,
    Sentinel,
}

impl Powercasting {
    /// Archetypes that actually cast, in table order.
    pub const CASTERS: [Powercasting; 5] = [
        Self::Consular,
        Self::Engineer,
        Self::Guardian,
        Self::Scout,
        Self::Sentinel,
    ];

    /// Parses a host tag, treating anything unrecognized as `None`.
    pub fn from_tag(tag: &str) -> Self {
        tag.trim().parse().unwrap_or_else(|_| {
            tracing::debug!(tag, "unknown powercasting archetype, treating as none");
            Self::None
        })
    }

    /// Resource track this archetype contributes to.
    pub const fn track(self) -> Option<PowerTrack> {
        match self {
            Self::Consular | Self::Guardian | Self::Sentinel => Some(PowerTrack::Force),
            Self::Engineer | Self::Scout => Some(PowerTrack::Tech),
            Self::None => None,
        }
    }

    /// Tie-break priority for controlling the maximum power level.
    ///
    /// Full casters outrank half casters; every archetype has a distinct value.
    pub const fn priority(self) -> u8 {
        match self {
            Self::Consular => 5,
            Self::Engineer => 4,
            Self::Sentinel => 3,
            Self::Guardian => 2,
            Self::Scout => 1,
            Self::None => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_parse_case_insensitively() {
        assert_eq!(Powercasting::from_tag("Consular"), Powercasting::Consular);
        assert_eq!(Powercasting::from_tag(" scout "), Powercasting::Scout);
        assert_eq!(Powercasting::from_tag("none"), Powercasting::None);
    }

    #[test]
    fn unknown_tag_is_none() {
        assert_eq!(Powercasting::from_tag("wizard"), Powercasting::None);
        assert_eq!(Powercasting::from_tag(""), Powercasting::None);
    }

    #[test]
    fn tracks_and_priorities() {
        assert_eq!(Powercasting::Guardian.track(), Some(PowerTrack::Force));
        assert_eq!(Powercasting::Engineer.track(), Some(PowerTrack::Tech));
        assert_eq!(Powercasting::None.track(), None);

        let mut priorities: Vec<u8> = Powercasting::CASTERS.iter().map(|c| c.priority()).collect();
        priorities.sort_unstable();
        priorities.dedup();
        assert_eq!(priorities.len(), 5);
    }
}
