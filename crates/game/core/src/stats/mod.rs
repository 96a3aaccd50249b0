//! Derived-stat layers.
//!
//! # Architecture
//!
//! ```text
//! [ Level / Proficiency (Layer 1) ]
//!      ↓
//! [ Abilities, saves, DCs (Layer 2) ]
//!      ↓
//! [ Skills + Initiative (Layer 3) ]
//!      ↓
//! [ Encumbrance (Layer 4) ]
//!      ↓
//! [ Experience (Layer 5) ]
//!      ↓
//! [ Power DCs + Progression (Layer 6) ]
//! ```
//!
//! Each layer is a [`StatLayer`]: a pure function of the snapshot slice it
//! reads and the outputs of the layers above it. Layers never panic on
//! arithmetic; sums saturate at the integer bounds.

pub mod abilities;
pub mod dcs;
pub mod derived;
pub mod encumbrance;
pub mod experience;
pub mod initiative;
pub mod layer;
pub mod level;
pub mod powers;
pub mod skills;

pub use abilities::{AbilityInputs, AbilityStats, AbilityTable, ability_modifier};
pub use dcs::{DcInputs, PowerDcs};
pub use derived::{DerivedStats, Diagnostic};
pub use encumbrance::{Encumbrance, EncumbranceInputs};
pub use experience::{Experience, ExperienceInputs, XpProgress, challenge_xp};
pub use initiative::{Initiative, InitiativeInputs};
pub use layer::StatLayer;
pub use level::{LevelStats, proficiency_bonus};
pub use powers::{PowerInputs, PowerPool, PowerStats, Progression, ResolvedSlot};
pub use skills::{SkillInputs, SkillStats, SkillTable};

/// Sum of `terms`, clamped to the `i32` range.
pub(crate) fn saturating_sum<const N: usize>(terms: [i32; N]) -> i32 {
    terms.into_iter().fold(0, i32::saturating_add)
}
