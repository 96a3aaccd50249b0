//! Actor snapshot representation.
//!
//! This module owns the data structures that describe an actor's stored data as
//! the engine sees it: ability scores, skills, feat flags, owned items and power
//! slots. Snapshots are immutable inputs; the engine never writes back into them.
mod ability;
mod actor;
mod error;
mod flags;
mod item;
mod powers;
mod skill;

pub use ability::{Ability, AbilityScore, ByAbility};
pub use actor::{
    ActorKind, ActorSnapshot, ActorSnapshotBuilder, Attributes, Details, GlobalBonuses,
    PolymorphDonor, Size,
};
pub use error::SnapshotError;
pub use flags::{FeatFlags, FeatToggles};
pub use item::{ClassItem, Item, ItemData, PhysicalCategory, PhysicalItem, PowerItem, PowerSchool};
pub use powers::{Pool, PowerAttributes, PowerSlotState, PowerSlots};
pub use skill::{Proficiency, Skill, SkillEntry, SkillSet, default_skills};
