//! Owned items that participate in derived stats.
//!
//! Only class items (levels and powercasting archetype), powers (known-power
//! tally) and physical items (carried weight) matter to the engine. Everything
//! else the host stores is carried as [`ItemData::Other`].

use crate::tables::{PowerTrack, Powercasting};

/// Physical item categories that count toward carried weight.
#[derive(
    Clone,
    Copy,
    Debug,
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
pub enum PhysicalCategory {
    Weapon,
    Equipment,
    Consumable,
    Tool,
    Backpack,
    Loot,
}

/// Power school. Light, dark and universal are force schools; tech is its own.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum PowerSchool {
    #[strum(serialize = "lgt")]
    #[cfg_attr(feature = "serde", serde(rename = "lgt"))]
    Light,
    #[strum(serialize = "drk")]
    #[cfg_attr(feature = "serde", serde(rename = "drk"))]
    Dark,
    #[strum(serialize = "uni")]
    #[cfg_attr(feature = "serde", serde(rename = "uni"))]
    Universal,
    #[strum(serialize = "tec")]
    #[cfg_attr(feature = "serde", serde(rename = "tec"))]
    Tech,
}

impl PowerSchool {
    pub const fn track(self) -> PowerTrack {
        match self {
            Self::Light | Self::Dark | Self::Universal => PowerTrack::Force,
            Self::Tech => PowerTrack::Tech,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassItem {
    pub levels: u32,
    pub powercasting: Powercasting,
    pub hit_dice_used: u32,
}

impl ClassItem {
    pub const fn new(levels: u32, powercasting: Powercasting) -> Self {
        Self {
            levels,
            powercasting,
            hit_dice_used: 0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PowerItem {
    pub school: PowerSchool,
    pub level: u8,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhysicalItem {
    pub category: PhysicalCategory,
    pub quantity: f64,
    pub weight: f64,
}

impl PhysicalItem {
    pub fn total_weight(&self) -> f64 {
        self.quantity * self.weight
    }
}

/// Type-specific item data.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemData {
    Class(ClassItem),
    Power(PowerItem),
    Physical(PhysicalItem),
    /// Any other host item type (feats, species, backgrounds...), kept by tag.
    Other(String),
}

/// An owned item.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub name: String,
    pub data: ItemData,
}

impl Item {
    pub fn new(name: impl Into<String>, data: ItemData) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    pub fn class(name: impl Into<String>, levels: u32, powercasting: Powercasting) -> Self {
        Self::new(name, ItemData::Class(ClassItem::new(levels, powercasting)))
    }

    pub fn power(name: impl Into<String>, school: PowerSchool, level: u8) -> Self {
        Self::new(name, ItemData::Power(PowerItem { school, level }))
    }

    pub fn physical(
        name: impl Into<String>,
        category: PhysicalCategory,
        quantity: f64,
        weight: f64,
    ) -> Self {
        Self::new(
            name,
            ItemData::Physical(PhysicalItem {
                category,
                quantity,
                weight,
            }),
        )
    }

    pub fn as_class(&self) -> Option<&ClassItem> {
        match &self.data {
            ItemData::Class(class) => Some(class),
            _ => None,
        }
    }

    pub fn as_power(&self) -> Option<&PowerItem> {
        match &self.data {
            ItemData::Power(power) => Some(power),
            _ => None,
        }
    }

    pub fn as_physical(&self) -> Option<&PhysicalItem> {
        match &self.data {
            ItemData::Physical(physical) => Some(physical),
            _ => None,
        }
    }
}
