//! Host actor document loader.
//!
//! Reads an actor exported by the host (JSON) and normalizes it into a
//! validated [`ActorSnapshot`]. Both the legacy `data` and the newer `system`
//! key are accepted for the actor and item payloads.
//!
//! # Coercions
//!
//! - Numbers may arrive as numeric strings; blanks and garbage fall back to defaults.
//! - Unknown powercasting tags become `none`.
//! - Non-numeric slot overrides are ignored.
//! - Unknown ability, skill, size and school codes are skipped.
//!
//! Every coercion is logged at `debug`; none of them is an error. Only a
//! snapshot that fails validation is rejected.

use std::path::Path;

use serde_json::{Map, Value};
use sw5e_core::{
    Ability, ActorKind, ActorSnapshot, ActorSnapshotBuilder, ByAbility, ClassItem, FeatFlags,
    FeatToggles, GlobalBonuses, Item, ItemData, PhysicalCategory, PolymorphDonor, Pool,
    PowerAttributes, PowerSchool, PowerSlotState, Powercasting, Proficiency, RulesError, Size,
    Skill, SkillEntry,
};
use tracing::{debug, trace};

use super::normalize::{at, int, number, override_value, string, truthy, uint};
use crate::loaders::{LoadResult, read_file};

/// Loader for host actor documents.
pub struct ActorLoader;

impl ActorLoader {
    /// Load and normalize an actor document from a JSON file.
    pub fn load(path: &Path) -> LoadResult<ActorSnapshot> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load actor {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<ActorSnapshot> {
        let doc: Value = serde_json::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse actor JSON: {}", e))?;
        Self::from_document(&doc)
    }

    /// Normalize an already-parsed actor document.
    pub fn from_document(doc: &Value) -> LoadResult<ActorSnapshot> {
        let name = string(doc.get("name")).unwrap_or("<unnamed>");
        let kind_tag =
            string(doc.get("type")).ok_or_else(|| anyhow::anyhow!("Actor '{}' has no type", name))?;
        let kind: ActorKind = kind_tag
            .parse()
            .map_err(|_| anyhow::anyhow!("Actor '{}' has unknown type '{}'", name, kind_tag))?;
        let data = payload(doc)
            .ok_or_else(|| anyhow::anyhow!("Actor '{}' has no data payload", name))?;

        let mut builder = ActorSnapshot::builder(kind);
        builder = abilities(builder, data);
        if kind != ActorKind::Vehicle {
            builder = skills(builder, data);
        }
        builder = attributes(builder, data);
        builder = details(builder, data);
        builder = builder
            .bonuses(bonuses(data))
            .coins(coins(data))
            .flags(flags(doc));

        if let Some(slots) = data.get("powers").and_then(Value::as_object) {
            builder = power_slots(builder, slots);
        }
        if let Some(items) = doc.get("items").and_then(Value::as_array) {
            builder = builder.items(items.iter().map(item));
        }
        if let Some(donor) = doc.get("polymorph").and_then(polymorph) {
            builder = builder.polymorph(donor);
        }

        builder.build().map_err(|e| {
            anyhow::anyhow!("Invalid actor '{}': {} [{}]", name, e, e.error_code())
        })
    }
}

fn payload(doc: &Value) -> Option<&Value> {
    doc.get("system")
        .or_else(|| doc.get("data"))
        .filter(|v| v.is_object())
}

fn abilities(mut builder: ActorSnapshotBuilder, data: &Value) -> ActorSnapshotBuilder {
    let Some(abilities) = data.get("abilities").and_then(Value::as_object) else {
        return builder;
    };
    for (key, entry) in abilities {
        let Ok(ability) = key.parse::<Ability>() else {
            debug!(key, "skipping unknown ability");
            continue;
        };
        let value = int(entry.get("value")).unwrap_or(10);
        builder = builder.ability(ability, value, truthy(entry.get("proficient")));
    }
    builder
}

fn skills(mut builder: ActorSnapshotBuilder, data: &Value) -> ActorSnapshotBuilder {
    let Some(skills) = data.get("skills").and_then(Value::as_object) else {
        return builder;
    };
    for (key, entry) in skills {
        let Ok(skill) = key.parse::<Skill>() else {
            debug!(key, "skipping unknown skill");
            continue;
        };
        let proficiency = Proficiency::from_multiplier(number(entry.get("value")).unwrap_or(0.0));
        let ability = string(entry.get("ability"))
            .and_then(|code| code.parse().ok())
            .unwrap_or_else(|| skill.default_ability());

        let mut skill_entry = SkillEntry::new(proficiency, ability);
        skill_entry.bonus = int(entry.get("bonus")).unwrap_or(0);
        builder = builder.skill_entry(skill, skill_entry);
    }
    builder
}

fn pool(value: Option<&Value>) -> Pool {
    let value = value.unwrap_or(&Value::Null);
    Pool::new(
        uint(value.get("value")).unwrap_or(0),
        uint(value.get("max")).unwrap_or(0),
    )
}

fn power_attributes(block: Option<&Value>) -> PowerAttributes {
    let Some(block) = block else {
        return PowerAttributes::default();
    };
    PowerAttributes {
        level: uint(block.get("level")).unwrap_or(0),
        points: pool(block.get("points")),
        // Older documents have no `known` block at all
        known: block
            .get("known")
            .filter(|known| known.is_object())
            .map(|known| pool(Some(known))),
    }
}

fn attributes(mut builder: ActorSnapshotBuilder, data: &Value) -> ActorSnapshotBuilder {
    if let Some(prof) = int(at(data, &["attributes", "prof"])) {
        builder = builder.proficiency(prof);
    }

    let size = match string(at(data, &["traits", "size"])) {
        Some(code) => code.parse().unwrap_or_else(|_| {
            debug!(code, "unknown size, treating as medium");
            Size::Medium
        }),
        None => Size::Medium,
    };
    let powercasting = string(at(data, &["attributes", "powercasting"]))
        .map(Powercasting::from_tag)
        .unwrap_or_default();

    builder
        .size(size)
        .initiative(int(at(data, &["attributes", "init", "value"])).unwrap_or(0))
        .powercasting(powercasting)
        .force(power_attributes(at(data, &["attributes", "force"])))
        .tech(power_attributes(at(data, &["attributes", "tech"])))
}

fn details(builder: ActorSnapshotBuilder, data: &Value) -> ActorSnapshotBuilder {
    let details = data.get("details").unwrap_or(&Value::Null);
    let level = uint(details.get("level"))
        .or_else(|| uint(at(details, &["level", "value"])))
        .unwrap_or(0);
    // Zero means "not set" for explicit caster levels
    let caster_level = |key: &str| uint(details.get(key)).filter(|level| *level > 0);

    builder
        .level(level)
        .challenge_rating(number(details.get("cr")).unwrap_or(0.0))
        .xp(uint(at(details, &["xp", "value"])).unwrap_or(0))
        .npc_power_levels(
            caster_level("powerForceLevel"),
            caster_level("powerTechLevel"),
        )
}

fn bonus(data: &Value, path: &[&str]) -> i32 {
    let raw = at(data, path);
    match int(raw) {
        Some(value) => value,
        None => {
            if let Some(formula) = string(raw).filter(|s| !s.trim().is_empty()) {
                debug!(field = path.join("."), formula, "ignoring non-numeric bonus");
            }
            0
        }
    }
}

fn bonuses(data: &Value) -> GlobalBonuses {
    GlobalBonuses {
        check: bonus(data, &["bonuses", "abilities", "check"]),
        save: bonus(data, &["bonuses", "abilities", "save"]),
        skill: bonus(data, &["bonuses", "abilities", "skill"]),
        power_dc: bonus(data, &["bonuses", "power", "dc"]),
    }
}

fn coins(data: &Value) -> u64 {
    data.get("currency")
        .and_then(Value::as_object)
        .map(|currency| {
            currency
                .values()
                .filter_map(|v| uint(Some(v)))
                .map(u64::from)
                .sum()
        })
        .unwrap_or(0)
}

fn flags(doc: &Value) -> FeatFlags {
    let Some(host_flags) = at(doc, &["flags", "sw5e"]).and_then(Value::as_object) else {
        return FeatFlags::default();
    };

    let mut toggles = FeatToggles::empty();
    for (key, value) in host_flags {
        if let Some(toggle) = FeatToggles::from_host_key(key) {
            toggles.set(toggle, truthy(Some(value)));
        }
    }

    let threshold =
        |key: &str| uint(host_flags.get(key)).map(|t| u8::try_from(t).unwrap_or(u8::MAX));
    let mut flags = FeatFlags::new(toggles);
    if let Some(t) = threshold("weaponCriticalThreshold") {
        flags = flags.with_weapon_critical_threshold(t);
    }
    if let Some(t) = threshold("powerCriticalThreshold") {
        flags = flags.with_power_critical_threshold(t);
    }
    trace!(?flags, "feat flags normalized");
    flags
}

fn power_slots(
    mut builder: ActorSnapshotBuilder,
    slots: &Map<String, Value>,
) -> ActorSnapshotBuilder {
    for (key, bucket) in slots {
        let Some(level) = key
            .strip_prefix("power")
            .and_then(|n| n.parse::<usize>().ok())
        else {
            debug!(key, "skipping unknown power bucket");
            continue;
        };
        let slot = PowerSlotState {
            fvalue: uint(bucket.get("fvalue")),
            foverride: override_value(bucket.get("foverride"), "foverride"),
            tvalue: uint(bucket.get("tvalue")),
            toverride: override_value(bucket.get("toverride"), "toverride"),
            legacy_value: uint(bucket.get("value")),
        };
        builder = builder.power_slot(level, slot);
    }
    builder
}

fn item(entry: &Value) -> Item {
    let name = string(entry.get("name")).unwrap_or_default();
    let kind = string(entry.get("type")).unwrap_or_default();
    let data = payload(entry).unwrap_or(&Value::Null);

    match kind {
        "class" => {
            let powercasting = string(data.get("powercasting"))
                .map(Powercasting::from_tag)
                .unwrap_or_default();
            let mut class = ClassItem::new(uint(data.get("levels")).unwrap_or(1), powercasting);
            class.hit_dice_used = uint(data.get("hitDiceUsed")).unwrap_or(0);
            Item::new(name, ItemData::Class(class))
        }
        "power" => {
            let school = string(data.get("school")).and_then(|s| s.parse::<PowerSchool>().ok());
            match school {
                Some(school) => {
                    let level = uint(data.get("level")).unwrap_or(0).min(9) as u8;
                    Item::power(name, school, level)
                }
                None => {
                    debug!(name, "power without a known school is not tallied");
                    Item::new(name, ItemData::Other(kind.to_string()))
                }
            }
        }
        other => match other.parse::<PhysicalCategory>() {
            Ok(category) => Item::physical(
                name,
                category,
                number(data.get("quantity")).unwrap_or(1.0),
                number(data.get("weight")).unwrap_or(0.0),
            ),
            Err(_) => Item::new(name, ItemData::Other(other.to_string())),
        },
    }
}

fn donor_saves(saves: &Value) -> Option<ByAbility<i32>> {
    let mut values = [0; 6];
    for (slot, ability) in values.iter_mut().zip(Ability::ALL) {
        *slot = int(saves.get(ability.as_ref()))?;
    }
    Some(ByAbility::new(values))
}

fn polymorph(donor: &Value) -> Option<PolymorphDonor> {
    if !donor.is_object() {
        return None;
    }
    let saves = donor.get("saves").and_then(|saves| {
        let parsed = donor_saves(saves);
        if parsed.is_none() {
            debug!("ignoring incomplete polymorph saves");
        }
        parsed
    });
    let skills = donor.get("skills").and_then(Value::as_object).map(|skills| {
        skills
            .iter()
            .filter_map(|(code, value)| {
                let skill = code.parse::<Skill>().ok()?;
                Some((skill, Proficiency::from_multiplier(number(Some(value))?)))
            })
            .collect()
    });
    Some(PolymorphDonor { saves, skills })
}
