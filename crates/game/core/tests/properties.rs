use sw5e_core::{
    Ability, ActorKind, ActorSnapshot, DerivedStatsEngine, EngineConfig, FeatToggles, Item,
    PhysicalCategory, PowerSlotState, Powercasting, Skill, StandardTables,
};

fn recompute(actor: &ActorSnapshot) -> sw5e_core::DerivedStats {
    let tables = StandardTables::default();
    let config = EngineConfig::default();
    DerivedStatsEngine::new(&tables, &config).recompute(actor)
}

fn caster() -> ActorSnapshot {
    ActorSnapshot::builder(ActorKind::Character)
        .ability(Ability::Dex, 15, true)
        .ability(Ability::Wis, 17, false)
        .flags(FeatToggles::JACK_OF_ALL_TRADES | FeatToggles::OBSERVANT_FEAT)
        .item(Item::class("Consular", 7, Powercasting::Consular))
        .item(Item::class("Engineer", 3, Powercasting::Engineer))
        .item(Item::physical("Lightsaber", PhysicalCategory::Weapon, 1.0, 3.0))
        .power_slot(
            2,
            PowerSlotState {
                fvalue: Some(1),
                ..PowerSlotState::default()
            },
        )
        .xp(70_000)
        .build()
        .expect("valid snapshot")
}

#[test]
fn recompute_is_idempotent() {
    let actor = caster();
    let before = actor.clone();

    let first = recompute(&actor);
    let second = recompute(&actor);

    assert_eq!(first, second);
    assert_eq!(actor, before);
}

#[test]
fn ability_modifiers_floor() {
    let actor = ActorSnapshot::builder(ActorKind::Character)
        .ability(Ability::Str, 10, false)
        .ability(Ability::Dex, 20, false)
        .ability(Ability::Con, 8, false)
        .ability(Ability::Int, 9, false)
        .ability(Ability::Wis, 1, false)
        .build()
        .expect("valid snapshot");
    let stats = recompute(&actor);

    assert_eq!(stats.abilities[Ability::Str].modifier, 0);
    assert_eq!(stats.abilities[Ability::Dex].modifier, 5);
    assert_eq!(stats.abilities[Ability::Con].modifier, -1);
    assert_eq!(stats.abilities[Ability::Int].modifier, -1);
    assert_eq!(stats.abilities[Ability::Wis].modifier, -5);
}

#[test]
fn feat_bumps_on_untrained_skills() {
    // Level 5 gives +3, so half proficiency is 1.5 and rounding shows
    let base = || {
        ActorSnapshot::builder(ActorKind::Character).item(Item::class(
            "Berserker",
            5,
            Powercasting::None,
        ))
    };

    let jack = recompute(
        &base()
            .flags(FeatToggles::JACK_OF_ALL_TRADES)
            .build()
            .expect("valid snapshot"),
    );
    assert_eq!(jack.skills[&Skill::Athletics].prof, 1);
    assert_eq!(jack.skills[&Skill::Lore].prof, 1);

    let athlete = recompute(
        &base()
            .flags(FeatToggles::REMARKABLE_ATHLETE)
            .build()
            .expect("valid snapshot"),
    );
    assert_eq!(athlete.skills[&Skill::Athletics].prof, 2);
    assert_eq!(athlete.skills[&Skill::Lore].prof, 0);
}

#[test]
fn multiclass_force_level_is_weighted() {
    let actor = ActorSnapshot::builder(ActorKind::Character)
        .item(Item::class("Consular", 3, Powercasting::Consular))
        .item(Item::class("Guardian", 2, Powercasting::Guardian))
        .build()
        .expect("valid snapshot");
    let powers = recompute(&actor).powers.expect("character has powers");

    assert_eq!(powers.force.classes, 2);
    // 9/9 * 3 + 5/9 * 2 = 4.11
    assert!((powers.force.multi() - 37.0 / 9.0).abs() < 1e-9);
    assert_eq!(powers.force.levels, 4);
    assert_eq!(powers.force_pool.level, 4);
}

#[test]
fn equal_levels_and_priority_keep_incumbent() {
    let higher = ActorSnapshot::builder(ActorKind::Character)
        .item(Item::class("Guardian", 4, Powercasting::Guardian))
        .item(Item::class("Sentinel", 4, Powercasting::Sentinel))
        .build()
        .expect("valid snapshot");
    let powers = recompute(&higher).powers.expect("character has powers");
    assert_eq!(powers.force.max_class, Powercasting::Sentinel);

    let same = ActorSnapshot::builder(ActorKind::Character)
        .item(Item::class("Consular", 4, Powercasting::Consular))
        .item(Item::class("Consular (second)", 4, Powercasting::Consular))
        .build()
        .expect("valid snapshot");
    let powers = recompute(&same).powers.expect("character has powers");
    assert_eq!(powers.force.max_class, Powercasting::Consular);
    assert_eq!(powers.force.max_class_levels, 4);
}

#[test]
fn npc_slots_are_always_full() {
    let stored = PowerSlotState {
        fvalue: Some(0),
        tvalue: Some(0),
        legacy_value: Some(0),
        ..PowerSlotState::default()
    };
    let actor = ActorSnapshot::builder(ActorKind::Npc)
        .challenge_rating(6.0)
        .powercasting(Powercasting::Engineer)
        .npc_power_levels(Some(5), Some(11))
        .power_slot(1, stored)
        .power_slot(3, stored)
        .power_slot(
            8,
            PowerSlotState {
                toverride: Some(2),
                ..stored
            },
        )
        .build()
        .expect("valid snapshot");
    let powers = recompute(&actor).powers.expect("npc has powers");

    for slot in &powers.slots {
        assert_eq!(slot.fvalue, slot.fmax);
        assert_eq!(slot.tvalue, slot.tmax);
    }
    assert_eq!(powers.slot(8).map(|s| s.tmax), Some(2));
    assert_eq!(powers.tech_pool.level, 11);
}

#[test]
fn encumbrance_threshold_is_strict() {
    // Strength 12 carries 180; two thirds is 120
    let actor = |weight: f64| {
        ActorSnapshot::builder(ActorKind::Character)
            .ability(Ability::Str, 12, false)
            .item(Item::physical("Crate", PhysicalCategory::Loot, 1.0, weight))
            .build()
            .expect("valid snapshot")
    };

    assert!(!recompute(&actor(120.0)).encumbrance.encumbered);
    assert!(recompute(&actor(121.0)).encumbrance.encumbered);
}

#[test]
fn slot_override_forces_maximum() {
    let actor = |fvalue: Option<u32>| {
        ActorSnapshot::builder(ActorKind::Character)
            .item(Item::class("Consular", 9, Powercasting::Consular))
            .power_slot(
                1,
                PowerSlotState {
                    foverride: Some(3),
                    fvalue,
                    ..PowerSlotState::default()
                },
            )
            .build()
            .expect("valid snapshot")
    };

    let fresh = recompute(&actor(None)).powers.expect("character has powers");
    assert_eq!(fresh.slot(1).map(|s| (s.fvalue, s.fmax)), Some((3, 3)));

    let spent = recompute(&actor(Some(1))).powers.expect("character has powers");
    assert_eq!(spent.slot(1).map(|s| (s.fvalue, s.fmax)), Some((1, 3)));

    let stale = recompute(&actor(Some(8))).powers.expect("character has powers");
    assert_eq!(stale.slot(1).map(|s| (s.fvalue, s.fmax)), Some((3, 3)));
}

#[test]
fn known_power_overflow_is_a_diagnostic() {
    let powers = (0..6).map(|i| Item::power(format!("Tech {i}"), sw5e_core::PowerSchool::Tech, 1));
    let actor = ActorSnapshot::builder(ActorKind::Character)
        .item(Item::class("Scout", 2, Powercasting::Scout))
        .items(powers)
        .tech(sw5e_core::PowerAttributes::tracked())
        .build()
        .expect("valid snapshot");
    let stats = recompute(&actor);

    assert_eq!(
        stats.diagnostics,
        vec![sw5e_core::Diagnostic::KnownPowersExceeded {
            track: sw5e_core::PowerTrack::Tech,
            known: 6,
            max: 4,
        }]
    );
    // Values are reported as computed, not reconciled
    let pool = stats.powers.expect("character has powers").tech_pool;
    assert_eq!(pool.known.map(|k| (k.value, k.max)), Some((6, 4)));
}
