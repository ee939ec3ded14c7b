//! End-to-end combat scenarios driven through the public API

use combat_core::prelude::*;
use combat_core::{clear_status_effect, CombatConstants};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

#[test]
fn attack_five_against_defense_one() {
    let rules = CombatRules::default();
    let mut hero = Actor::player("Hero").with_stat(Stat::Attack, 5.0);
    let mut goblin = Actor::new("Goblin")
        .with_health(8.0)
        .with_stat(Stat::Defense, 1.0);

    let event = resolve_attack(&mut hero, &mut goblin, &rules, &mut rng(1));

    match event {
        CombatEvent::AttackResolved {
            damage, defeated, hit, ..
        } => {
            assert!(hit);
            assert!((damage - 4.0).abs() < f64::EPSILON);
            assert!(!defeated);
        }
        other => panic!("unexpected event {other:?}"),
    }
    assert!((goblin.health() - 4.0).abs() < f64::EPSILON);
}

#[test]
fn last_poison_tick_removes_the_effect() {
    let rules = CombatRules::default();
    let mut hero = Actor::player("Hero").with_health(20.0);
    add_status_effect(&mut hero, EffectKind::Poison, 1, None, &rules, &mut rng(1)).unwrap();

    let outcome = apply_status_effects(&mut hero, &rules);

    assert!((hero.health() - 17.0).abs() < f64::EPSILON);
    assert!(!hero.has_status(EffectKind::Poison));
    assert_eq!(outcome.events.len(), 1);
    assert!(outcome.events[0].message().contains("fades"));
}

#[test]
fn faster_actor_escapes_without_granting_advantage() {
    let rules = CombatRules::default();
    let mut hero = Actor::player("Hero").with_stat(Stat::Speed, 15.0);
    let mut slime = Actor::new("Slime").with_stat(Stat::Speed, 5.0);

    let events = resolve_player_action(&mut hero, &mut slime, &PlayerAction::Flee, &rules, &mut rng(1));

    assert_eq!(events.len(), 1);
    assert!(matches!(
        &events[0],
        CombatEvent::StatusApplied { status, value, .. } if status == "flee" && *value == 1.0
    ));
    assert!(!slime.has_status(EffectKind::Advantage));
}

#[test]
fn four_fatigue_stacks_expire_together() {
    let rules = CombatRules::default();
    let mut hero = Actor::player("Hero");
    for _ in 0..4 {
        add_status_effect(&mut hero, EffectKind::AudienceFatigue, 3, None, &rules, &mut rng(1))
            .unwrap();
    }
    assert_eq!(hero.status(EffectKind::AudienceFatigue), Some(4));

    apply_status_effects(&mut hero, &rules);
    apply_status_effects(&mut hero, &rules);
    assert_eq!(hero.status(EffectKind::AudienceFatigue), Some(4));

    apply_status_effects(&mut hero, &rules);
    assert!(!hero.has_status(EffectKind::AudienceFatigue));
    assert!(hero.stack_pools.is_empty());
}

#[test]
fn elite_resistance_starts_on_floor_ten() {
    let rules = CombatRules::default();
    let mut shallow = Actor::new("Lich").with_rarity(Rarity::Elite).on_floor(9);
    let mut deep = Actor::new("Lich").with_rarity(Rarity::Elite).on_floor(10);

    add_status_effect(&mut shallow, EffectKind::Burn, 4, None, &rules, &mut rng(1)).unwrap();
    add_status_effect(&mut deep, EffectKind::Burn, 4, None, &rules, &mut rng(1)).unwrap();

    assert_eq!(shallow.status(EffectKind::Burn), Some(4));
    assert_eq!(deep.status(EffectKind::Burn), Some(2));
}

#[test]
fn reversible_speed_restored_after_expiry_and_reapplication() {
    let rules = CombatRules::default();
    let mut hero = Actor::player("Hero").with_stat(Stat::Speed, 10.0);

    add_status_effect(&mut hero, EffectKind::CompressionSickness, 2, None, &rules, &mut rng(1))
        .unwrap();
    apply_status_effects(&mut hero, &rules);
    add_status_effect(&mut hero, EffectKind::CompressionSickness, 2, None, &rules, &mut rng(1))
        .unwrap();
    assert!((hero.stat(Stat::Speed) - 9.0).abs() < 1e-9);

    apply_status_effects(&mut hero, &rules);
    apply_status_effects(&mut hero, &rules);
    assert!((hero.stat(Stat::Speed) - 10.0).abs() < 1e-9);
    assert!(hero.shadows.is_empty());
}

#[test]
fn cleared_reversible_can_be_reapplied() {
    let rules = CombatRules::default();
    let mut hero = Actor::player("Hero").with_stat(Stat::Attack, 10.0);

    add_status_effect(&mut hero, EffectKind::Inspire, 3, None, &rules, &mut rng(1)).unwrap();
    clear_status_effect(&mut hero, EffectKind::Inspire, &rules);
    add_status_effect(&mut hero, EffectKind::Inspire, 3, None, &rules, &mut rng(1)).unwrap();

    assert!((hero.stat(Stat::Attack) - 13.0).abs() < f64::EPSILON);
}

#[test]
fn reflection_between_two_reflectors_stops_after_one_hop() {
    let rules = CombatRules {
        constants: CombatConstants {
            reflection_chance: 1.0,
            ..CombatConstants::default()
        },
        ..CombatRules::default()
    };
    let mut hero = Actor::player("Hero").with_health(30.0);
    let mut imp = Actor::new("Imp").with_health(30.0);
    hero.status_effects.insert(EffectKind::SpitefulReflection, 3);
    imp.status_effects.insert(EffectKind::SpitefulReflection, 3);

    let events = add_status_effect(
        &mut imp,
        EffectKind::BloodTorrent,
        2,
        Some(&mut hero),
        &rules,
        &mut rng(1),
    )
    .unwrap();

    assert_eq!(events.len(), 2);
    assert_eq!(imp.status(EffectKind::BloodTorrent), Some(1));
    assert_eq!(hero.status(EffectKind::BloodTorrent), Some(1));
}

#[test]
fn reflection_never_fires_at_zero_chance() {
    let rules = CombatRules {
        constants: CombatConstants {
            reflection_chance: 0.0,
            ..CombatConstants::default()
        },
        ..CombatRules::default()
    };
    let mut hero = Actor::player("Hero");
    let mut imp = Actor::new("Imp");
    imp.status_effects.insert(EffectKind::SpitefulReflection, 3);

    add_status_effect(&mut imp, EffectKind::Poison, 2, Some(&mut hero), &rules, &mut rng(1))
        .unwrap();
    assert!(!hero.has_status(EffectKind::Poison));
}

#[test]
fn stunned_enemy_loses_its_turn() {
    let rules = CombatRules::default();
    let mut rng = rng(11);
    let mut hero = Actor::player("Hero").with_health(30.0).with_stat(Stat::Attack, 4.0);
    let mut orc = Actor::new("Orc").with_health(30.0).with_stat(Stat::Attack, 6.0);

    add_status_effect(&mut orc, EffectKind::Stun, 1, Some(&mut hero), &rules, &mut rng).unwrap();

    let tick = apply_status_effects(&mut orc, &rules);
    assert!(tick.skip_turn);
    let tick = apply_status_effects(&mut orc, &rules);
    assert!(!tick.skip_turn);

    let events = resolve_enemy_turn(&mut orc, &mut hero, &rules, &mut rng);
    assert!(matches!(events[0], CombatEvent::IntentTelegraphed { .. }));
}

#[test]
fn rules_file_drives_resolution() {
    let rules = CombatRules::parse(
        r#"
[constants]
potion_heal = 5

[[effects]]
kind = "poison"
name = "Venom"
tick_damage = 7.0
"#,
    )
    .unwrap();

    let mut hero = Actor::player("Hero").with_health(40.0).with_item("health_potion");
    add_status_effect(&mut hero, EffectKind::Poison, 2, None, &rules, &mut rng(1)).unwrap();
    let outcome = apply_status_effects(&mut hero, &rules);
    assert!((hero.health() - 33.0).abs() < f64::EPSILON);
    assert!(outcome.events[0].message().contains("Venom"));

    let mut rat = Actor::new("Rat");
    resolve_player_action(&mut hero, &mut rat, &PlayerAction::UseHealthPotion, &rules, &mut rng(1));
    assert!((hero.health() - 38.0).abs() < f64::EPSILON);
}

#[test]
fn negative_duration_reports_caller_misuse() {
    let rules = CombatRules::default();
    let mut hero = Actor::player("Hero");
    let err = add_status_effect(&mut hero, EffectKind::Freeze, -3, None, &rules, &mut rng(1))
        .unwrap_err();
    assert_eq!(err.severity(), combat_core::ErrorSeverity::CallerMisuse);
}
