//! Per-turn status tick processing

use super::{pool, reversible, EffectKind};
use crate::actor::Actor;
use crate::config::CombatRules;
use crate::event::CombatEvent;
use crate::status::apply::clear_status_effect;
use crate::types::ActorTrait;
use tracing::trace;

/// Result of one tick pass over an actor
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickOutcome {
    /// Set when a control-loss effect consumed the actor's turn
    pub skip_turn: bool,
    pub events: Vec<CombatEvent>,
}

/// Tick handler: mutate the actor for one turn, push events, return whether
/// the actor loses its turn
type TickHandler = fn(&mut Actor, EffectKind, &CombatRules, &mut Vec<CombatEvent>) -> bool;

fn handler_for(kind: EffectKind) -> TickHandler {
    use EffectKind::*;
    match kind {
        Freeze | Stun => tick_control_loss,
        Poison | Burn | Bleed => tick_damage_over_time,
        BloodTorrent | EntropicDebt => tick_stacking_damage,
        CreepingCorruption => tick_corruption,
        CompressionSickness | MiasmaAura | HasteDysphoria | Inspire => tick_reversible,
        Shield | Blessed | Cursed | BeetleBane | SpitefulReflection => tick_timed,
        AudienceFatigue | SoulTax | FesterMark => tick_pool,
        SpotlightPing | Marked | DefendDamage | DefendAttack | Advantage => tick_none,
    }
}

/// Run every active effect's handler once, in [`EffectKind::TICK_ORDER`]
pub fn apply_status_effects(actor: &mut Actor, rules: &CombatRules) -> TickOutcome {
    let mut outcome = TickOutcome::default();

    for kind in EffectKind::TICK_ORDER {
        // Earlier handlers may have removed this one
        if !actor.has_status(kind) {
            continue;
        }
        let handler = handler_for(kind);
        outcome.skip_turn |= handler(actor, kind, rules, &mut outcome.events);
    }
    actor.turn_lost = outcome.skip_turn;

    trace!(
        actor = %actor.name,
        skip_turn = outcome.skip_turn,
        events = outcome.events.len(),
        "status tick complete"
    );
    outcome
}

/// Decrement a countdown, removing the entry at zero. Returns what is left.
fn count_down(actor: &mut Actor, kind: EffectKind) -> u32 {
    let remaining = actor.status(kind).unwrap_or(0).saturating_sub(1);
    if remaining == 0 {
        actor.status_effects.remove(&kind);
    } else {
        actor.status_effects.insert(kind, remaining);
    }
    remaining
}

fn ticked(
    actor: &Actor,
    kind: EffectKind,
    remaining: u32,
    damage: f64,
    message: String,
) -> CombatEvent {
    CombatEvent::StatusTicked {
        target: actor.name.clone(),
        status: kind.id().to_string(),
        remaining,
        damage,
        expired: remaining == 0,
        message,
    }
}

fn tick_control_loss(
    actor: &mut Actor,
    kind: EffectKind,
    _rules: &CombatRules,
    events: &mut Vec<CombatEvent>,
) -> bool {
    let remaining = count_down(actor, kind);
    let subject = actor.subject();
    let message = match (kind, remaining) {
        (EffectKind::Freeze, 0) => format!("{subject} {} free of the ice.", actor.verb("break", "breaks")),
        (EffectKind::Freeze, _) => format!("{subject} {} frozen and cannot act.", actor.verb("are", "is")),
        (_, 0) => format!("{subject} {} from the stun.", actor.verb("recover", "recovers")),
        _ => format!("{subject} {} stunned and cannot act.", actor.verb("are", "is")),
    };
    events.push(ticked(actor, kind, remaining, 0.0, message));
    true
}

fn deal_tick_damage(
    actor: &mut Actor,
    kind: EffectKind,
    damage: f64,
    rules: &CombatRules,
    events: &mut Vec<CombatEvent>,
) {
    actor.take_damage(damage);
    let remaining = count_down(actor, kind);
    let name = rules.effects.name(kind);

    let mut message = format!(
        "{} {} {damage} damage from {name}.",
        actor.subject(),
        actor.verb("take", "takes")
    );
    if remaining == 0 {
        message.push_str(&format!(" The {} fades.", name.to_lowercase()));
    }
    trace!(actor = %actor.name, %kind, damage, remaining, "damage tick");
    events.push(ticked(actor, kind, remaining, damage, message));
}

fn tick_damage_over_time(
    actor: &mut Actor,
    kind: EffectKind,
    rules: &CombatRules,
    events: &mut Vec<CombatEvent>,
) -> bool {
    let mut damage = rules.effects.tick_damage(kind);
    if kind == EffectKind::Burn && actor.has_trait(ActorTrait::FireVulnerable) {
        damage *= rules.constants.fire_vulnerability_multiplier;
    }
    deal_tick_damage(actor, kind, damage, rules, events);
    false
}

fn tick_stacking_damage(
    actor: &mut Actor,
    kind: EffectKind,
    rules: &CombatRules,
    events: &mut Vec<CombatEvent>,
) -> bool {
    let stacks = f64::from(actor.status(kind).unwrap_or(0));
    let per_stack = rules.effects.tick_damage(kind);
    let damage = match kind {
        EffectKind::EntropicDebt => (per_stack * actor.max_health() * stacks).ceil(),
        _ => per_stack * stacks,
    };
    deal_tick_damage(actor, kind, damage, rules, events);
    false
}

/// Shadows are normally created on application; state loaded from a save
/// may carry the status without one.
fn ensure_active(actor: &mut Actor, kind: EffectKind, rules: &CombatRules) {
    if !actor.shadows.contains_key(&kind) {
        reversible::activate(actor, kind, &rules.constants);
    }
}

fn expire_reversible(
    actor: &mut Actor,
    kind: EffectKind,
    rules: &CombatRules,
    events: &mut Vec<CombatEvent>,
) {
    let remaining = count_down(actor, kind);
    let name = rules.effects.name(kind);
    let message = if remaining == 0 {
        reversible::revert(actor, kind);
        format!("{} {name} wears off.", actor.possessive())
    } else {
        format!("{} {} under {name} ({remaining} left).", actor.subject(), actor.verb("are", "is"))
    };
    events.push(ticked(actor, kind, remaining, 0.0, message));
}

fn tick_reversible(
    actor: &mut Actor,
    kind: EffectKind,
    rules: &CombatRules,
    events: &mut Vec<CombatEvent>,
) -> bool {
    ensure_active(actor, kind, rules);
    expire_reversible(actor, kind, rules, events);
    false
}

fn tick_corruption(
    actor: &mut Actor,
    kind: EffectKind,
    rules: &CombatRules,
    events: &mut Vec<CombatEvent>,
) -> bool {
    ensure_active(actor, kind, rules);
    for stripped in [EffectKind::Blessed, EffectKind::Inspire] {
        if let Some(event) = clear_status_effect(actor, stripped, rules) {
            events.push(event);
        }
    }
    expire_reversible(actor, kind, rules, events);
    false
}

fn tick_timed(
    actor: &mut Actor,
    kind: EffectKind,
    rules: &CombatRules,
    events: &mut Vec<CombatEvent>,
) -> bool {
    let remaining = count_down(actor, kind);
    let name = rules.effects.name(kind);
    let message = if remaining == 0 {
        format!("{} {name} fades.", actor.possessive())
    } else {
        format!("{} {name} lingers ({remaining} left).", actor.possessive())
    };
    events.push(ticked(actor, kind, remaining, 0.0, message));
    false
}

fn tick_pool(
    actor: &mut Actor,
    kind: EffectKind,
    rules: &CombatRules,
    events: &mut Vec<CombatEvent>,
) -> bool {
    let (remaining, expired) = pool::tick(actor, kind);
    let name = rules.effects.name(kind);
    let message = match (remaining, expired) {
        (0, _) => format!("{} {name} is gone.", actor.possessive()),
        (_, 0) => format!("{} {name} persists.", actor.possessive()),
        (_, n) => format!("{n} {name} stack(s) expire."),
    };
    events.push(ticked(actor, kind, remaining, 0.0, message));
    false
}

/// Persistent conditions and one-shot markers are consumed elsewhere
fn tick_none(
    _actor: &mut Actor,
    _kind: EffectKind,
    _rules: &CombatRules,
    _events: &mut Vec<CombatEvent>,
) -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::{Shadow, Stat};

    #[test]
    fn test_poison_single_tick() {
        let rules = CombatRules::default();
        let mut goblin = Actor::new("Goblin").with_health(10.0);
        goblin.status_effects.insert(EffectKind::Poison, 1);

        let outcome = apply_status_effects(&mut goblin, &rules);
        assert!(!outcome.skip_turn);
        assert!((goblin.health() - 7.0).abs() < f64::EPSILON);
        assert!(!goblin.has_status(EffectKind::Poison));
        assert!(outcome.events[0].message().ends_with("The poison fades."));
    }

    #[test]
    fn test_burn_doubles_on_fire_vulnerable() {
        let rules = CombatRules::default();
        let mut treant = Actor::new("Treant")
            .with_health(30.0)
            .with_trait(ActorTrait::FireVulnerable);
        treant.status_effects.insert(EffectKind::Burn, 2);
        apply_status_effects(&mut treant, &rules);
        assert!((treant.health() - 22.0).abs() < f64::EPSILON);
        assert_eq!(treant.status(EffectKind::Burn), Some(1));
    }

    #[test]
    fn test_entropic_debt_rounds_up() {
        let rules = CombatRules::default();
        let mut golem = Actor::new("Golem").with_health(150.0);
        golem.status_effects.insert(EffectKind::EntropicDebt, 3);
        let outcome = apply_status_effects(&mut golem, &rules);
        // ceil(0.01 * 150 * 3) = 5
        assert!((outcome.events[0].damage() - 5.0).abs() < f64::EPSILON);
        assert_eq!(golem.status(EffectKind::EntropicDebt), Some(2));
    }

    #[test]
    fn test_stun_skips_then_recovers() {
        let rules = CombatRules::default();
        let mut hero = Actor::player("Hero");
        hero.status_effects.insert(EffectKind::Stun, 1);

        let outcome = apply_status_effects(&mut hero, &rules);
        assert!(outcome.skip_turn);
        assert_eq!(outcome.events[0].message(), "You recover from the stun.");

        let outcome = apply_status_effects(&mut hero, &rules);
        assert!(!outcome.skip_turn);
        assert!(!hero.turn_lost);
    }

    #[test]
    fn test_reversible_expiry_restores_baseline() {
        let rules = CombatRules::default();
        let mut hero = Actor::player("Hero").with_stat(Stat::Attack, 10.0);
        hero.status_effects.insert(EffectKind::Inspire, 2);

        apply_status_effects(&mut hero, &rules);
        assert!((hero.stat(Stat::Attack) - 13.0).abs() < f64::EPSILON);
        apply_status_effects(&mut hero, &rules);
        assert!((hero.stat(Stat::Attack) - 10.0).abs() < f64::EPSILON);
        assert!(hero.shadows.is_empty());
    }

    #[test]
    fn test_corruption_strips_buffs() {
        let rules = CombatRules::default();
        let mut hero = Actor::player("Hero")
            .with_stat(Stat::Vision, 4.0)
            .with_stat(Stat::Attack, 10.0);
        hero.status_effects.insert(EffectKind::Inspire, 3);
        hero.shadows.insert(EffectKind::Inspire, Shadow::capture(10.0, 13.0));
        hero.set_stat(Stat::Attack, 13.0);
        hero.status_effects.insert(EffectKind::Blessed, 3);
        hero.status_effects.insert(EffectKind::CreepingCorruption, 2);

        apply_status_effects(&mut hero, &rules);
        assert!(!hero.has_status(EffectKind::Blessed));
        assert!(!hero.has_status(EffectKind::Inspire));
        assert!((hero.stat(Stat::Attack) - 10.0).abs() < f64::EPSILON);
        assert!((hero.stat(Stat::Vision) - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_active_shadow_without_baseline_keeps_value() {
        let rules = CombatRules::default();
        let mut hero = Actor::player("Hero").with_stat(Stat::Speed, 7.0);
        hero.status_effects.insert(EffectKind::CompressionSickness, 1);
        hero.shadows.insert(
            EffectKind::CompressionSickness,
            Shadow {
                active: true,
                baseline: None,
                applied: None,
            },
        );
        apply_status_effects(&mut hero, &rules);
        assert!((hero.stat(Stat::Speed) - 7.0).abs() < f64::EPSILON);
        assert!(!hero.has_status(EffectKind::CompressionSickness));
    }

    #[test]
    fn test_markers_and_persistent_untouched() {
        let rules = CombatRules::default();
        let mut hero = Actor::player("Hero");
        hero.status_effects.insert(EffectKind::Marked, 1);
        hero.status_effects.insert(EffectKind::DefendDamage, 1);
        let outcome = apply_status_effects(&mut hero, &rules);
        assert!(outcome.events.is_empty());
        assert_eq!(hero.status(EffectKind::Marked), Some(1));
        assert_eq!(hero.status(EffectKind::DefendDamage), Some(1));
    }

    #[test]
    fn test_bleed_two_per_tick() {
        let rules = CombatRules::default();
        let mut hero = Actor::player("Hero").with_health(10.0);
        hero.status_effects.insert(EffectKind::Bleed, 2);

        let outcome = apply_status_effects(&mut hero, &rules);
        assert!((hero.health() - 8.0).abs() < f64::EPSILON);
        assert_eq!(outcome.events[0].message(), "You take 2 damage from Bleed.");
        apply_status_effects(&mut hero, &rules);
        assert!((hero.health() - 6.0).abs() < f64::EPSILON);
        assert!(!hero.has_status(EffectKind::Bleed));
    }

    #[test]
    fn test_freeze_skips_then_breaks_free() {
        let rules = CombatRules::default();
        let mut troll = Actor::new("Troll");
        troll.status_effects.insert(EffectKind::Freeze, 2);

        let outcome = apply_status_effects(&mut troll, &rules);
        assert!(outcome.skip_turn);
        assert_eq!(outcome.events[0].message(), "Troll is frozen and cannot act.");

        let outcome = apply_status_effects(&mut troll, &rules);
        assert!(outcome.skip_turn);
        assert_eq!(outcome.events[0].message(), "Troll breaks free of the ice.");
        assert!(!troll.has_status(EffectKind::Freeze));

        assert!(!apply_status_effects(&mut troll, &rules).skip_turn);
    }

    #[test]
    fn test_spotlight_ping_persists() {
        let rules = CombatRules::default();
        let mut hero = Actor::player("Hero");
        hero.status_effects.insert(EffectKind::SpotlightPing, 1);
        for _ in 0..5 {
            let outcome = apply_status_effects(&mut hero, &rules);
            assert!(outcome.events.is_empty());
        }
        assert_eq!(hero.status(EffectKind::SpotlightPing), Some(1));
    }

    #[test]
    fn test_shield_charges_tick_down() {
        let rules = CombatRules::default();
        let mut hero = Actor::player("Hero");
        hero.status_effects.insert(EffectKind::Shield, 2);
        apply_status_effects(&mut hero, &rules);
        assert_eq!(hero.status(EffectKind::Shield), Some(1));
    }
}
