//! Enemy turn resolution

use super::attack::{resolve_strike, Strike};
use crate::actor::Actor;
use crate::config::CombatRules;
use crate::defense::{brace, consume_marker};
use crate::event::CombatEvent;
use crate::intent::{telegraph, EnemyAction};
use crate::status::EffectKind;
use rand::Rng;

/// Telegraph an intent, then carry it out against `player`.
///
/// Events: the telegraph first, then the action outcome. A defeated actor
/// produces a single `defeated` event and draws nothing from the RNG.
/// Any advantage is spent on this turn, and adds to the attack only when the
/// enemy strikes.
pub fn resolve_enemy_turn(
    actor: &mut Actor,
    player: &mut Actor,
    rules: &CombatRules,
    rng: &mut impl Rng,
) -> Vec<CombatEvent> {
    if actor.is_defeated() {
        return vec![CombatEvent::status(
            &actor.name,
            "defeated",
            0,
            0.0,
            format!("{} lies motionless.", actor.name),
        )];
    }

    // Advantage lasts exactly one turn, whatever the enemy does with it
    let advantaged = consume_marker(actor, EffectKind::Advantage);

    let telegraph = telegraph(actor, rules, rng);
    let mut events = vec![CombatEvent::IntentTelegraphed {
        actor: actor.name.clone(),
        intent: telegraph.intent,
        message: telegraph.message,
    }];

    let strike = match telegraph.action {
        EnemyAction::HeavyAttack => Some(Strike::heavy(rules)),
        EnemyAction::Attack => Some(Strike::BASIC),
        EnemyAction::WildAttack => Some(Strike::wild(rules)),
        EnemyAction::Defend => None,
    };

    match strike {
        Some(mut strike) => {
            if advantaged {
                strike = strike.with_bonus(rules.constants.advantage_attack_bonus);
            }
            events.push(resolve_strike(actor, player, strike, rules, rng));
        }
        None => events.push(brace(actor)),
    }

    actor.heavy_cooldown = if telegraph.action == EnemyAction::HeavyAttack {
        rules.constants.heavy_attack_cooldown
    } else {
        actor.heavy_cooldown.saturating_sub(1)
    };

    events
}
