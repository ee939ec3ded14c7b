//! Guard - Hit chance, defend markers and shield charges
//!
//! Hit chance formula:
//! `accuracy + blessed bonus - cursed penalty - strike penalty`, clamped to
//! `[min_hit_chance, 100]`.

use crate::actor::{Actor, Stat};
use crate::config::CombatConstants;
use crate::event::CombatEvent;
use crate::status::EffectKind;

/// Percent chance for the attacker to land a hit
pub fn hit_chance(attacker: &Actor, accuracy_penalty: f64, constants: &CombatConstants) -> f64 {
    let mut chance = attacker.stat(Stat::Accuracy) - accuracy_penalty;
    if attacker.has_status(EffectKind::Blessed) {
        chance += constants.blessed_accuracy_bonus;
    }
    if attacker.has_status(EffectKind::Cursed) {
        chance -= constants.cursed_accuracy_penalty;
    }
    chance.clamp(constants.min_hit_chance, 100.0)
}

/// Remove a one-shot marker, returning whether it was present
pub fn consume_marker(actor: &mut Actor, kind: EffectKind) -> bool {
    actor.status_effects.remove(&kind).is_some()
}

/// Spend one shield charge if any remain
pub fn absorb_with_shield(actor: &mut Actor) -> bool {
    match actor.status_effects.get_mut(&EffectKind::Shield) {
        Some(charges) if *charges > 1 => {
            *charges -= 1;
            true
        }
        Some(_) => {
            actor.status_effects.remove(&EffectKind::Shield);
            true
        }
        None => false,
    }
}

/// Spend one shield charge on behalf of an external caller
pub fn consume_shield(actor: &mut Actor) -> CombatEvent {
    if !absorb_with_shield(actor) {
        return CombatEvent::status(
            &actor.name,
            "shield_failed",
            0,
            0.0,
            format!(
                "{} {} no shield to spend.",
                actor.subject(),
                actor.verb("have", "has")
            ),
        );
    }

    let remaining = actor.status(EffectKind::Shield).unwrap_or(0);
    let message = if remaining == 0 {
        format!("{} shield shatters.", actor.possessive())
    } else {
        format!("{} shield holds ({remaining} left).", actor.possessive())
    };
    CombatEvent::status(&actor.name, "shield", remaining, 1.0, message)
}

/// Raise a guard: halve the next hit taken and strengthen the next attack
pub fn brace(actor: &mut Actor) -> CombatEvent {
    actor.status_effects.insert(EffectKind::DefendDamage, 1);
    actor.status_effects.insert(EffectKind::DefendAttack, 1);
    CombatEvent::status(
        &actor.name,
        "defend",
        1,
        1.0,
        format!("{} {} up a guard.", actor.subject(), actor.verb("put", "puts")),
    )
}
