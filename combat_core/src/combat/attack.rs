//! Attack resolution
//!
//! Steps:
//! 1. Effective attack: `floor(attack * multiplier)` plus flat bonuses
//!    (strike bonus, defend follow-up which is consumed)
//! 2. Hit roll against the clamped hit chance
//! 3. Crit roll, only on a hit and only when the attacker has crit chance
//! 4. `damage = max(0, attack - defense)`, doubled on a crit
//! 5. Defender's guard marker halves the hit, then a shield charge absorbs it
//! 6. Health floored at zero

use crate::actor::{Actor, Stat};
use crate::config::CombatRules;
use crate::defense::{absorb_with_shield, consume_marker, hit_chance};
use crate::event::CombatEvent;
use crate::status::EffectKind;
use rand::Rng;
use tracing::debug;

/// Shape of one swing
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Strike {
    pub multiplier: f64,
    pub bonus: f64,
    pub accuracy_penalty: f64,
}

impl Strike {
    pub const BASIC: Strike = Strike {
        multiplier: 1.0,
        bonus: 0.0,
        accuracy_penalty: 0.0,
    };

    pub fn heavy(rules: &CombatRules) -> Self {
        Strike {
            multiplier: rules.constants.heavy_attack_multiplier,
            ..Self::BASIC
        }
    }

    pub fn wild(rules: &CombatRules) -> Self {
        Strike {
            multiplier: rules.constants.wild_attack_multiplier,
            accuracy_penalty: rules.constants.wild_attack_accuracy_penalty,
            ..Self::BASIC
        }
    }

    pub fn with_bonus(self, bonus: f64) -> Self {
        Strike {
            bonus: self.bonus + bonus,
            ..self
        }
    }
}

/// Resolve a basic attack.
///
/// RNG: one hit draw, then one crit draw only when the hit landed and the
/// attacker's crit chance is positive.
pub fn resolve_attack(
    attacker: &mut Actor,
    defender: &mut Actor,
    rules: &CombatRules,
    rng: &mut impl Rng,
) -> CombatEvent {
    resolve_strike(attacker, defender, Strike::BASIC, rules, rng)
}

pub(crate) fn resolve_strike(
    attacker: &mut Actor,
    defender: &mut Actor,
    strike: Strike,
    rules: &CombatRules,
    rng: &mut impl Rng,
) -> CombatEvent {
    let constants = &rules.constants;

    let mut attack = attacker.stat(Stat::Attack);
    if strike.multiplier != 1.0 {
        attack = (attack * strike.multiplier).floor();
    }
    attack += strike.bonus;
    if consume_marker(attacker, EffectKind::DefendAttack) {
        attack += constants.defend_attack_bonus;
    }
    let defense = defender.stat(Stat::Defense);

    let chance = hit_chance(attacker, strike.accuracy_penalty, constants);
    let hit = rng.gen_range(0.0..100.0) < chance;
    let crit_chance = attacker.stat(Stat::Crit);
    let critical = hit && crit_chance > 0.0 && rng.gen_range(0.0..100.0) < crit_chance;

    let mut damage = 0.0;
    let mut shielded = false;
    if hit {
        damage = (attack - defense).max(0.0);
        if critical {
            damage *= constants.crit_multiplier;
        }
        if consume_marker(defender, EffectKind::DefendDamage) {
            damage = (damage * (1.0 - constants.defend_damage_reduction)).floor();
        }
        if damage > 0.0 && absorb_with_shield(defender) {
            shielded = true;
            damage = 0.0;
        }
        defender.take_damage(damage);
    }
    let defeated = defender.is_defeated();

    debug!(
        attacker = %attacker.name,
        defender = %defender.name,
        attack,
        defense,
        hit,
        critical,
        damage,
        "attack resolved"
    );

    let message = attack_message(attacker, defender, hit, critical, shielded, damage, defeated);
    CombatEvent::AttackResolved {
        attacker: attacker.name.clone(),
        defender: defender.name.clone(),
        damage,
        defeated,
        attack,
        defense,
        critical,
        hit,
        message,
    }
}

fn attack_message(
    attacker: &Actor,
    defender: &Actor,
    hit: bool,
    critical: bool,
    shielded: bool,
    damage: f64,
    defeated: bool,
) -> String {
    if !hit {
        return format!("{} {} {}.", attacker.subject(), attacker.verb("miss", "misses"), defender.object());
    }

    let mut message = String::new();
    if critical {
        message.push_str("Critical hit! ");
    }
    if shielded {
        message.push_str(&format!("{} shield absorbs the blow.", defender.possessive()));
    } else {
        message.push_str(&format!(
            "{} {} {} for {damage} damage.",
            attacker.subject(),
            attacker.verb("hit", "hits"),
            defender.object()
        ));
    }
    if defeated {
        message.push_str(&format!(" {} {} defeated!", defender.subject(), defender.verb("are", "is")));
    }
    message
}
