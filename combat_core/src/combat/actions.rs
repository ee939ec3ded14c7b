//! Player actions and item handling

use super::attack::resolve_attack;
use crate::actor::{Actor, Stat};
use crate::config::CombatRules;
use crate::defense::brace;
use crate::event::CombatEvent;
use crate::status::{cleanse_debuffs, EffectKind};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Action chosen by the player for one turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerAction {
    Attack,
    Defend,
    UseHealthPotion,
    UseCleansingDraught,
    Flee,
    /// Anything the input layer could not map
    Unknown(String),
}

impl PlayerAction {
    /// Map an input command, unrecognised commands become [`PlayerAction::Unknown`]
    pub fn parse(input: &str) -> Self {
        match input.trim().to_ascii_lowercase().as_str() {
            "attack" | "a" => PlayerAction::Attack,
            "defend" | "d" => PlayerAction::Defend,
            "use_health_potion" | "potion" | "p" => PlayerAction::UseHealthPotion,
            "use_cleansing_draught" | "cleanse" | "c" => PlayerAction::UseCleansingDraught,
            "flee" | "f" => PlayerAction::Flee,
            _ => PlayerAction::Unknown(input.to_string()),
        }
    }
}

impl FromStr for PlayerAction {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(PlayerAction::parse(s))
    }
}

impl fmt::Display for PlayerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerAction::Attack => f.write_str("attack"),
            PlayerAction::Defend => f.write_str("defend"),
            PlayerAction::UseHealthPotion => f.write_str("use_health_potion"),
            PlayerAction::UseCleansingDraught => f.write_str("use_cleansing_draught"),
            PlayerAction::Flee => f.write_str("flee"),
            PlayerAction::Unknown(raw) => write!(f, "unknown({raw})"),
        }
    }
}

/// Resolve one player action against `opponent`.
///
/// On an attack, each living companion attacks after the primary in order.
/// Companions whose latest tick lost them the turn sit it out.
pub fn resolve_player_action(
    actor: &mut Actor,
    opponent: &mut Actor,
    action: &PlayerAction,
    rules: &CombatRules,
    rng: &mut impl Rng,
) -> Vec<CombatEvent> {
    tracing::debug!(actor = %actor.name, %action, "player action");

    match action {
        PlayerAction::Attack => {
            let mut events = vec![resolve_attack(actor, opponent, rules, rng)];
            for companion in actor.companions.iter_mut() {
                if opponent.is_defeated() {
                    break;
                }
                if companion.is_defeated() || companion.turn_lost {
                    continue;
                }
                events.push(resolve_attack(companion, opponent, rules, rng));
            }
            events
        }
        PlayerAction::Defend => vec![brace(actor)],
        PlayerAction::UseHealthPotion => vec![use_health_potion(actor, rules)],
        PlayerAction::UseCleansingDraught => use_cleansing_draught(actor, rules),
        PlayerAction::Flee => vec![flee(actor, opponent)],
        PlayerAction::Unknown(raw) => vec![CombatEvent::status(
            &actor.name,
            "unknown",
            0,
            0.0,
            format!("'{raw}' is not something you can do right now."),
        )],
    }
}

/// Drink a health potion. Nothing is consumed when it would heal nothing.
pub fn use_health_potion(actor: &mut Actor, rules: &CombatRules) -> CombatEvent {
    let constants = &rules.constants;
    let headroom = (actor.max_health() - actor.health()).max(0.0);
    let amount = (constants.potion_heal * actor.stat(Stat::HealMultiplier)).min(headroom);

    if !actor.has_item(&constants.potion_item) || amount <= 0.0 {
        let reason = if actor.has_item(&constants.potion_item) {
            "would have no effect"
        } else {
            "is not in your pack"
        };
        return CombatEvent::status(
            &actor.name,
            "heal_failed",
            0,
            0.0,
            format!("The potion {reason}."),
        );
    }

    actor.take_item(&constants.potion_item);
    let healed = actor.heal(amount);
    CombatEvent::status(
        &actor.name,
        "healed",
        0,
        healed,
        format!("{} {} {healed} health.", actor.subject(), actor.verb("recover", "recovers")),
    )
}

/// Drink a cleansing draught, removing every debuff
pub fn use_cleansing_draught(actor: &mut Actor, rules: &CombatRules) -> Vec<CombatEvent> {
    if !actor.take_item(&rules.constants.cleansing_item) {
        return vec![CombatEvent::status(
            &actor.name,
            "cleanse_failed",
            0,
            0.0,
            format!("{} {} no cleansing draught.", actor.subject(), actor.verb("have", "has")),
        )];
    }

    let cleared = cleanse_debuffs(actor, rules);
    let mut events = vec![CombatEvent::status(
        &actor.name,
        "cleansed",
        0,
        cleared.len() as f64,
        format!("{} {} a cleansing draught.", actor.subject(), actor.verb("drink", "drinks")),
    )];
    events.extend(cleared);
    events
}

/// Attempt to escape. Succeeds iff the actor is strictly faster; failure
/// hands the opponent advantage on its next attack.
pub fn flee(actor: &mut Actor, opponent: &mut Actor) -> CombatEvent {
    let escaped = actor.stat(Stat::Speed) > opponent.stat(Stat::Speed);
    if escaped {
        return CombatEvent::status(
            &actor.name,
            "flee",
            0,
            1.0,
            format!("{} {} away!", actor.subject(), actor.verb("escape", "escapes")),
        );
    }

    opponent.status_effects.insert(EffectKind::Advantage, 1);
    CombatEvent::status(
        &actor.name,
        "flee",
        0,
        0.0,
        format!(
            "{} {} to escape! {} {} the advantage.",
            actor.subject(),
            actor.verb("fail", "fails"),
            opponent.subject(),
            opponent.verb("gain", "gains")
        ),
    )
}

/// Add `amount` copies of an item to the owner's inventory
pub fn award_item(owner: &mut Actor, item: &str, amount: u32) -> CombatEvent {
    owner
        .inventory
        .extend(std::iter::repeat(item.to_string()).take(amount as usize));
    CombatEvent::ItemGained {
        owner: owner.name.clone(),
        item: item.to_string(),
        amount,
        message: format!("{} {} {amount} {item}.", owner.subject(), owner.verb("gain", "gains")),
    }
}
