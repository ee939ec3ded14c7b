//! Intent telegraph - weighted enemy intent selection
//!
//! Each enemy turn draws one of three intents using the archetype's weights,
//! maps it to a concrete action and produces the message shown to the player
//! before the action resolves.

use crate::actor::Actor;
use crate::config::{ArchetypeConfig, CombatRules};
use crate::error::EngineError;
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Telegraphed intent category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Aggressive,
    Defensive,
    Unpredictable,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Aggressive => "aggressive",
            Intent::Defensive => "defensive",
            Intent::Unpredictable => "unpredictable",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Concrete action an enemy takes after telegraphing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyAction {
    HeavyAttack,
    Attack,
    WildAttack,
    Defend,
}

/// Raw weight triple as written in config files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightTable {
    pub aggressive: u32,
    pub defensive: u32,
    pub unpredictable: u32,
}

/// Validated intent weights. Every weight is positive.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "WeightTable", into = "WeightTable")]
pub struct IntentWeights {
    table: WeightTable,
    distribution: WeightedIndex<u32>,
}

impl IntentWeights {
    pub fn new(aggressive: u32, defensive: u32, unpredictable: u32) -> Result<Self, EngineError> {
        let invalid = || EngineError::InvalidWeights {
            aggressive,
            defensive,
            unpredictable,
        };
        if aggressive == 0 || defensive == 0 || unpredictable == 0 {
            return Err(invalid());
        }
        let distribution =
            WeightedIndex::new([aggressive, defensive, unpredictable]).map_err(|_| invalid())?;
        Ok(IntentWeights {
            table: WeightTable {
                aggressive,
                defensive,
                unpredictable,
            },
            distribution,
        })
    }

    pub fn table(&self) -> WeightTable {
        self.table
    }

    /// Draw one intent
    pub fn choose(&self, rng: &mut impl Rng) -> Intent {
        match self.distribution.sample(rng) {
            0 => Intent::Aggressive,
            1 => Intent::Defensive,
            _ => Intent::Unpredictable,
        }
    }
}

impl Default for IntentWeights {
    fn default() -> Self {
        IntentWeights::new(2, 1, 1).expect("default intent weights are positive")
    }
}

impl PartialEq for IntentWeights {
    fn eq(&self, other: &Self) -> bool {
        self.table == other.table
    }
}

impl TryFrom<WeightTable> for IntentWeights {
    type Error = EngineError;

    fn try_from(table: WeightTable) -> Result<Self, Self::Error> {
        IntentWeights::new(table.aggressive, table.defensive, table.unpredictable)
    }
}

impl From<IntentWeights> for WeightTable {
    fn from(weights: IntentWeights) -> Self {
        weights.table
    }
}

/// A chosen intent with its action and player-facing message
#[derive(Debug, Clone, PartialEq)]
pub struct Telegraph {
    pub action: EnemyAction,
    pub intent: Intent,
    pub message: String,
}

/// Choose and describe the actor's next move.
///
/// Draw order: the intent draw, then for unpredictable intents a second
/// uniform draw between wild attack and defend, then a line pick when the
/// archetype records more than one telegraph for the intent.
pub fn telegraph(actor: &Actor, rules: &CombatRules, rng: &mut impl Rng) -> Telegraph {
    let archetype = rules.archetypes.get(actor.archetype.as_deref());
    let intent = archetype.weights.choose(rng);
    let action = action_for(intent, actor, rules, rng);
    let message = telegraph_message(actor, archetype, intent, action, rng);

    tracing::debug!(actor = %actor.name, %intent, ?action, "intent telegraphed");

    Telegraph {
        action,
        intent,
        message,
    }
}

fn action_for(intent: Intent, actor: &Actor, rules: &CombatRules, rng: &mut impl Rng) -> EnemyAction {
    match intent {
        Intent::Aggressive if actor.heavy_cooldown == 0 => EnemyAction::HeavyAttack,
        Intent::Aggressive => EnemyAction::Attack,
        Intent::Defensive => {
            let threshold = actor.max_health() * rules.constants.defensive_health_fraction;
            if actor.health() <= threshold {
                EnemyAction::Defend
            } else {
                EnemyAction::Attack
            }
        }
        Intent::Unpredictable => {
            if rng.gen_bool(0.5) {
                EnemyAction::WildAttack
            } else {
                EnemyAction::Defend
            }
        }
    }
}

fn telegraph_message(
    actor: &Actor,
    archetype: &ArchetypeConfig,
    intent: Intent,
    action: EnemyAction,
    rng: &mut impl Rng,
) -> String {
    let recorded = archetype.telegraphs.for_intent(intent);
    let line = match recorded.len() {
        0 => None,
        1 => recorded.first(),
        n => recorded.get(rng.gen_range(0..n)),
    };
    if let Some(line) = line {
        return line.replace("{name}", &actor.name);
    }

    let name = &actor.name;
    match (intent, action) {
        (_, EnemyAction::HeavyAttack) => format!("{name} winds up a crushing blow!"),
        (Intent::Aggressive, _) => format!("{name} bares its teeth and advances."),
        (Intent::Defensive, EnemyAction::Defend) => format!("{name} falls back and raises its guard."),
        (Intent::Defensive, _) => format!("{name} circles warily, looking for an opening."),
        (Intent::Unpredictable, _) => format!("{name} twitches erratically. Anything could happen."),
    }
}
