//! Actor - Combat participant state (player, enemy or companion)

mod shadow;
mod stats;

pub use shadow::Shadow;
pub use stats::{Stat, Stats};

use crate::status::EffectKind;
use crate::types::{ActorTrait, Rarity};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Active effects keyed by kind. Magnitude is remaining ticks, stack count
/// or pool size depending on the kind's family.
pub type StatusTable = BTreeMap<EffectKind, u32>;

/// Complete combat state for one actor.
///
/// Every field is ordered and serializable so a save layer can round-trip an
/// actor mid-fight without changing how the next tick resolves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    // === Identity ===
    pub name: String,
    #[serde(default)]
    pub is_player: bool,
    #[serde(default)]
    pub rarity: Rarity,
    /// Dungeon floor the actor is fighting on
    #[serde(default)]
    pub floor: u32,
    /// AI archetype id for intent weights
    #[serde(default)]
    pub archetype: Option<String>,
    #[serde(default)]
    pub traits: BTreeSet<ActorTrait>,

    // === Stats ===
    #[serde(default)]
    pub stats: Stats,

    // === Effects ===
    #[serde(default)]
    pub status_effects: StatusTable,
    /// Independent per-stack countdowns for pool effects
    #[serde(default)]
    pub stack_pools: BTreeMap<EffectKind, Vec<u32>>,
    /// Pre-effect values for reversible effects; present only while active
    #[serde(default)]
    pub shadows: BTreeMap<EffectKind, Shadow>,

    // === Belongings ===
    #[serde(default)]
    pub inventory: Vec<String>,
    #[serde(default)]
    pub companions: Vec<Actor>,

    /// Enemy turns left before another heavy attack is allowed
    #[serde(default)]
    pub heavy_cooldown: u32,
    /// Set by the latest tick pass when control loss consumed the turn
    #[serde(default)]
    pub turn_lost: bool,
}

impl Actor {
    /// Create an actor with no stats
    pub fn new(name: impl Into<String>) -> Self {
        Actor {
            name: name.into(),
            is_player: false,
            rarity: Rarity::Common,
            floor: 0,
            archetype: None,
            traits: BTreeSet::new(),
            stats: Stats::new(),
            status_effects: StatusTable::new(),
            stack_pools: BTreeMap::new(),
            shadows: BTreeMap::new(),
            inventory: Vec::new(),
            companions: Vec::new(),
            heavy_cooldown: 0,
            turn_lost: false,
        }
    }

    /// Create the player actor (messages use second person)
    pub fn player(name: impl Into<String>) -> Self {
        Actor {
            is_player: true,
            ..Self::new(name)
        }
    }

    pub fn with_stat(mut self, stat: Stat, value: f64) -> Self {
        self.stats.set(stat, value);
        self
    }

    /// Set both current and maximum health
    pub fn with_health(self, health: f64) -> Self {
        self.with_stat(Stat::Health, health)
            .with_stat(Stat::MaxHealth, health)
    }

    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    pub fn on_floor(mut self, floor: u32) -> Self {
        self.floor = floor;
        self
    }

    pub fn with_archetype(mut self, archetype: impl Into<String>) -> Self {
        self.archetype = Some(archetype.into());
        self
    }

    pub fn with_trait(mut self, actor_trait: ActorTrait) -> Self {
        self.traits.insert(actor_trait);
        self
    }

    pub fn with_item(mut self, item: impl Into<String>) -> Self {
        self.inventory.push(item.into());
        self
    }

    pub fn with_companion(mut self, companion: Actor) -> Self {
        self.companions.push(companion);
        self
    }

    // === Stats ===

    pub fn stat(&self, stat: Stat) -> f64 {
        self.stats.get(stat)
    }

    pub fn set_stat(&mut self, stat: Stat, value: f64) {
        self.stats.set(stat, value);
    }

    pub fn health(&self) -> f64 {
        self.stat(Stat::Health)
    }

    pub fn max_health(&self) -> f64 {
        self.stat(Stat::MaxHealth)
    }

    pub fn is_defeated(&self) -> bool {
        self.health() <= 0.0
    }

    pub fn has_trait(&self, actor_trait: ActorTrait) -> bool {
        self.traits.contains(&actor_trait)
    }

    /// Reduce health, floored at zero
    pub fn take_damage(&mut self, amount: f64) {
        let remaining = (self.health() - amount.max(0.0)).max(0.0);
        self.set_stat(Stat::Health, remaining);
    }

    /// Restore health up to max, returning the amount actually healed
    pub fn heal(&mut self, amount: f64) -> f64 {
        let before = self.health();
        let after = (before + amount.max(0.0)).min(self.max_health());
        self.set_stat(Stat::Health, after.max(before));
        after.max(before) - before
    }

    // === Effects ===

    pub fn has_status(&self, kind: EffectKind) -> bool {
        self.status_effects.contains_key(&kind)
    }

    pub fn status(&self, kind: EffectKind) -> Option<u32> {
        self.status_effects.get(&kind).copied()
    }

    /// Active kinds in tick order
    pub fn active_effects(&self) -> impl Iterator<Item = EffectKind> + '_ {
        self.status_effects.keys().copied()
    }

    // === Inventory ===

    pub fn has_item(&self, item: &str) -> bool {
        self.inventory.iter().any(|i| i == item)
    }

    /// Remove the first matching item, returning whether one was present
    pub fn take_item(&mut self, item: &str) -> bool {
        match self.inventory.iter().position(|i| i == item) {
            Some(index) => {
                self.inventory.remove(index);
                true
            }
            None => false,
        }
    }

    // === Narration ===

    /// Sentence subject: "You" for the player, the name otherwise
    pub fn subject(&self) -> &str {
        if self.is_player {
            "You"
        } else {
            &self.name
        }
    }

    /// Sentence object: "you" for the player, the name otherwise
    pub fn object(&self) -> &str {
        if self.is_player {
            "you"
        } else {
            &self.name
        }
    }

    /// "Your" for the player, "Name's" otherwise
    pub fn possessive(&self) -> String {
        if self.is_player {
            "Your".to_string()
        } else {
            format!("{}'s", self.name)
        }
    }

    /// Pick the verb form agreeing with [`Actor::subject`]
    pub fn verb<'a>(&self, second_person: &'a str, third_person: &'a str) -> &'a str {
        if self.is_player {
            second_person
        } else {
            third_person
        }
    }
}
