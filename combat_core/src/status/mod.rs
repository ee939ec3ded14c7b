//! Status effect system
//!
//! The closed [`EffectKind`] enum drives everything: application rules come
//! from the kind's [`EffectFamily`], ticking dispatches through an exhaustive
//! match, and the catalogue ([`EffectRegistry`]) supplies display names and
//! damage figures that designers may override from config.

pub mod apply;
mod kind;
mod pool;
mod reversible;
pub mod tick;

pub use apply::{
    add_status_effect, add_status_effect_by_name, cleanse_debuffs, clear_persistent,
    clear_status_effect,
};
pub use kind::{EffectFamily, EffectKind};
pub use tick::{apply_status_effects, TickOutcome};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Catalogue entry for one effect kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectConfig {
    pub kind: EffectKind,
    /// Display name
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Flat damage per tick, per stack for blood torrent, max health
    /// fraction per stack for entropic debt
    #[serde(default)]
    pub tick_damage: f64,
    /// Overrides the family-wide stack cap
    #[serde(default)]
    pub max_stacks: Option<u32>,
}

impl EffectConfig {
    fn new(kind: EffectKind, name: &str, description: &str, tick_damage: f64) -> Self {
        EffectConfig {
            kind,
            name: name.to_string(),
            description: description.to_string(),
            tick_damage,
            max_stacks: None,
        }
    }
}

/// Effect catalogue
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EffectRegistry {
    configs: BTreeMap<EffectKind, EffectConfig>,
}

impl EffectRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        EffectRegistry {
            configs: BTreeMap::new(),
        }
    }

    /// Register or replace an entry
    pub fn register(&mut self, config: EffectConfig) {
        self.configs.insert(config.kind, config);
    }

    pub fn get(&self, kind: EffectKind) -> Option<&EffectConfig> {
        self.configs.get(&kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EffectConfig> {
        self.configs.values()
    }

    /// Display name, falling back to the kind id
    pub fn name(&self, kind: EffectKind) -> &str {
        self.get(kind)
            .map(|config| config.name.as_str())
            .unwrap_or_else(|| kind.id())
    }

    /// Catalogue damage figure, zero for unlisted kinds
    pub fn tick_damage(&self, kind: EffectKind) -> f64 {
        self.get(kind).map_or(0.0, |config| config.tick_damage)
    }

    /// Built-in catalogue
    pub fn with_defaults() -> Self {
        use EffectKind::*;

        let mut registry = Self::new();
        let entries = [
            (Freeze, "Freeze", "Frozen solid and unable to act.", 0.0),
            (Stun, "Stun", "Reeling and unable to act.", 0.0),
            (Poison, "Poison", "Loses 3 health each turn.", 3.0),
            (Burn, "Burn", "Loses 4 health each turn, double if fire vulnerable.", 4.0),
            (Bleed, "Bleed", "Loses 2 health each turn.", 2.0),
            (BloodTorrent, "Blood Torrent", "Loses 1 health per stack each turn.", 1.0),
            (EntropicDebt, "Entropic Debt", "Loses 1% of max health per stack each turn.", 0.01),
            (CreepingCorruption, "Creeping Corruption", "Vision reduced; blessings and inspiration wither.", 0.0),
            (CompressionSickness, "Compression Sickness", "Speed reduced by 10%.", 0.0),
            (MiasmaAura, "Miasma Aura", "Healing halved.", 0.0),
            (HasteDysphoria, "Haste Dysphoria", "Speed beyond the natural limit turns into a penalty.", 0.0),
            (Inspire, "Inspire", "Attack increased by 3.", 0.0),
            (Shield, "Shield", "Absorbs incoming hits, one charge each.", 0.0),
            (Blessed, "Blessed", "Attacks are more accurate.", 0.0),
            (Cursed, "Cursed", "Attacks are far less accurate.", 0.0),
            (BeetleBane, "Beetle Bane", "Repels insectoid foes.", 0.0),
            (SpitefulReflection, "Spiteful Reflection", "May reflect debuffs back to their source.", 0.0),
            (AudienceFatigue, "Audience Fatigue", "The crowd grows bored. Stacks expire independently.", 0.0),
            (SoulTax, "Soul Tax", "Abilities cost more. Stacks expire independently.", 0.0),
            (FesterMark, "Fester Mark", "A festering wound. Stacks expire independently.", 0.0),
            (SpotlightPing, "Spotlight Ping", "Revealed to every watcher until cleared.", 0.0),
            (Marked, "Marked", "Marked for death until cleared.", 0.0),
            (DefendDamage, "Guard", "The next hit taken is halved.", 0.0),
            (DefendAttack, "Riposte", "The next attack is stronger.", 0.0),
            (Advantage, "Advantage", "The next attack is stronger.", 0.0),
        ];
        for (kind, name, description, tick_damage) in entries {
            registry.register(EffectConfig::new(kind, name, description, tick_damage));
        }

        registry
    }
}
