//! Enemy archetype configuration (intent weights and telegraph lines)

use crate::intent::{Intent, IntentWeights};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Id of the archetype used when an actor names none or an unknown one
pub const DEFAULT_ARCHETYPE: &str = "default";

/// Pre-recorded telegraph lines per intent, one picked per turn. `{name}` is
/// replaced by the actor name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Telegraphs {
    pub aggressive: Vec<String>,
    pub defensive: Vec<String>,
    pub unpredictable: Vec<String>,
}

impl Telegraphs {
    pub fn for_intent(&self, intent: Intent) -> &[String] {
        match intent {
            Intent::Aggressive => &self.aggressive,
            Intent::Defensive => &self.defensive,
            Intent::Unpredictable => &self.unpredictable,
        }
    }
}

/// One AI archetype
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArchetypeConfig {
    #[serde(default)]
    pub weights: IntentWeights,
    #[serde(default)]
    pub telegraphs: Telegraphs,
}

/// Archetype lookup with a guaranteed fallback entry
#[derive(Debug, Clone, PartialEq)]
pub struct ArchetypeTable {
    archetypes: BTreeMap<String, ArchetypeConfig>,
    fallback: ArchetypeConfig,
}

impl Default for ArchetypeTable {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl ArchetypeTable {
    /// Table with only the fallback archetype
    pub fn new() -> Self {
        ArchetypeTable {
            archetypes: BTreeMap::new(),
            fallback: ArchetypeConfig::default(),
        }
    }

    /// Built-in archetypes
    pub fn with_defaults() -> Self {
        let mut table = Self::new();

        table.register(
            "brute",
            ArchetypeConfig {
                weights: IntentWeights::new(5, 1, 1).expect("built-in weights are positive"),
                telegraphs: Telegraphs {
                    aggressive: vec!["{name} roars and raises its weapon high!".to_string()],
                    ..Telegraphs::default()
                },
            },
        );
        table.register(
            "skulker",
            ArchetypeConfig {
                weights: IntentWeights::new(1, 4, 1).expect("built-in weights are positive"),
                telegraphs: Telegraphs {
                    defensive: vec!["{name} slinks back into the shadows.".to_string()],
                    ..Telegraphs::default()
                },
            },
        );
        table.register(
            "trickster",
            ArchetypeConfig {
                weights: IntentWeights::new(1, 1, 4).expect("built-in weights are positive"),
                telegraphs: Telegraphs::default(),
            },
        );

        table
    }

    /// Register or replace an archetype. The id `default` replaces the fallback.
    pub fn register(&mut self, id: impl Into<String>, config: ArchetypeConfig) {
        let id = id.into();
        if id == DEFAULT_ARCHETYPE {
            self.fallback = config;
        } else {
            self.archetypes.insert(id, config);
        }
    }

    /// Look up an archetype, falling back to the default entry
    pub fn get(&self, id: Option<&str>) -> &ArchetypeConfig {
        id.and_then(|id| self.archetypes.get(id))
            .unwrap_or(&self.fallback)
    }

    pub fn contains(&self, id: &str) -> bool {
        id == DEFAULT_ARCHETYPE || self.archetypes.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.archetypes.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_archetype_falls_back() {
        let table = ArchetypeTable::with_defaults();
        let fallback = table.get(Some("dragon"));
        assert_eq!(fallback, table.get(None));
        assert_eq!(fallback.weights.table().aggressive, 2);
    }

    #[test]
    fn test_register_default_replaces_fallback() {
        let mut table = ArchetypeTable::new();
        table.register(
            DEFAULT_ARCHETYPE,
            ArchetypeConfig {
                weights: IntentWeights::new(1, 1, 9).unwrap(),
                telegraphs: Telegraphs::default(),
            },
        );
        assert_eq!(table.get(None).weights.table().unpredictable, 9);
        assert!(table.contains("default"));
    }

    #[test]
    fn test_builtin_brute_is_aggressive() {
        let table = ArchetypeTable::with_defaults();
        let brute = table.get(Some("brute"));
        assert_eq!(brute.weights.table().aggressive, 5);
        assert_eq!(brute.telegraphs.for_intent(Intent::Aggressive).len(), 1);
    }
}
