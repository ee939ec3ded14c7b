//! Configuration loading from TOML files

mod archetypes;
mod constants;
mod effects;

pub use archetypes::{ArchetypeConfig, ArchetypeTable, Telegraphs, DEFAULT_ARCHETYPE};
pub use constants::CombatConstants;
pub use effects::{load_effect_configs, parse_effect_configs, EffectsConfig};

use crate::defense::ResistanceTable;
use crate::status::{EffectConfig, EffectFamily, EffectKind, EffectRegistry};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration loading error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Configuration validation error: {0}")]
    ValidationError(String),
}

/// Load a TOML file and deserialize it
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_toml(&content)
}

/// Load a TOML string and deserialize it
pub fn parse_toml<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    let config: T = toml::from_str(content)?;
    Ok(config)
}

/// Everything the resolver and tick pass read besides actor state
#[derive(Debug, Clone, PartialEq)]
pub struct CombatRules {
    pub constants: CombatConstants,
    pub resistance: ResistanceTable,
    pub archetypes: ArchetypeTable,
    pub effects: EffectRegistry,
}

impl Default for CombatRules {
    fn default() -> Self {
        CombatRules {
            constants: CombatConstants::default(),
            resistance: ResistanceTable::default(),
            archetypes: ArchetypeTable::with_defaults(),
            effects: EffectRegistry::with_defaults(),
        }
    }
}

/// On-disk layout of a rules file. Every section is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RulesFile {
    constants: CombatConstants,
    resistance: ResistanceTable,
    archetypes: BTreeMap<String, ArchetypeConfig>,
    effects: Vec<EffectConfig>,
}

impl From<RulesFile> for CombatRules {
    fn from(file: RulesFile) -> Self {
        let mut archetypes = ArchetypeTable::with_defaults();
        for (id, archetype) in file.archetypes {
            archetypes.register(id, archetype);
        }

        let effects = EffectsConfig {
            effects: file.effects,
        }
        .into_registry();

        CombatRules {
            constants: file.constants,
            resistance: file.resistance,
            archetypes,
            effects,
        }
    }
}

impl CombatRules {
    /// Load and validate rules from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let file: RulesFile = load_toml(path)?;
        let rules = CombatRules::from(file);
        rules.validate()?;
        tracing::debug!(path = %path.display(), "combat rules loaded");
        Ok(rules)
    }

    /// Parse and validate rules from a TOML string
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let file: RulesFile = parse_toml(content)?;
        let rules = CombatRules::from(file);
        rules.validate()?;
        Ok(rules)
    }

    /// Reject values that cannot produce a sensible fight
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.constants
            .validate()
            .map_err(ConfigError::ValidationError)?;
        self.resistance
            .validate()
            .map_err(ConfigError::ValidationError)?;

        for config in self.effects.iter() {
            if config.tick_damage < 0.0 {
                return Err(ConfigError::ValidationError(format!(
                    "tick_damage for {} must not be negative",
                    config.kind
                )));
            }
            if config.max_stacks == Some(0) {
                return Err(ConfigError::ValidationError(format!(
                    "max_stacks for {} must be at least 1",
                    config.kind
                )));
            }
        }
        Ok(())
    }

    /// Stack cap for stack-count and pool kinds. Catalogue overrides win.
    pub fn stack_cap(&self, kind: EffectKind) -> u32 {
        if let Some(cap) = self.effects.get(kind).and_then(|config| config.max_stacks) {
            return cap;
        }
        match kind.family() {
            EffectFamily::StackPool => self.constants.max_pool_stacks,
            _ => self.constants.max_effect_stacks,
        }
    }
}
