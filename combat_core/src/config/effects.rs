//! Effect catalogue loading

use super::ConfigError;
use crate::status::{EffectConfig, EffectRegistry};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Container for effect catalogue entries
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EffectsConfig {
    #[serde(default)]
    pub effects: Vec<EffectConfig>,
}

impl EffectsConfig {
    /// Overlay the entries on the built-in catalogue
    pub fn into_registry(self) -> EffectRegistry {
        let mut registry = EffectRegistry::with_defaults();
        for effect in self.effects {
            registry.register(effect);
        }
        registry
    }
}

/// Load an effect catalogue from a TOML file
pub fn load_effect_configs(path: &Path) -> Result<EffectRegistry, ConfigError> {
    let config: EffectsConfig = super::load_toml(path)?;
    Ok(config.into_registry())
}

/// Load an effect catalogue from a TOML string
pub fn parse_effect_configs(content: &str) -> Result<EffectRegistry, ConfigError> {
    let config: EffectsConfig = super::parse_toml(content)?;
    Ok(config.into_registry())
}
