//! Scenario files - who fights, with what, and how the player plays

use anyhow::{Context, Result};
use combat_core::{Actor, PlayerAction};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Which combatant an entry refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Player,
    Enemy,
}

/// Effect applied before the first turn, as a floor script would
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpeningEffect {
    pub target: Side,
    pub effect: String,
    pub duration: i32,
}

/// Item granted to the player on victory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reward {
    pub item: String,
    #[serde(default = "default_amount")]
    pub amount: u32,
}

fn default_amount() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub name: String,
    pub player: Actor,
    pub enemy: Actor,
    /// Player commands, repeated in order once exhausted
    #[serde(default)]
    pub player_script: Vec<String>,
    #[serde(default)]
    pub opening_effects: Vec<OpeningEffect>,
    #[serde(default)]
    pub rewards: Vec<Reward>,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading scenario {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("parsing scenario {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let mut scenario: Scenario = toml::from_str(content)?;
        // The player actor always narrates in second person
        scenario.player.is_player = true;
        scenario.enemy.is_player = false;
        Ok(scenario)
    }

    /// Player action for a zero-based turn index
    pub fn action_for_turn(&self, turn: usize) -> PlayerAction {
        if self.player_script.is_empty() {
            return PlayerAction::Attack;
        }
        PlayerAction::parse(&self.player_script[turn % self.player_script.len()])
    }
}
