//! Resistance - Rarity and floor based duration scaling
//!
//! Tougher enemies shrug off effects faster:
//! - common: duration unchanged
//! - rare: duration * 0.8
//! - elite: duration * 0.5, but only from the threshold floor onward
//!
//! The result is floored and never drops below one tick. Stack counts are
//! never scaled.

use crate::actor::Actor;
use crate::types::Rarity;
use serde::{Deserialize, Serialize};

/// Duration multipliers per rarity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResistanceTable {
    pub rare: f64,
    pub elite: f64,
    /// Elites on floors below this are not resistant
    pub elite_floor_threshold: u32,
}

impl Default for ResistanceTable {
    fn default() -> Self {
        ResistanceTable {
            rare: 0.8,
            elite: 0.5,
            elite_floor_threshold: 10,
        }
    }
}

impl ResistanceTable {
    /// Multiplier for a rarity, ignoring the floor rule
    pub fn multiplier(&self, rarity: Rarity) -> f64 {
        match rarity {
            Rarity::Common => 1.0,
            Rarity::Rare => self.rare,
            Rarity::Elite => self.elite,
        }
    }

    /// Multiplier for a specific target, floor rule included
    pub fn multiplier_for(&self, target: &Actor) -> f64 {
        if target.rarity == Rarity::Elite && target.floor < self.elite_floor_threshold {
            return 1.0;
        }
        self.multiplier(target.rarity)
    }

    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [("rare", self.rare), ("elite", self.elite)] {
            if !(value > 0.0) {
                return Err(format!(
                    "resistance multiplier '{name}' must be positive, got {value}"
                ));
            }
        }
        Ok(())
    }
}

/// Scale a base duration by the target's resistance
///
/// # Returns
/// `floor(base * multiplier)`, at least 1
pub fn scale_duration(base_duration: u32, target: &Actor, table: &ResistanceTable) -> u32 {
    let scaled = (f64::from(base_duration) * table.multiplier_for(target)).floor();
    (scaled as u32).max(1)
}
