//! Tunable combat constants

use serde::{Deserialize, Serialize};

/// Numeric tuning knobs read by the resolver and the tick handlers.
///
/// Every field has a default so a rules file only needs to list overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConstants {
    // === Reflection ===
    /// Chance that spiteful reflection bounces a debuff back to its source
    pub reflection_chance: f64,

    // === Stacking ===
    /// Cap for stack-count effects (blood torrent, entropic debt)
    pub max_effect_stacks: u32,
    /// Cap for stack-timer pools (audience fatigue, soul tax, fester mark)
    pub max_pool_stacks: u32,

    // === Hit resolution ===
    pub crit_multiplier: f64,
    pub min_hit_chance: f64,
    pub blessed_accuracy_bonus: f64,
    pub cursed_accuracy_penalty: f64,
    /// Fraction of an incoming hit removed by a defend marker
    pub defend_damage_reduction: f64,
    /// Flat attack added to the attack after defending
    pub defend_attack_bonus: f64,
    /// Flat attack added when acting with advantage
    pub advantage_attack_bonus: f64,

    // === Enemy actions ===
    pub heavy_attack_multiplier: f64,
    pub heavy_attack_cooldown: u32,
    pub wild_attack_multiplier: f64,
    pub wild_attack_accuracy_penalty: f64,
    /// Defensive intent forces a defend at or below this health fraction
    pub defensive_health_fraction: f64,

    // === Items ===
    pub potion_item: String,
    pub potion_heal: f64,
    pub cleansing_item: String,

    // === Reversible modifiers ===
    pub compression_speed_factor: f64,
    pub miasma_heal_factor: f64,
    /// Speed above `base_speed * limit` is inverted into a penalty
    pub haste_overshoot_limit: f64,
    pub corruption_vision_penalty: f64,
    pub inspire_attack_bonus: f64,

    // === Damage over time ===
    pub fire_vulnerability_multiplier: f64,
}

impl Default for CombatConstants {
    fn default() -> Self {
        CombatConstants {
            reflection_chance: 0.20,
            max_effect_stacks: 3,
            max_pool_stacks: 5,
            crit_multiplier: 2.0,
            min_hit_chance: 5.0,
            blessed_accuracy_bonus: 15.0,
            cursed_accuracy_penalty: 30.0,
            defend_damage_reduction: 0.5,
            defend_attack_bonus: 2.0,
            advantage_attack_bonus: 3.0,
            heavy_attack_multiplier: 1.5,
            heavy_attack_cooldown: 2,
            wild_attack_multiplier: 1.25,
            wild_attack_accuracy_penalty: 20.0,
            defensive_health_fraction: 1.0 / 3.0,
            potion_item: "health_potion".to_string(),
            potion_heal: 20.0,
            cleansing_item: "cleansing_draught".to_string(),
            compression_speed_factor: 0.9,
            miasma_heal_factor: 0.5,
            haste_overshoot_limit: 1.25,
            corruption_vision_penalty: 1.0,
            inspire_attack_bonus: 3.0,
            fire_vulnerability_multiplier: 2.0,
        }
    }
}

impl CombatConstants {
    /// Check ranges that would otherwise panic or silently misbehave mid-fight
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.reflection_chance) {
            return Err(format!(
                "reflection_chance must be within 0..=1, got {}",
                self.reflection_chance
            ));
        }
        if !(0.0..=1.0).contains(&self.defend_damage_reduction) {
            return Err(format!(
                "defend_damage_reduction must be within 0..=1, got {}",
                self.defend_damage_reduction
            ));
        }
        if !(0.0..=100.0).contains(&self.min_hit_chance) {
            return Err(format!(
                "min_hit_chance must be within 0..=100, got {}",
                self.min_hit_chance
            ));
        }
        for (name, value) in self.scaling_factors() {
            if !(value >= 0.0) {
                return Err(format!("{name} must be a non-negative number, got {value}"));
            }
        }
        if self.max_effect_stacks == 0 || self.max_pool_stacks == 0 {
            return Err("stack caps must be at least 1".to_string());
        }
        if self.potion_item.is_empty() || self.cleansing_item.is_empty() {
            return Err("item ids must not be empty".to_string());
        }
        Ok(())
    }

    /// Multipliers that must never flip or poison a stat
    fn scaling_factors(&self) -> [(&'static str, f64); 7] {
        [
            ("crit_multiplier", self.crit_multiplier),
            ("heavy_attack_multiplier", self.heavy_attack_multiplier),
            ("wild_attack_multiplier", self.wild_attack_multiplier),
            ("compression_speed_factor", self.compression_speed_factor),
            ("miasma_heal_factor", self.miasma_heal_factor),
            ("haste_overshoot_limit", self.haste_overshoot_limit),
            ("fire_vulnerability_multiplier", self.fire_vulnerability_multiplier),
        ]
    }
}
