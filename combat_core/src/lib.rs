//! combat_core - Turn-based combat and status effect engine
//!
//! This library provides:
//! - Actor: stats, status table, stack pools and reversible stat shadows
//! - Status effects: application, reflection, clearing and the per-turn tick
//! - Resolution: attacks, player actions and telegraphed enemy turns
//! - CombatRules: tuning constants, resistance, AI archetypes and the
//!   effect catalogue, loadable from TOML
//!
//! The engine performs no I/O during a fight. Every operation mutates the
//! actors it is given and returns [`CombatEvent`]s describing what happened.
//! Randomness always comes from a caller-supplied `Rng`, so a seeded RNG and
//! identical actor state reproduce a fight exactly.

pub mod actor;
pub mod combat;
pub mod config;
pub mod defense;
pub mod error;
pub mod event;
pub mod intent;
pub mod prelude;
pub mod status;
pub mod types;

// Re-export core types for convenience
pub use actor::{Actor, Shadow, Stat, Stats, StatusTable};
pub use combat::{
    award_item, consume_shield, resolve_attack, resolve_enemy_turn, resolve_player_action,
    PlayerAction,
};
pub use config::{CombatConstants, CombatRules, ConfigError};
pub use defense::{scale_duration, ResistanceTable};
pub use error::{EngineError, ErrorSeverity};
pub use event::CombatEvent;
pub use intent::{EnemyAction, Intent, IntentWeights, Telegraph};
pub use status::{
    add_status_effect, add_status_effect_by_name, apply_status_effects, cleanse_debuffs,
    clear_persistent, clear_status_effect, EffectConfig, EffectFamily, EffectKind,
    EffectRegistry, TickOutcome,
};
pub use types::{ActorTrait, Rarity};
