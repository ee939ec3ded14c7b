//! Prelude module for convenient imports
//!
//! ```rust
//! use combat_core::prelude::*;
//! ```

// Actor state
pub use crate::actor::{Actor, Stat};
pub use crate::types::{ActorTrait, Rarity};

// Status effects
pub use crate::status::{add_status_effect, apply_status_effects, EffectKind, TickOutcome};

// Resolution
pub use crate::combat::{resolve_attack, resolve_enemy_turn, resolve_player_action, PlayerAction};
pub use crate::event::CombatEvent;

// Config and errors
pub use crate::config::CombatRules;
pub use crate::error::EngineError;
