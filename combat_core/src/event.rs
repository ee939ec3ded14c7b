//! CombatEvent - Outcome records returned by the resolver and the tick pass

use crate::intent::Intent;
use serde::{Deserialize, Serialize};

/// One resolved outcome.
///
/// Every variant carries a render-ready `message` plus structured fields for
/// log collectors and assertions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CombatEvent {
    AttackResolved {
        attacker: String,
        defender: String,
        damage: f64,
        defeated: bool,
        attack: f64,
        defense: f64,
        critical: bool,
        hit: bool,
        message: String,
    },
    StatusApplied {
        target: String,
        status: String,
        duration: u32,
        value: f64,
        message: String,
    },
    /// One handler invocation during the per-turn tick pass
    StatusTicked {
        target: String,
        status: String,
        remaining: u32,
        damage: f64,
        expired: bool,
        message: String,
    },
    IntentTelegraphed {
        actor: String,
        intent: Intent,
        message: String,
    },
    ItemGained {
        owner: String,
        item: String,
        amount: u32,
        message: String,
    },
}

impl CombatEvent {
    /// Convenience constructor for status outcomes
    pub fn status(
        target: &str,
        status: impl Into<String>,
        duration: u32,
        value: f64,
        message: impl Into<String>,
    ) -> Self {
        CombatEvent::StatusApplied {
            target: target.to_string(),
            status: status.into(),
            duration,
            value,
            message: message.into(),
        }
    }

    /// Render-ready text
    pub fn message(&self) -> &str {
        match self {
            CombatEvent::AttackResolved { message, .. }
            | CombatEvent::StatusApplied { message, .. }
            | CombatEvent::StatusTicked { message, .. }
            | CombatEvent::IntentTelegraphed { message, .. }
            | CombatEvent::ItemGained { message, .. } => message,
        }
    }

    /// Status name for status events
    pub fn status_name(&self) -> Option<&str> {
        match self {
            CombatEvent::StatusApplied { status, .. } | CombatEvent::StatusTicked { status, .. } => {
                Some(status)
            }
            _ => None,
        }
    }

    /// Damage dealt by this event, zero for non-damaging events
    pub fn damage(&self) -> f64 {
        match self {
            CombatEvent::AttackResolved { damage, .. } | CombatEvent::StatusTicked { damage, .. } => {
                *damage
            }
            _ => 0.0,
        }
    }
}
