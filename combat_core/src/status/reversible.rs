//! Reversible stat modifiers
//!
//! Activation writes the modified stat once and records a [`Shadow`] with the
//! value before and after. Reverting adds back the difference the effect
//! made, so several reversible effects on one stat unwind to the original
//! value in any expiry order.

use crate::actor::{Actor, Shadow, Stat};
use crate::config::CombatConstants;
use crate::status::EffectKind;

/// Stat a reversible kind mutates
pub(crate) fn stat_for(kind: EffectKind) -> Option<Stat> {
    match kind {
        EffectKind::CreepingCorruption => Some(Stat::Vision),
        EffectKind::CompressionSickness | EffectKind::HasteDysphoria => Some(Stat::Speed),
        EffectKind::MiasmaAura => Some(Stat::HealMultiplier),
        EffectKind::Inspire => Some(Stat::Attack),
        _ => None,
    }
}

fn modified_value(kind: EffectKind, actor: &Actor, current: f64, constants: &CombatConstants) -> f64 {
    match kind {
        EffectKind::CreepingCorruption => (current - constants.corruption_vision_penalty).max(0.0),
        EffectKind::CompressionSickness => current * constants.compression_speed_factor,
        EffectKind::MiasmaAura => current * constants.miasma_heal_factor,
        EffectKind::HasteDysphoria => {
            let natural = if actor.stats.contains(Stat::BaseSpeed) {
                actor.stat(Stat::BaseSpeed)
            } else {
                current
            };
            let limit = natural * constants.haste_overshoot_limit;
            if current > limit {
                (limit - (current - limit)).max(0.0)
            } else {
                current
            }
        }
        EffectKind::Inspire => current + constants.inspire_attack_bonus,
        _ => current,
    }
}

/// Apply the mutation unless it is already active. Returns whether it was applied.
pub(crate) fn activate(actor: &mut Actor, kind: EffectKind, constants: &CombatConstants) -> bool {
    let Some(stat) = stat_for(kind) else {
        return false;
    };
    if actor.shadows.get(&kind).is_some_and(|shadow| shadow.active) {
        return false;
    }

    let baseline = actor.stat(stat);
    let applied = modified_value(kind, actor, baseline, constants);
    actor.set_stat(stat, applied);
    actor.shadows.insert(kind, Shadow::capture(baseline, applied));

    tracing::trace!(actor = %actor.name, %kind, ?stat, baseline, applied, "reversible effect activated");
    true
}

/// Undo the mutation and drop the shadow
pub(crate) fn revert(actor: &mut Actor, kind: EffectKind) {
    let Some(shadow) = actor.shadows.remove(&kind) else {
        return;
    };
    let Some(stat) = stat_for(kind) else {
        return;
    };
    if !shadow.active {
        return;
    }

    let Some(baseline) = shadow.baseline else {
        tracing::warn!(
            actor = %actor.name,
            %kind,
            "reversible effect active without a baseline; keeping current value"
        );
        return;
    };

    let current = actor.stat(stat);
    let restored = match shadow.applied {
        Some(applied) if (current - applied).abs() > f64::EPSILON => current + (baseline - applied),
        _ => baseline,
    };
    actor.set_stat(stat, restored);

    tracing::trace!(actor = %actor.name, %kind, ?stat, restored, "reversible effect reverted");
}
