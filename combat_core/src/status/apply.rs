//! Effect application, clearing and reflection

use super::{pool, reversible, EffectFamily, EffectKind};
use crate::actor::Actor;
use crate::config::CombatRules;
use crate::defense::scale_duration;
use crate::error::EngineError;
use crate::event::CombatEvent;
use rand::Rng;
use tracing::debug;

/// Apply an effect to `target`.
///
/// Durations are scaled by the target's resistance and replace any existing
/// duration. Stack kinds gain one stack (unscaled) and pool kinds gain one
/// countdown. When the target carries spiteful reflection and `source` is
/// given, a debuff may also bounce back onto the source; a reflected
/// application never reflects again.
///
/// RNG: one draw for the reflection roll, taken only when every other
/// reflection condition holds.
///
/// # Errors
/// [`EngineError::InvalidDuration`] for a negative base duration.
pub fn add_status_effect(
    target: &mut Actor,
    kind: EffectKind,
    base_duration: i32,
    source: Option<&mut Actor>,
    rules: &CombatRules,
    rng: &mut impl Rng,
) -> Result<Vec<CombatEvent>, EngineError> {
    let base = u32::try_from(base_duration).map_err(|_| EngineError::InvalidDuration {
        kind,
        duration: base_duration,
    })?;

    let mut events = Vec::new();
    apply_effect(target, kind, base, source, false, rules, rng, &mut events);
    Ok(events)
}

/// Name-based entry point for floor scripts. Unknown names produce an
/// `unknown_effect` event instead of an error.
pub fn add_status_effect_by_name(
    target: &mut Actor,
    name: &str,
    base_duration: i32,
    source: Option<&mut Actor>,
    rules: &CombatRules,
    rng: &mut impl Rng,
) -> Result<Vec<CombatEvent>, EngineError> {
    match name.parse::<EffectKind>() {
        Ok(kind) => add_status_effect(target, kind, base_duration, source, rules, rng),
        Err(err) => {
            debug!(actor = %target.name, %err, "ignoring unknown effect");
            Ok(vec![CombatEvent::status(
                &target.name,
                "unknown_effect",
                0,
                0.0,
                format!("Nothing happens. ('{name}' is not a known effect.)"),
            )])
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn apply_effect(
    target: &mut Actor,
    kind: EffectKind,
    base: u32,
    source: Option<&mut Actor>,
    reflected: bool,
    rules: &CombatRules,
    rng: &mut impl Rng,
    events: &mut Vec<CombatEvent>,
) {
    events.push(install(target, kind, base, reflected, rules));

    let Some(source) = source else {
        return;
    };
    if reflected || !kind.is_debuff() || !target.has_status(EffectKind::SpitefulReflection) {
        return;
    }
    if !rng.gen_bool(rules.constants.reflection_chance) {
        return;
    }

    debug!(from = %target.name, to = %source.name, %kind, "debuff reflected");
    apply_effect(source, kind, base, Some(target), true, rules, rng, events);
}

/// Write one effect into the target's state and describe it
fn install(
    target: &mut Actor,
    kind: EffectKind,
    base: u32,
    reflected: bool,
    rules: &CombatRules,
) -> CombatEvent {
    let magnitude = match kind.family() {
        EffectFamily::StackingDamage => {
            let cap = rules.stack_cap(kind);
            let stacks = (target.status(kind).unwrap_or(0) + 1).min(cap);
            target.status_effects.insert(kind, stacks);
            stacks
        }
        EffectFamily::StackPool => {
            let duration = scale_duration(base, target, &rules.resistance);
            pool::push_stack(target, kind, duration, rules.stack_cap(kind))
        }
        EffectFamily::Reversible => {
            let duration = scale_duration(base, target, &rules.resistance);
            target.status_effects.insert(kind, duration);
            reversible::activate(target, kind, &rules.constants);
            duration
        }
        EffectFamily::DamageOverTime
        | EffectFamily::ControlLoss
        | EffectFamily::Timed
        | EffectFamily::Persistent
        | EffectFamily::Marker => {
            let duration = scale_duration(base, target, &rules.resistance);
            target.status_effects.insert(kind, duration);
            duration
        }
    };

    debug!(actor = %target.name, %kind, magnitude, reflected, "status applied");

    let mut message = applied_message(target, kind, rules);
    if reflected {
        message = format!("The spite rebounds! {message}");
    }
    CombatEvent::status(&target.name, kind.id(), magnitude, f64::from(magnitude), message)
}

fn applied_message(target: &Actor, kind: EffectKind, rules: &CombatRules) -> String {
    let subject = target.subject();
    let be = target.verb("are", "is");
    let condition = match kind {
        EffectKind::Freeze => Some("frozen solid"),
        EffectKind::Stun => Some("stunned"),
        EffectKind::Poison => Some("poisoned"),
        EffectKind::Burn => Some("set ablaze"),
        EffectKind::Bleed => Some("bleeding"),
        EffectKind::Blessed => Some("blessed"),
        EffectKind::Cursed => Some("cursed"),
        EffectKind::Inspire => Some("inspired"),
        EffectKind::Marked => Some("marked for death"),
        _ => None,
    };
    let name = rules.effects.name(kind);

    match condition {
        Some(condition) => format!("{subject} {be} {condition}!"),
        None if kind.is_debuff() => format!("{subject} {be} afflicted with {name}!"),
        None => format!("{subject} {} {name}.", target.verb("gain", "gains")),
    }
}

/// Remove one effect, undoing any stat change it made
pub fn clear_status_effect(
    actor: &mut Actor,
    kind: EffectKind,
    rules: &CombatRules,
) -> Option<CombatEvent> {
    let removed = actor.status_effects.remove(&kind)?;
    pool::clear(actor, kind);
    reversible::revert(actor, kind);

    debug!(actor = %actor.name, %kind, removed, "status cleared");
    Some(CombatEvent::status(
        &actor.name,
        kind.id(),
        0,
        0.0,
        format!(
            "{} {} no longer affected by {}.",
            actor.subject(),
            actor.verb("are", "is"),
            rules.effects.name(kind)
        ),
    ))
}

/// Remove every active debuff
pub fn cleanse_debuffs(actor: &mut Actor, rules: &CombatRules) -> Vec<CombatEvent> {
    let debuffs: Vec<EffectKind> = actor.active_effects().filter(|kind| kind.is_debuff()).collect();
    debuffs
        .into_iter()
        .filter_map(|kind| clear_status_effect(actor, kind, rules))
        .collect()
}

/// Remove persistent conditions such as spotlight ping and marked (altar use)
pub fn clear_persistent(actor: &mut Actor, rules: &CombatRules) -> Vec<CombatEvent> {
    let persistent: Vec<EffectKind> = actor
        .active_effects()
        .filter(|kind| kind.family() == EffectFamily::Persistent)
        .collect();
    persistent
        .into_iter()
        .filter_map(|kind| clear_status_effect(actor, kind, rules))
        .collect()
}
