//! Stack-timer pools - independent countdown per stack

use crate::actor::Actor;
use crate::status::EffectKind;

/// Visible magnitude of a pool
fn magnitude(kind: EffectKind, pool: &[u32]) -> u32 {
    match kind {
        EffectKind::FesterMark => pool.iter().copied().max().unwrap_or(0),
        _ => pool.len() as u32,
    }
}

/// Write the pool's magnitude to the status table, removing both when empty
fn sync(actor: &mut Actor, kind: EffectKind) -> u32 {
    let value = actor
        .stack_pools
        .get(&kind)
        .map_or(0, |pool| magnitude(kind, pool));
    if value == 0 {
        actor.stack_pools.remove(&kind);
        actor.status_effects.remove(&kind);
    } else {
        actor.status_effects.insert(kind, value);
    }
    value
}

/// Pool for `kind`, rebuilt from the status magnitude if state was restored
/// without it
fn pool_mut(actor: &mut Actor, kind: EffectKind) -> &mut Vec<u32> {
    let fallback = actor.status(kind).filter(|&m| m > 0);
    actor
        .stack_pools
        .entry(kind)
        .or_insert_with(|| fallback.into_iter().collect())
}

/// Add one stack. At the cap the shortest countdown is refreshed instead.
/// Returns the new magnitude.
pub(crate) fn push_stack(actor: &mut Actor, kind: EffectKind, duration: u32, cap: u32) -> u32 {
    let pool = pool_mut(actor, kind);
    if (pool.len() as u32) < cap {
        pool.push(duration);
    } else if let Some(shortest) = pool.iter_mut().min() {
        *shortest = (*shortest).max(duration);
    }
    sync(actor, kind)
}

/// Count every stack down by one and drop the expired ones.
/// Returns `(magnitude, stacks_expired)`.
pub(crate) fn tick(actor: &mut Actor, kind: EffectKind) -> (u32, usize) {
    let pool = pool_mut(actor, kind);
    let before = pool.len();
    for countdown in pool.iter_mut() {
        *countdown = countdown.saturating_sub(1);
    }
    pool.retain(|&countdown| countdown > 0);
    let expired = before - pool.len();
    (sync(actor, kind), expired)
}

/// Drop the pool together with its status entry
pub(crate) fn clear(actor: &mut Actor, kind: EffectKind) {
    actor.stack_pools.remove(&kind);
    actor.status_effects.remove(&kind);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_and_max_magnitudes() {
        let mut hero = Actor::player("Hero");
        push_stack(&mut hero, EffectKind::SoulTax, 2, 5);
        assert_eq!(push_stack(&mut hero, EffectKind::SoulTax, 4, 5), 2);

        push_stack(&mut hero, EffectKind::FesterMark, 2, 5);
        assert_eq!(push_stack(&mut hero, EffectKind::FesterMark, 4, 5), 4);
    }

    #[test]
    fn test_cap_refreshes_shortest() {
        let mut hero = Actor::player("Hero");
        for duration in [5, 1, 4] {
            push_stack(&mut hero, EffectKind::AudienceFatigue, duration, 3);
        }
        push_stack(&mut hero, EffectKind::AudienceFatigue, 3, 3);
        assert_eq!(hero.stack_pools[&EffectKind::AudienceFatigue], vec![5, 3, 4]);
        assert_eq!(hero.status(EffectKind::AudienceFatigue), Some(3));
    }

    #[test]
    fn test_stacks_expire_independently() {
        let mut hero = Actor::player("Hero");
        push_stack(&mut hero, EffectKind::SoulTax, 1, 5);
        push_stack(&mut hero, EffectKind::SoulTax, 2, 5);

        assert_eq!(tick(&mut hero, EffectKind::SoulTax), (1, 1));
        assert_eq!(tick(&mut hero, EffectKind::SoulTax), (0, 1));
        assert!(!hero.has_status(EffectKind::SoulTax));
        assert!(!hero.stack_pools.contains_key(&EffectKind::SoulTax));
    }

    #[test]
    fn test_missing_pool_rebuilt_from_magnitude() {
        let mut hero = Actor::player("Hero");
        hero.status_effects.insert(EffectKind::FesterMark, 2);
        assert_eq!(tick(&mut hero, EffectKind::FesterMark), (1, 0));
        assert_eq!(hero.stack_pools[&EffectKind::FesterMark], vec![1]);
    }
}
