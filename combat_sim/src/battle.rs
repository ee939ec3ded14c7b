//! Battle driver - turn loop over the engine's resolver and tick pass

use crate::scenario::{Scenario, Side};
use combat_core::defense::consume_marker;
use combat_core::{
    add_status_effect_by_name, apply_status_effects, award_item, resolve_enemy_turn,
    resolve_player_action, Actor, CombatEvent, CombatRules, EffectKind, EngineError,
    PlayerAction,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::{debug, info};

/// How a battle ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Victory,
    Defeat,
    Fled,
    TurnLimit,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BattleSummary {
    pub outcome: Outcome,
    pub turns: u32,
    pub player_health: f64,
    pub enemy_health: f64,
    pub events: Vec<CombatEvent>,
}

struct Battle<'a> {
    rules: &'a CombatRules,
    scenario: &'a Scenario,
    player: Actor,
    enemy: Actor,
    rng: ChaCha8Rng,
    events: Vec<CombatEvent>,
}

/// Run a scenario to completion with a seeded RNG
pub fn run(
    scenario: &Scenario,
    rules: &CombatRules,
    seed: u64,
    max_turns: u32,
) -> Result<BattleSummary, EngineError> {
    let mut battle = Battle {
        rules,
        scenario,
        player: scenario.player.clone(),
        enemy: scenario.enemy.clone(),
        rng: ChaCha8Rng::seed_from_u64(seed),
        events: Vec::new(),
    };

    battle.apply_opening_effects()?;

    let mut turns = 0;
    let outcome = loop {
        if turns >= max_turns {
            break Outcome::TurnLimit;
        }
        if let Some(outcome) = battle.play_turn(turns as usize) {
            turns += 1;
            break outcome;
        }
        turns += 1;
    };

    if outcome == Outcome::Victory {
        for reward in &scenario.rewards {
            let event = award_item(&mut battle.player, &reward.item, reward.amount);
            battle.events.push(event);
        }
    }

    info!(
        scenario = %scenario.name,
        seed,
        ?outcome,
        turns,
        events = battle.events.len(),
        "battle finished"
    );

    Ok(BattleSummary {
        outcome,
        turns,
        player_health: battle.player.health(),
        enemy_health: battle.enemy.health(),
        events: battle.events,
    })
}

impl Battle<'_> {
    fn apply_opening_effects(&mut self) -> Result<(), EngineError> {
        let scenario = self.scenario;
        for opening in &scenario.opening_effects {
            let (target, source) = match opening.target {
                Side::Player => (&mut self.player, &mut self.enemy),
                Side::Enemy => (&mut self.enemy, &mut self.player),
            };
            let events = add_status_effect_by_name(
                target,
                &opening.effect,
                opening.duration,
                Some(source),
                self.rules,
                &mut self.rng,
            )?;
            self.events.extend(events);
        }
        Ok(())
    }

    /// One full round: player side, then enemy side. Returns the outcome
    /// once the battle is decided.
    fn play_turn(&mut self, turn: usize) -> Option<Outcome> {
        debug!(turn, "turn start");

        let tick = apply_status_effects(&mut self.player, self.rules);
        self.events.extend(tick.events);
        for companion in self.player.companions.iter_mut() {
            let companion_tick = apply_status_effects(companion, self.rules);
            self.events.extend(companion_tick.events);
        }
        if self.player.is_defeated() {
            return Some(Outcome::Defeat);
        }

        if !tick.skip_turn {
            let action = self.scenario.action_for_turn(turn);
            let events = resolve_player_action(
                &mut self.player,
                &mut self.enemy,
                &action,
                self.rules,
                &mut self.rng,
            );
            let fled = action == PlayerAction::Flee && escaped(&events);
            self.events.extend(events);
            if fled {
                return Some(Outcome::Fled);
            }
        }
        if self.enemy.is_defeated() {
            return Some(Outcome::Victory);
        }

        let tick = apply_status_effects(&mut self.enemy, self.rules);
        self.events.extend(tick.events);
        if self.enemy.is_defeated() {
            return Some(Outcome::Victory);
        }
        if tick.skip_turn {
            // A lost turn still spends any advantage
            consume_marker(&mut self.enemy, EffectKind::Advantage);
        } else {
            let events =
                resolve_enemy_turn(&mut self.enemy, &mut self.player, self.rules, &mut self.rng);
            self.events.extend(events);
        }
        if self.player.is_defeated() {
            return Some(Outcome::Defeat);
        }

        None
    }
}

fn escaped(events: &[CombatEvent]) -> bool {
    events.iter().any(|event| {
        matches!(
            event,
            CombatEvent::StatusApplied { status, value, .. } if status == "flee" && *value > 0.0
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::Stat;

    fn scenario(script: &str) -> Scenario {
        Scenario::parse(&format!(
            r#"
name = "Test"
player_script = {script}

[player]
name = "Hero"

[player.stats]
health = 40
max_health = 40
attack = 8
speed = 6

[enemy]
name = "Ghoul"
archetype = "brute"

[enemy.stats]
health = 30
max_health = 30
attack = 5
defense = 1
speed = 4

[[opening_effects]]
target = "enemy"
effect = "poison"
duration = 2

[[rewards]]
item = "health_potion"
amount = 2
"#
        ))
        .unwrap()
    }

    #[test]
    fn test_same_seed_same_log() {
        let rules = CombatRules::default();
        let scenario = scenario(r#"["attack", "defend"]"#);
        let first = run(&scenario, &rules, 99, 30).unwrap();
        let second = run(&scenario, &rules, 99, 30).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_flee_ends_battle() {
        let rules = CombatRules::default();
        let summary = run(&scenario(r#"["flee"]"#), &rules, 1, 30).unwrap();
        assert_eq!(summary.outcome, Outcome::Fled);
        assert_eq!(summary.turns, 1);
    }

    #[test]
    fn test_victory_awards_rewards() {
        let rules = CombatRules::default();
        let mut scenario = scenario(r#"["attack"]"#);
        scenario.player.set_stat(Stat::Attack, 100.0);
        scenario.player.set_stat(Stat::Accuracy, 100.0);

        let summary = run(&scenario, &rules, 7, 50).unwrap();
        assert_eq!(summary.outcome, Outcome::Victory);
        assert_eq!(summary.turns, 1);
        assert!((summary.enemy_health - 0.0).abs() < f64::EPSILON);
        assert!(matches!(
            summary.events.last(),
            Some(CombatEvent::ItemGained { amount: 2, .. })
        ));
    }

    #[test]
    fn test_turn_limit() {
        let rules = CombatRules::default();
        let mut scenario = scenario(r#"["defend"]"#);
        scenario.opening_effects.clear();
        // Neither side can hurt the other
        scenario.player.set_stat(Stat::Defense, 100.0);
        scenario.enemy.set_stat(Stat::Defense, 100.0);

        let summary = run(&scenario, &rules, 3, 4).unwrap();
        assert_eq!(summary.outcome, Outcome::TurnLimit);
        assert_eq!(summary.turns, 4);
        assert!((summary.player_health - 40.0).abs() < f64::EPSILON);
        assert!((summary.enemy_health - 30.0).abs() < f64::EPSILON);
        assert!(!summary
            .events
            .iter()
            .any(|event| matches!(event, CombatEvent::ItemGained { .. })));
    }

    #[test]
    fn test_stunned_enemy_spends_advantage() {
        let rules = CombatRules::default();
        let mut scenario = scenario(r#"["flee", "defend"]"#);
        scenario.opening_effects.clear();
        // Too slow to escape, so the enemy gains advantage
        scenario.player.set_stat(Stat::Speed, 1.0);
        scenario.enemy.set_stat(Stat::Defense, 100.0);
        scenario.enemy.status_effects.insert(EffectKind::Stun, 1);

        let mut battle = Battle {
            rules: &rules,
            scenario: &scenario,
            player: scenario.player.clone(),
            enemy: scenario.enemy.clone(),
            rng: ChaCha8Rng::seed_from_u64(3),
            events: Vec::new(),
        };
        assert_eq!(battle.play_turn(0), None);
        assert!(!battle.enemy.has_status(EffectKind::Stun));
        assert!(!battle.enemy.has_status(EffectKind::Advantage));
    }
}
