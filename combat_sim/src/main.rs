//! combat_sim - Headless seeded battle runner
//!
//! Loads combat rules and a scenario, fights the battle turn by turn and
//! prints every event. Useful for balance passes: the same seed always
//! replays the same fight.
//!
//! Run with: `cargo run -p combat_sim -- --seed 7 --json`

mod battle;
mod logging;
mod scenario;

use anyhow::{Context, Result};
use clap::Parser;
use combat_core::CombatRules;
use scenario::Scenario;
use std::path::PathBuf;

/// Headless seeded battle runner
#[derive(Parser)]
#[command(name = "combat_sim")]
#[command(about = "Run a seeded turn-based battle and print its events", long_about = None)]
#[command(version)]
struct Cli {
    /// RNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Rules file (built-in rules when omitted)
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Scenario file
    #[arg(long, default_value = "combat_sim/config/scenario.toml")]
    scenario: PathBuf,

    /// Stop after this many rounds
    #[arg(long, default_value_t = 50)]
    max_turns: u32,

    /// Print events as JSON lines instead of messages
    #[arg(long)]
    json: bool,

    /// Log level when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(&cli.log_level);

    let rules = match &cli.rules {
        Some(path) => CombatRules::load(path)
            .with_context(|| format!("loading rules from {}", path.display()))?,
        None => CombatRules::default(),
    };
    let scenario = Scenario::load(&cli.scenario)?;

    let summary = battle::run(&scenario, &rules, cli.seed, cli.max_turns)
        .context("scenario setup rejected by the engine")?;

    if cli.json {
        for event in &summary.events {
            println!("{}", serde_json::to_string(event)?);
        }
    } else {
        for event in &summary.events {
            println!("{}", event.message());
        }
        println!();
        println!(
            "{:?} after {} turn(s). {} {:.0} HP, {} {:.0} HP.",
            summary.outcome,
            summary.turns,
            scenario.player.name,
            summary.player_health,
            scenario.enemy.name,
            summary.enemy_health
        );
    }

    Ok(())
}
