//! Battle Sim - Headless party battles between TOML rosters
//!
//! This runner shows:
//! - Building parties from roster files and an action catalog
//! - Driving a battle one slot at a time to its outcome
//! - Answering player prompts with a simple autopilot
//!
//! Set `RUST_LOG=battle_core=debug` to see turn bookkeeping.

mod autopilot;

use battle_core::config::load_action_configs;
use battle_core::{build_party, default_actions, load_roster, Battle, StepResult};
use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::error::Error;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Run a battle between two rosters
#[derive(Parser, Debug)]
#[command(name = "battle_sim", version, about)]
struct Args {
    /// Roster for the home party (wins are counted for this side)
    #[arg(long, default_value = "battle_sim/rosters/heroes.toml")]
    home: PathBuf,

    /// Roster for the opposing party
    #[arg(long, default_value = "battle_sim/rosters/goblins.toml")]
    away: PathBuf,

    /// Action catalog TOML (defaults to the built-in catalog)
    #[arg(long)]
    actions: Option<PathBuf>,

    /// RNG seed for NPC decisions (random if omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Stop after this many steps
    #[arg(long, default_value = "10000")]
    max_steps: usize,

    /// Print the final battle state as JSON
    #[arg(long)]
    dump: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let catalog = match &args.actions {
        Some(path) => load_action_configs(path)?,
        None => default_actions(),
    };
    let home = build_party(&load_roster(&args.home)?, &catalog)?;
    let away = build_party(&load_roster(&args.away)?, &catalog)?;

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    info!(seed, home = %home.name, away = %away.name, "starting battle");

    println!("{} vs {} (seed {})", home.name, away.name, seed);
    let mut battle = Battle::new(home, away);
    battle.begin()?;

    let mut choice = None;
    let mut last_turn = 0;
    for _ in 0..args.max_steps {
        let step = battle.advance_with_rng(choice.take(), &mut rng)?;
        let turn = battle.progress().turn;
        if turn != last_turn {
            println!("\n-- Turn {} --", turn);
            last_turn = turn;
        }

        match step {
            StepResult::AwaitingInput { fighter, allies, enemies } => {
                choice = autopilot::decide(&fighter, &allies, &enemies);
                if choice.is_none() {
                    return Err(format!("{} has nothing to do", fighter.name).into());
                }
            }
            StepResult::TurnApplied { attacker, target, damage, .. } => {
                let verb = if damage.is_heal() { "heals" } else { "hits" };
                println!(
                    "{} uses {} and {} {} for {} ({} hp left)",
                    attacker.name,
                    damage.action_id,
                    verb,
                    target.name,
                    damage.applied_amount().abs(),
                    target.health()
                );
                if !target.is_alive() {
                    println!("{} falls!", target.name);
                }
            }
            StepResult::Outcome(outcome) => {
                println!("\nOutcome for {}: {:?}", battle.party_a().name, outcome);
                if args.dump {
                    println!("{}", serde_json::to_string_pretty(&battle)?);
                }
                return Ok(());
            }
        }
    }

    Err(format!("no outcome after {} steps", args.max_steps).into())
}
