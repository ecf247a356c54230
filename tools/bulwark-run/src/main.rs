//! bulwark-run: headless driver for the BULWARK simulation.
//!
//! Plays one or more runs with a simple autopilot, carrying permanent
//! progress between them through a JSON file.
//!
//! Usage:
//!   bulwark-run --seed 7 --ticks 36000 --runs 3 --progress progress.json

use std::path::PathBuf;
use std::process;

use log::{info, warn};

use bulwark_campaign::JsonFileStore;
use bulwark_core::commands::PlayerCommand;
use bulwark_core::constants::{SHIELD_Y, TICK_RATE};
use bulwark_core::enums::{GamePhase, PermanentUpgradeKind, ShieldPhase, UpgradeKind};
use bulwark_core::state::GameStateSnapshot;
use bulwark_sim::{SimConfig, SimulationEngine};

/// Enemies this close above the shield line make the autopilot raise it.
const SHIELD_TRIGGER_MARGIN: f64 = 60.0;

/// Enemies on the field before the autopilot spends an ultimate.
const ULTIMATE_CROWD: usize = 8;

/// In-run upgrades in the order the autopilot prefers them.
const UPGRADE_PRIORITY: [UpgradeKind; 5] = [
    UpgradeKind::Damage,
    UpgradeKind::FireRate,
    UpgradeKind::MultiShot,
    UpgradeKind::Explosive,
    UpgradeKind::Range,
];

struct Options {
    seed: u64,
    ticks: u64,
    runs: u32,
    progress: PathBuf,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return;
    }
    let options = match parse_options(&args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {e}");
            print_usage();
            process::exit(1);
        }
    };

    let store = JsonFileStore::new(&options.progress);
    let mut engine = SimulationEngine::new(
        SimConfig {
            seed: options.seed,
            ..Default::default()
        },
        Box::new(store),
    );
    info!(
        "Seed {}, {} run(s), progress at {}",
        options.seed,
        options.runs,
        options.progress.display()
    );

    for run in 1..=options.runs {
        let last = play_run(&mut engine, options.ticks);
        summarize(run, &last);
        spend_experience(&mut engine);
        engine.reset_game();
    }
}

fn print_usage() {
    eprintln!(
        "bulwark-run: headless BULWARK autopilot\n\
         \n\
           --seed <N>        RNG seed (default: 42)\n\
           --ticks <N>       Tick limit per run (default: 10 minutes of play)\n\
           --runs <N>        Runs to play back to back (default: 1)\n\
           --progress <path> Permanent progress file (default: bulwark-progress.json)\n"
    );
}

fn parse_options(args: &[String]) -> Result<Options, String> {
    let mut options = Options {
        seed: SimConfig::default().seed,
        ticks: 10 * 60 * TICK_RATE as u64,
        runs: 1,
        progress: PathBuf::from("bulwark-progress.json"),
    };
    let mut i = 0;
    while i < args.len() {
        let value = args
            .get(i + 1)
            .ok_or_else(|| format!("Missing value for {}", args[i]))?;
        match args[i].as_str() {
            "--seed" => options.seed = parse_number(&args[i], value)?,
            "--ticks" => options.ticks = parse_number(&args[i], value)?,
            "--runs" => options.runs = parse_number(&args[i], value)?,
            "--progress" => options.progress = PathBuf::from(value),
            other => return Err(format!("Unknown flag: {other}")),
        }
        i += 2;
    }
    Ok(options)
}

fn parse_number<T: std::str::FromStr>(flag: &str, value: &str) -> Result<T, String>
where
    T::Err: std::fmt::Display,
{
    value
        .parse()
        .map_err(|e| format!("Invalid value for {flag} '{value}': {e}"))
}

/// Play until game over or the tick limit. Returns the last snapshot.
fn play_run(engine: &mut SimulationEngine, ticks: u64) -> GameStateSnapshot {
    let mut snapshot = engine.tick();
    for _ in 1..ticks {
        if snapshot.phase == GamePhase::GameOver {
            break;
        }
        engine.queue_commands(autopilot(&snapshot));
        snapshot = engine.tick();
    }
    snapshot
}

/// Decide this tick's commands from the last snapshot.
fn autopilot(snapshot: &GameStateSnapshot) -> Vec<PlayerCommand> {
    let mut commands = Vec::new();

    let threatened = snapshot
        .enemies
        .iter()
        .any(|e| e.position.y + e.radius > SHIELD_Y - SHIELD_TRIGGER_MARGIN);
    if threatened && snapshot.shield.phase == ShieldPhase::Ready {
        commands.push(PlayerCommand::ActivateShield);
    }

    if snapshot.effect.is_none() && snapshot.enemies.len() >= ULTIMATE_CROWD {
        if let Some(slot) = snapshot.ultimates.iter().find(|u| u.ready) {
            commands.push(PlayerCommand::TriggerUltimate { index: slot.index });
        }
    }

    if snapshot.run.health < snapshot.run.max_health * 0.5 {
        commands.push(PlayerCommand::BuyUpgrade {
            kind: UpgradeKind::Heal,
        });
    } else if let Some(kind) = UPGRADE_PRIORITY.iter().copied().find(|&kind| {
        snapshot
            .upgrades
            .iter()
            .any(|u| u.kind == kind && u.affordable)
    }) {
        commands.push(PlayerCommand::BuyUpgrade { kind });
    }

    commands
}

/// Buy every permanent upgrade the banked experience covers, cheapest first.
fn spend_experience(engine: &mut SimulationEngine) {
    loop {
        let cheapest = PermanentUpgradeKind::ALL
            .iter()
            .copied()
            .filter(|&kind| engine.progress().can_purchase(kind))
            .min_by_key(|&kind| engine.progress().cost(kind));
        let Some(kind) = cheapest else {
            break;
        };
        if !engine.buy_permanent_upgrade(kind) {
            warn!("Permanent upgrade {kind:?} refused");
            break;
        }
    }
}

fn summarize(run: u32, last: &GameStateSnapshot) {
    let outcome = match last.phase {
        GamePhase::GameOver => "destroyed",
        _ => "tick limit",
    };
    info!(
        "Run {run} ended ({outcome}) at {:.1}s: wave {}, {} kills, {} currency",
        last.time.elapsed_secs, last.run.wave, last.run.kills, last.run.currency
    );
    match serde_json::to_string(&last.progress) {
        Ok(json) => info!("Progress: {json}"),
        Err(e) => warn!("Failed to serialize progress: {e}"),
    }
}
