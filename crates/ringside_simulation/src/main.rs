//! Headless матч Ringside
//!
//! Два scripted бойца, proximity-коллизии вместо физики, фиксированный
//! тик без wall clock. Один и тот же seed → один и тот же матч.

use clap::Parser;

use ringside_simulation::headless::{AutoApproach, HeadlessArenaPlugin};
use ringside_simulation::{
    create_headless_app, drain_events, log_error, log_info, run_ticks, set_log_level, spawn_fighters, CombatConfig,
    CombatEvent, LogLevel, MatchConfig, MatchEvent, MatchState, ScriptedOpponent,
};

/// Headless two-fighter match
#[derive(Parser, Debug)]
#[command(name = "ringside_simulation")]
#[command(about = "Headless two-fighter combat simulation")]
#[command(version)]
struct Args {
    /// RNG seed (scripted opponent timing)
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Scheduled rounds
    #[arg(long, default_value = "3")]
    rounds: u32,

    /// Round length in seconds
    #[arg(long, default_value = "60")]
    round_secs: f32,

    /// Stop after this many fixed ticks even if the match is not over
    #[arg(long, default_value = "100000")]
    max_ticks: u32,

    /// debug | info | warn | error
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() {
    let args = Args::parse();

    let Some(level) = LogLevel::parse(&args.log_level) else {
        eprintln!("unknown log level: {}", args.log_level);
        std::process::exit(2);
    };
    set_log_level(level);

    let match_config = MatchConfig {
        rounds: args.rounds,
        round_secs: args.round_secs,
        ..Default::default()
    };
    let combat_config = CombatConfig::default();
    if let Err(err) = match_config.validate().and_then(|_| combat_config.validate()) {
        log_error(&format!("invalid configuration: {}", err));
        std::process::exit(2);
    }

    let mut app = create_headless_app(args.seed);
    app.add_plugins(HeadlessArenaPlugin)
        .insert_resource(combat_config)
        .insert_resource(MatchState::new(&match_config))
        .insert_resource(match_config);

    let fighters = spawn_fighters(app.world_mut());
    for fighter in fighters {
        app.world_mut()
            .entity_mut(fighter)
            .insert((ScriptedOpponent::default(), AutoApproach));
    }

    log_info(&format!("Starting Ringside headless match (seed: {})", args.seed));

    let mut hits = 0u32;
    let mut counters = 0u32;
    let mut ticks = 0u32;
    while ticks < args.max_ticks {
        run_ticks(&mut app, 1);
        ticks += 1;

        for event in drain_events::<CombatEvent>(&mut app) {
            match event {
                CombatEvent::HitLanded { .. } => hits += 1,
                CombatEvent::CounterSucceeded { .. } => counters += 1,
                _ => {}
            }
        }
        for event in drain_events::<MatchEvent>(&mut app) {
            if let MatchEvent::RoundEnded(result) = &event {
                for summary in &result.summaries {
                    log_info(&format!(
                        "  {}: damage {}, combos {}, top {:?}",
                        summary.slot.label(),
                        summary.damage_dealt,
                        summary.combos,
                        summary.top_combos.iter().map(|c| format!("{} x{}", c.key, c.count)).collect::<Vec<_>>()
                    ));
                }
            }
        }

        if app.world().resource::<MatchState>().is_finished() {
            break;
        }
    }

    let state = app.world().resource::<MatchState>();
    log_info(&format!(
        "Simulation complete after {} ticks: winner {:?}, rounds won {:?}, {} clean hits, {} counters",
        ticks,
        state.winner(),
        state.rounds_won,
        hits,
        counters
    ));
}
