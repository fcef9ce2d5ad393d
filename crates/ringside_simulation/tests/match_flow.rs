//! Match flow integration: rounds, interim, knockouts, restart.

use bevy::prelude::*;
use ringside_simulation::combat::{DefenseZone, Limb};
use ringside_simulation::match_flow::{MatchEndReason, MatchPhase};
use ringside_simulation::*;

/// Ticks from a Jab command until its strike volume is live
const JAB_LIVE_TICKS: u32 = 12;

fn create_match(config: MatchConfig) -> (App, Entity, Entity) {
    let mut app = create_headless_app(42);
    app.insert_resource(MatchState::new(&config)).insert_resource(config);
    let [one, two] = spawn_fighters(app.world_mut());
    (app, one, two)
}

/// `attacker` throws a Jab and it connects on the hurtbox.
fn land_jab(app: &mut App, attacker: Entity, defender: Entity) {
    app.world_mut()
        .send_event(FighterCommand::new(attacker, CommandAction::ThrowMove(MoveId::Jab)));
    run_ticks(app, JAB_LIVE_TICKS);
    app.world_mut().send_event(HitEvent {
        attacker,
        defender,
        move_id: MoveId::Jab,
        limb: Limb::Right,
        defense_zone: DefenseZone::Hurtbox,
    });
    run_ticks(app, 1);
}

fn state(app: &App) -> &MatchState {
    app.world().resource::<MatchState>()
}

fn gate_open(app: &App) -> bool {
    app.world().resource::<CombatGate>().is_open()
}

#[test]
fn test_round_ends_on_time_with_damage_decision() {
    let (mut app, one, two) = create_match(MatchConfig {
        round_secs: 1.0,
        interim_secs: 0.5,
        ..Default::default()
    });

    land_jab(&mut app, one, two);
    let events = run_ticks_draining::<MatchEvent>(&mut app, 60 - JAB_LIVE_TICKS);
    let ended = events.iter().find_map(|e| match e {
        MatchEvent::RoundEnded(result) => Some(result.clone()),
        _ => None,
    });
    let result = ended.expect("round 1 should end after 60 ticks");
    assert_eq!(result.round, 1);
    assert_eq!(result.winner, Some(FighterSlot::One));
    assert_eq!(result.summaries[0].damage_dealt, 1);
    assert_eq!(result.summaries[1].damage_dealt, 0);
    assert!(events.contains(&MatchEvent::InterimStarted { round: 1, secs: 0.5 }));

    assert!(!gate_open(&app));
    assert_eq!(state(&app).rounds_won, [1, 0]);
    assert!(matches!(state(&app).phase, MatchPhase::Interim { .. }));

    // Interim кончается сам, бойцы сброшены
    let events = run_ticks_draining::<MatchEvent>(&mut app, 31);
    assert!(events.contains(&MatchEvent::RoundStarted { round: 2 }));
    assert!(gate_open(&app));
    assert_eq!(state(&app).round, 2);
    assert_eq!(app.world().get::<Health>(two).map(|h| h.current), Some(100));
    assert_eq!(app.world().get::<RoundStats>(one).map(|s| s.damage_dealt), Some(0));
}

#[test]
fn test_combo_pending_at_bell_counts_for_round() {
    let (mut app, one, _) = create_match(MatchConfig {
        round_secs: 1.0,
        ..Default::default()
    });

    // Jab → Right_Hook за ~0.4s до гонга: буфер ещё не истёк
    run_ticks(&mut app, 34);
    app.world_mut()
        .send_event(FighterCommand::new(one, CommandAction::ThrowMove(MoveId::Jab)));
    run_ticks(&mut app, JAB_LIVE_TICKS);
    app.world_mut()
        .send_event(FighterCommand::new(one, CommandAction::ThrowMove(MoveId::RightHook)));
    run_ticks(&mut app, 1);

    let events = run_ticks_draining::<MatchEvent>(&mut app, 20);
    let result = events
        .iter()
        .find_map(|e| match e {
            MatchEvent::RoundEnded(result) => Some(result.clone()),
            _ => None,
        })
        .expect("round 1 should end on time");

    // Урона нет: решают комбо
    assert_eq!(result.summaries[0].damage_dealt, 0);
    assert_eq!(result.summaries[0].combos, 1);
    assert_eq!(result.summaries[0].top_combos[0].key, "Jab -> Right_Hook");
    assert_eq!(result.winner, Some(FighterSlot::One));
}

#[test]
fn test_knockout_ends_match() {
    let (mut app, one, two) = create_match(MatchConfig::default());
    if let Some(mut health) = app.world_mut().get_mut::<Health>(two) {
        health.current = 1;
    }

    land_jab(&mut app, one, two);

    let combat = drain_events::<CombatEvent>(&mut app);
    assert!(combat.contains(&CombatEvent::Defeated { fighter: two, by: Some(one) }));

    let events = drain_events::<MatchEvent>(&mut app);
    assert!(events.contains(&MatchEvent::MatchEnded {
        winner: Some(FighterSlot::One),
        reason: MatchEndReason::Knockout,
        rounds_won: [1, 0],
    }));
    assert!(state(&app).is_finished());
    assert_eq!(state(&app).winner(), Some(FighterSlot::One));
    assert!(!gate_open(&app));

    // После конца матча ничего не двигается
    run_ticks(&mut app, 120);
    assert!(drain_events::<MatchEvent>(&mut app).is_empty());
}

#[test]
fn test_both_ready_skips_interim() {
    let (mut app, _, _) = create_match(MatchConfig {
        round_secs: 0.5,
        interim_secs: 10.0,
        ..Default::default()
    });
    run_ticks(&mut app, 31);
    assert!(matches!(state(&app).phase, MatchPhase::Interim { .. }));

    app.world_mut().send_event(MatchCommand::Ready(FighterSlot::One));
    run_ticks(&mut app, 1);
    assert!(matches!(state(&app).phase, MatchPhase::Interim { .. }));

    app.world_mut().send_event(MatchCommand::Ready(FighterSlot::Two));
    run_ticks(&mut app, 1);
    assert!(state(&app).is_fighting());
    assert_eq!(state(&app).round, 2);
    assert!(gate_open(&app));
}

#[test]
fn test_level_match_is_a_draw_after_extra_rounds() {
    let (mut app, _, _) = create_match(MatchConfig {
        round_secs: 0.5,
        interim_secs: 0.1,
        rounds: 1,
        max_extra_rounds: 1,
        ..Default::default()
    });

    // Раунд 1 ничейный → дополнительный раунд 2, тоже ничейный → draw
    let events = run_ticks_draining::<MatchEvent>(&mut app, 120);
    assert!(events.contains(&MatchEvent::RoundStarted { round: 2 }));
    assert!(events.contains(&MatchEvent::MatchEnded {
        winner: None,
        reason: MatchEndReason::Draw,
        rounds_won: [0, 0],
    }));
    assert_eq!(state(&app).history.len(), 2);
}

#[test]
fn test_restart_resets_match_and_fighters() {
    let (mut app, one, two) = create_match(MatchConfig::default());
    if let Some(mut health) = app.world_mut().get_mut::<Health>(two) {
        health.current = 1;
    }
    land_jab(&mut app, one, two);
    assert!(state(&app).is_finished());
    drain_events::<MatchEvent>(&mut app);

    app.world_mut().send_event(MatchCommand::Restart);
    run_ticks(&mut app, 1);

    let events = drain_events::<MatchEvent>(&mut app);
    assert!(events.contains(&MatchEvent::RoundStarted { round: 1 }));
    assert!(state(&app).is_fighting());
    assert_eq!(state(&app).rounds_won, [0, 0]);
    assert!(gate_open(&app));

    let snapshots = fighter_snapshots(app.world_mut());
    assert!(snapshots.iter().all(|s| s.health == 100 && s.stamina == 100.0));
    assert!(snapshots.iter().all(|s| s.health_fraction == 1.0 && s.stamina_fraction == 1.0));
    assert_eq!(snapshots[0].x, -2.0);
    assert_eq!(snapshots[1].x, 2.0);
}
