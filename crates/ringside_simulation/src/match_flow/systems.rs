//! Match flow systems (CombatSet::Match).

use bevy::prelude::*;

use crate::combat::events::CombatEvent;
use crate::combat::fighter::FighterData;
use crate::combat::CombatGate;
use crate::components::{Facing, FighterSlot, MoveIntent, RingPosition, RoundStats};
use crate::match_flow::config::MatchConfig;
use crate::match_flow::events::{MatchCommand, MatchEvent};
use crate::match_flow::state::{
    decide_round_winner, FighterRoundSummary, MatchPhase, MatchState, RoundResult, RoundVerdict,
    TOP_COMBOS,
};

/// Everything a round reset touches.
pub type ResetQuery<'w, 's> =
    Query<'w, 's, (FighterData, &'static mut RingPosition, &'static mut Facing, &'static mut MoveIntent)>;

/// Restores both fighters to round-start condition at their spawn marks.
pub fn reset_fighters(fighters: &mut ResetQuery, config: &MatchConfig) {
    for (mut data, mut position, mut facing, mut intent) in fighters.iter_mut() {
        let mut fighter = data.as_fighter();
        fighter.reset_for_round();

        let (x, toward) = match fighter.slot {
            FighterSlot::One => (-config.spawn_x, config.spawn_x),
            FighterSlot::Two => (config.spawn_x, -config.spawn_x),
        };
        position.x = x;
        *facing = Facing::toward(x, toward);
        intent.0 = Vec2::ZERO;
    }
    crate::logger::log("🔄 fighters reset to spawn");
}

/// Combos still in the buffer at the bell count for the round.
fn close_pending_combos(fighters: &mut ResetQuery, combat_events: &mut EventWriter<CombatEvent>) {
    let mut emitted = Vec::new();
    for (mut data, ..) in fighters.iter_mut() {
        data.as_fighter().close_combo(&mut emitted);
    }
    for event in emitted {
        combat_events.write(event);
    }
}

/// Round summary from the fighters' current stats and combo history.
///
/// `survivor` is set for knockouts; otherwise the stats decide.
fn summarize_round(round: u32, fighters: &ResetQuery, survivor: Option<FighterSlot>) -> RoundResult {
    let mut summaries = FighterSlot::BOTH.map(FighterRoundSummary::empty);
    for (data, ..) in fighters.iter() {
        summaries[data.slot.index()] = FighterRoundSummary {
            slot: *data.slot,
            damage_dealt: data.stats.damage_dealt,
            combos: data.stats.combos,
            top_combos: data.combo.top_n(TOP_COMBOS),
        };
    }

    let winner = survivor.or_else(|| {
        decide_round_winner(summaries.clone().map(|s| RoundStats {
            damage_dealt: s.damage_dealt,
            combos: s.combos,
        }))
    });

    RoundResult { round, winner, summaries }
}

fn apply_verdict(
    verdict: RoundVerdict,
    state: &mut MatchState,
    config: &MatchConfig,
    gate: &mut CombatGate,
    match_events: &mut EventWriter<MatchEvent>,
) {
    gate.set_open(false);
    match verdict {
        RoundVerdict::NextRound => {
            state.begin_interim(config);
            crate::logger::log_info(&format!(
                "⏸️ Round {} over, interim {:.0}s (rounds won {:?})",
                state.round, config.interim_secs, state.rounds_won
            ));
            match_events.write(MatchEvent::InterimStarted {
                round: state.round,
                secs: config.interim_secs,
            });
        }
        RoundVerdict::MatchOver { winner, reason } => {
            state.finish(winner, reason);
            crate::logger::log_info(&format!(
                "🏆 Match over: {} ({:?}, rounds won {:?})",
                winner.map_or("draw", |slot| slot.label()),
                reason,
                state.rounds_won
            ));
            match_events.write(MatchEvent::MatchEnded {
                winner,
                reason,
                rounds_won: state.rounds_won,
            });
        }
    }
}

/// System: Ready / Restart.
pub fn handle_match_commands(
    mut commands_in: EventReader<MatchCommand>,
    mut state: ResMut<MatchState>,
    config: Res<MatchConfig>,
    mut gate: ResMut<CombatGate>,
    mut fighters: ResetQuery,
    mut match_events: EventWriter<MatchEvent>,
) {
    for command in commands_in.read() {
        match command {
            MatchCommand::Ready(slot) => {
                if state.mark_ready(*slot) {
                    if let MatchPhase::Interim { clock, .. } = &mut state.phase {
                        // Оба готовы: interim заканчивается в этом же тике
                        clock.tick(f32::MAX);
                    }
                }
            }
            MatchCommand::Restart => {
                *state = MatchState::new(&config);
                reset_fighters(&mut fighters, &config);
                gate.set_open(true);
                crate::logger::log_info("🔁 Match restarted");
                match_events.write(MatchEvent::RoundStarted { round: 1 });
            }
        }
    }
}

/// System: a defeated fighter ends the match; the survivor wins.
pub fn detect_knockouts(
    mut combat_events: EventReader<CombatEvent>,
    mut state: ResMut<MatchState>,
    config: Res<MatchConfig>,
    mut gate: ResMut<CombatGate>,
    mut fighters: ResetQuery,
    mut match_events: EventWriter<MatchEvent>,
) {
    for event in combat_events.read() {
        let CombatEvent::Defeated { fighter, .. } = event else {
            continue;
        };
        if !state.is_fighting() {
            continue;
        }
        let Ok((data, ..)) = fighters.get(*fighter) else {
            crate::logger::log_warning(&format!("⚠️ Defeated event for unknown fighter {:?}", fighter));
            continue;
        };
        let survivor = data.slot.other();

        let result = summarize_round(state.round, &fighters, Some(survivor));
        crate::logger::log_info(&format!("🥊 KO in round {}: {} wins", state.round, survivor.label()));
        match_events.write(MatchEvent::RoundEnded(result.clone()));

        let verdict = state.record_knockout(result);
        apply_verdict(verdict, &mut state, &config, &mut gate, &mut match_events);
    }
}

/// System: round clock and interim countdown.
pub fn advance_match_clock(
    time: Res<Time>,
    mut state: ResMut<MatchState>,
    config: Res<MatchConfig>,
    mut gate: ResMut<CombatGate>,
    mut fighters: ResetQuery,
    mut combat_events: EventWriter<CombatEvent>,
    mut match_events: EventWriter<MatchEvent>,
) {
    let dt = time.delta_secs();
    let state = state.into_inner();

    match &mut state.phase {
        MatchPhase::Fighting => {
            state.round_clock.tick(dt);
            if !state.round_clock.is_expired() {
                return;
            }

            close_pending_combos(&mut fighters, &mut combat_events);
            let result = summarize_round(state.round, &fighters, None);
            crate::logger::log_info(&format!(
                "🔔 Round {} ends on time: {}",
                state.round,
                result.winner.map_or("draw", |slot| slot.label())
            ));
            match_events.write(MatchEvent::RoundEnded(result.clone()));

            let verdict = state.record_round(result, &config);
            apply_verdict(verdict, state, &config, &mut gate, &mut match_events);
        }
        MatchPhase::Interim { clock, .. } => {
            clock.tick(dt);
            if !clock.is_expired() {
                return;
            }

            reset_fighters(&mut fighters, &config);
            state.begin_next_round(&config);
            gate.set_open(true);
            crate::logger::log_info(&format!("🔔 Round {} starts", state.round));
            match_events.write(MatchEvent::RoundStarted { round: state.round });
        }
        MatchPhase::Finished { .. } => {}
    }
}
