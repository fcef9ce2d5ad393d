//! Match orchestration: rounds, interim, knockouts, restart.
//!
//! Поверх combat core: читает `CombatEvent::Defeated` и `RoundStats`,
//! закрывает `CombatGate` между раундами и сбрасывает бойцов.

use bevy::prelude::*;

use crate::combat::CombatSet;

pub mod config;
pub mod events;
pub mod state;
pub mod systems;


pub use config::MatchConfig;
pub use events::{MatchCommand, MatchEvent};
pub use state::{decide_round_winner, FighterRoundSummary, MatchEndReason, MatchPhase, MatchState, RoundResult};

/// Match Plugin
///
/// Порядок выполнения (CombatSet::Match, после таймеров):
/// 1. handle_match_commands - Ready / Restart
/// 2. detect_knockouts - Defeated → конец матча
/// 3. advance_match_clock - round clock, interim
pub struct MatchPlugin;

impl Plugin for MatchPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<MatchEvent>().add_event::<MatchCommand>();

        app.init_resource::<MatchConfig>().init_resource::<MatchState>();

        app.add_systems(
            FixedUpdate,
            (
                systems::handle_match_commands,
                systems::detect_knockouts,
                systems::advance_match_clock,
            )
                .chain()
                .in_set(CombatSet::Match),
        );
    }
}
