//! Match flow events.

use bevy::prelude::*;

use crate::components::FighterSlot;
use crate::match_flow::state::{MatchEndReason, RoundResult};

/// Round/match transitions (presentation: UI, announcer, camera).
#[derive(Event, Debug, Clone, PartialEq)]
pub enum MatchEvent {
    RoundStarted { round: u32 },
    RoundEnded(RoundResult),
    InterimStarted { round: u32, secs: f32 },
    MatchEnded {
        winner: Option<FighterSlot>,
        reason: MatchEndReason,
        rounds_won: [u32; 2],
    },
}

/// Controller input outside the fight itself.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchCommand {
    /// Fighter is ready to skip the rest of the interim
    Ready(FighterSlot),
    /// Back to round 1 with fresh fighters
    Restart,
}
