//! Match state machine: round clock, interim, scoring.
//!
//! Чистая логика без World: системы в `systems.rs` только собирают статы
//! бойцов и применяют решения отсюда.

use bevy::prelude::*;
use serde::Serialize;

use crate::combat::components::ComboRecord;
use crate::components::{FighterSlot, RoundStats};
use crate::match_flow::config::MatchConfig;
use crate::shared::Countdown;

/// Top combos reported per fighter at round end.
pub const TOP_COMBOS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchEndReason {
    Knockout,
    /// Decided on rounds won
    Decision,
    /// Still level after every extra round
    Draw,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MatchPhase {
    Fighting,
    Interim { clock: Countdown, ready: [bool; 2] },
    Finished { winner: Option<FighterSlot>, reason: MatchEndReason },
}

/// Per-fighter line of a round summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FighterRoundSummary {
    pub slot: FighterSlot,
    pub damage_dealt: u32,
    pub combos: u32,
    pub top_combos: Vec<ComboRecord>,
}

impl FighterRoundSummary {
    pub fn empty(slot: FighterSlot) -> Self {
        Self {
            slot,
            damage_dealt: 0,
            combos: 0,
            top_combos: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundResult {
    pub round: u32,
    /// `None` = drawn round
    pub winner: Option<FighterSlot>,
    /// Indexed by `FighterSlot::index`
    pub summaries: [FighterRoundSummary; 2],
}

/// What happens after a round is recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundVerdict {
    NextRound,
    MatchOver { winner: Option<FighterSlot>, reason: MatchEndReason },
}

/// Damage dealt decides; combos break ties; a full tie is a draw.
pub fn decide_round_winner(stats: [RoundStats; 2]) -> Option<FighterSlot> {
    let [one, two] = stats;
    let key = |s: RoundStats| (s.damage_dealt, s.combos);
    match key(one).cmp(&key(two)) {
        std::cmp::Ordering::Greater => Some(FighterSlot::One),
        std::cmp::Ordering::Less => Some(FighterSlot::Two),
        std::cmp::Ordering::Equal => None,
    }
}

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct MatchState {
    pub phase: MatchPhase,
    /// 1-based
    pub round: u32,
    pub round_clock: Countdown,
    pub rounds_won: [u32; 2],
    pub history: Vec<RoundResult>,
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new(&MatchConfig::default())
    }
}

impl MatchState {
    pub fn new(config: &MatchConfig) -> Self {
        Self {
            phase: MatchPhase::Fighting,
            round: 1,
            round_clock: Countdown::started(config.round_secs),
            rounds_won: [0, 0],
            history: Vec::new(),
        }
    }

    pub fn is_fighting(&self) -> bool {
        self.phase == MatchPhase::Fighting
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, MatchPhase::Finished { .. })
    }

    pub fn winner(&self) -> Option<FighterSlot> {
        match self.phase {
            MatchPhase::Finished { winner, .. } => winner,
            _ => None,
        }
    }

    pub fn round_time_left(&self) -> f32 {
        self.round_clock.remaining()
    }

    /// Slot with more rounds won.
    pub fn leader(&self) -> Option<FighterSlot> {
        let [one, two] = self.rounds_won;
        match one.cmp(&two) {
            std::cmp::Ordering::Greater => Some(FighterSlot::One),
            std::cmp::Ordering::Less => Some(FighterSlot::Two),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Books a finished round and decides whether the match goes on.
    pub fn record_round(&mut self, result: RoundResult, config: &MatchConfig) -> RoundVerdict {
        if let Some(winner) = result.winner {
            self.rounds_won[winner.index()] += 1;
        }
        self.history.push(result);

        if self.round < config.rounds {
            return RoundVerdict::NextRound;
        }
        match self.leader() {
            Some(winner) => RoundVerdict::MatchOver {
                winner: Some(winner),
                reason: MatchEndReason::Decision,
            },
            None if self.round >= config.round_limit() => RoundVerdict::MatchOver {
                winner: None,
                reason: MatchEndReason::Draw,
            },
            None => RoundVerdict::NextRound,
        }
    }

    /// Round win for the survivor, then the match ends.
    pub fn record_knockout(&mut self, result: RoundResult) -> RoundVerdict {
        let winner = result.winner;
        if let Some(slot) = winner {
            self.rounds_won[slot.index()] += 1;
        }
        self.history.push(result);
        RoundVerdict::MatchOver {
            winner,
            reason: MatchEndReason::Knockout,
        }
    }

    pub fn begin_interim(&mut self, config: &MatchConfig) {
        self.round_clock.cancel();
        self.phase = MatchPhase::Interim {
            clock: Countdown::started(config.interim_secs),
            ready: [false, false],
        };
    }

    pub fn begin_next_round(&mut self, config: &MatchConfig) {
        self.round += 1;
        self.round_clock.start(config.round_secs);
        self.phase = MatchPhase::Fighting;
    }

    pub fn finish(&mut self, winner: Option<FighterSlot>, reason: MatchEndReason) {
        self.round_clock.cancel();
        self.phase = MatchPhase::Finished { winner, reason };
    }

    /// Marks a fighter ready during the interim. Returns true if both are.
    pub fn mark_ready(&mut self, slot: FighterSlot) -> bool {
        match &mut self.phase {
            MatchPhase::Interim { ready, .. } => {
                ready[slot.index()] = true;
                ready.iter().all(|r| *r)
            }
            _ => false,
        }
    }
}
