//! Match settings (resource).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Round length (seconds)
    pub round_secs: f32,
    /// Break between rounds (seconds); both fighters ready ends it early
    pub interim_secs: f32,
    /// Scheduled rounds
    pub rounds: u32,
    /// Fighters reset to x = ∓spawn_x
    pub spawn_x: f32,
    /// Tie-breaker rounds after the scheduled ones; a match still level
    /// after these is a draw
    pub max_extra_rounds: u32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            round_secs: 60.0,
            interim_secs: 10.0,
            rounds: 3,
            spawn_x: 2.0,
            max_extra_rounds: 3,
        }
    }
}

impl MatchConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rounds == 0 {
            return Err(ConfigError::NoRounds);
        }
        if self.round_secs <= 0.0 {
            return Err(ConfigError::NotPositive { field: "round_secs", value: self.round_secs });
        }
        if self.interim_secs < 0.0 {
            return Err(ConfigError::Negative { field: "interim_secs", value: self.interim_secs });
        }
        if self.spawn_x < 0.0 {
            return Err(ConfigError::Negative { field: "spawn_x", value: self.spawn_x });
        }
        Ok(())
    }

    /// Last round that may be played, extra rounds included.
    pub fn round_limit(&self) -> u32 {
        self.rounds.saturating_add(self.max_extra_rounds)
    }
}
