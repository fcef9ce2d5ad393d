//! Combat tuning (resource).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Time-dilation request attached to a successful counter.
///
/// Core only emits it; the presentation layer owns simulation speed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeDilation {
    /// Target time scale (0.1 = 10% speed)
    pub factor: f32,
    /// Ease-in duration, real seconds
    pub ramp_secs: f32,
    /// Hold at `factor`, real seconds
    pub hold_secs: f32,
}

impl Default for TimeDilation {
    fn default() -> Self {
        Self {
            factor: 0.1,
            ramp_secs: 0.3,
            hold_secs: 0.3,
        }
    }
}

/// Параметры боя (stamina economy, окна, реакции, движение)
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// FixedUpdate rate
    pub tick_hz: f64,
    pub max_health: u32,
    pub max_stamina: f32,
    /// Delay before regen starts after a drain (seconds)
    pub regen_delay_secs: f32,
    /// Regen ramp, stamina per second
    pub regen_rate: f32,
    /// Combo buffer expiry window (seconds)
    pub combo_window_secs: f32,
    /// Animation blend after any state change; moves are rejected while it runs
    pub transition_blend_secs: f32,
    /// Stamina drained by a blocked strike. `None` = the move's base damage.
    pub block_stamina_drain: Option<f32>,
    /// Stamina every strike on a Counter zone costs the defender
    pub counter_read_cost: f32,
    /// How long a counter stance keeps the Counter zone open
    pub counter_stance_secs: f32,
    /// Counter animation after a successful read
    pub counter_animation_secs: f32,
    /// Stagger forced on a countered attacker
    pub counter_stagger_secs: f32,
    /// Hurtbox damage at or above this staggers from any live state
    pub big_hit_threshold: u32,
    pub hit_stun_secs: f32,
    pub big_hit_stun_secs: f32,
    pub time_dilation: TimeDilation,
    /// Ring units per second
    pub move_speed: f32,
    pub ring_half_width: f32,
    pub min_separation: f32,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            tick_hz: 60.0,
            max_health: 100,
            max_stamina: 100.0,
            regen_delay_secs: 2.0,
            regen_rate: 50.0,
            combo_window_secs: 1.5,
            transition_blend_secs: 0.1,
            block_stamina_drain: None,
            counter_read_cost: 20.0,
            counter_stance_secs: 0.6,
            counter_animation_secs: 0.8,
            counter_stagger_secs: 1.0,
            big_hit_threshold: 10,
            hit_stun_secs: 0.25,
            big_hit_stun_secs: 0.6,
            time_dilation: TimeDilation::default(),
            move_speed: 2.0,
            ring_half_width: 4.0,
            min_separation: 0.8,
        }
    }
}

impl CombatConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("tick_hz", self.tick_hz as f32),
            ("max_stamina", self.max_stamina),
            ("max_health", self.max_health as f32),
            ("regen_rate", self.regen_rate),
            ("combo_window_secs", self.combo_window_secs),
            ("counter_stance_secs", self.counter_stance_secs),
            ("counter_animation_secs", self.counter_animation_secs),
            ("ring_half_width", self.ring_half_width),
        ];
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        let non_negative = [
            ("regen_delay_secs", self.regen_delay_secs),
            ("transition_blend_secs", self.transition_blend_secs),
            ("block_stamina_drain", self.block_stamina_drain.unwrap_or(0.0)),
            ("counter_read_cost", self.counter_read_cost),
            ("counter_stagger_secs", self.counter_stagger_secs),
            ("hit_stun_secs", self.hit_stun_secs),
            ("big_hit_stun_secs", self.big_hit_stun_secs),
            ("move_speed", self.move_speed),
            ("min_separation", self.min_separation),
        ];
        for (field, value) in non_negative {
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }

        Ok(())
    }

    /// Fixed timestep in seconds.
    pub fn tick_secs(&self) -> f32 {
        (1.0 / self.tick_hz) as f32
    }
}
