//! Countdown timer primitive.
//!
//! Все таймеры симуляции (regen delay, combo expiry, attack/stun/counter
//! windows, round clock) - это кооперативные countdown'ы, которые двигает
//! один и тот же `advance(dt)` в FixedUpdate. Никаких корутин: состояние
//! полностью видно на границе тика.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Remaining time below this counts as expired (absorbs f32 drift of
/// summing a 1/60 s step).
const SNAP_EPSILON: f32 = 1e-5;

/// Generic countdown / elapsed-time primitive.
///
/// A stopped countdown reports fraction 0 and is never expired. Callers own
/// what happens at expiry.
#[derive(Debug, Clone, Copy, PartialEq, Default, Reflect, Serialize, Deserialize)]
pub struct Countdown {
    duration: f32,
    elapsed: f32,
    running: bool,
}

impl Countdown {
    /// Already-running countdown of `duration` seconds.
    pub fn started(duration: f32) -> Self {
        let mut countdown = Self::default();
        countdown.start(duration);
        countdown
    }

    /// (Re)starts from zero. Negative durations are treated as zero.
    pub fn start(&mut self, duration: f32) {
        self.duration = duration.max(0.0);
        self.elapsed = 0.0;
        self.running = true;
    }

    /// Advances by `dt` and returns the elapsed fraction in [0, 1].
    pub fn tick(&mut self, dt: f32) -> f32 {
        if self.running {
            self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration);
            if self.duration - self.elapsed <= SNAP_EPSILON {
                self.elapsed = self.duration;
            }
        }
        self.fraction()
    }

    pub fn fraction(&self) -> f32 {
        if !self.running {
            return 0.0;
        }
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    pub fn is_expired(&self) -> bool {
        self.running && self.elapsed >= self.duration
    }

    /// Running and not yet expired.
    pub fn is_running(&self) -> bool {
        self.running && self.elapsed < self.duration
    }

    pub fn cancel(&mut self) {
        self.running = false;
        self.elapsed = 0.0;
    }

    pub fn remaining(&self) -> f32 {
        if self.running {
            (self.duration - self.elapsed).max(0.0)
        } else {
            0.0
        }
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }
}
