//! Stamina economy: clamped pool + delayed regen ramp.
//!
//! Регенерация - одна кооперативная последовательность (delay → ramp),
//! хранимая прямо в компоненте. Любой новый расход во время неполного
//! пула сбрасывает её на начало delay. Две параллельные регенерации
//! невозможны структурно: слот один.

use bevy::prelude::*;
use serde::Serialize;

use crate::combat::config::CombatConfig;
use crate::shared::Countdown;

/// Regen sequence state.
#[derive(Debug, Clone, Copy, PartialEq, Default, Reflect, Serialize)]
pub enum RegenSequence {
    #[default]
    Inactive,
    /// Waiting `regen_delay` seconds before refilling
    Delay(Countdown),
    /// Refilling at `regen_rate` per second until full
    Ramping,
}

/// Выносливость бойца
///
/// Инвариант: 0.0 ≤ current ≤ max
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect, Serialize)]
#[reflect(Component)]
pub struct Stamina {
    pub current: f32,
    pub max: f32,
    /// Units per second during the ramp
    pub regen_rate: f32,
    /// Seconds before the ramp starts
    pub regen_delay: f32,
    pub regen: RegenSequence,
}

impl Default for Stamina {
    fn default() -> Self {
        Self::new(100.0)
    }
}

impl Stamina {
    pub fn new(max: f32) -> Self {
        Self {
            current: max,
            max,
            regen_rate: 50.0,
            regen_delay: 2.0,
            regen: RegenSequence::Inactive,
        }
    }

    pub fn from_config(config: &CombatConfig) -> Self {
        Self {
            regen_rate: config.regen_rate,
            regen_delay: config.regen_delay_secs,
            ..Self::new(config.max_stamina)
        }
    }

    /// Strictly greater: a move costing exactly the remaining pool is refused.
    pub fn can_afford(&self, cost: f32) -> bool {
        self.current > cost
    }

    pub fn is_depleted(&self) -> bool {
        self.current <= 0.0
    }

    pub fn is_full(&self) -> bool {
        self.current >= self.max
    }

    /// Adds `amount` (negative = spend) and clamps to [0, max].
    ///
    /// A spend that leaves the pool below max restarts regen from the
    /// beginning of the delay.
    pub fn modify(&mut self, amount: f32) {
        debug_assert!(amount.is_finite(), "stamina delta must be finite");
        self.current = (self.current + amount).clamp(0.0, self.max);

        if amount < 0.0 && !self.is_full() {
            self.start_regen();
        }
    }

    /// Cancel-and-replace: always begins a fresh delay.
    pub fn start_regen(&mut self) {
        self.regen = RegenSequence::Delay(Countdown::started(self.regen_delay));
    }

    pub fn cancel_regen(&mut self) {
        self.regen = RegenSequence::Inactive;
    }

    /// Starts regen only if none is running and the pool is not full
    /// (block release, leaving a counter stance).
    pub fn resume_regen(&mut self) {
        if !self.is_full() && self.regen == RegenSequence::Inactive {
            self.start_regen();
        }
    }

    pub fn is_regenerating(&self) -> bool {
        self.regen != RegenSequence::Inactive
    }

    /// Elapsed fraction of the regen delay (UI indicator). 1.0 once ramping.
    pub fn regen_delay_fraction(&self) -> f32 {
        match &self.regen {
            RegenSequence::Inactive => 0.0,
            RegenSequence::Delay(timer) => timer.fraction(),
            RegenSequence::Ramping => 1.0,
        }
    }

    /// Advances the regen sequence by `dt`.
    ///
    /// Blocking aborts a running sequence; it is restarted on release.
    /// Delay time left over in the tick the delay expires flows into the ramp.
    pub fn advance_regen(&mut self, dt: f32, blocking: bool) {
        if blocking {
            self.cancel_regen();
            return;
        }

        let ramp_secs = match &mut self.regen {
            RegenSequence::Inactive => return,
            RegenSequence::Delay(timer) => {
                let before = timer.remaining();
                timer.tick(dt);
                if !timer.is_expired() {
                    return;
                }
                (dt - before).max(0.0)
            }
            RegenSequence::Ramping => dt,
        };

        self.regen = RegenSequence::Ramping;
        self.current = (self.current + self.regen_rate * ramp_secs).min(self.max);
        if self.is_full() {
            self.regen = RegenSequence::Inactive;
        }
    }

    /// Full pool, no regen (round reset).
    pub fn refill(&mut self) {
        self.current = self.max;
        self.regen = RegenSequence::Inactive;
    }

    pub fn fraction(&self) -> f32 {
        if self.max <= 0.0 {
            0.0
        } else {
            self.current / self.max
        }
    }
}
