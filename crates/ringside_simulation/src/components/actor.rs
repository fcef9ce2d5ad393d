//! Базовые компоненты бойца: Fighter, FighterSlot, Health, RoundStats

use bevy::prelude::*;
use serde::Serialize;

/// Боец на ринге (ровно два на матч)
///
/// Все остальные компоненты приходят через `FighterBundle`.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Fighter;

/// Corner of the ring a fighter belongs to.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Reflect, Serialize)]
#[reflect(Component)]
pub enum FighterSlot {
    One,
    Two,
}

impl FighterSlot {
    pub const BOTH: [FighterSlot; 2] = [FighterSlot::One, FighterSlot::Two];

    pub fn index(self) -> usize {
        match self {
            FighterSlot::One => 0,
            FighterSlot::Two => 1,
        }
    }

    pub fn other(self) -> Self {
        match self {
            FighterSlot::One => FighterSlot::Two,
            FighterSlot::Two => FighterSlot::One,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FighterSlot::One => "Player 1",
            FighterSlot::Two => "Player 2",
        }
    }
}

/// Здоровье бойца
///
/// Инвариант: 0 ≤ current ≤ max
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect, Serialize)]
#[reflect(Component)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100)
    }
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    /// Saturating; returns the damage actually applied.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let before = self.current;
        self.current = self.current.saturating_sub(amount);
        before - self.current
    }

    pub fn refill(&mut self) {
        self.current = self.max;
    }

    pub fn fraction(&self) -> f32 {
        if self.max == 0 {
            0.0
        } else {
            self.current as f32 / self.max as f32
        }
    }
}

/// Per-round scoring (damage dealt + counted combos).
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default, Reflect, Serialize)]
#[reflect(Component)]
pub struct RoundStats {
    pub damage_dealt: u32,
    pub combos: u32,
}

impl RoundStats {
    pub fn credit_damage(&mut self, amount: u32) {
        self.damage_dealt = self.damage_dealt.saturating_add(amount);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
