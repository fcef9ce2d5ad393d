//! Static move table and logical animation phases.
//!
//! Одна каноническая таблица ударов. Resolution берёт урон отсюда ровно один
//! раз, по *текущему* удару атакующего.
//!
//! Counter-распознавание идёт через `LogicalPhase`: защитник в стойке
//! `CounterWindup(Jab)` контрит именно `Jab`. Никаких строковых имён
//! анимаций, только равенство enum'ов.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Reflect, Serialize, Deserialize)]
pub enum MoveId {
    Jab,
    Straight,
    LeftHook,
    RightHook,
}

impl MoveId {
    pub const ALL: [MoveId; 4] = [MoveId::Jab, MoveId::Straight, MoveId::LeftHook, MoveId::RightHook];

    /// Display name, also used to build combo keys (`"Jab -> Right_Hook"`).
    pub fn name(self) -> &'static str {
        match self {
            MoveId::Jab => "Jab",
            MoveId::Straight => "Straight",
            MoveId::LeftHook => "Left_Hook",
            MoveId::RightHook => "Right_Hook",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.name() == name)
    }
}

impl fmt::Display for MoveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which strike volume a move uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum Limb {
    Left,
    Right,
}

/// Point on the defender the strike is aimed at (presentation uses it for IK).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect, Serialize, Deserialize)]
pub enum TargetPoint {
    Chin,
    LeftCheek,
    RightCheek,
}

/// Normalized time range [start, end] of a move's animation.
#[derive(Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
pub struct PhaseWindow {
    pub start: f32,
    pub end: f32,
}

impl PhaseWindow {
    pub const fn new(start: f32, end: f32) -> Self {
        Self { start, end }
    }

    /// Inclusive, with a small tolerance for fixed-step sampling.
    pub fn contains(&self, t: f32) -> bool {
        const EPSILON: f32 = 1e-4;
        t >= self.start - EPSILON && t <= self.end + EPSILON
    }

    fn validate(&self, field: &'static str) -> Result<(), ConfigError> {
        let ok = (0.0..=1.0).contains(&self.start) && (0.0..=1.0).contains(&self.end) && self.start <= self.end;
        if ok {
            Ok(())
        } else {
            Err(ConfigError::BadWindow { field, start: self.start, end: self.end })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
pub struct MoveData {
    pub id: MoveId,
    pub stamina_cost: f32,
    pub base_damage: u32,
    /// Damage the *attacker* takes when this move is countered.
    pub counter_damage: u32,
    pub target: TargetPoint,
    pub limb: Limb,
    /// Full animation length (seconds).
    pub duration: f32,
    /// Strike volume is live inside this window.
    pub active_window: PhaseWindow,
    /// Cancel-into-next-move is allowed inside this window.
    pub combo_window: PhaseWindow,
}

/// Canonical move table (resource).
///
/// Значения выбраны один раз и задокументированы в DESIGN.md; старые
/// варианты с расходящимися costs/damage не поддерживаются.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveTable {
    moves: HashMap<MoveId, MoveData>,
}

impl Default for MoveTable {
    fn default() -> Self {
        const ACTIVE: PhaseWindow = PhaseWindow::new(0.3, 0.5);
        const COMBO: PhaseWindow = PhaseWindow::new(0.3, 0.7);

        let canonical = [
            MoveData {
                id: MoveId::Jab,
                stamina_cost: 10.0,
                base_damage: 1,
                counter_damage: 10,
                target: TargetPoint::Chin,
                limb: Limb::Right,
                duration: 0.5,
                active_window: ACTIVE,
                combo_window: COMBO,
            },
            MoveData {
                id: MoveId::Straight,
                stamina_cost: 15.0,
                base_damage: 3,
                counter_damage: 15,
                target: TargetPoint::Chin,
                limb: Limb::Right,
                duration: 0.6,
                active_window: ACTIVE,
                combo_window: COMBO,
            },
            MoveData {
                id: MoveId::LeftHook,
                stamina_cost: 25.0,
                base_damage: 5,
                counter_damage: 25,
                target: TargetPoint::RightCheek,
                limb: Limb::Left,
                duration: 0.7,
                active_window: ACTIVE,
                combo_window: COMBO,
            },
            MoveData {
                id: MoveId::RightHook,
                stamina_cost: 25.0,
                base_damage: 5,
                counter_damage: 25,
                target: TargetPoint::LeftCheek,
                limb: Limb::Right,
                duration: 0.7,
                active_window: ACTIVE,
                combo_window: COMBO,
            },
        ];

        Self::from_moves(canonical)
    }
}

impl MoveTable {
    pub fn from_moves(moves: impl IntoIterator<Item = MoveData>) -> Self {
        Self {
            moves: moves.into_iter().map(|data| (data.id, data)).collect(),
        }
    }

    pub fn get(&self, id: MoveId) -> Option<&MoveData> {
        self.moves.get(&id)
    }

    /// Overrides one entry (tests, tuning).
    pub fn insert(&mut self, data: MoveData) {
        self.moves.insert(data.id, data);
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for id in MoveId::ALL {
            let data = self.get(id).ok_or(ConfigError::MissingMove(id))?;
            if data.duration <= 0.0 {
                return Err(ConfigError::NotPositive { field: "move.duration", value: data.duration });
            }
            if data.stamina_cost < 0.0 {
                return Err(ConfigError::Negative { field: "move.stamina_cost", value: data.stamina_cost });
            }
            data.active_window.validate("move.active_window")?;
            data.combo_window.validate("move.combo_window")?;
        }
        Ok(())
    }
}

/// Logical animation phase of a fighter, compared by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum LogicalPhase {
    Idle,
    Strike(MoveId),
    Block,
    /// Counter stance reading the given incoming move.
    CounterWindup(MoveId),
    /// Counter animation after a successful read.
    Countering(MoveId),
    Stunned,
    Dead,
}

/// Phase a defender must be in to counter `move_id`.
pub fn expected_counter_phase(move_id: MoveId) -> LogicalPhase {
    LogicalPhase::CounterWindup(move_id)
}
