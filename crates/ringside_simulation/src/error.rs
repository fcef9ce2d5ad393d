//! Error types.
//!
//! Отклонённые команды (мало stamina, неверная фаза, мёртвый боец) - это НЕ
//! ошибки: команды возвращают `bool`. Здесь только то, что говорит о
//! несогласованности внешнего слоя или неверной настройке.

use bevy::prelude::Entity;
use thiserror::Error;

use crate::combat::moves::MoveId;

/// Why a hit event was skipped by the resolution engine.
///
/// Nothing is mutated when one of these is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolveError {
    #[error("hit event references unknown fighter {0:?}")]
    UnknownFighter(Entity),

    #[error("fighter {0:?} reported hitting itself")]
    SelfHit(Entity),

    /// Attacker is not attacking, or the limb's strike volume is disabled
    /// or already spent this execution. Expected for repeated overlaps.
    #[error("strike volume of {attacker:?} is not live")]
    StrikeNotLive { attacker: Entity },

    #[error("move {0:?} is missing from the move table")]
    UnknownMove(MoveId),

    #[error("defender {0:?} is already down")]
    DefenderDown(Entity),
}

impl ResolveError {
    /// Consistency faults of the collision layer (logged as warnings).
    /// Everything else is routine and logged at debug.
    pub fn is_consistency_fault(&self) -> bool {
        matches!(
            self,
            ResolveError::UnknownFighter(_) | ResolveError::SelfHit(_) | ResolveError::UnknownMove(_)
        )
    }
}

/// Invalid tuning values in `CombatConfig`, `MatchConfig` or `MoveTable`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be positive (got {value})")]
    NotPositive { field: &'static str, value: f32 },

    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f32 },

    #[error("phase window {field} is invalid: [{start}, {end}] must satisfy 0 <= start <= end <= 1")]
    BadWindow {
        field: &'static str,
        start: f32,
        end: f32,
    },

    #[error("move table entry for {0:?} is missing")]
    MissingMove(MoveId),

    #[error("match must have at least one round")]
    NoRounds,
}
