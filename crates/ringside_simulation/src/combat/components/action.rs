//! Action state machine components.
//!
//! `ActionState` - единственный источник правды о том, что делает боец.
//! `DefenseZone` и `LogicalPhase` выводятся из состояния при входе в него,
//! поэтому зона не может разойтись с состоянием.

use bevy::prelude::*;
use serde::Serialize;

use crate::combat::moves::{Limb, LogicalPhase, MoveId};
use crate::shared::Countdown;

// ============================================================================
// Defense Zone
// ============================================================================

/// Which of the defender's volumes is active.
///
/// Exactly one zone at a time. The collision layer reports which zone a
/// strike overlapped; resolution branches on it.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect, Serialize)]
#[reflect(Component)]
pub enum DefenseZone {
    #[default]
    Hurtbox,
    Block,
    Counter,
}

impl DefenseZone {
    /// Resolution order inside one tick (Counter first).
    pub fn priority(self) -> u8 {
        match self {
            DefenseZone::Counter => 2,
            DefenseZone::Block => 1,
            DefenseZone::Hurtbox => 0,
        }
    }
}

// ============================================================================
// Action State
// ============================================================================

/// Presentation hint for a stun.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect, Serialize)]
pub enum HitReaction {
    /// Light hit on an idle fighter
    Flinch,
    /// Hit at or above the big-hit threshold
    Heavy,
    /// Countered attacker
    Knockback,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Reflect, Serialize)]
pub enum ActionState {
    #[default]
    Idle,
    Attacking {
        move_id: MoveId,
        /// Runs for the move's full duration
        clock: Countdown,
    },
    Blocking,
    /// Counter stance reading `expecting`; Counter zone is open
    CounterStance { expecting: MoveId, window: Countdown },
    /// Counter animation after a successful read of `countered`
    CounterWindup { countered: MoveId, clock: Countdown },
    Stunned { clock: Countdown, reaction: HitReaction },
    Dead,
}

impl ActionState {
    pub fn phase(&self) -> LogicalPhase {
        match self {
            ActionState::Idle => LogicalPhase::Idle,
            ActionState::Attacking { move_id, .. } => LogicalPhase::Strike(*move_id),
            ActionState::Blocking => LogicalPhase::Block,
            ActionState::CounterStance { expecting, .. } => LogicalPhase::CounterWindup(*expecting),
            ActionState::CounterWindup { countered, .. } => LogicalPhase::Countering(*countered),
            ActionState::Stunned { .. } => LogicalPhase::Stunned,
            ActionState::Dead => LogicalPhase::Dead,
        }
    }

    pub fn defense_zone(&self) -> DefenseZone {
        match self {
            ActionState::Blocking => DefenseZone::Block,
            ActionState::CounterStance { .. } => DefenseZone::Counter,
            _ => DefenseZone::Hurtbox,
        }
    }

    pub fn current_move(&self) -> Option<MoveId> {
        match self {
            ActionState::Attacking { move_id, .. } => Some(*move_id),
            _ => None,
        }
    }

    /// Normalized progress of the current move.
    pub fn attack_progress(&self) -> Option<f32> {
        match self {
            ActionState::Attacking { clock, .. } => Some(clock.fraction()),
            _ => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, ActionState::Idle)
    }

    pub fn is_blocking(&self) -> bool {
        matches!(self, ActionState::Blocking)
    }

    pub fn is_dead(&self) -> bool {
        matches!(self, ActionState::Dead)
    }

    /// Footwork is allowed only while neutral or guarding.
    pub fn allows_movement(&self) -> bool {
        matches!(self, ActionState::Idle | ActionState::Blocking)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ActionState::Idle => "Idle",
            ActionState::Attacking { .. } => "Attacking",
            ActionState::Blocking => "Blocking",
            ActionState::CounterStance { .. } => "CounterStance",
            ActionState::CounterWindup { .. } => "CounterWindup",
            ActionState::Stunned { .. } => "Stunned",
            ActionState::Dead => "Dead",
        }
    }
}

/// State + animation blend gate.
///
/// Пока `blend` идёт (transition), новые удары отклоняются.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Reflect)]
#[reflect(Component)]
pub struct ActionMachine {
    pub state: ActionState,
    pub blend: Countdown,
}

impl ActionMachine {
    pub fn in_transition(&self) -> bool {
        self.blend.is_running()
    }
}

// ============================================================================
// Strike Volumes
// ============================================================================

/// Left/right strike volumes of the attacker.
///
/// `spent` is set once a strike of the current execution has been resolved;
/// a spent execution cannot re-enable its volume.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default, Reflect, Serialize)]
#[reflect(Component)]
pub struct StrikeVolumes {
    pub left: bool,
    pub right: bool,
    spent: bool,
}

impl StrikeVolumes {
    pub fn is_live(&self, limb: Limb) -> bool {
        match limb {
            Limb::Left => self.left,
            Limb::Right => self.right,
        }
    }

    pub fn any_live(&self) -> bool {
        self.left || self.right
    }

    pub fn is_spent(&self) -> bool {
        self.spent
    }

    /// Returns false if this execution already landed.
    pub fn enable(&mut self, limb: Limb) -> bool {
        if self.spent {
            return false;
        }
        match limb {
            Limb::Left => self.left = true,
            Limb::Right => self.right = true,
        }
        true
    }

    pub fn disable_all(&mut self) {
        self.left = false;
        self.right = false;
    }

    /// Resolution consumed this execution.
    pub fn spend(&mut self) {
        self.disable_all();
        self.spent = true;
    }

    /// Fresh execution (new move accepted).
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
