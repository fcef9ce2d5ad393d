//! Combat events: inputs from controllers / collision, outputs to presentation.

use bevy::prelude::*;

use crate::combat::components::{DefenseZone, HitReaction};
use crate::combat::config::TimeDilation;
use crate::combat::moves::{Limb, MoveId, TargetPoint};

// ============================================================================
// Input Events
// ============================================================================

/// Controller command (player input or AI).
///
/// Processed in `CombatSet::Input`. Rejected commands are dropped silently;
/// the reason is logged at debug.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct FighterCommand {
    pub fighter: Entity,
    pub action: CommandAction,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CommandAction {
    /// Movement intent; x is along the ring axis
    Move(Vec2),
    ThrowMove(MoveId),
    SetBlocking(bool),
    /// Enter counter stance expecting this move
    ReadCounter(MoveId),
}

impl FighterCommand {
    pub fn new(fighter: Entity, action: CommandAction) -> Self {
        Self { fighter, action }
    }
}

/// Strike volume overlapped a defender volume (collision layer → core).
///
/// `move_id` is what the collision layer believes was thrown; resolution
/// always uses the attacker's *current* move instead.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct HitEvent {
    pub attacker: Entity,
    pub defender: Entity,
    pub move_id: MoveId,
    pub limb: Limb,
    pub defense_zone: DefenseZone,
}

// ============================================================================
// Output Events
// ============================================================================

/// Everything presentation needs to react to (VFX, sounds, UI, camera).
#[derive(Event, Debug, Clone, PartialEq)]
pub enum CombatEvent {
    HitLanded {
        attacker: Entity,
        defender: Entity,
        move_id: MoveId,
        damage: u32,
        target: TargetPoint,
        /// Stun applied to the defender, if any
        reaction: Option<HitReaction>,
    },
    Blocked {
        attacker: Entity,
        defender: Entity,
        move_id: MoveId,
        stamina_drain: f32,
    },
    CounterSucceeded {
        /// The countered fighter
        attacker: Entity,
        defender: Entity,
        move_id: MoveId,
        damage: u32,
    },
    /// Counter zone hit but the read was wrong; followed by `HitLanded`
    CounterFailed {
        attacker: Entity,
        defender: Entity,
        move_id: MoveId,
    },
    /// Emitted exactly once per fighter per life
    Defeated {
        fighter: Entity,
        by: Option<Entity>,
    },
    ComboFinalized {
        fighter: Entity,
        key: String,
        length: usize,
        count: u32,
    },
    TimeDilationRequested(TimeDilation),
}

impl CombatEvent {
    pub fn name(&self) -> &'static str {
        match self {
            CombatEvent::HitLanded { .. } => "hit_landed",
            CombatEvent::Blocked { .. } => "blocked",
            CombatEvent::CounterSucceeded { .. } => "counter_succeeded",
            CombatEvent::CounterFailed { .. } => "counter_failed",
            CombatEvent::Defeated { .. } => "defeated",
            CombatEvent::ComboFinalized { .. } => "combo_finalized",
            CombatEvent::TimeDilationRequested(_) => "time_dilation_requested",
        }
    }
}
