//! Combat module: move table, action state machine, stamina, combos, hit resolution.
//!
//! ECS ответственность:
//! - Game state: Health, Stamina, ActionMachine, ComboTracker
//! - Combat rules: move costs, counter reads, block drain, stuns
//! - Events: CombatEvent (hit_landed, blocked, counter_*, defeated, combo, time dilation)
//!
//! Presentation ответственность:
//! - Animation playback, IK, VFX, camera, time scale
//! - Collision volumes: сообщает `HitEvent` (какая зона защиты задета)

use bevy::prelude::*;

pub mod components;
pub mod config;
pub mod events;
pub mod fighter;
pub mod moves;
pub mod resolution;
pub mod systems;

// Tests (separate files with _tests suffix)
#[cfg(test)]
mod fighter_tests;

pub use components::*;
pub use config::{CombatConfig, TimeDilation};
pub use events::{CombatEvent, CommandAction, FighterCommand, HitEvent};
pub use fighter::{FighterBundle, FighterData, FighterMut};
pub use moves::{expected_counter_phase, Limb, LogicalPhase, MoveData, MoveId, MoveTable, PhaseWindow, TargetPoint};
pub use resolution::{resolve_hit, HitOutcome};

/// Порядок фаз одного fixed тика.
///
/// Intent (AI) → Input (commands) → Movement → Resolution (hits) → Timers → Match
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CombatSet {
    Intent,
    Input,
    Movement,
    Resolution,
    Timers,
    Match,
}

/// Whether the ring is live (closed between rounds and after the match).
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CombatGate {
    open: bool,
}

impl Default for CombatGate {
    fn default() -> Self {
        Self { open: true }
    }
}

impl CombatGate {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn set_open(&mut self, open: bool) {
        if self.open != open {
            crate::logger::log(&format!("🔔 combat gate {}", if open { "open" } else { "closed" }));
        }
        self.open = open;
    }
}

/// Combat Plugin
///
/// Регистрирует combat системы в FixedUpdate.
///
/// Порядок выполнения:
/// 1. apply_fighter_commands - controller commands (CombatSet::Input)
/// 2. apply_footwork - позиция на ринге (CombatSet::Movement)
/// 3. resolve_hits - HitEvent → исходы (CombatSet::Resolution)
/// 4. advance_fighter_timers - атаки, станы, regen, combo expiry (CombatSet::Timers)
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        // Регистрация событий
        app.add_event::<FighterCommand>()
            .add_event::<HitEvent>()
            .add_event::<CombatEvent>();

        app.init_resource::<CombatConfig>()
            .init_resource::<MoveTable>()
            .init_resource::<CombatGate>();

        app.configure_sets(
            FixedUpdate,
            (
                CombatSet::Intent,
                CombatSet::Input,
                CombatSet::Movement,
                CombatSet::Resolution,
                CombatSet::Timers,
                CombatSet::Match,
            )
                .chain(),
        );

        app.add_systems(
            FixedUpdate,
            (
                systems::apply_fighter_commands.in_set(CombatSet::Input),
                systems::apply_footwork.in_set(CombatSet::Movement),
                systems::resolve_hits.in_set(CombatSet::Resolution),
                systems::advance_fighter_timers.in_set(CombatSet::Timers),
            ),
        );
    }
}
