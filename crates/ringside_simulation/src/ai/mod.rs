//! AI module
//!
//! Scripted opponent (ECS strategic layer). Шлёт те же `FighterCommand`,
//! что и игрок, в CombatSet::Intent - до применения команд в этом же тике.

use bevy::prelude::*;

use crate::combat::CombatSet;

pub mod scripted;

// Re-export основных типов
pub use scripted::{ScriptStep, ScriptTiming, ScriptedOpponent};

/// AI Plugin
///
/// Регистрирует AI системы в FixedUpdate для детерминизма.
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            scripted::drive_scripted_opponents.in_set(CombatSet::Intent),
        );
    }
}
