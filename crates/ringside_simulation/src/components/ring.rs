//! Ring footwork: 1D position along the fighters' axis.
//!
//! Presentation owns real physics; the core keeps a coarse position so the
//! headless run and the scripted opponent have something to reason about.

use bevy::prelude::*;
use serde::Serialize;

#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Reflect, Serialize)]
#[reflect(Component)]
pub struct RingPosition {
    pub x: f32,
}

/// Facing along the ring axis (always toward the opponent).
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default, Reflect, Serialize)]
#[reflect(Component)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    pub fn toward(from: f32, to: f32) -> Self {
        if to >= from {
            Facing::Right
        } else {
            Facing::Left
        }
    }
}

/// Последний movement input бойца (x - вдоль оси ринга)
#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Reflect)]
#[reflect(Component)]
pub struct MoveIntent(pub Vec2);
