//! Ring footwork (1D).

use bevy::prelude::*;

use crate::combat::components::ActionMachine;
use crate::combat::config::CombatConfig;
use crate::combat::CombatGate;
use crate::components::{Facing, Fighter, MoveIntent, RingPosition};

/// System: move fighters along the ring axis.
///
/// - Only Idle/Blocking fighters move
/// - Clamped to the ring, never closer than `min_separation`
/// - Facing always points at the opponent
///
/// Opponent positions are read before anyone moves, so the result does not
/// depend on query order.
pub fn apply_footwork(
    time: Res<Time>,
    config: Res<CombatConfig>,
    gate: Res<CombatGate>,
    mut fighters: Query<(Entity, &ActionMachine, &MoveIntent, &mut RingPosition, &mut Facing), With<Fighter>>,
) {
    if !gate.is_open() {
        return;
    }
    let dt = time.delta_secs();

    let before: Vec<(Entity, f32)> = fighters.iter().map(|(entity, _, _, pos, _)| (entity, pos.x)).collect();

    for (entity, machine, intent, mut position, mut facing) in fighters.iter_mut() {
        let opponent_x = before.iter().find(|(other, _)| *other != entity).map(|(_, x)| *x);

        if machine.state.allows_movement() && intent.0.x != 0.0 {
            let step = intent.0.x.clamp(-1.0, 1.0) * config.move_speed * dt;
            let mut x = (position.x + step).clamp(-config.ring_half_width, config.ring_half_width);

            if let Some(opponent) = opponent_x {
                let closing = (x - opponent).abs() < (position.x - opponent).abs();
                if closing && (x - opponent).abs() < config.min_separation {
                    x = position.x;
                }
            }
            position.x = x;
        }

        if let Some(opponent) = opponent_x {
            *facing = Facing::toward(position.x, opponent);
        }
    }
}
