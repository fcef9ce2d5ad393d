//! Fighter timers (attack clock, stuns, stances, regen, combo expiry).

use bevy::prelude::*;

use crate::combat::config::CombatConfig;
use crate::combat::events::CombatEvent;
use crate::combat::fighter::FighterData;
use crate::combat::moves::MoveTable;
use crate::combat::CombatGate;

/// System: advance every fighter-owned timer by one fixed tick.
pub fn advance_fighter_timers(
    time: Res<Time>,
    mut fighters: Query<FighterData>,
    moves: Res<MoveTable>,
    config: Res<CombatConfig>,
    gate: Res<CombatGate>,
    mut combat_events: EventWriter<CombatEvent>,
) {
    if !gate.is_open() {
        return;
    }
    let dt = time.delta_secs();

    let mut emitted = Vec::new();
    for mut data in fighters.iter_mut() {
        data.as_fighter().advance(dt, &moves, &config, &mut emitted);
    }

    for event in emitted {
        combat_events.write(event);
    }
}
