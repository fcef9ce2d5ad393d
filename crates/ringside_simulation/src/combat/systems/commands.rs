//! Controller commands → fighter state machine.

use bevy::prelude::*;

use crate::combat::config::CombatConfig;
use crate::combat::events::{CombatEvent, CommandAction, FighterCommand};
use crate::combat::fighter::FighterData;
use crate::combat::moves::MoveTable;
use crate::combat::CombatGate;
use crate::components::MoveIntent;

/// System: apply `FighterCommand`s in arrival order.
///
/// Между раундами (gate закрыт) команды отбрасываются.
pub fn apply_fighter_commands(
    mut commands_in: EventReader<FighterCommand>,
    mut fighters: Query<(FighterData, &mut MoveIntent)>,
    moves: Res<MoveTable>,
    config: Res<CombatConfig>,
    gate: Res<CombatGate>,
    mut combat_events: EventWriter<CombatEvent>,
) {
    if !gate.is_open() {
        commands_in.clear();
        return;
    }

    let mut emitted = Vec::new();
    for command in commands_in.read() {
        let Ok((mut data, mut intent)) = fighters.get_mut(command.fighter) else {
            crate::logger::log_warning(&format!("⚠️ FighterCommand for unknown entity {:?}", command.fighter));
            continue;
        };
        let mut fighter = data.as_fighter();

        let accepted = match command.action {
            CommandAction::Move(direction) => {
                intent.0 = direction;
                true
            }
            CommandAction::ThrowMove(move_id) => fighter.throw_move(move_id, &moves, &config, &mut emitted),
            CommandAction::SetBlocking(blocking) => fighter.set_blocking(blocking, &config),
            CommandAction::ReadCounter(expecting) => fighter.read_counter(expecting, &config),
        };

        if !accepted {
            crate::logger::log(&format!(
                "🚫 {:?}: {:?} rejected in {}",
                command.fighter,
                command.action,
                fighter.state().label()
            ));
        }
    }

    for event in emitted {
        combat_events.write(event);
    }
}
