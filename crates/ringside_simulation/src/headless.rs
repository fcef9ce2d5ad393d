//! Headless arena: stand-ins for what the presentation layer normally does.
//!
//! - `approach_opponents` - ходит к сопернику до дистанции удара
//! - `detect_strike_contacts` - live strike volume в пределах `reach`
//!   → `HitEvent` с текущей зоной защиты
//!
//! Используется бинарником и интеграционными тестами; реальная игра
//! заменяет это своей физикой.

use bevy::prelude::*;

use crate::combat::components::{ActionMachine, DefenseZone, StrikeVolumes};
use crate::combat::events::{CommandAction, FighterCommand, HitEvent};
use crate::combat::moves::MoveTable;
use crate::combat::{CombatGate, CombatSet};
use crate::components::{Fighter, MoveIntent, RingPosition};

#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct ArenaSettings {
    /// Max distance at which a live strike connects
    pub reach: f32,
    /// Auto-approach stops inside this distance
    pub engage_distance: f32,
}

impl Default for ArenaSettings {
    fn default() -> Self {
        Self {
            reach: 1.2,
            engage_distance: 1.0,
        }
    }
}

/// Fighter walks toward the opponent on its own.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct AutoApproach;

pub struct HeadlessArenaPlugin;

impl Plugin for HeadlessArenaPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ArenaSettings>();
        app.add_systems(
            FixedUpdate,
            (
                approach_opponents.in_set(CombatSet::Intent),
                detect_strike_contacts.after(CombatSet::Timers).before(CombatSet::Match),
            ),
        );
    }
}

fn opponent_of(fighters: &[(Entity, f32)], entity: Entity) -> Option<(Entity, f32)> {
    fighters.iter().copied().find(|(other, _)| *other != entity)
}

/// System: auto-approach fighters send `Move` commands.
pub fn approach_opponents(
    settings: Res<ArenaSettings>,
    gate: Res<CombatGate>,
    walkers: Query<(Entity, &RingPosition, &MoveIntent), With<AutoApproach>>,
    fighters: Query<(Entity, &RingPosition), With<Fighter>>,
    mut commands_out: EventWriter<FighterCommand>,
) {
    if !gate.is_open() {
        return;
    }
    let positions: Vec<(Entity, f32)> = fighters.iter().map(|(e, p)| (e, p.x)).collect();

    for (entity, position, intent) in walkers.iter() {
        let Some((_, opponent_x)) = opponent_of(&positions, entity) else {
            continue;
        };
        let offset = opponent_x - position.x;
        let wanted = if offset.abs() > settings.engage_distance { offset.signum() } else { 0.0 };

        if intent.0.x != wanted {
            commands_out.write(FighterCommand::new(entity, CommandAction::Move(Vec2::new(wanted, 0.0))));
        }
    }
}

/// System: live strike volumes within reach produce `HitEvent`s.
pub fn detect_strike_contacts(
    settings: Res<ArenaSettings>,
    gate: Res<CombatGate>,
    moves: Res<MoveTable>,
    fighters: Query<(Entity, &ActionMachine, &StrikeVolumes, &DefenseZone, &RingPosition), With<Fighter>>,
    mut hits_out: EventWriter<HitEvent>,
) {
    if !gate.is_open() {
        return;
    }

    for (attacker, machine, strikes, _, position) in fighters.iter() {
        let Some(move_id) = machine.state.current_move() else {
            continue;
        };
        let Some(data) = moves.get(move_id) else {
            continue;
        };
        if !strikes.is_live(data.limb) {
            continue;
        }

        for (defender, _, _, zone, other) in fighters.iter() {
            if defender == attacker || (other.x - position.x).abs() > settings.reach {
                continue;
            }
            hits_out.write(HitEvent {
                attacker,
                defender,
                move_id,
                limb: data.limb,
                defense_zone: *zone,
            });
        }
    }
}
