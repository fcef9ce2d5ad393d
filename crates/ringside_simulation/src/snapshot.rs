//! Read-only fighter state for presentation (UI bars, animation phase).

use bevy::prelude::*;
use serde::Serialize;

use crate::combat::components::{ActionMachine, DefenseZone, Stamina};
use crate::combat::moves::LogicalPhase;
use crate::components::{FighterSlot, Health, RingPosition};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FighterSnapshot {
    #[serde(skip)]
    pub entity: Entity,
    pub slot: FighterSlot,
    pub health: u32,
    pub max_health: u32,
    pub stamina: f32,
    pub max_stamina: f32,
    /// Bar fill in [0, 1]
    pub health_fraction: f32,
    pub stamina_fraction: f32,
    /// Regen delay progress (0 = idle or just drained, 1 = ramping)
    pub regen_delay_fraction: f32,
    pub phase: LogicalPhase,
    pub defense_zone: DefenseZone,
    pub x: f32,
}

/// Snapshots of every fighter, ordered by slot.
pub fn fighter_snapshots(world: &mut World) -> Vec<FighterSnapshot> {
    let mut query =
        world.query::<(Entity, &FighterSlot, &Health, &Stamina, &ActionMachine, &DefenseZone, &RingPosition)>();

    let mut snapshots: Vec<_> = query
        .iter(world)
        .map(|(entity, slot, health, stamina, machine, zone, position)| FighterSnapshot {
            entity,
            slot: *slot,
            health: health.current,
            max_health: health.max,
            stamina: stamina.current,
            max_stamina: stamina.max,
            health_fraction: health.fraction(),
            stamina_fraction: stamina.fraction(),
            regen_delay_fraction: stamina.regen_delay_fraction(),
            phase: machine.state.phase(),
            defense_zone: *zone,
            x: position.x,
        })
        .collect();

    snapshots.sort_by_key(|snapshot| snapshot.slot);
    snapshots
}
