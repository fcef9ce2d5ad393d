//! Ringside Simulation Core
//!
//! Headless combat core двух бойцов на Bevy 0.16 ECS.
//!
//! Разделение ответственности:
//! - ECS = правила боя (stamina, combos, hit resolution, раунды)
//! - Presentation = анимации, коллизии, VFX, камера; общается с ядром
//!   только через события (`FighterCommand`, `HitEvent` → `CombatEvent`,
//!   `MatchEvent`) и `fighter_snapshots`

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

// Публичные модули
pub mod ai;
pub mod combat;
pub mod components;
pub mod error;
pub mod headless;
pub mod logger;
pub mod match_flow;
pub mod shared;
pub mod snapshot;

// Re-export базовых типов для удобства
pub use ai::{AIPlugin, ScriptedOpponent};
pub use combat::{
    CombatConfig, CombatEvent, CombatGate, CombatPlugin, CombatSet, CommandAction, FighterBundle, FighterCommand,
    HitEvent, MoveId, MoveTable,
};
pub use components::*;
pub use error::{ConfigError, ResolveError};
pub use logger::*;
pub use match_flow::{MatchCommand, MatchConfig, MatchEvent, MatchPlugin, MatchState};
pub use snapshot::{fighter_snapshots, FighterSnapshot};

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(CombatConfig::default().tick_hz))
            // Детерминистичный RNG (seed по умолчанию)
            .insert_resource(DeterministicRng::new(42))
            .add_plugins((CombatPlugin, MatchPlugin, AIPlugin));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции (без бойцов)
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins((MinimalPlugins, SimulationPlugin))
        .insert_resource(DeterministicRng::new(seed));

    app
}

/// Runs exactly one `FixedUpdate` pass with `Time` advanced by `dt`.
///
/// Не зависит от wall clock: тесты и headless binary детерминированы.
/// Event buffers swap at the start of every tick (как `First` в
/// `app.update()`), so an event lives for the tick it was sent in and the
/// next one. Hosts read output with `drain_events` after each tick.
pub fn advance_fixed_tick(app: &mut App, dt: Duration) {
    let world = app.world_mut();
    update_event_buffers(world);

    let mut fixed = world.resource_mut::<Time<Fixed>>();
    fixed.advance_by(dt);
    let generic = fixed.as_generic();
    *world.resource_mut::<Time>() = generic;

    world.run_schedule(FixedUpdate);
}

fn update_event_buffers(world: &mut World) {
    update_events::<FighterCommand>(world);
    update_events::<HitEvent>(world);
    update_events::<CombatEvent>(world);
    update_events::<MatchCommand>(world);
    update_events::<MatchEvent>(world);
}

/// Plugins may be missing in partial apps (combat-only tests).
fn update_events<E: Event>(world: &mut World) {
    if let Some(mut events) = world.get_resource_mut::<Events<E>>() {
        events.update();
    }
}

/// `advance_fixed_tick` with the configured timestep, `ticks` times.
pub fn run_ticks(app: &mut App, ticks: u32) {
    let timestep = app.world().resource::<Time<Fixed>>().timestep();
    for _ in 0..ticks {
        advance_fixed_tick(app, timestep);
    }
}

/// Spawns a fighter with full health/stamina at `x`.
pub fn spawn_fighter(world: &mut World, slot: FighterSlot, x: f32) -> Entity {
    let bundle = match world.get_resource::<CombatConfig>() {
        Some(config) => FighterBundle::new(slot, config),
        None => FighterBundle::new(slot, &CombatConfig::default()),
    };
    let entity = world.spawn(bundle.at(x)).id();
    log_info(&format!("🥊 Spawned {} at x={:.1} ({:?})", slot.label(), x, entity));
    entity
}

/// Both fighters at their match spawn marks (x = ∓spawn_x), facing each other.
pub fn spawn_fighters(world: &mut World) -> [Entity; 2] {
    let spawn_x = world.get_resource::<MatchConfig>().map_or(MatchConfig::default().spawn_x, |c| c.spawn_x);

    let one = spawn_fighter(world, FighterSlot::One, -spawn_x);
    let two = spawn_fighter(world, FighterSlot::Two, spawn_x);
    if let Some(mut facing) = world.get_mut::<Facing>(two) {
        *facing = Facing::Left;
    }
    [one, two]
}

/// Takes every pending event of type `E` (tests, presentation bridges).
pub fn drain_events<E: Event>(app: &mut App) -> Vec<E> {
    app.world_mut().resource_mut::<Events<E>>().drain().collect()
}

/// `run_ticks`, draining `E` after every tick so nothing ages out.
pub fn run_ticks_draining<E: Event>(app: &mut App, ticks: u32) -> Vec<E> {
    let mut collected = Vec::new();
    for _ in 0..ticks {
        run_ticks(app, 1);
        collected.extend(drain_events::<E>(app));
    }
    collected
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
