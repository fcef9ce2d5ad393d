//! Tests for command and footwork systems.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use crate::combat::components::{ActionMachine, Stamina};
    use crate::combat::events::{CommandAction, FighterCommand};
    use crate::combat::moves::{LogicalPhase, MoveId};
    use crate::combat::{CombatGate, CombatPlugin};
    use crate::components::{Facing, RingPosition};
    use crate::{run_ticks, spawn_fighters};

    fn setup() -> (App, Entity, Entity) {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, CombatPlugin))
            .insert_resource(Time::<Fixed>::from_hz(60.0));
        let [one, two] = spawn_fighters(app.world_mut());
        (app, one, two)
    }

    fn send(app: &mut App, fighter: Entity, action: CommandAction) {
        app.world_mut().send_event(FighterCommand::new(fighter, action));
    }

    fn phase(app: &App, fighter: Entity) -> LogicalPhase {
        app.world().get::<ActionMachine>(fighter).expect("fighter").state.phase()
    }

    #[test]
    fn test_throw_command_starts_move() {
        let (mut app, one, _) = setup();
        send(&mut app, one, CommandAction::ThrowMove(MoveId::Jab));
        run_ticks(&mut app, 1);

        assert_eq!(phase(&app, one), LogicalPhase::Strike(MoveId::Jab));
        assert_eq!(app.world().get::<Stamina>(one).map(|s| s.current), Some(90.0));
    }

    #[test]
    fn test_commands_dropped_while_gate_closed() {
        let (mut app, one, _) = setup();
        app.world_mut().resource_mut::<CombatGate>().set_open(false);

        send(&mut app, one, CommandAction::ThrowMove(MoveId::Jab));
        run_ticks(&mut app, 1);
        assert_eq!(phase(&app, one), LogicalPhase::Idle);

        // Команда не "догоняет" после открытия
        app.world_mut().resource_mut::<CombatGate>().set_open(true);
        run_ticks(&mut app, 1);
        assert_eq!(phase(&app, one), LogicalPhase::Idle);
    }

    #[test]
    fn test_command_for_unknown_entity_is_ignored() {
        let (mut app, one, _) = setup();
        let stray = app.world_mut().spawn_empty().id();

        send(&mut app, stray, CommandAction::SetBlocking(true));
        send(&mut app, one, CommandAction::SetBlocking(true));
        run_ticks(&mut app, 1);

        assert_eq!(phase(&app, one), LogicalPhase::Block);
    }

    #[test]
    fn test_footwork_moves_idle_fighter_only() {
        let (mut app, one, _) = setup();
        send(&mut app, one, CommandAction::Move(Vec2::new(1.0, 0.0)));
        run_ticks(&mut app, 30);

        let x = app.world().get::<RingPosition>(one).map(|p| p.x).expect("position");
        assert!((x - -1.0).abs() < 0.01, "x = {}", x); // -2.0 + 2.0 * 0.5s

        send(&mut app, one, CommandAction::ThrowMove(MoveId::Jab));
        run_ticks(&mut app, 10);
        let after = app.world().get::<RingPosition>(one).map(|p| p.x).expect("position");
        assert_eq!(after, x); // во время удара ноги стоят
    }

    #[test]
    fn test_footwork_keeps_separation_and_facing() {
        let (mut app, one, two) = setup();
        send(&mut app, one, CommandAction::Move(Vec2::new(1.0, 0.0)));
        send(&mut app, two, CommandAction::Move(Vec2::new(1.0, 0.0)));
        run_ticks(&mut app, 240);

        let x1 = app.world().get::<RingPosition>(one).map(|p| p.x).expect("one");
        let x2 = app.world().get::<RingPosition>(two).map(|p| p.x).expect("two");
        assert!(x2 <= 4.0);
        assert!(x2 - x1 >= 0.8 - 1e-4, "separation {}", x2 - x1);
        assert_eq!(app.world().get::<Facing>(one), Some(&Facing::Right));
        assert_eq!(app.world().get::<Facing>(two), Some(&Facing::Left));
    }
}
