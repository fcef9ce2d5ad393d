//! Tests for the hit resolution system.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use crate::combat::components::DefenseZone;
    use crate::combat::events::{CombatEvent, CommandAction, FighterCommand, HitEvent};
    use crate::combat::moves::{Limb, MoveId};
    use crate::combat::{CombatGate, CombatPlugin};
    use crate::components::Health;
    use crate::{drain_events, run_ticks, spawn_fighters};

    /// Ticks from a Jab command until its strike volume is live
    const JAB_LIVE_TICKS: u32 = 12;

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

    fn jab_hit(attacker: Entity, defender: Entity, zone: DefenseZone) -> HitEvent {
        HitEvent {
            attacker,
            defender,
            move_id: MoveId::Jab,
            limb: Limb::Right,
            defense_zone: zone,
        }
    }

    fn health(app: &App, fighter: Entity) -> u32 {
        app.world().get::<Health>(fighter).map(|h| h.current).expect("health")
    }

    #[test]
    fn test_hit_event_lands_once_per_execution() {
        let (mut app, one, two) = setup();
        send(&mut app, one, CommandAction::ThrowMove(MoveId::Jab));
        run_ticks(&mut app, JAB_LIVE_TICKS);

        app.world_mut().send_event(jab_hit(one, two, DefenseZone::Hurtbox));
        run_ticks(&mut app, 1);
        // Повторный overlap того же удара
        app.world_mut().send_event(jab_hit(one, two, DefenseZone::Hurtbox));
        run_ticks(&mut app, 1);

        let events = drain_events::<CombatEvent>(&mut app);
        let landed: Vec<_> = events.iter().filter(|e| matches!(e, CombatEvent::HitLanded { .. })).collect();
        assert_eq!(landed.len(), 1);
        assert_eq!(health(&app, two), 99);
    }

    #[test]
    fn test_counter_resolves_before_hurtbox_in_same_tick() {
        let (mut app, one, two) = setup();
        send(&mut app, two, CommandAction::ReadCounter(MoveId::Jab));
        send(&mut app, one, CommandAction::ThrowMove(MoveId::Jab));
        run_ticks(&mut app, JAB_LIVE_TICKS);

        // Hurtbox пришёл первым, но Counter приоритетнее
        app.world_mut().send_event(jab_hit(one, two, DefenseZone::Hurtbox));
        app.world_mut().send_event(jab_hit(one, two, DefenseZone::Counter));
        run_ticks(&mut app, 1);

        let names: Vec<_> = drain_events::<CombatEvent>(&mut app).iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["counter_succeeded", "time_dilation_requested"]);
        assert_eq!(health(&app, one), 90);
        assert_eq!(health(&app, two), 100);
    }

    #[test]
    fn test_hits_ignored_while_gate_closed() {
        let (mut app, one, two) = setup();
        send(&mut app, one, CommandAction::ThrowMove(MoveId::Jab));
        run_ticks(&mut app, JAB_LIVE_TICKS);

        app.world_mut().resource_mut::<CombatGate>().set_open(false);
        app.world_mut().send_event(jab_hit(one, two, DefenseZone::Hurtbox));
        run_ticks(&mut app, 1);

        assert!(drain_events::<CombatEvent>(&mut app).is_empty());
        assert_eq!(health(&app, two), 100);
    }

    #[test]
    fn test_malformed_hits_are_skipped() {
        let (mut app, one, two) = setup();
        let stray = app.world_mut().spawn_empty().id();
        send(&mut app, one, CommandAction::ThrowMove(MoveId::Jab));
        run_ticks(&mut app, JAB_LIVE_TICKS);

        app.world_mut().send_event(jab_hit(one, one, DefenseZone::Hurtbox));
        app.world_mut().send_event(jab_hit(one, stray, DefenseZone::Hurtbox));
        app.world_mut().send_event(jab_hit(two, one, DefenseZone::Hurtbox)); // two не атакует
        run_ticks(&mut app, 1);

        assert!(drain_events::<CombatEvent>(&mut app).is_empty());
        assert_eq!(health(&app, one), 100);
        assert_eq!(health(&app, two), 100);

        // Удар всё ещё live: валидный hit проходит
        app.world_mut().send_event(jab_hit(one, two, DefenseZone::Hurtbox));
        run_ticks(&mut app, 1);
        assert_eq!(health(&app, two), 99);
    }
}
