//! Tests for the fighter state machine (no World needed).

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use crate::combat::components::{ActionState, DefenseZone, HitReaction, RegenSequence};
    use crate::combat::config::CombatConfig;
    use crate::combat::events::CombatEvent;
    use crate::combat::fighter::{FighterBundle, FighterMut};
    use crate::combat::moves::{Limb, LogicalPhase, MoveId, MoveTable};
    use crate::components::FighterSlot;

    const DT: f32 = 1.0 / 60.0;

    fn setup() -> (FighterBundle, MoveTable, CombatConfig) {
        let config = CombatConfig::default();
        (FighterBundle::new(FighterSlot::One, &config), MoveTable::default(), config)
    }

    fn run(fighter: &mut FighterMut, secs: f32, moves: &MoveTable, config: &CombatConfig) -> Vec<CombatEvent> {
        let mut events = Vec::new();
        let ticks = (secs / DT).round() as usize;
        for _ in 0..ticks {
            fighter.advance(DT, moves, config, &mut events);
        }
        events
    }

    #[test]
    fn test_throw_from_idle_pays_cost_and_records() {
        let (mut bundle, moves, config) = setup();
        let mut fighter = bundle.view(Entity::from_raw(1));
        let mut events = Vec::new();

        assert!(fighter.throw_move(MoveId::Jab, &moves, &config, &mut events));
        assert_eq!(fighter.phase(), LogicalPhase::Strike(MoveId::Jab));
        assert_eq!(fighter.stamina.current, 90.0);
        assert_eq!(fighter.combo.pending(), &[MoveId::Jab]);
        assert!(matches!(fighter.stamina.regen, RegenSequence::Delay(_)));
        assert!(events.is_empty());
    }

    #[test]
    fn test_throw_rejected_without_enough_stamina() {
        let (mut bundle, moves, config) = setup();
        bundle.stamina.current = 5.0;
        let mut fighter = bundle.view(Entity::from_raw(1));
        let mut events = Vec::new();

        assert!(!fighter.throw_move(MoveId::RightHook, &moves, &config, &mut events));
        assert_eq!(fighter.stamina.current, 5.0);
        assert_eq!(*fighter.state(), ActionState::Idle);
        assert!(fighter.combo.pending().is_empty());
    }

    #[test]
    fn test_rejected_throw_keeps_pending_combo() {
        let (mut bundle, moves, config) = setup();
        bundle.stamina.current = 30.0;
        let mut fighter = bundle.view(Entity::from_raw(1));
        let mut events = Vec::new();

        // Jab (30 → 20), cancel в Straight (20 → 5), дождаться Idle
        assert!(fighter.throw_move(MoveId::Jab, &moves, &config, &mut events));
        run(&mut fighter, 0.2, &moves, &config);
        assert!(fighter.throw_move(MoveId::Straight, &moves, &config, &mut events));
        events.extend(run(&mut fighter, 0.8, &moves, &config));
        assert_eq!(*fighter.state(), ActionState::Idle);
        assert_eq!(fighter.stamina.current, 5.0);
        assert_eq!(fighter.combo.pending(), &[MoveId::Jab, MoveId::Straight]);

        assert!(!fighter.throw_move(MoveId::RightHook, &moves, &config, &mut events));
        assert_eq!(fighter.combo.pending(), &[MoveId::Jab, MoveId::Straight]);
        assert_eq!(fighter.stats.combos, 0);
        assert!(events.is_empty());
    }

    #[test]
    fn test_close_combo_counts_pending_sequence() {
        let (mut bundle, moves, config) = setup();
        let mut fighter = bundle.view(Entity::from_raw(1));
        let mut events = Vec::new();

        assert!(fighter.throw_move(MoveId::Jab, &moves, &config, &mut events));
        run(&mut fighter, 0.2, &moves, &config);
        assert!(fighter.throw_move(MoveId::RightHook, &moves, &config, &mut events));

        fighter.close_combo(&mut events);
        assert!(fighter.combo.pending().is_empty());
        assert_eq!(fighter.stats.combos, 1);
        assert_eq!(events.iter().map(|e| e.name()).collect::<Vec<_>>(), vec!["combo_finalized"]);
    }

    #[test]
    fn test_cost_equal_to_pool_is_rejected() {
        let (mut bundle, moves, config) = setup();
        bundle.stamina.current = 10.0;
        let mut fighter = bundle.view(Entity::from_raw(1));

        assert!(!fighter.throw_move(MoveId::Jab, &moves, &config, &mut Vec::new()));
    }

    #[test]
    fn test_combo_cancel_only_inside_window() {
        let (mut bundle, moves, config) = setup();
        let mut fighter = bundle.view(Entity::from_raw(1));
        let mut events = Vec::new();

        assert!(fighter.throw_move(MoveId::Jab, &moves, &config, &mut events));

        // 0.05s: blend ещё идёт
        run(&mut fighter, 0.05, &moves, &config);
        assert!(!fighter.throw_move(MoveId::Straight, &moves, &config, &mut events));

        // 0.2s: normalized 0.4, внутри окна 0.3–0.7
        run(&mut fighter, 0.15, &moves, &config);
        assert!(fighter.throw_move(MoveId::Straight, &moves, &config, &mut events));
        assert_eq!(fighter.phase(), LogicalPhase::Strike(MoveId::Straight));
        assert_eq!(fighter.stamina.current, 75.0);
        assert_eq!(fighter.combo.pending(), &[MoveId::Jab, MoveId::Straight]);

        // 0.5s в Straight: normalized 0.83, окно закрыто
        run(&mut fighter, 0.5, &moves, &config);
        assert!(!fighter.throw_move(MoveId::Jab, &moves, &config, &mut events));
    }

    #[test]
    fn test_attack_returns_to_idle_and_combo_finalizes() {
        let (mut bundle, moves, config) = setup();
        let mut fighter = bundle.view(Entity::from_raw(1));
        let mut events = Vec::new();

        fighter.throw_move(MoveId::Jab, &moves, &config, &mut events);
        run(&mut fighter, 0.2, &moves, &config);
        fighter.throw_move(MoveId::RightHook, &moves, &config, &mut events);

        run(&mut fighter, 0.75, &moves, &config);
        assert_eq!(*fighter.state(), ActionState::Idle);

        let events = run(&mut fighter, 1.5, &moves, &config);
        assert!(events.iter().any(|e| matches!(
            e,
            CombatEvent::ComboFinalized { key, count: 1, length: 2, .. } if key == "Jab -> Right_Hook"
        )));
        assert_eq!(fighter.stats.combos, 1);
    }

    #[test]
    fn test_single_move_then_new_series_counts_nothing() {
        let (mut bundle, moves, config) = setup();
        let mut fighter = bundle.view(Entity::from_raw(1));
        let mut events = Vec::new();

        fighter.throw_move(MoveId::Jab, &moves, &config, &mut events);
        run(&mut fighter, 0.7, &moves, &config);
        // Новая серия из Idle закрывает буфер из одного удара
        fighter.throw_move(MoveId::Jab, &moves, &config, &mut events);

        assert!(events.is_empty());
        assert_eq!(fighter.combo.pending(), &[MoveId::Jab]);
        assert_eq!(fighter.stats.combos, 0);
    }

    #[test]
    fn test_strike_volume_live_only_in_active_window() {
        let (mut bundle, moves, config) = setup();
        let mut fighter = bundle.view(Entity::from_raw(1));
        fighter.throw_move(MoveId::LeftHook, &moves, &config, &mut Vec::new());

        // LeftHook 0.7s, active 0.21–0.35s
        run(&mut fighter, 0.1, &moves, &config);
        assert!(!fighter.strikes.any_live());

        run(&mut fighter, 0.15, &moves, &config);
        assert!(fighter.strikes.is_live(Limb::Left));
        assert!(!fighter.strikes.is_live(Limb::Right));

        run(&mut fighter, 0.2, &moves, &config);
        assert!(!fighter.strikes.any_live());
    }

    #[test]
    fn test_block_release_starts_regen() {
        let (mut bundle, _moves, config) = setup();
        let mut fighter = bundle.view(Entity::from_raw(1));

        assert!(fighter.set_blocking(true, &config));
        assert_eq!(*fighter.zone, DefenseZone::Block);
        fighter.modify_stamina(-30.0, &config);
        assert_eq!(fighter.stamina.current, 70.0);

        assert!(fighter.set_blocking(false, &config));
        assert_eq!(*fighter.zone, DefenseZone::Hurtbox);
        assert!(matches!(fighter.stamina.regen, RegenSequence::Delay(_)));
    }

    #[test]
    fn test_guard_breaks_at_zero_stamina() {
        let (mut bundle, _moves, config) = setup();
        let mut fighter = bundle.view(Entity::from_raw(1));

        fighter.set_blocking(true, &config);
        fighter.modify_stamina(-150.0, &config);

        assert_eq!(fighter.stamina.current, 0.0);
        assert_eq!(*fighter.state(), ActionState::Idle);
        assert!(!fighter.set_blocking(true, &config));
    }

    #[test]
    fn test_cannot_counter_from_attack() {
        let (mut bundle, moves, config) = setup();
        let mut fighter = bundle.view(Entity::from_raw(1));

        fighter.throw_move(MoveId::Jab, &moves, &config, &mut Vec::new());
        run(&mut fighter, 0.2, &moves, &config);
        assert!(!fighter.read_counter(MoveId::Jab, &config));
    }

    #[test]
    fn test_counter_stance_opens_counter_zone_then_expires() {
        let (mut bundle, moves, config) = setup();
        let mut fighter = bundle.view(Entity::from_raw(1));

        assert!(fighter.read_counter(MoveId::Straight, &config));
        assert_eq!(fighter.phase(), LogicalPhase::CounterWindup(MoveId::Straight));
        assert_eq!(*fighter.zone, DefenseZone::Counter);

        run(&mut fighter, config.counter_stance_secs, &moves, &config);
        assert_eq!(*fighter.state(), ActionState::Idle);
        assert_eq!(*fighter.zone, DefenseZone::Hurtbox);
    }

    #[test]
    fn test_hit_reactions() {
        let (mut bundle, moves, config) = setup();
        let mut fighter = bundle.view(Entity::from_raw(1));

        assert_eq!(fighter.react_to_hit(1, &config), Some(HitReaction::Flinch));
        assert_eq!(fighter.phase(), LogicalPhase::Stunned);
        run(&mut fighter, config.hit_stun_secs, &moves, &config);
        assert_eq!(*fighter.state(), ActionState::Idle);
        run(&mut fighter, 0.15, &moves, &config); // blend

        // Лёгкий удар не сбивает атаку, тяжёлый сбивает
        fighter.throw_move(MoveId::Jab, &moves, &config, &mut Vec::new());
        assert_eq!(fighter.react_to_hit(3, &config), None);
        assert_eq!(fighter.phase(), LogicalPhase::Strike(MoveId::Jab));
        assert_eq!(fighter.react_to_hit(25, &config), Some(HitReaction::Heavy));
        assert!(!fighter.strikes.any_live());
    }

    #[test]
    fn test_death_is_entered_once_and_freezes_fighter() {
        let (mut bundle, moves, config) = setup();
        let mut fighter = bundle.view(Entity::from_raw(1));
        let mut events = Vec::new();

        fighter.throw_move(MoveId::Jab, &moves, &config, &mut events);
        assert_eq!(fighter.take_health_damage(250, None, &mut events), 100);
        assert_eq!(fighter.health.current, 0);
        assert_eq!(fighter.phase(), LogicalPhase::Dead);
        assert!(fighter.combo.pending().is_empty());

        assert_eq!(fighter.take_health_damage(10, None, &mut events), 0);
        let defeated = events.iter().filter(|e| matches!(e, CombatEvent::Defeated { .. })).count();
        assert_eq!(defeated, 1);

        // После смерти всё - no-op
        let stamina = fighter.stamina.current;
        assert!(!fighter.throw_move(MoveId::Jab, &moves, &config, &mut events));
        assert!(!fighter.set_blocking(true, &config));
        assert!(!fighter.read_counter(MoveId::Jab, &config));
        fighter.modify_stamina(-10.0, &config);
        run(&mut fighter, 5.0, &moves, &config);
        assert_eq!(fighter.stamina.current, stamina);
        assert_eq!(fighter.phase(), LogicalPhase::Dead);
    }

    #[test]
    fn test_reset_for_round_restores_everything() {
        let (mut bundle, moves, config) = setup();
        let mut fighter = bundle.view(Entity::from_raw(1));
        let mut events = Vec::new();

        fighter.throw_move(MoveId::Jab, &moves, &config, &mut events);
        fighter.take_health_damage(100, None, &mut events);
        fighter.stats.damage_dealt = 12;

        fighter.reset_for_round();
        assert_eq!(fighter.health.current, 100);
        assert_eq!(fighter.stamina.current, 100.0);
        assert_eq!(*fighter.state(), ActionState::Idle);
        assert_eq!(fighter.stats.damage_dealt, 0);
        assert!(fighter.throw_move(MoveId::Jab, &moves, &config, &mut events));
    }
}
