//! Fighter logic: the action state machine over one fighter's components.
//!
//! `FighterMut` - набор &mut ссылок на компоненты одного бойца. Системы
//! строят его из `FighterData` (QueryData), тесты - из `FighterBundle`.
//! Вся логика команд, стамины, смерти и таймеров живёт здесь и не знает
//! про World, поэтому тестируется без App.

use bevy::ecs::query::QueryData;
use bevy::prelude::*;

use crate::combat::components::{
    ActionMachine, ActionState, ComboTracker, DefenseZone, FinalizedCombo, HitReaction, Stamina, StrikeVolumes,
};
use crate::combat::config::CombatConfig;
use crate::combat::events::CombatEvent;
use crate::combat::moves::{LogicalPhase, MoveId, MoveTable};
use crate::components::{Facing, Fighter, FighterSlot, Health, MoveIntent, RingPosition, RoundStats};
use crate::shared::Countdown;

/// Mutable view of a fighter's combat components.
pub struct FighterMut<'a> {
    pub entity: Entity,
    pub slot: FighterSlot,
    pub health: &'a mut Health,
    pub stamina: &'a mut Stamina,
    pub machine: &'a mut ActionMachine,
    pub zone: &'a mut DefenseZone,
    pub strikes: &'a mut StrikeVolumes,
    pub combo: &'a mut ComboTracker,
    pub stats: &'a mut RoundStats,
}

impl FighterMut<'_> {
    pub fn state(&self) -> &ActionState {
        &self.machine.state
    }

    pub fn phase(&self) -> LogicalPhase {
        self.machine.state.phase()
    }

    pub fn is_dead(&self) -> bool {
        self.machine.state.is_dead()
    }

    /// Single entry point for state changes: zone and strike volumes follow.
    fn enter(&mut self, state: ActionState, config: &CombatConfig) {
        self.machine.state = state;
        self.machine.blend.start(config.transition_blend_secs);
        *self.zone = state.defense_zone();

        if matches!(state, ActionState::Attacking { .. }) {
            self.strikes.reset();
        } else {
            self.strikes.disable_all();
        }
    }

    // ------------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------------

    /// Starts a move from Idle, or cancels into it inside the current move's
    /// combo window. Cost is paid on acceptance and never refunded.
    pub fn throw_move(
        &mut self,
        move_id: MoveId,
        moves: &MoveTable,
        config: &CombatConfig,
        events: &mut Vec<CombatEvent>,
    ) -> bool {
        if self.is_dead() || self.machine.in_transition() {
            return false;
        }

        let Some(data) = moves.get(move_id) else {
            crate::logger::log_warning(&format!("⚠️ {:?}: move {} missing from table", self.entity, move_id));
            return false;
        };

        match &self.machine.state {
            ActionState::Idle => {}
            ActionState::Attacking { move_id: current, clock } => {
                let Some(current_data) = moves.get(*current) else {
                    return false;
                };
                if !current_data.combo_window.contains(clock.fraction()) {
                    return false;
                }
            }
            _ => return false,
        }

        if !self.stamina.can_afford(data.stamina_cost) {
            crate::logger::log(&format!(
                "🥱 {:?}: {} rejected (stamina {:.1} ≤ cost {:.1})",
                self.entity, move_id, self.stamina.current, data.stamina_cost
            ));
            return false;
        }

        let cancelled = self.machine.state.current_move();
        if cancelled.is_none() {
            // Новая серия из Idle: прошлый буфер закрывается
            if let Some(done) = self.combo.finalize() {
                self.note_combo(done, events);
            }
        }
        self.enter(
            ActionState::Attacking {
                move_id,
                clock: Countdown::started(data.duration),
            },
            config,
        );
        self.modify_stamina(-data.stamina_cost, config);
        self.combo.record(move_id);

        match cancelled {
            Some(previous) => crate::logger::log(&format!(
                "🔗 {:?}: {} → {} (combo buffer {})",
                self.entity,
                previous,
                move_id,
                self.combo.pending().len()
            )),
            None => crate::logger::log(&format!("👊 {:?}: throws {}", self.entity, move_id)),
        }
        true
    }

    /// Raise (from Idle/Attacking, needs stamina > 0) or lower the guard.
    pub fn set_blocking(&mut self, blocking: bool, config: &CombatConfig) -> bool {
        if self.is_dead() {
            return false;
        }

        if blocking {
            match self.machine.state {
                ActionState::Blocking => return true,
                ActionState::Idle | ActionState::Attacking { .. } => {}
                _ => return false,
            }
            if self.stamina.is_depleted() {
                return false;
            }
            self.stamina.cancel_regen();
            self.enter(ActionState::Blocking, config);
            crate::logger::log(&format!("🛡️ {:?}: guard up", self.entity));
            true
        } else {
            if !self.machine.state.is_blocking() {
                return false;
            }
            self.enter(ActionState::Idle, config);
            self.stamina.resume_regen();
            crate::logger::log(&format!("🛡️ {:?}: guard down", self.entity));
            true
        }
    }

    /// Counter stance reading `expecting` (from Idle or Blocking).
    pub fn read_counter(&mut self, expecting: MoveId, config: &CombatConfig) -> bool {
        if self.is_dead() || self.machine.in_transition() {
            return false;
        }
        let was_blocking = match self.machine.state {
            ActionState::Idle => false,
            ActionState::Blocking => true,
            _ => return false,
        };

        self.enter(
            ActionState::CounterStance {
                expecting,
                window: Countdown::started(config.counter_stance_secs),
            },
            config,
        );
        if was_blocking {
            self.stamina.resume_regen();
        }
        crate::logger::log(&format!("🎯 {:?}: reading {}", self.entity, expecting));
        true
    }

    // ------------------------------------------------------------------------
    // Resources
    // ------------------------------------------------------------------------

    /// Clamped stamina change. Hitting zero while blocking drops the guard.
    pub fn modify_stamina(&mut self, amount: f32, config: &CombatConfig) {
        if self.is_dead() {
            return;
        }
        self.stamina.modify(amount);

        if self.stamina.is_depleted() && self.machine.state.is_blocking() {
            self.enter(ActionState::Idle, config);
            crate::logger::log(&format!("💨 {:?}: guard broken (stamina 0)", self.entity));
        }
    }

    /// Saturating health damage. Reaching zero enters Dead exactly once.
    pub fn take_health_damage(&mut self, amount: u32, by: Option<Entity>, events: &mut Vec<CombatEvent>) -> u32 {
        if self.is_dead() {
            return 0;
        }
        let applied = self.health.take_damage(amount);
        if !self.health.is_alive() {
            self.die(by, events);
        }
        applied
    }

    fn die(&mut self, by: Option<Entity>, events: &mut Vec<CombatEvent>) {
        self.machine.state = ActionState::Dead;
        self.machine.blend.cancel();
        *self.zone = DefenseZone::Hurtbox;
        self.strikes.disable_all();
        self.stamina.cancel_regen();
        self.combo.discard_pending();

        events.push(CombatEvent::Defeated { fighter: self.entity, by });
        crate::logger::log_info(&format!("💀 {:?} ({}) defeated by {:?}", self.entity, self.slot.label(), by));
    }

    // ------------------------------------------------------------------------
    // Reactions (called by resolution)
    // ------------------------------------------------------------------------

    /// Big hits stun from any live state; light hits only stun an idle fighter.
    pub fn react_to_hit(&mut self, damage: u32, config: &CombatConfig) -> Option<HitReaction> {
        if self.is_dead() {
            return None;
        }
        let (reaction, secs) = if damage >= config.big_hit_threshold {
            (HitReaction::Heavy, config.big_hit_stun_secs)
        } else if self.machine.state.is_idle() {
            (HitReaction::Flinch, config.hit_stun_secs)
        } else {
            return None;
        };

        self.enter(
            ActionState::Stunned {
                clock: Countdown::started(secs),
                reaction,
            },
            config,
        );
        Some(reaction)
    }

    /// Forced stagger of a countered attacker.
    pub fn stagger(&mut self, config: &CombatConfig) {
        if self.is_dead() {
            return;
        }
        self.enter(
            ActionState::Stunned {
                clock: Countdown::started(config.counter_stagger_secs),
                reaction: HitReaction::Knockback,
            },
            config,
        );
    }

    /// Counter animation after a successful read.
    pub fn begin_counter(&mut self, countered: MoveId, config: &CombatConfig) {
        if self.is_dead() {
            return;
        }
        self.enter(
            ActionState::CounterWindup {
                countered,
                clock: Countdown::started(config.counter_animation_secs),
            },
            config,
        );
    }

    /// Resolution consumed the current execution's strike.
    pub fn spend_strike(&mut self) {
        self.strikes.spend();
    }

    // ------------------------------------------------------------------------
    // Timers
    // ------------------------------------------------------------------------

    /// One fixed tick of every fighter-owned timer.
    pub fn advance(&mut self, dt: f32, moves: &MoveTable, config: &CombatConfig, events: &mut Vec<CombatEvent>) {
        if self.is_dead() {
            return;
        }
        self.machine.blend.tick(dt);

        let mut expired = false;
        match &mut self.machine.state {
            ActionState::Attacking { move_id, clock } => {
                let t = clock.tick(dt);
                match moves.get(*move_id) {
                    Some(_) if clock.is_expired() => expired = true,
                    Some(data) if data.active_window.contains(t) => {
                        self.strikes.enable(data.limb);
                    }
                    Some(_) => self.strikes.disable_all(),
                    None => expired = true,
                }
            }
            ActionState::CounterStance { window: clock, .. }
            | ActionState::CounterWindup { clock, .. }
            | ActionState::Stunned { clock, .. } => {
                clock.tick(dt);
                expired = clock.is_expired();
            }
            ActionState::Idle | ActionState::Blocking | ActionState::Dead => {}
        }
        if expired {
            self.enter(ActionState::Idle, config);
        }

        let blocking = self.machine.state.is_blocking();
        self.stamina.advance_regen(dt, blocking);

        if let Some(done) = self.combo.advance(dt) {
            self.note_combo(done, events);
        }

        self.check_invariants();
    }

    /// Counts a combo still pending at the bell (round end).
    pub fn close_combo(&mut self, events: &mut Vec<CombatEvent>) {
        if let Some(done) = self.combo.finalize() {
            self.note_combo(done, events);
        }
    }

    fn note_combo(&mut self, done: FinalizedCombo, events: &mut Vec<CombatEvent>) {
        self.stats.combos += 1;
        crate::logger::log(&format!("🔥 {:?}: combo {} (x{})", self.entity, done.key, done.count));
        events.push(CombatEvent::ComboFinalized {
            fighter: self.entity,
            key: done.key,
            length: done.length,
            count: done.count,
        });
    }

    /// Full health/stamina, Idle, empty combo history (new round / restart).
    pub fn reset_for_round(&mut self) {
        self.health.refill();
        self.stamina.refill();
        *self.machine = ActionMachine::default();
        *self.zone = DefenseZone::Hurtbox;
        self.strikes.reset();
        self.combo.discard_pending();
        self.combo.clear_history();
        self.stats.reset();
    }

    pub fn check_invariants(&self) {
        debug_assert!(self.health.current <= self.health.max);
        debug_assert!(
            (0.0..=self.stamina.max).contains(&self.stamina.current),
            "stamina {} outside [0, {}]",
            self.stamina.current,
            self.stamina.max
        );
        debug_assert_eq!(*self.zone, self.machine.state.defense_zone(), "zone out of sync with state");
        debug_assert!(
            !self.strikes.any_live() || matches!(self.machine.state, ActionState::Attacking { .. }),
            "strike volume live outside an attack"
        );
        self.combo.debug_check();
    }
}

// ============================================================================
// ECS access
// ============================================================================

/// Query for everything `FighterMut` needs.
#[derive(QueryData)]
#[query_data(mutable)]
pub struct FighterData {
    pub entity: Entity,
    pub slot: &'static FighterSlot,
    pub health: &'static mut Health,
    pub stamina: &'static mut Stamina,
    pub machine: &'static mut ActionMachine,
    pub zone: &'static mut DefenseZone,
    pub strikes: &'static mut StrikeVolumes,
    pub combo: &'static mut ComboTracker,
    pub stats: &'static mut RoundStats,
}

impl FighterDataItem<'_> {
    pub fn as_fighter(&mut self) -> FighterMut<'_> {
        FighterMut {
            entity: self.entity,
            slot: *self.slot,
            health: &mut *self.health,
            stamina: &mut *self.stamina,
            machine: &mut *self.machine,
            zone: &mut *self.zone,
            strikes: &mut *self.strikes,
            combo: &mut *self.combo,
            stats: &mut *self.stats,
        }
    }
}

/// Все компоненты бойца.
#[derive(Bundle, Clone)]
pub struct FighterBundle {
    pub fighter: Fighter,
    pub slot: FighterSlot,
    pub health: Health,
    pub stamina: Stamina,
    pub machine: ActionMachine,
    pub zone: DefenseZone,
    pub strikes: StrikeVolumes,
    pub combo: ComboTracker,
    pub stats: RoundStats,
    pub position: RingPosition,
    pub facing: Facing,
    pub intent: MoveIntent,
}

impl FighterBundle {
    pub fn new(slot: FighterSlot, config: &CombatConfig) -> Self {
        Self {
            fighter: Fighter,
            slot,
            health: Health::new(config.max_health),
            stamina: Stamina::from_config(config),
            machine: ActionMachine::default(),
            zone: DefenseZone::Hurtbox,
            strikes: StrikeVolumes::default(),
            combo: ComboTracker::new(config.combo_window_secs),
            stats: RoundStats::default(),
            position: RingPosition::default(),
            facing: Facing::default(),
            intent: MoveIntent::default(),
        }
    }

    pub fn at(mut self, x: f32) -> Self {
        self.position.x = x;
        self
    }

    /// Detached view (tests, tools): same logic without a World.
    pub fn view(&mut self, entity: Entity) -> FighterMut<'_> {
        FighterMut {
            entity,
            slot: self.slot,
            health: &mut self.health,
            stamina: &mut self.stamina,
            machine: &mut self.machine,
            zone: &mut self.zone,
            strikes: &mut self.strikes,
            combo: &mut self.combo,
            stats: &mut self.stats,
        }
    }
}
