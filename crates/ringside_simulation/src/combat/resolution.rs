//! Hit resolution engine.
//!
//! Один `HitEvent` → ровно один исход по зоне защиты, которую сообщил
//! collision layer. Урон берётся из таблицы по *текущему* удару атакующего,
//! один раз за исполнение удара: после резолва strike volume гасится и
//! помечается spent.
//!
//! Валидация целиком до мутаций: при `Err` ничего не меняется.

use crate::combat::components::DefenseZone;
use crate::combat::config::CombatConfig;
use crate::combat::events::{CombatEvent, HitEvent};
use crate::combat::fighter::FighterMut;
use crate::combat::moves::{expected_counter_phase, MoveData, MoveTable};
use crate::error::ResolveError;

/// What a resolved hit did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitOutcome {
    /// Clean hit on the hurtbox
    Landed { damage: u32 },
    Blocked { drain: f32 },
    /// Correct read; `damage` went to the attacker
    Countered { damage: u32 },
    /// Wrong read; resolved as a clean hit
    CounterMissed { damage: u32 },
}

/// Resolves one hit between two distinct fighters.
pub fn resolve_hit(
    hit: &HitEvent,
    attacker: &mut FighterMut,
    defender: &mut FighterMut,
    moves: &MoveTable,
    config: &CombatConfig,
    events: &mut Vec<CombatEvent>,
) -> Result<HitOutcome, ResolveError> {
    if attacker.entity == defender.entity {
        return Err(ResolveError::SelfHit(attacker.entity));
    }

    let Some(current) = attacker.state().current_move() else {
        return Err(ResolveError::StrikeNotLive { attacker: attacker.entity });
    };
    let data = moves.get(current).ok_or(ResolveError::UnknownMove(current))?;
    if !attacker.strikes.is_live(hit.limb) {
        return Err(ResolveError::StrikeNotLive { attacker: attacker.entity });
    }
    if defender.is_dead() {
        return Err(ResolveError::DefenderDown(defender.entity));
    }

    if hit.move_id != current {
        crate::logger::log_warning(&format!(
            "⚠️ HitEvent move {} != current move {} of {:?}, using current",
            hit.move_id, current, attacker.entity
        ));
    }
    if hit.defense_zone != *defender.zone {
        crate::logger::log(&format!(
            "🔍 HitEvent zone {:?} differs from {:?} zone {:?} (collision lag)",
            hit.defense_zone, defender.entity, defender.zone
        ));
    }

    let outcome = match hit.defense_zone {
        DefenseZone::Hurtbox => HitOutcome::Landed {
            damage: land_clean(attacker, defender, data, config, events),
        },
        DefenseZone::Block => HitOutcome::Blocked {
            drain: absorb_block(attacker, defender, data, config, events),
        },
        DefenseZone::Counter => resolve_counter(attacker, defender, data, config, events),
    };

    attacker.spend_strike();
    attacker.check_invariants();
    defender.check_invariants();
    Ok(outcome)
}

fn land_clean(
    attacker: &mut FighterMut,
    defender: &mut FighterMut,
    data: &MoveData,
    config: &CombatConfig,
    events: &mut Vec<CombatEvent>,
) -> u32 {
    let damage = data.base_damage;
    let mut deaths = Vec::new();

    defender.take_health_damage(damage, Some(attacker.entity), &mut deaths);
    attacker.stats.credit_damage(damage);
    let reaction = defender.react_to_hit(damage, config);

    events.push(CombatEvent::HitLanded {
        attacker: attacker.entity,
        defender: defender.entity,
        move_id: data.id,
        damage,
        target: data.target,
        reaction,
    });
    events.append(&mut deaths);

    crate::logger::log(&format!(
        "💥 {} lands on {:?} for {} (HP: {}/{})",
        data.id, defender.entity, damage, defender.health.current, defender.health.max
    ));
    damage
}

fn absorb_block(
    attacker: &mut FighterMut,
    defender: &mut FighterMut,
    data: &MoveData,
    config: &CombatConfig,
    events: &mut Vec<CombatEvent>,
) -> f32 {
    let drain = config.block_stamina_drain.unwrap_or(data.base_damage as f32);
    defender.modify_stamina(-drain, config);

    events.push(CombatEvent::Blocked {
        attacker: attacker.entity,
        defender: defender.entity,
        move_id: data.id,
        stamina_drain: drain,
    });
    crate::logger::log(&format!(
        "🛡️ {:?} blocks {} (stamina -{:.1} → {:.1})",
        defender.entity, data.id, drain, defender.stamina.current
    ));
    drain
}

fn resolve_counter(
    attacker: &mut FighterMut,
    defender: &mut FighterMut,
    data: &MoveData,
    config: &CombatConfig,
    events: &mut Vec<CombatEvent>,
) -> HitOutcome {
    // Стойка стоит stamina при любом исходе
    defender.modify_stamina(-config.counter_read_cost, config);

    if defender.phase() != expected_counter_phase(data.id) {
        events.push(CombatEvent::CounterFailed {
            attacker: attacker.entity,
            defender: defender.entity,
            move_id: data.id,
        });
        crate::logger::log(&format!(
            "❌ {:?} misread {} (phase {:?})",
            defender.entity,
            data.id,
            defender.phase()
        ));
        let damage = land_clean(attacker, defender, data, config, events);
        return HitOutcome::CounterMissed { damage };
    }

    let damage = data.counter_damage;
    let mut deaths = Vec::new();

    attacker.take_health_damage(damage, Some(defender.entity), &mut deaths);
    defender.stats.credit_damage(damage);
    attacker.stagger(config);
    defender.begin_counter(data.id, config);

    events.push(CombatEvent::CounterSucceeded {
        attacker: attacker.entity,
        defender: defender.entity,
        move_id: data.id,
        damage,
    });
    events.push(CombatEvent::TimeDilationRequested(config.time_dilation));
    events.append(&mut deaths);

    crate::logger::log_info(&format!(
        "⚡ {:?} counters {} of {:?} for {} (HP: {}/{})",
        defender.entity, data.id, attacker.entity, damage, attacker.health.current, attacker.health.max
    ));
    HitOutcome::Countered { damage }
}

/// Resolution order for hits reported in the same tick: Counter, Block, Hurtbox.
/// Stable, so equal zones keep arrival order.
pub fn sort_by_priority(hits: &mut [HitEvent]) {
    hits.sort_by_key(|hit| std::cmp::Reverse(hit.defense_zone.priority()));
}
