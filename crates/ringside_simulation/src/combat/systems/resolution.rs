//! Hit events → resolution engine.

use bevy::prelude::*;

use crate::combat::config::CombatConfig;
use crate::combat::events::{CombatEvent, HitEvent};
use crate::combat::fighter::FighterData;
use crate::combat::moves::MoveTable;
use crate::combat::resolution::{resolve_hit, sort_by_priority};
use crate::combat::CombatGate;
use crate::error::ResolveError;

/// System: resolve this tick's `HitEvent`s.
///
/// Hits are ordered Counter > Block > Hurtbox (stable). Each hit borrows
/// attacker and defender together, so a resolution is applied atomically.
pub fn resolve_hits(
    mut hits_in: EventReader<HitEvent>,
    mut fighters: Query<FighterData>,
    moves: Res<MoveTable>,
    config: Res<CombatConfig>,
    gate: Res<CombatGate>,
    mut combat_events: EventWriter<CombatEvent>,
) {
    let mut hits: Vec<HitEvent> = hits_in.read().copied().collect();
    if hits.is_empty() {
        return;
    }
    if !gate.is_open() {
        crate::logger::log(&format!("🔒 {} hit(s) ignored between rounds", hits.len()));
        return;
    }
    sort_by_priority(&mut hits);

    let mut emitted = Vec::new();
    for hit in &hits {
        let result = if hit.attacker == hit.defender {
            Err(ResolveError::SelfHit(hit.attacker))
        } else if !fighters.contains(hit.attacker) {
            Err(ResolveError::UnknownFighter(hit.attacker))
        } else if !fighters.contains(hit.defender) {
            Err(ResolveError::UnknownFighter(hit.defender))
        } else {
            match fighters.get_many_mut([hit.attacker, hit.defender]) {
                Ok([mut attacker, mut defender]) => resolve_hit(
                    hit,
                    &mut attacker.as_fighter(),
                    &mut defender.as_fighter(),
                    &moves,
                    &config,
                    &mut emitted,
                ),
                Err(err) => {
                    crate::logger::log_error(&format!("❌ get_many_mut failed: {:?}", err));
                    continue;
                }
            }
        };

        match result {
            Ok(outcome) => crate::logger::log(&format!(
                "⚔️ ECS: {:?} → {:?} via {:?}: {:?}",
                hit.attacker, hit.defender, hit.defense_zone, outcome
            )),
            Err(err) if err.is_consistency_fault() => {
                crate::logger::log_warning(&format!("⚠️ HitEvent skipped: {}", err));
            }
            Err(err) => crate::logger::log(&format!("HitEvent skipped: {}", err)),
        }
    }

    for event in emitted {
        combat_events.write(event);
    }
}
