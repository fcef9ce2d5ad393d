//! Scripted opponent: random wait → Jab → Right_Hook → cooldown.
//!
//! Детерминизм: задержка берётся из `DeterministicRng` (ChaCha8), команды
//! идут тем же путём `FighterCommand`, что и input игрока, поэтому
//! подчиняются всем guard'ам (stamina, blend, combo window).

use bevy::prelude::*;
use rand::Rng;

use crate::combat::events::{CommandAction, FighterCommand};
use crate::combat::moves::MoveId;
use crate::combat::CombatGate;
use crate::shared::Countdown;
use crate::DeterministicRng;

/// Тайминги скрипта
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct ScriptTiming {
    /// Random wait before the opener, seconds (inclusive range)
    pub min_delay: f32,
    pub max_delay: f32,
    /// Gap between opener and follow-up
    pub follow_up_delay: f32,
    /// Pause after the follow-up
    pub cooldown: f32,
    pub opener: MoveId,
    pub follow_up: MoveId,
}

impl Default for ScriptTiming {
    fn default() -> Self {
        Self {
            min_delay: 1.0,
            max_delay: 3.0,
            follow_up_delay: 0.35,
            cooldown: 2.0,
            opener: MoveId::Jab,
            follow_up: MoveId::RightHook,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum ScriptStep {
    /// Next delay not drawn yet
    #[default]
    Unscheduled,
    Waiting,
    FollowUp,
    Cooldown,
}

/// AI-контроллер бойца
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct ScriptedOpponent {
    pub timing: ScriptTiming,
    pub step: ScriptStep,
    pub timer: Countdown,
}

impl ScriptedOpponent {
    pub fn new(timing: ScriptTiming) -> Self {
        Self {
            timing,
            ..Default::default()
        }
    }

    fn schedule(&mut self, rng: &mut impl Rng) {
        let delay = if self.timing.max_delay > self.timing.min_delay {
            rng.gen_range(self.timing.min_delay..=self.timing.max_delay)
        } else {
            self.timing.min_delay
        };
        self.timer.start(delay);
        self.step = ScriptStep::Waiting;
    }

    /// One tick of the script; returns the move to throw, if any.
    pub fn tick(&mut self, dt: f32, rng: &mut impl Rng) -> Option<MoveId> {
        if self.step == ScriptStep::Unscheduled {
            self.schedule(rng);
            return None;
        }

        self.timer.tick(dt);
        if !self.timer.is_expired() {
            return None;
        }

        match self.step {
            ScriptStep::Waiting => {
                self.timer.start(self.timing.follow_up_delay);
                self.step = ScriptStep::FollowUp;
                Some(self.timing.opener)
            }
            ScriptStep::FollowUp => {
                self.timer.start(self.timing.cooldown);
                self.step = ScriptStep::Cooldown;
                Some(self.timing.follow_up)
            }
            ScriptStep::Cooldown | ScriptStep::Unscheduled => {
                self.schedule(rng);
                None
            }
        }
    }
}

/// System: scripted opponents emit `FighterCommand`s (CombatSet::Intent).
pub fn drive_scripted_opponents(
    time: Res<Time>,
    gate: Res<CombatGate>,
    mut rng: ResMut<DeterministicRng>,
    mut opponents: Query<(Entity, &mut ScriptedOpponent)>,
    mut commands_out: EventWriter<FighterCommand>,
) {
    if !gate.is_open() {
        return;
    }
    let dt = time.delta_secs();

    for (entity, mut script) in opponents.iter_mut() {
        if let Some(move_id) = script.tick(dt, &mut rng.rng) {
            crate::logger::log(&format!("🤖 AI {:?}: {}", entity, move_id));
            commands_out.write(FighterCommand::new(entity, CommandAction::ThrowMove(move_id)));
        }
    }
}
