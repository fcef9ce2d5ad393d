//! ECS Components для бойцов
//!
//! - actor: идентичность и счёт (Fighter, FighterSlot, Health, RoundStats)
//! - ring: позиция на ринге (RingPosition, Facing, MoveIntent)
//!
//! Боевое состояние (ActionMachine, Stamina, ComboTracker) живёт в
//! `crate::combat::components`.

pub mod actor;
pub mod ring;

pub use actor::*;
pub use ring::*;
