//! Combat systems (FixedUpdate, ordered by `CombatSet`)

pub mod commands;
pub mod movement;
pub mod resolution;
pub mod timers;

// Tests (separate files with _tests suffix)
#[cfg(test)]
mod commands_tests;
#[cfg(test)]
mod resolution_tests;

// Re-export all systems
pub use commands::*;
pub use movement::*;
pub use resolution::*;
pub use timers::*;
