//! Shared domain - cross-cutting примитивы
//!
//! - Countdown: кооперативный таймер (regen delay, combo expiry, stun/counter окна)

pub mod timer;

pub use timer::*;
