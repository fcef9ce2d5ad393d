//! Combat components

pub mod action;
pub mod combo;
pub mod stamina;


// Re-export all components
pub use action::*;
pub use combo::*;
pub use stamina::*;
