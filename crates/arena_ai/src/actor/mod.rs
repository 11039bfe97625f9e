//! Actor domain: жизненный цикл агентов арены
//!
//! Содержит:
//! - Death / respawn (Dead маркер, Respawn timestamp, jitter)
//! - Spawn bundles (guard, strategist, obstacle, pickup)
//!
//! Базовые компоненты (Actor, Health, Ammo): в crate::components.

pub mod respawn;
pub mod spawn;

// Re-export all
pub use respawn::*;
pub use spawn::*;
