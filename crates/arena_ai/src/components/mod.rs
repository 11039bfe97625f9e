//! ECS Components для entity арены
//!
//! Организация по доменам:
//! - actor: базовые характеристики (team, health, ammo)
//! - world: коллайдеры и препятствия
//!
//! Компоненты AI/perception/navigation живут в своих модулях.

pub mod actor;
pub mod world;

// Re-exports для удобного импорта
pub use actor::*;
pub use world::*;
