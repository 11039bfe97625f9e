//! AI decision-making module
//!
//! Два взаимозаменяемых brain'а (никогда не вместе на одном агенте):
//! - Guard: реактивный FSM Patrol / Chase / Search
//! - Strategist: utility planner с survival override и action lock
//!
//! Core логика (components/) работает через traits Navigation / Weapon /
//! ResourceState / PickupLookup, ECS системы (systems/) только адаптеры.

pub mod components;
pub mod events;
pub mod observation;
pub mod systems;

// Re-export основных типов
pub use components::*;
pub use events::{GuardStateChanged, PlannerActionChanged};
pub use observation::{observation_vector, OBSERVATION_SIZE};
pub use systems::{guard_tick, strategist_tick};
