//! AI systems (ECS адаптеры brains)

pub mod guard;
pub mod strategist;

// Re-export all systems
pub use guard::*;
pub use strategist::*;
