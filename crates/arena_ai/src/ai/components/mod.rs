//! AI components (brains, configs, scoring)

pub mod guard;
pub mod scoring;
pub mod strategist;

// Tests (separate files with _tests suffix)
#[cfg(test)]
mod test_support;

// Re-export all components
pub use guard::*;
pub use scoring::*;
pub use strategist::*;
