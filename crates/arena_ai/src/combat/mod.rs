//! Combat system module (headless ranged combat)
//!
//! ECS ответственность:
//! - Weapon state: Blaster (cooldown timestamp, aim), Ammo
//! - Projectiles: swept raycast по SpatialIndex, lifetime
//! - Events: WeaponFired, ProjectileHit, DamageDealt, EntityDied
//!
//! Порядок в тике: brains стреляют (spawn_shots) → advance_projectiles →
//! process_projectile_hits → death handling (actor модуль).

pub mod damage;
pub mod projectile;
pub mod weapon;

#[cfg(test)]
mod weapon_tests;

// Re-export основных типов
pub use damage::{apply_damage, process_projectile_hits, DamageDealt, Dead, EntityDied, ProjectileHit};
pub use projectile::{advance_projectiles, Projectile};
pub use weapon::{spawn_shots, Blaster, BlasterConfig, BlasterDriver, ShotRequest, Weapon, WeaponFired};
