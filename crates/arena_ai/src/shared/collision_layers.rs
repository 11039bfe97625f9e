//! Collision Layers Constants
//!
//! Категории коллайдеров арены (битовая маска).
//!
//! - Layer 2 (0b10 = 2): Actors (агенты, цели для perception)
//! - Layer 3 (0b100 = 4): Environment (стены, укрытия: блокируют LOS)
//! - Layer 4 (0b1000 = 8): Projectiles
//!
//! Маска = набор слоёв, которые учитывает query.

/// Layer 2: Actors
pub const COLLISION_LAYER_ACTORS: u32 = 0b10; // 2

/// Layer 3: Environment (obstacles/walls)
pub const COLLISION_LAYER_ENVIRONMENT: u32 = 0b100; // 4

/// Layer 4: Projectiles
pub const COLLISION_LAYER_PROJECTILES: u32 = 0b1000; // 8

/// Mask: кого perception считает кандидатами
pub const COLLISION_MASK_TARGETABLE: u32 = COLLISION_LAYER_ACTORS;

/// Mask: что блокирует line of sight
pub const COLLISION_MASK_OCCLUSION: u32 = COLLISION_LAYER_ENVIRONMENT;

/// Mask: во что врезаются снаряды
pub const COLLISION_MASK_PROJECTILES: u32 = COLLISION_LAYER_ACTORS | COLLISION_LAYER_ENVIRONMENT;
