//! World компоненты: коллайдеры и препятствия арены

use bevy::prelude::*;

use crate::shared::{
    COLLISION_LAYER_ACTORS, COLLISION_LAYER_ENVIRONMENT,
};

/// Форма коллайдера (центр = Transform.translation + offset)
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub enum ColliderShape {
    Sphere { radius: f32 },
    /// Axis-aligned box
    Box { half_extents: Vec3 },
}

/// Коллайдер для SpatialIndex (overlap + raycast)
///
/// Triggers игнорируются и overlap, и raycast запросами.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Collider {
    pub shape: ColliderShape,
    pub offset: Vec3,
    /// Битовая маска слоёв (см. shared::collision_layers)
    pub layers: u32,
    pub is_trigger: bool,
}

impl Collider {
    /// Актор: сфера r=0.5 на высоте корпуса
    pub fn actor() -> Self {
        Self {
            shape: ColliderShape::Sphere { radius: 0.5 },
            offset: Vec3::Y,
            layers: COLLISION_LAYER_ACTORS,
            is_trigger: false,
        }
    }

    /// Препятствие (стена/укрытие), центр = Transform.translation
    pub fn obstacle(half_extents: Vec3) -> Self {
        Self {
            shape: ColliderShape::Box { half_extents },
            offset: Vec3::ZERO,
            layers: COLLISION_LAYER_ENVIRONMENT,
            is_trigger: false,
        }
    }

    pub fn trigger(radius: f32, layers: u32) -> Self {
        Self {
            shape: ColliderShape::Sphere { radius },
            offset: Vec3::ZERO,
            layers,
            is_trigger: true,
        }
    }
}

/// Маркер: препятствие блокирует навигацию (NavigationArea)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Obstacle;
