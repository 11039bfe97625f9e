//! SpatialIndex: headless замена physics queries
//!
//! Пересобирается каждый тик из (Transform, Collider). Порядок коллайдеров =
//! порядок итерации query, поэтому overlap результаты детерминированы.
//! Простая линейная проверка: арена маленькая, broadphase не нужен.

use bevy::prelude::*;
use std::collections::HashMap;

use super::{RayHit, SpatialQuery, TargetDirectory, TargetInfo};
use crate::components::{Collider, ColliderShape};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexedCollider {
    pub entity: Entity,
    pub shape: ColliderShape,
    /// World-space центр (translation + offset)
    pub center: Vec3,
    pub layers: u32,
    pub is_trigger: bool,
}

#[derive(Resource, Debug, Default, Clone)]
pub struct SpatialIndex {
    colliders: Vec<IndexedCollider>,
    targets: HashMap<Entity, TargetInfo>,
}

impl SpatialIndex {
    pub fn clear(&mut self) {
        self.colliders.clear();
        self.targets.clear();
    }

    pub fn insert_collider(&mut self, entity: Entity, position: Vec3, collider: &Collider) {
        self.colliders.push(IndexedCollider {
            entity,
            shape: collider.shape,
            center: position + collider.offset,
            layers: collider.layers,
            is_trigger: collider.is_trigger,
        });
    }

    pub fn insert_target(&mut self, entity: Entity, info: TargetInfo) {
        self.targets.insert(entity, info);
    }

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    /// Raycast с исключением одной entity (снаряд не попадает в стрелка)
    pub fn raycast_excluding(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        mask: u32,
        exclude: Option<Entity>,
    ) -> Option<RayHit> {
        let direction = direction.try_normalize()?;
        if max_distance <= 0.0 {
            return None;
        }

        let mut nearest: Option<RayHit> = None;

        for collider in self.solid(mask) {
            if Some(collider.entity) == exclude {
                continue;
            }

            let hit_distance = match collider.shape {
                ColliderShape::Sphere { radius } => {
                    ray_sphere(origin, direction, collider.center, radius)
                }
                ColliderShape::Box { half_extents } => {
                    ray_aabb(origin, direction, collider.center, half_extents)
                }
            };

            let Some(distance) = hit_distance else {
                continue;
            };

            if distance > max_distance {
                continue;
            }

            if nearest.is_none_or(|hit| distance < hit.distance) {
                nearest = Some(RayHit {
                    entity: collider.entity,
                    point: origin + direction * distance,
                    distance,
                });
            }
        }

        nearest
    }

    fn solid(&self, mask: u32) -> impl Iterator<Item = &IndexedCollider> {
        self.colliders
            .iter()
            .filter(move |collider| !collider.is_trigger && collider.layers & mask != 0)
    }
}

impl SpatialQuery for SpatialIndex {
    fn overlap_sphere(&self, center: Vec3, radius: f32, mask: u32) -> Vec<Entity> {
        let mut result: Vec<Entity> = Vec::new();

        for collider in self.solid(mask) {
            let overlaps = match collider.shape {
                ColliderShape::Sphere { radius: other } => {
                    collider.center.distance_squared(center) <= (radius + other).powi(2)
                }
                ColliderShape::Box { half_extents } => {
                    let closest = center.clamp(
                        collider.center - half_extents,
                        collider.center + half_extents,
                    );
                    closest.distance_squared(center) <= radius * radius
                }
            };

            // Entity может иметь несколько коллайдеров: отдаём один раз
            if overlaps && !result.contains(&collider.entity) {
                result.push(collider.entity);
            }
        }

        result
    }

    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32, mask: u32) -> Option<RayHit> {
        self.raycast_excluding(origin, direction, max_distance, mask, None)
    }
}

impl TargetDirectory for SpatialIndex {
    fn describe(&self, entity: Entity) -> Option<TargetInfo> {
        self.targets.get(&entity).copied()
    }
}

/// Луч (normalized direction) против сферы → расстояние до входа
fn ray_sphere(origin: Vec3, direction: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let to_origin = origin - center;
    let b = to_origin.dot(direction);
    let c = to_origin.length_squared() - radius * radius;

    // Origin внутри сферы
    if c <= 0.0 {
        return Some(0.0);
    }

    if b > 0.0 {
        return None;
    }

    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }

    Some(-b - discriminant.sqrt())
}

/// Slab test против AABB → расстояние до входа (0 если origin внутри)
fn ray_aabb(origin: Vec3, direction: Vec3, center: Vec3, half_extents: Vec3) -> Option<f32> {
    let min = center - half_extents;
    let max = center + half_extents;

    let mut t_enter = 0.0_f32;
    let mut t_exit = f32::MAX;

    for axis in 0..3 {
        let o = origin[axis];
        let d = direction[axis];

        if d.abs() < f32::EPSILON {
            // Параллельно slab'у: либо внутри, либо промах
            if o < min[axis] || o > max[axis] {
                return None;
            }
            continue;
        }

        let inv = 1.0 / d;
        let mut t0 = (min[axis] - o) * inv;
        let mut t1 = (max[axis] - o) * inv;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }

        t_enter = t_enter.max(t0);
        t_exit = t_exit.min(t1);

        if t_enter > t_exit {
            return None;
        }
    }

    Some(t_enter)
}
