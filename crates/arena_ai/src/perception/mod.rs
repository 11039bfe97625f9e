//! Perception: кого агент видит
//!
//! Сенсор ищет ближайшую валидную цель (другая команда, жива, не сам агент)
//! в радиусе обнаружения, с проверкой occlusion raycast'ом.
//! Raycast делается ТОЛЬКО для кандидатов, которые ближе текущего лучшего.
//!
//! Результат (`Perception`) перезаписывается целиком каждый тик.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::components::TeamId;
use crate::shared::{COLLISION_MASK_OCCLUSION, COLLISION_MASK_TARGETABLE};

pub mod spatial;
pub mod systems;

#[cfg(test)]
mod perception_tests;
#[cfg(test)]
mod spatial_tests;

pub use spatial::SpatialIndex;
pub use systems::{perception_tick, rebuild_spatial_index};

/// Попадание raycast'а
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub entity: Entity,
    pub point: Vec3,
    pub distance: f32,
}

/// Пространственные запросы (overlap + raycast), triggers игнорируются
pub trait SpatialQuery {
    fn overlap_sphere(&self, center: Vec3, radius: f32, mask: u32) -> Vec<Entity>;

    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32, mask: u32) -> Option<RayHit>;
}

/// Что сенсор знает о кандидате
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetInfo {
    /// Позиция "ног" (Transform.translation)
    pub position: Vec3,
    /// None: у кандидата нет команды (не фильтруется как союзник)
    pub team: Option<TeamId>,
    /// false если нет health pool
    pub is_dead: bool,
}

/// Lookup компонентов кандидата по Entity
pub trait TargetDirectory {
    fn describe(&self, entity: Entity) -> Option<TargetInfo>;
}

/// Кто смотрит
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorOrigin {
    pub entity: Entity,
    pub team: Option<TeamId>,
    pub position: Vec3,
}

/// Параметры сенсора
#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize, Reflect)]
#[reflect(Component)]
#[serde(default)]
pub struct PerceptionConfig {
    pub detection_radius: f32,
    /// Смещение "глаз" вверх от позиции (и у наблюдателя, и у цели)
    pub eye_height: f32,
    pub target_mask: u32,
    pub occlusion_mask: u32,
}

impl Default for PerceptionConfig {
    fn default() -> Self {
        Self {
            detection_radius: 15.0,
            eye_height: 1.2,
            target_mask: COLLISION_MASK_TARGETABLE,
            occlusion_mask: COLLISION_MASK_OCCLUSION,
        }
    }
}

/// Результат восприятия агента
///
/// `current_target`: только lookup relation (Entity id), не владение.
/// Если цель despawned, следующий тик просто её не найдёт → None.
/// `last_known_target_position`: память "где видели последний раз",
/// НЕ сбрасывается при потере LOS.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Reflect)]
#[reflect(Component)]
pub struct Perception {
    pub current_target: Option<Entity>,
    pub last_known_target_position: Vec3,
    pub has_line_of_sight: bool,
}

impl Perception {
    /// Видимая цель и её текущая позиция (если LOS есть)
    pub fn visible_target(&self) -> Option<(Entity, Vec3)> {
        if !self.has_line_of_sight {
            return None;
        }
        self.current_target
            .map(|target| (target, self.last_known_target_position))
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Один тик сенсора. Возвращает количество occlusion raycast'ов.
    pub fn sense<W>(&mut self, origin: &SensorOrigin, config: &PerceptionConfig, world: &W) -> usize
    where
        W: SpatialQuery + TargetDirectory + ?Sized,
    {
        let eye = Vec3::Y * config.eye_height;
        let eye_origin = origin.position + eye;

        let mut best: Option<(Entity, Vec3)> = None;
        let mut best_distance = f32::MAX;
        let mut raycasts = 0;

        for candidate in world.overlap_sphere(origin.position, config.detection_radius, config.target_mask) {
            if candidate == origin.entity {
                continue;
            }

            let Some(info) = world.describe(candidate) else {
                continue;
            };

            // Союзник (только если у обоих есть команда)
            if let (Some(own), Some(other)) = (origin.team, info.team) {
                if own == other {
                    continue;
                }
            }

            if info.is_dead {
                continue;
            }

            let to_candidate = info.position + eye - eye_origin;
            let distance = to_candidate.length();

            // Дорогой raycast только если кандидат может улучшить результат
            if distance < best_distance {
                raycasts += 1;
                let blocked = world
                    .raycast(eye_origin, to_candidate, distance, config.occlusion_mask)
                    .is_some();

                if !blocked {
                    best_distance = distance;
                    best = Some((candidate, info.position));
                }
            }
        }

        *self = match best {
            Some((target, position)) => Perception {
                current_target: Some(target),
                last_known_target_position: position,
                has_line_of_sight: true,
            },
            None => Perception {
                current_target: None,
                last_known_target_position: self.last_known_target_position,
                has_line_of_sight: false,
            },
        };

        raycasts
    }
}
