//! Observation vector для RL агента (только форма интерфейса).
//!
//! Layout: [health01, ammo01, has_target, local_x, local_z, distance01].
//! Без цели: [health01, ammo01, 0, 0, 0, 1].

use bevy::prelude::*;

use crate::components::ResourceState;
use crate::perception::Perception;
use crate::shared::AgentPose;

pub const OBSERVATION_SIZE: usize = 6;

/// Нормализация дистанции до цели
pub const OBSERVATION_DISTANCE_SCALE: f32 = 25.0;

pub fn observation_vector(
    pose: &AgentPose,
    perception: &Perception,
    resources: &dyn ResourceState,
) -> [f32; OBSERVATION_SIZE] {
    let health01 = resources.health01();
    // Нет боезапаса → считаем полным
    let ammo01 = resources.ammo01().unwrap_or(1.0);

    let Some((_, target_position)) = perception.visible_target() else {
        return [health01, ammo01, 0.0, 0.0, 0.0, 1.0];
    };

    let to_target = target_position - pose.position;
    let direction = to_target.normalize_or_zero();

    // Локальные оси агента: forward = +z, right = +x
    let forward = pose.forward;
    let right = forward.cross(Vec3::Y);

    [
        health01,
        ammo01,
        1.0,
        direction.dot(right),
        direction.dot(forward),
        (to_target.length() / OBSERVATION_DISTANCE_SCALE).clamp(0.0, 1.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::ResourceSnapshot;

    #[test]
    fn test_observation_without_target() {
        let pose = AgentPose::new(Vec3::ZERO, Vec3::NEG_Z);
        let resources = ResourceSnapshot {
            health01: 0.5,
            ammo01: None,
        };

        let obs = observation_vector(&pose, &Perception::default(), &resources);
        assert_eq!(obs, [0.5, 1.0, 0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_observation_target_in_local_space() {
        let pose = AgentPose::new(Vec3::ZERO, Vec3::NEG_Z);
        let resources = ResourceSnapshot {
            health01: 1.0,
            ammo01: Some(0.25),
        };
        // Цель справа (+X при forward = -Z), 5 м
        let perception = Perception {
            current_target: Some(Entity::from_raw(3)),
            last_known_target_position: Vec3::new(5.0, 0.0, 0.0),
            has_line_of_sight: true,
        };

        let obs = observation_vector(&pose, &perception, &resources);
        assert_eq!(obs[..3], [1.0, 0.25, 1.0]);
        assert!((obs[3] - 1.0).abs() < 1e-5, "local x = {}", obs[3]);
        assert!(obs[4].abs() < 1e-5, "local z = {}", obs[4]);
        assert!((obs[5] - 0.2).abs() < 1e-5);
    }
}
