//! Perception systems (spatial index rebuild + sensor tick)

use bevy::prelude::*;

use super::{Perception, PerceptionConfig, SensorOrigin, SpatialIndex, TargetInfo};
use crate::combat::Dead;
use crate::components::{Actor, Collider, Health};

/// Система: пересобрать SpatialIndex из текущих Transform + Collider
///
/// Запускается в начале Sense фазы, все сенсоры тика видят один snapshot.
pub fn rebuild_spatial_index(
    mut index: ResMut<SpatialIndex>,
    colliders: Query<(Entity, &Transform, &Collider, Option<&Actor>, Option<&Health>)>,
) {
    index.clear();

    for (entity, transform, collider, actor, health) in colliders.iter() {
        index.insert_collider(entity, transform.translation, collider);

        if actor.is_none() && health.is_none() {
            continue;
        }

        index.insert_target(
            entity,
            TargetInfo {
                position: transform.translation,
                team: actor.map(|actor| actor.team),
                is_dead: health.is_some_and(Health::is_dead),
            },
        );
    }
}

/// Система: sensor tick для всех живых агентов с Perception
pub fn perception_tick(
    index: Res<SpatialIndex>,
    mut sensors: Query<
        (Entity, &Transform, Option<&Actor>, &PerceptionConfig, &mut Perception),
        Without<Dead>,
    >,
) {
    for (entity, transform, actor, config, mut perception) in sensors.iter_mut() {
        let origin = SensorOrigin {
            entity,
            team: actor.map(|actor| actor.team),
            position: transform.translation,
        };

        let previous = perception.current_target;
        perception.sense(&origin, config, index.as_ref());

        match (previous, perception.current_target) {
            (None, Some(target)) => {
                crate::log(&format!("👁️ {:?} spotted {:?}", entity, target));
            }
            (Some(target), None) => {
                crate::log(&format!(
                    "👻 {:?} lost sight of {:?} (last known {:?})",
                    entity, target, perception.last_known_target_position
                ));
            }
            (Some(old), Some(new)) if old != new => {
                crate::log(&format!("🔄 {:?} switched target {:?} → {:?}", entity, old, new));
            }
            _ => {}
        }
    }
}
