//! Tests для SpatialIndex геометрии

#[cfg(test)]
mod tests {
    use super::super::{SpatialIndex, SpatialQuery, TargetDirectory, TargetInfo};
    use crate::components::Collider;
    use crate::shared::{
        COLLISION_LAYER_ACTORS, COLLISION_LAYER_ENVIRONMENT, COLLISION_MASK_OCCLUSION,
        COLLISION_MASK_PROJECTILES, COLLISION_MASK_TARGETABLE,
    };
    use bevy::prelude::*;

    fn arena() -> (SpatialIndex, Entity, Entity, Entity) {
        let mut index = SpatialIndex::default();
        let actor = Entity::from_raw(1);
        let wall = Entity::from_raw(2);
        let trigger = Entity::from_raw(3);

        index.insert_collider(actor, Vec3::new(0.0, 0.0, -10.0), &Collider::actor());
        index.insert_collider(wall, Vec3::new(0.0, 1.0, -5.0), &Collider::obstacle(Vec3::new(2.0, 1.0, 0.25)));
        index.insert_collider(trigger, Vec3::new(0.0, 0.0, -2.0), &Collider::trigger(1.0, COLLISION_LAYER_ACTORS));

        (index, actor, wall, trigger)
    }

    #[test]
    fn test_overlap_respects_mask_and_ignores_triggers() {
        let (index, actor, wall, _) = arena();

        let actors = index.overlap_sphere(Vec3::ZERO, 15.0, COLLISION_MASK_TARGETABLE);
        assert_eq!(actors, vec![actor]);

        let environment = index.overlap_sphere(Vec3::ZERO, 15.0, COLLISION_MASK_OCCLUSION);
        assert_eq!(environment, vec![wall]);

        assert!(index.overlap_sphere(Vec3::ZERO, 3.0, COLLISION_MASK_TARGETABLE).is_empty());
    }

    #[test]
    fn test_overlap_sphere_touches_box_edge() {
        let (index, _, wall, _) = arena();
        // Ближайшая точка бокса (2, 1, -5), расстояние 3
        let hits = index.overlap_sphere(Vec3::new(5.0, 1.0, -5.0), 3.0, COLLISION_LAYER_ENVIRONMENT);
        assert_eq!(hits, vec![wall]);
        let hits = index.overlap_sphere(Vec3::new(5.0, 1.0, -5.0), 2.9, COLLISION_LAYER_ENVIRONMENT);
        assert!(hits.is_empty());
    }

    #[test]
    fn test_raycast_hits_nearest_surface() {
        let (index, _, wall, _) = arena();

        let hit = index
            .raycast(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Z, 20.0, COLLISION_MASK_PROJECTILES)
            .expect("wall должна блокировать");

        assert_eq!(hit.entity, wall);
        assert!((hit.distance - 4.75).abs() < 1e-4, "distance = {}", hit.distance);
        assert!((hit.point - Vec3::new(0.0, 1.0, -4.75)).length() < 1e-4);
    }

    #[test]
    fn test_raycast_respects_max_distance_and_direction() {
        let (index, _, _, _) = arena();

        assert!(index
            .raycast(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Z, 4.0, COLLISION_MASK_OCCLUSION)
            .is_none());
        assert!(index
            .raycast(Vec3::new(0.0, 1.0, 0.0), Vec3::Z, 50.0, COLLISION_MASK_PROJECTILES)
            .is_none());
        // Нулевое направление: промах, не panic
        assert!(index
            .raycast(Vec3::ZERO, Vec3::ZERO, 50.0, COLLISION_MASK_PROJECTILES)
            .is_none());
    }

    #[test]
    fn test_raycast_excluding_skips_owner() {
        let (index, actor, _, _) = arena();

        // Из центра актора: без исключения попадаем в него же
        let origin = Vec3::new(0.0, 1.0, -10.0);
        let hit = index.raycast(origin, Vec3::NEG_Z, 5.0, COLLISION_LAYER_ACTORS);
        assert_eq!(hit.map(|h| h.entity), Some(actor));

        let hit = index.raycast_excluding(origin, Vec3::NEG_Z, 5.0, COLLISION_LAYER_ACTORS, Some(actor));
        assert!(hit.is_none());
    }

    #[test]
    fn test_target_directory() {
        let mut index = SpatialIndex::default();
        let entity = Entity::from_raw(7);
        let info = TargetInfo {
            position: Vec3::ONE,
            team: Some(3),
            is_dead: false,
        };
        index.insert_target(entity, info);

        assert_eq!(index.describe(entity), Some(info));
        assert_eq!(index.describe(Entity::from_raw(8)), None);

        index.clear();
        assert!(index.is_empty());
        assert_eq!(index.describe(entity), None);
    }
}
