//! Tests для сенсора (fake world, без ECS)

#[cfg(test)]
mod tests {
    use super::super::{
        Perception, PerceptionConfig, RayHit, SensorOrigin, SpatialQuery, TargetDirectory,
        TargetInfo,
    };
    use bevy::prelude::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// Fake world: overlap возвращает заданный список, raycast блокирован
    /// для целей из `blocked`.
    #[derive(Default)]
    struct FakeWorld {
        candidates: Vec<Entity>,
        infos: HashMap<Entity, TargetInfo>,
        blocked: Vec<Entity>,
        raycast_targets: RefCell<Vec<Vec3>>,
    }

    impl FakeWorld {
        fn add(&mut self, id: u32, position: Vec3, team: Option<u64>, is_dead: bool) -> Entity {
            let entity = Entity::from_raw(id);
            self.candidates.push(entity);
            self.infos.insert(entity, TargetInfo { position, team, is_dead });
            entity
        }
    }

    impl SpatialQuery for FakeWorld {
        fn overlap_sphere(&self, _center: Vec3, _radius: f32, _mask: u32) -> Vec<Entity> {
            self.candidates.clone()
        }

        fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32, _mask: u32) -> Option<RayHit> {
            let end = origin + direction.normalize() * max_distance;
            self.raycast_targets.borrow_mut().push(end);

            let blocked = self.blocked.iter().any(|entity| {
                self.infos
                    .get(entity)
                    .is_some_and(|info| (info.position + Vec3::Y * 1.2).distance(end) < 0.01)
            });

            blocked.then(|| RayHit {
                entity: Entity::from_raw(999),
                point: origin,
                distance: 0.0,
            })
        }
    }

    impl TargetDirectory for FakeWorld {
        fn describe(&self, entity: Entity) -> Option<TargetInfo> {
            self.infos.get(&entity).copied()
        }
    }

    fn observer() -> SensorOrigin {
        SensorOrigin {
            entity: Entity::from_raw(1),
            team: Some(1),
            position: Vec3::ZERO,
        }
    }

    #[test]
    fn test_picks_nearest_visible_enemy() {
        let mut world = FakeWorld::default();
        world.add(10, Vec3::new(8.0, 0.0, 0.0), Some(2), false);
        let near = world.add(11, Vec3::new(3.0, 0.0, 0.0), Some(2), false);

        let mut perception = Perception::default();
        perception.sense(&observer(), &PerceptionConfig::default(), &world);

        assert_eq!(perception.current_target, Some(near));
        assert!(perception.has_line_of_sight);
        assert_eq!(perception.last_known_target_position, Vec3::new(3.0, 0.0, 0.0));
    }

    #[test]
    fn test_skips_self_allies_and_dead() {
        let mut world = FakeWorld::default();
        // Сам наблюдатель в overlap
        world.add(1, Vec3::ZERO, Some(1), false);
        world.add(12, Vec3::new(1.0, 0.0, 0.0), Some(1), false);
        world.add(13, Vec3::new(2.0, 0.0, 0.0), Some(2), true);
        let enemy = world.add(14, Vec3::new(6.0, 0.0, 0.0), Some(2), false);

        let mut perception = Perception::default();
        let raycasts = perception.sense(&observer(), &PerceptionConfig::default(), &world);

        assert_eq!(perception.current_target, Some(enemy));
        assert_eq!(raycasts, 1, "raycast только для валидного кандидата");
    }

    #[test]
    fn test_teamless_candidate_is_not_an_ally() {
        let mut world = FakeWorld::default();
        let dummy = world.add(20, Vec3::new(4.0, 0.0, 0.0), None, false);

        let mut perception = Perception::default();
        perception.sense(&observer(), &PerceptionConfig::default(), &world);

        assert_eq!(perception.current_target, Some(dummy));
    }

    #[test]
    fn test_occluded_nearest_falls_back_to_farther() {
        let mut world = FakeWorld::default();
        let near = world.add(30, Vec3::new(2.0, 0.0, 0.0), Some(2), false);
        let far = world.add(31, Vec3::new(9.0, 0.0, 0.0), Some(2), false);
        world.blocked.push(near);

        let mut perception = Perception::default();
        let raycasts = perception.sense(&observer(), &PerceptionConfig::default(), &world);

        assert_eq!(perception.current_target, Some(far));
        assert_eq!(raycasts, 2);
    }

    #[test]
    fn test_raycast_skipped_for_candidates_farther_than_best() {
        let mut world = FakeWorld::default();
        world.add(40, Vec3::new(2.0, 0.0, 0.0), Some(2), false);
        world.add(41, Vec3::new(5.0, 0.0, 0.0), Some(2), false);
        world.add(42, Vec3::new(7.0, 0.0, 0.0), Some(2), false);

        let mut perception = Perception::default();
        let raycasts = perception.sense(&observer(), &PerceptionConfig::default(), &world);

        assert_eq!(raycasts, 1);
        // Луч идёт от глаз к глазам цели
        let ends = world.raycast_targets.borrow();
        assert!((ends[0] - Vec3::new(2.0, 1.2, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_lost_target_keeps_last_known_position() {
        let mut world = FakeWorld::default();
        let enemy = world.add(50, Vec3::new(5.0, 0.0, 5.0), Some(2), false);

        let mut perception = Perception::default();
        perception.sense(&observer(), &PerceptionConfig::default(), &world);
        assert_eq!(perception.visible_target(), Some((enemy, Vec3::new(5.0, 0.0, 5.0))));

        world.blocked.push(enemy);
        perception.sense(&observer(), &PerceptionConfig::default(), &world);

        assert_eq!(perception.current_target, None);
        assert!(!perception.has_line_of_sight);
        assert_eq!(perception.visible_target(), None);
        assert_eq!(perception.last_known_target_position, Vec3::new(5.0, 0.0, 5.0));
    }

    #[test]
    fn test_empty_world() {
        let world = FakeWorld::default();
        let mut perception = Perception::default();
        let raycasts = perception.sense(&observer(), &PerceptionConfig::default(), &world);

        assert_eq!(raycasts, 0);
        assert_eq!(perception, Perception::default());
    }
}
