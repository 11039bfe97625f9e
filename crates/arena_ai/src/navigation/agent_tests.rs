//! Tests для headless навигации

#[cfg(test)]
mod tests {
    use super::super::{NavAgent, NavDriver, Navigation, NavigationArea};
    use bevy::prelude::*;

    #[test]
    fn test_sample_clamps_into_bounds() {
        let area = NavigationArea::square(8.0);

        let point = area.sample(Vec3::new(0.0, 0.0, -10.0), 4.0);
        assert_eq!(point, Some(Vec3::new(0.0, 0.0, -8.0)));

        // Слишком далеко от запрошенной точки
        assert_eq!(area.sample(Vec3::new(0.0, 0.0, -13.0), 4.0), None);
    }

    #[test]
    fn test_sample_pushes_out_of_blocker() {
        let mut area = NavigationArea::square(20.0);
        // Блокер x ∈ [-1.5, 1.5], z ∈ [-1.5, 1.5] с учётом отступа 0.5
        area.add_blocker(Vec3::ZERO, Vec3::new(1.0, 1.0, 1.0));

        let point = area
            .sample(Vec3::new(1.0, 0.0, 0.2), 4.0)
            .expect("точка должна найтись");
        assert!((point - Vec3::new(1.5, 0.0, 0.2)).length() < 1e-5, "point = {:?}", point);

        assert_eq!(area.sample(Vec3::new(1.0, 0.0, 0.2), 0.1), None);
    }

    #[test]
    fn test_sample_returns_ground_height() {
        let mut area = NavigationArea::square(10.0);
        area.ground_y = 0.5;
        assert_eq!(area.sample(Vec3::new(2.0, 3.0, 2.0), 1.0), Some(Vec3::new(2.0, 0.5, 2.0)));
    }

    #[test]
    fn test_driver_path_state() {
        let area = NavigationArea::default();
        let mut agent = NavAgent::default();
        let mut driver = NavDriver::new(&mut agent, Vec3::new(0.0, 0.0, 0.0), &area);

        assert!(!driver.has_path());
        assert_eq!(driver.remaining_distance(), 0.0);

        driver.set_destination(Vec3::new(3.0, 5.0, 4.0));
        driver.set_speed(5.0);
        assert!(driver.has_path());
        assert!(!driver.has_pending_path());
        // Дистанция по земле (y игнорируется)
        assert!((driver.remaining_distance() - 5.0).abs() < 1e-5);

        driver.reset_path();
        assert!(!driver.has_path());
        assert_eq!(agent.speed, 5.0);
    }

    #[test]
    fn test_step_moves_at_speed_and_stops() {
        let agent = NavAgent {
            destination: Some(Vec3::new(0.0, 0.0, -1.0)),
            speed: 4.0,
            stopping_distance: 0.05,
        };
        let mut transform = Transform::default();

        assert!(agent.step(&mut transform, 0.125));
        assert!((transform.translation - Vec3::new(0.0, 0.0, -0.5)).length() < 1e-5);

        // Не перескакивает через destination
        assert!(agent.step(&mut transform, 1.0));
        assert!((transform.translation - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5);

        assert!(!agent.step(&mut transform, 1.0));
        assert!(transform.forward().as_vec3().distance(Vec3::NEG_Z) < 1e-5);
    }
}
