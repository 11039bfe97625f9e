//! Tests for Blaster / BlasterDriver.

#[cfg(test)]
mod tests {
    use super::super::weapon::{Blaster, BlasterConfig, BlasterDriver, Weapon};
    use crate::components::Ammo;
    use bevy::prelude::*;

    #[test]
    fn test_blaster_config_default() {
        let config = BlasterConfig::default();
        assert_eq!(config.damage, 10.0);
        assert_eq!(config.projectile_speed, 18.0);
        assert_eq!(config.fire_cooldown, 0.35);
        assert_eq!(config.ammo_cost, 1);
        assert_eq!(config.projectile_lifetime, 3.0);
    }

    #[test]
    fn test_fire_consumes_ammo_and_starts_cooldown() {
        let mut blaster = Blaster::default();
        let mut ammo = Ammo::new(30);

        let mut driver = BlasterDriver::new(&mut blaster, Some(&mut ammo), Vec3::ZERO, 1.0);
        assert!(driver.can_fire());
        driver.aim_at(Vec3::new(5.0, 3.0, 0.0));
        driver.fire();
        // Cooldown → второй выстрел в этом же тике игнорируется
        assert!(!driver.can_fire());
        driver.fire();

        let shots = driver.into_shots();
        assert_eq!(shots.len(), 1);
        assert_eq!(shots[0].origin, Vec3::new(0.0, 1.2, 0.0));
        assert!((shots[0].direction - Vec3::X).length() < 1e-5);

        assert_eq!(ammo.current, 29);
        assert!((blaster.next_fire_time - 1.35).abs() < 1e-5);

        assert!(!blaster.is_ready(1.3, Some(&ammo)));
        assert!(blaster.is_ready(1.35, Some(&ammo)));
    }

    #[test]
    fn test_cannot_fire_without_ammo() {
        let mut blaster = Blaster::default();
        let mut ammo = Ammo { current: 0, max: 30 };

        let mut driver = BlasterDriver::new(&mut blaster, Some(&mut ammo), Vec3::ZERO, 0.0);
        assert!(!driver.can_fire());
        driver.fire();
        assert!(driver.into_shots().is_empty());
    }

    #[test]
    fn test_no_ammo_pool_means_unlimited() {
        let mut blaster = Blaster::default();

        for tick in 0..5 {
            let now = tick as f32;
            let mut driver = BlasterDriver::new(&mut blaster, None, Vec3::ZERO, now);
            driver.fire();
            assert_eq!(driver.into_shots().len(), 1, "tick {}", tick);
        }
    }

    #[test]
    fn test_aim_ignores_degenerate_direction() {
        let mut blaster = Blaster::default();
        let mut driver = BlasterDriver::new(&mut blaster, None, Vec3::ZERO, 0.0);

        // Цель прямо над стволом: горизонтальная проекция нулевая
        driver.aim_at(Vec3::new(0.0, 10.0, 0.0));
        drop(driver);
        assert_eq!(blaster.aim_direction, Vec3::NEG_Z);
    }
}
