//! Тесты детерминизма арены
//!
//! Одинаковый seed + одинаковый спавн → идентичный snapshot

use bevy::prelude::*;
use arena_ai::*;

const TICK_COUNT: u32 = 1200;

/// Спавн небольшой арены: стены, 2 guards, 2 strategists, pickups
fn spawn_arena(world: &mut World, config: &ArenaConfig) {
    world.spawn(obstacle_bundle(Vec3::new(0.0, 1.0, 0.0), Vec3::new(3.0, 1.0, 0.5)));
    world.spawn(obstacle_bundle(Vec3::new(-6.0, 1.0, 5.0), Vec3::new(0.5, 1.0, 2.0)));

    let route = vec![
        Vec3::new(-8.0, 0.0, -8.0),
        Vec3::new(8.0, 0.0, -8.0),
        Vec3::new(8.0, 0.0, -3.0),
        Vec3::new(-8.0, 0.0, -3.0),
    ];
    world.spawn(guard_bundle(1, Vec3::new(-8.0, 0.0, -8.0), route.clone(), config));
    world.spawn(guard_bundle(1, Vec3::new(8.0, 0.0, -3.0), route.into_iter().rev().collect(), config));

    world.spawn(strategist_bundle(2, Vec3::new(-4.0, 0.0, 8.0), config));
    world.spawn(strategist_bundle(2, Vec3::new(4.0, 0.0, 8.0), config));

    world.spawn(pickup_bundle(PickupCategory::Health, Vec3::new(-10.0, 0.0, 10.0), &config.pickups));
    world.spawn(pickup_bundle(PickupCategory::Ammo, Vec3::new(10.0, 0.0, 10.0), &config.pickups));
}

/// Запускает арену и возвращает snapshot мира
fn run_arena(seed: u64, tick_count: u32) -> Vec<u8> {
    let config = ArenaConfig::default();
    let mut app = create_arena_app(seed, config.clone());
    app.insert_resource(NavigationArea::square(15.0));
    spawn_arena(app.world_mut(), &config);

    run_fixed_ticks(&mut app, tick_count);

    arena_snapshot(app.world_mut())
}

#[test]
fn test_determinism_same_seed() {
    const SEED: u64 = 12345;

    let snapshot1 = run_arena(SEED, TICK_COUNT);
    let snapshot2 = run_arena(SEED, TICK_COUNT);

    assert!(!snapshot1.is_empty());
    assert_eq!(
        snapshot1, snapshot2,
        "Симуляция с одинаковым seed ({}) дала разные результаты!",
        SEED
    );
}

#[test]
fn test_determinism_multiple_runs() {
    const SEED: u64 = 42;

    let snapshots: Vec<_> = (0..3).map(|_| run_arena(SEED, TICK_COUNT)).collect();

    for (i, snapshot) in snapshots.iter().enumerate().skip(1) {
        assert_eq!(
            snapshots[0], *snapshot,
            "Прогон {} дал результат отличный от прогона 0",
            i
        );
    }
}

#[test]
fn test_clock_advances_by_fixed_timestep() {
    let mut app = create_arena_app(1, ArenaConfig::default());

    run_fixed_ticks(&mut app, 120);

    let clock = *app.world().resource::<SimulationClock>();
    assert_eq!(clock.tick, 120);
    assert!((clock.now - 2.0).abs() < 1e-3, "now = {}", clock.now);
}

#[test]
fn test_invariants_hold_over_long_run() {
    let config = ArenaConfig::default();
    let mut app = create_arena_app(99, config.clone());
    app.insert_resource(NavigationArea::square(15.0));
    spawn_arena(app.world_mut(), &config);

    for _ in 0..10 {
        run_fixed_ticks(&mut app, 180);

        let world = app.world_mut();
        let mut health = world.query::<&Health>();
        for health in health.iter(world) {
            assert!(health.current >= 0.0 && health.current <= health.max, "{:?}", health);
        }

        let mut ammo = world.query::<&Ammo>();
        for ammo in ammo.iter(world) {
            assert!(ammo.current <= ammo.max, "{:?}", ammo);
        }
    }
}
