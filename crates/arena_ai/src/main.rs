//! Headless арена: 2 guards против 2 strategists
//!
//! Использование: `arena_ai [config.json]`

use arena_ai::{
    arena_snapshot, create_arena_app, guard_bundle, log_error, log_info, obstacle_bundle, pickup_bundle,
    run_fixed_ticks, strategist_bundle, ArenaConfig, GuardBrain, Health, NavigationArea, PickupCategory,
    SimulationClock, StrategistBrain,
};
use bevy::prelude::*;

const SEED: u64 = 42;
const TOTAL_TICKS: u32 = 3600;
const REPORT_EVERY: u32 = 300;

const GUARD_TEAM: u64 = 1;
const STRATEGIST_TEAM: u64 = 2;

fn main() {
    let config = match std::env::args().nth(1) {
        Some(path) => match ArenaConfig::load(&path) {
            Ok(config) => config,
            Err(error) => {
                // Логгер ещё не установлен: пишем напрямую
                eprintln!("ERROR: {}", error);
                std::process::exit(1);
            }
        },
        None => ArenaConfig::default(),
    };

    let mut app = create_arena_app(SEED, config.clone());
    app.insert_resource(NavigationArea::square(20.0));
    spawn_demo_arena(app.world_mut(), &config);

    log_info(&format!(
        "🏟️ Arena started (seed: {}, {} Hz, {} ticks)",
        SEED, config.tick_hz, TOTAL_TICKS
    ));

    let mut ticks_done = 0;
    while ticks_done < TOTAL_TICKS {
        run_fixed_ticks(&mut app, REPORT_EVERY);
        ticks_done += REPORT_EVERY;
        report(app.world_mut());
    }

    let snapshot = arena_snapshot(app.world_mut());
    if snapshot.is_empty() {
        log_error("Arena snapshot is empty");
    }
    log_info(&format!("Simulation complete! snapshot = {} bytes", snapshot.len()));
}

fn spawn_demo_arena(world: &mut World, config: &ArenaConfig) {
    // Укрытия в центре
    world.spawn(obstacle_bundle(Vec3::new(0.0, 1.0, 0.0), Vec3::new(3.0, 1.0, 0.5)));
    world.spawn(obstacle_bundle(Vec3::new(-8.0, 1.0, 6.0), Vec3::new(0.5, 1.0, 2.5)));
    world.spawn(obstacle_bundle(Vec3::new(8.0, 1.0, -6.0), Vec3::new(0.5, 1.0, 2.5)));

    // Guards патрулируют южную половину
    let south_loop = vec![
        Vec3::new(-12.0, 0.0, -12.0),
        Vec3::new(12.0, 0.0, -12.0),
        Vec3::new(12.0, 0.0, -4.0),
        Vec3::new(-12.0, 0.0, -4.0),
    ];
    let mut reversed = south_loop.clone();
    reversed.reverse();

    world.spawn(guard_bundle(GUARD_TEAM, Vec3::new(-12.0, 0.0, -12.0), south_loop, config));
    world.spawn(guard_bundle(GUARD_TEAM, Vec3::new(12.0, 0.0, -4.0), reversed, config));

    // Strategists на севере
    world.spawn(strategist_bundle(STRATEGIST_TEAM, Vec3::new(-6.0, 0.0, 14.0), config));
    world.spawn(strategist_bundle(STRATEGIST_TEAM, Vec3::new(6.0, 0.0, 14.0), config));

    world.spawn(pickup_bundle(PickupCategory::Health, Vec3::new(-15.0, 0.0, 15.0), &config.pickups));
    world.spawn(pickup_bundle(PickupCategory::Health, Vec3::new(15.0, 0.0, 0.0), &config.pickups));
    world.spawn(pickup_bundle(PickupCategory::Ammo, Vec3::new(15.0, 0.0, 15.0), &config.pickups));
    world.spawn(pickup_bundle(PickupCategory::Ammo, Vec3::new(-15.0, 0.0, 0.0), &config.pickups));
}

fn report(world: &mut World) {
    let now = world.resource::<SimulationClock>().now;

    let mut guards = world.query::<(Entity, &GuardBrain, &Health)>();
    for (entity, brain, health) in guards.iter(world) {
        log_info(&format!(
            "t={:>6.2} 🛡️ {:?} {:?} hp {:.0}",
            now, entity, brain.state, health.current
        ));
    }

    let mut strategists = world.query::<(Entity, &StrategistBrain, &Health)>();
    for (entity, brain, health) in strategists.iter(world) {
        log_info(&format!(
            "t={:>6.2} 🧠 {:?} {:?} hp {:.0}",
            now,
            entity,
            brain.current_action(),
            health.current
        ));
    }
}
