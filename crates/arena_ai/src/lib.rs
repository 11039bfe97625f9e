//! Arena AI: decision-making для автономных боевых агентов
//!
//! ECS-симуляция арены на Bevy 0.16 (headless, fixed timestep)
//!
//! Core (без ECS, через traits):
//! - perception: ближайшая видимая цель (overlap + occlusion raycast)
//! - ai::guard: реактивный FSM Patrol / Chase / Search
//! - ai::strategist: utility planner + survival override + action lock
//!
//! Headless арена (collaborators для core):
//! SpatialIndex, NavAgent, Blaster + Projectile, Health / Ammo, Pickups, Respawn.
//!
//! Порядок фаз в FixedUpdate (chained): Clock → Lifecycle → Sense → Decide → Act → Resolve

use bevy::ecs::event::Events;
use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod actor;
pub mod ai;
pub mod combat;
pub mod components;
pub mod config;
pub mod logger;
pub mod navigation;
pub mod perception;
pub mod pickups;
pub mod shared;

// Re-export базовых типов для удобства
pub use actor::{guard_bundle, obstacle_bundle, pickup_bundle, strategist_bundle, ActorConfig, Respawn, RespawnConfig};
pub use ai::{
    GuardBrain, GuardConfig, GuardState, GuardStateChanged, PatrolRoute, PlannerAction, PlannerActionChanged,
    StrategistBrain, StrategistConfig,
};
pub use combat::{Blaster, BlasterConfig, DamageDealt, Dead, EntityDied, Projectile, WeaponFired};
pub use components::*;
pub use config::{ArenaConfig, ConfigError, ConfigResult};
pub use logger::{init_logger, log, log_error, log_info, log_warning, set_log_level, set_logger, LogLevel, LogPrinter};
pub use navigation::{NavAgent, NavigationArea};
pub use perception::{Perception, PerceptionConfig, SpatialIndex};
pub use pickups::{Pickup, PickupCategory, PickupConfig, PickupRegistry};
pub use shared::SimulationClock;

/// Фазы fixed тика
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArenaSet {
    /// Продвинуть SimulationClock
    Clock,
    /// Respawn акторов и pickups, регистрация pickups
    Lifecycle,
    /// Spatial index + perception
    Sense,
    /// Guard / strategist brains
    Decide,
    /// Движение агентов
    Act,
    /// Снаряды, урон, подбор pickups, смерти
    Resolve,
}

/// Главный plugin арены (объединяет все подсистемы)
#[derive(Default)]
pub struct ArenaAiPlugin {
    pub config: ArenaConfig,
}

impl ArenaAiPlugin {
    pub fn new(config: ArenaConfig) -> Self {
        Self { config }
    }
}

impl Plugin for ArenaAiPlugin {
    fn build(&self, app: &mut App) {
        // Детерминистичный RNG (seed по умолчанию, если хост не задал свой)
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }

        app.insert_resource(Time::<Fixed>::from_hz(self.config.tick_hz))
            .insert_resource(self.config.clone())
            .insert_resource(self.config.respawn.clone())
            .init_resource::<SimulationClock>()
            .init_resource::<SpatialIndex>()
            .init_resource::<PickupRegistry>()
            .init_resource::<NavigationArea>();

        // Регистрация событий
        app.add_event::<combat::WeaponFired>()
            .add_event::<combat::ProjectileHit>()
            .add_event::<combat::DamageDealt>()
            .add_event::<combat::EntityDied>()
            .add_event::<ai::GuardStateChanged>()
            .add_event::<ai::PlannerActionChanged>();

        app.configure_sets(
            FixedUpdate,
            (
                ArenaSet::Clock,
                ArenaSet::Lifecycle,
                ArenaSet::Sense,
                ArenaSet::Decide,
                ArenaSet::Act,
                ArenaSet::Resolve,
            )
                .chain(),
        );

        app.add_systems(FixedUpdate, shared::advance_clock.in_set(ArenaSet::Clock))
            .add_systems(
                FixedUpdate,
                (
                    actor::respawn_actors,
                    pickups::respawn_pickups,
                    pickups::register_new_pickups,
                )
                    .chain()
                    .in_set(ArenaSet::Lifecycle),
            )
            .add_systems(
                FixedUpdate,
                (
                    navigation::sync_navigation_area,
                    perception::rebuild_spatial_index,
                    perception::perception_tick,
                )
                    .chain()
                    .in_set(ArenaSet::Sense),
            )
            .add_systems(
                FixedUpdate,
                (ai::guard_tick, ai::strategist_tick)
                    .chain()
                    .in_set(ArenaSet::Decide),
            )
            .add_systems(FixedUpdate, navigation::advance_nav_agents.in_set(ArenaSet::Act))
            .add_systems(
                FixedUpdate,
                (
                    // Позиции после движения: снаряды видят актуальные коллайдеры
                    perception::rebuild_spatial_index,
                    combat::advance_projectiles,
                    combat::process_projectile_hits,
                    pickups::collect_pickups,
                    actor::handle_deaths,
                )
                    .chain()
                    .in_set(ArenaSet::Resolve),
            );
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции (без арены)
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(60.0)); // 60Hz FixedUpdate

    app
}

/// Headless App + ArenaAiPlugin
pub fn create_arena_app(seed: u64, config: ArenaConfig) -> App {
    let mut app = create_headless_app(seed);
    app.add_plugins(ArenaAiPlugin::new(config));
    app
}

/// Прогнать `ticks` fixed тиков детерминированно (без wall-clock времени)
///
/// После каждого тика делаем то же, что Main schedule: swap буферов событий
/// и `clear_trackers` (RemovedComponents), иначе буферы растут бесконечно.
pub fn run_fixed_ticks(app: &mut App, ticks: u32) {
    for _ in 0..ticks {
        let world = app.world_mut();
        world.run_schedule(FixedUpdate);
        update_arena_events(world);
        world.clear_trackers();
    }
}

/// Double-buffer swap для событий арены (события живут два тика)
fn update_arena_events(world: &mut World) {
    update_events::<combat::WeaponFired>(world);
    update_events::<combat::ProjectileHit>(world);
    update_events::<combat::DamageDealt>(world);
    update_events::<combat::EntityDied>(world);
    update_events::<ai::GuardStateChanged>(world);
    update_events::<ai::PlannerActionChanged>(world);
}

fn update_events<E: Event>(world: &mut World) {
    if let Some(mut events) = world.get_resource_mut::<Events<E>>() {
        events.update();
    }
}

/// Snapshot компонента для сравнения детерминизма
pub fn world_snapshot<T>(world: &mut World) -> Vec<u8>
where
    T: Component + std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}

/// Snapshot всей арены: позиции, здоровье, патроны, состояния brains, часы
pub fn arena_snapshot(world: &mut World) -> Vec<u8> {
    let mut snapshot = Vec::new();
    snapshot.extend(world_snapshot::<Transform>(world));
    snapshot.extend(world_snapshot::<Health>(world));
    snapshot.extend(world_snapshot::<Ammo>(world));
    snapshot.extend(world_snapshot::<GuardBrain>(world));
    snapshot.extend(world_snapshot::<StrategistBrain>(world));
    snapshot.extend(world_snapshot::<Perception>(world));

    if let Some(clock) = world.get_resource::<SimulationClock>() {
        snapshot.extend(format!("{:?}", clock).as_bytes());
    }

    snapshot
}
