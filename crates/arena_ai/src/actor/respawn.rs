//! Death + respawn lifecycle
//!
//! Смерть: Health <= 0 → маркер Dead (мёртвые не сенсят, не думают, не ходят),
//! путь, perception и brains сброшены, respawn запланирован timestamp'ом.
//! Respawn: spawn point + детерминированный jitter (DeterministicRng),
//! все ресурсы и brains сброшены в начальное состояние.

use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::ai::{GuardBrain, StrategistBrain};
use crate::combat::{Blaster, Dead};
use crate::components::{Actor, Ammo, Health};
use crate::navigation::NavAgent;
use crate::perception::Perception;
use crate::shared::SimulationClock;
use crate::DeterministicRng;

/// Параметры respawn
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize, Reflect)]
#[serde(default)]
pub struct RespawnConfig {
    /// Секунды между смертью и возрождением
    pub respawn_delay: f32,
    /// Разброс точки возрождения по X/Z (±метры)
    pub spawn_jitter: f32,
}

impl Default for RespawnConfig {
    fn default() -> Self {
        Self {
            respawn_delay: 5.0,
            spawn_jitter: 2.0,
        }
    }
}

/// Точка возрождения актора
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Respawn {
    pub spawn_point: Vec3,
    pub spawn_rotation: Quat,
    /// Some: актор мёртв и ждёт respawn
    pub respawn_at: Option<f32>,
}

impl Respawn {
    pub fn at(transform: &Transform) -> Self {
        Self {
            spawn_point: transform.translation,
            spawn_rotation: transform.rotation,
            respawn_at: None,
        }
    }
}

/// Случайное смещение в квадрате ±jitter по X/Z
pub fn spawn_offset(rng: &mut impl Rng, jitter: f32) -> Vec3 {
    if jitter <= 0.0 {
        return Vec3::ZERO;
    }
    Vec3::new(rng.gen_range(-jitter..=jitter), 0.0, rng.gen_range(-jitter..=jitter))
}

/// System: обнаружение смерти → Dead + запланировать respawn
pub fn handle_deaths(
    mut commands: Commands,
    clock: Res<SimulationClock>,
    config: Res<RespawnConfig>,
    mut actors: Query<
        (
            Entity,
            &Health,
            Option<&mut NavAgent>,
            Option<&mut Respawn>,
            Option<&mut Perception>,
            Option<&mut GuardBrain>,
            Option<&mut StrategistBrain>,
        ),
        (With<Actor>, Without<Dead>),
    >,
) {
    for (entity, health, nav, respawn, perception, guard, strategist) in actors.iter_mut() {
        if health.is_alive() {
            continue;
        }

        commands.entity(entity).insert(Dead);

        // Смерть обрывает текущую жизнь: цель, FSM и action lock сбрасываются сразу
        if let Some(mut nav) = nav {
            nav.reset();
        }
        if let Some(mut perception) = perception {
            perception.reset();
        }
        if let Some(mut guard) = guard {
            guard.reset();
        }
        if let Some(mut strategist) = strategist {
            strategist.reset();
        }

        match respawn {
            Some(mut respawn) => {
                let respawn_at = clock.now + config.respawn_delay;
                respawn.respawn_at = Some(respawn_at);
                crate::logger::log_info(&format!(
                    "☠️ {:?} died at t={:.2}, respawn at t={:.2}",
                    entity, clock.now, respawn_at
                ));
            }
            None => {
                crate::logger::log_info(&format!("☠️ {:?} died (no respawn)", entity));
            }
        }
    }
}

/// System: возрождение мёртвых акторов, у которых истёк respawn delay
pub fn respawn_actors(
    mut commands: Commands,
    clock: Res<SimulationClock>,
    config: Res<RespawnConfig>,
    mut rng: ResMut<DeterministicRng>,
    mut dead: Query<
        (
            Entity,
            &mut Transform,
            &mut Health,
            &mut Respawn,
            Option<&mut Ammo>,
            Option<&mut Perception>,
            Option<&mut GuardBrain>,
            Option<&mut StrategistBrain>,
            Option<&mut NavAgent>,
            Option<&mut Blaster>,
        ),
        With<Dead>,
    >,
) {
    for (entity, mut transform, mut health, mut respawn, ammo, perception, guard, strategist, nav, blaster) in
        dead.iter_mut()
    {
        let Some(respawn_at) = respawn.respawn_at else {
            continue;
        };

        if clock.now < respawn_at {
            continue;
        }

        let offset = spawn_offset(&mut rng.rng, config.spawn_jitter);
        transform.translation = respawn.spawn_point + offset;
        transform.rotation = respawn.spawn_rotation;
        respawn.respawn_at = None;

        health.reset();
        if let Some(mut ammo) = ammo {
            ammo.reset();
        }
        if let Some(mut perception) = perception {
            perception.reset();
        }
        if let Some(mut guard) = guard {
            guard.reset();
        }
        if let Some(mut strategist) = strategist {
            strategist.reset();
        }
        if let Some(mut nav) = nav {
            nav.reset();
        }
        if let Some(mut blaster) = blaster {
            blaster.reset();
        }

        commands.entity(entity).remove::<Dead>();

        crate::logger::log_info(&format!(
            "✨ {:?} respawned at {:?} (t={:.2})",
            entity, transform.translation, clock.now
        ));
    }
}
