//! Shared domain: cross-cutting примитивы арены
//!
//! Содержит:
//! - SimulationClock (монотонные часы симуляции, все "задержки": timestamps)
//! - Collision layers (категории для overlap/raycast)
//! - AgentPose (позиция + facing для core AI)

use bevy::prelude::*;

pub mod collision_layers;

pub use collision_layers::*;

/// Монотонные часы симуляции
///
/// Все задержки (search timeout, action lock, decision interval, respawn)
/// хранятся как future timestamps и сравниваются с `now`.
/// Никаких корутин / suspended execution.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct SimulationClock {
    /// Секунды с начала симуляции
    pub now: f32,
    /// Номер fixed тика
    pub tick: u64,
}

impl SimulationClock {
    pub fn advance(&mut self, delta: f32) {
        self.now += delta;
        self.tick += 1;
    }
}

/// Система: продвинуть часы на один fixed timestep
///
/// Используем `timestep()` (а не `delta()`), чтобы прямой запуск FixedUpdate
/// из тестов давал тот же шаг, что и fixed main loop.
pub fn advance_clock(mut clock: ResMut<SimulationClock>, time: Res<Time<Fixed>>) {
    clock.advance(time.timestep().as_secs_f32());
}

/// Поза агента для AI решений (snapshot на время тика)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentPose {
    pub position: Vec3,
    /// Направление взгляда (normalized, Bevy forward = -Z)
    pub forward: Vec3,
}

impl AgentPose {
    pub fn new(position: Vec3, forward: Vec3) -> Self {
        Self { position, forward }
    }

    pub fn from_transform(transform: &Transform) -> Self {
        Self {
            position: transform.translation,
            forward: transform.forward().as_vec3(),
        }
    }
}

/// Проекция на плоскость земли (y = 0)
pub fn flatten(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

/// Rotation вокруг Y, при которой forward (-Z) смотрит вдоль `direction`
pub fn yaw_towards(direction: Vec3) -> Quat {
    Quat::from_rotation_y(f32::atan2(-direction.x, -direction.z))
}
