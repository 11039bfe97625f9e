//! NavAgent + NavigationArea: headless навигация
//!
//! Без navmesh: агент идёт по прямой к destination со своей скоростью.
//! Sampling точек: clamp в границы арены + выталкивание из блокирующих боксов.

use bevy::prelude::*;

use super::Navigation;
use crate::combat::Dead;
use crate::components::{Collider, ColliderShape, Obstacle};
use crate::shared::{flatten, yaw_towards};

/// Навигационный агент (аналог navmesh agent)
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct NavAgent {
    pub destination: Option<Vec3>,
    /// Метры в секунду
    pub speed: f32,
    /// Ближе этого расстояния агент стоит на месте
    pub stopping_distance: f32,
}

impl Default for NavAgent {
    fn default() -> Self {
        Self {
            destination: None,
            speed: 3.5,
            stopping_distance: 0.05,
        }
    }
}

impl NavAgent {
    pub fn reset(&mut self) {
        self.destination = None;
    }

    /// Сдвинуть transform на один шаг. Возвращает true если агент двигался.
    pub fn step(&self, transform: &mut Transform, delta: f32) -> bool {
        let Some(destination) = self.destination else {
            return false;
        };

        let to_destination = flatten(destination - transform.translation);
        let distance = to_destination.length();
        if distance <= self.stopping_distance {
            return false;
        }

        let step = (self.speed * delta).min(distance);
        let direction = to_destination / distance;

        transform.translation += direction * step;
        transform.rotation = yaw_towards(direction);
        true
    }
}

/// XZ прямоугольник, куда нельзя ставить точки
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavBlocker {
    pub min: Vec2,
    pub max: Vec2,
}

impl NavBlocker {
    fn contains(&self, point: Vec2) -> bool {
        point.x > self.min.x && point.x < self.max.x && point.y > self.min.y && point.y < self.max.y
    }

    /// Вытолкнуть точку к ближайшему ребру
    fn push_out(&self, point: Vec2) -> Vec2 {
        let candidates = [
            (point.x - self.min.x, Vec2::new(self.min.x, point.y)),
            (self.max.x - point.x, Vec2::new(self.max.x, point.y)),
            (point.y - self.min.y, Vec2::new(point.x, self.min.y)),
            (self.max.y - point.y, Vec2::new(point.x, self.max.y)),
        ];

        let mut best = candidates[0];
        for candidate in &candidates[1..] {
            if candidate.0 < best.0 {
                best = *candidate;
            }
        }
        best.1
    }
}

/// Проходимая область арены
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct NavigationArea {
    pub min: Vec2,
    pub max: Vec2,
    pub ground_y: f32,
    /// Отступ агента от препятствий при sync
    pub agent_radius: f32,
    pub blockers: Vec<NavBlocker>,
}

impl Default for NavigationArea {
    fn default() -> Self {
        Self::square(50.0)
    }
}

impl NavigationArea {
    /// Квадрат ±half_size вокруг начала координат
    pub fn square(half_size: f32) -> Self {
        Self {
            min: Vec2::splat(-half_size),
            max: Vec2::splat(half_size),
            ground_y: 0.0,
            agent_radius: 0.5,
            blockers: Vec::new(),
        }
    }

    pub fn add_blocker(&mut self, center: Vec3, half_extents: Vec3) {
        let margin = Vec2::splat(self.agent_radius);
        let center = center.xz();
        let half = half_extents.xz();
        self.blockers.push(NavBlocker {
            min: center - half - margin,
            max: center + half + margin,
        });
    }

    /// Ближайшая проходимая точка к `near` (None если дальше `max_radius`)
    pub fn sample(&self, near: Vec3, max_radius: f32) -> Option<Vec3> {
        let mut point = near.xz().clamp(self.min, self.max);

        // Два прохода: выталкивание из одного бокса может попасть в соседний
        for _ in 0..2 {
            for blocker in &self.blockers {
                if blocker.contains(point) {
                    point = blocker.push_out(point).clamp(self.min, self.max);
                }
            }
        }

        if self.blockers.iter().any(|blocker| blocker.contains(point)) {
            return None;
        }

        if point.distance(near.xz()) > max_radius {
            return None;
        }

        Some(Vec3::new(point.x, self.ground_y, point.y))
    }
}

/// `Navigation` поверх компонента NavAgent (на время одного тика)
pub struct NavDriver<'a> {
    pub agent: &'a mut NavAgent,
    pub position: Vec3,
    pub area: &'a NavigationArea,
}

impl<'a> NavDriver<'a> {
    pub fn new(agent: &'a mut NavAgent, position: Vec3, area: &'a NavigationArea) -> Self {
        Self {
            agent,
            position,
            area,
        }
    }
}

impl Navigation for NavDriver<'_> {
    fn set_destination(&mut self, destination: Vec3) {
        self.agent.destination = Some(destination);
    }

    fn has_path(&self) -> bool {
        self.agent.destination.is_some()
    }

    fn has_pending_path(&self) -> bool {
        false
    }

    fn remaining_distance(&self) -> f32 {
        self.agent
            .destination
            .map_or(0.0, |destination| flatten(destination - self.position).length())
    }

    fn reset_path(&mut self) {
        self.agent.reset();
    }

    fn sample_navigable_point(&self, near: Vec3, max_radius: f32) -> Option<Vec3> {
        self.area.sample(near, max_radius)
    }

    fn set_speed(&mut self, speed: f32) {
        self.agent.speed = speed;
    }
}

/// Система: straight-line движение всех живых агентов
pub fn advance_nav_agents(
    time: Res<Time<Fixed>>,
    mut agents: Query<(&NavAgent, &mut Transform), Without<Dead>>,
) {
    let delta = time.timestep().as_secs_f32();
    for (agent, mut transform) in agents.iter_mut() {
        agent.step(&mut transform, delta);
    }
}

/// Система: пересобрать блокеры из Obstacle коллайдеров
pub fn sync_navigation_area(
    mut area: ResMut<NavigationArea>,
    obstacles: Query<(&Transform, &Collider), With<Obstacle>>,
) {
    area.blockers.clear();
    for (transform, collider) in obstacles.iter() {
        if let ColliderShape::Box { half_extents } = collider.shape {
            area.add_blocker(transform.translation + collider.offset, half_extents);
        }
    }
}
