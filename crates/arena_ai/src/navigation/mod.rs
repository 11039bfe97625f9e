//! Navigation: движение агентов по арене
//!
//! Core AI работает через trait `Navigation` (команды "иди туда", "стоп").
//! Headless реализация: `NavAgent` (straight-line движение) + `NavigationArea`
//! (границы арены и блокирующие боксы для sampling).

use bevy::prelude::*;

pub mod agent;

#[cfg(test)]
mod agent_tests;

pub use agent::{
    advance_nav_agents, sync_navigation_area, NavAgent, NavDriver, NavigationArea,
};

/// Навигационные команды, которые отдаёт AI
pub trait Navigation {
    fn set_destination(&mut self, destination: Vec3);

    fn has_path(&self) -> bool;

    /// Путь ещё считается (в headless реализации всегда false)
    fn has_pending_path(&self) -> bool;

    /// Оставшееся расстояние (0 если пути нет)
    fn remaining_distance(&self) -> f32;

    fn reset_path(&mut self);

    /// Ближайшая проходимая точка в пределах `max_radius` от `near`
    fn sample_navigable_point(&self, near: Vec3, max_radius: f32) -> Option<Vec3>;

    fn set_speed(&mut self, speed: f32);
}
