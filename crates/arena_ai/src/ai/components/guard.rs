//! Guard AI: реактивный FSM (Patrol / Chase / Search).
//!
//! Решения только по текущему восприятию, без памяти кроме last known position.
//! Один state за тик: переход возвращается сразу, поведение нового state
//! начинается со следующего тика (кроме Chase → Search, который сразу ведёт
//! к last known position).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::combat::Weapon;
use crate::navigation::Navigation;
use crate::perception::Perception;

/// Состояния guard FSM
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect, Serialize, Deserialize)]
pub enum GuardState {
    #[default]
    Patrol,
    Chase,
    Search,
}

/// Смена состояния (для логов / событий)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuardTransition {
    pub from: GuardState,
    pub to: GuardState,
}

/// Параметры guard
#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize, Reflect)]
#[reflect(Component)]
#[serde(default)]
pub struct GuardConfig {
    pub patrol_speed: f32,
    /// Радиус "прибыл к waypoint"
    pub waypoint_tolerance: f32,
    pub chase_speed: f32,
    pub search_speed: f32,
    /// Сколько секунд искать после потери цели
    pub search_duration: f32,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            patrol_speed: 3.5,
            waypoint_tolerance: 1.2,
            chase_speed: 5.0,
            search_speed: 3.75,
            search_duration: 3.0,
        }
    }
}

/// Маршрут патруля (обходится по кругу)
#[derive(Component, Debug, Clone, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PatrolRoute {
    pub waypoints: Vec<Vec3>,
}

impl PatrolRoute {
    pub fn new(waypoints: Vec<Vec3>) -> Self {
        Self { waypoints }
    }
}

/// Состояние guard FSM
#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Reflect)]
#[reflect(Component)]
pub struct GuardBrain {
    pub state: GuardState,
    pub patrol_index: usize,
    /// Timestamp конца поиска (валиден только в Search)
    pub search_until: f32,
}

impl GuardBrain {
    /// Сброс при respawn: Patrol с первого waypoint
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn tick(
        &mut self,
        config: &GuardConfig,
        route: &[Vec3],
        perception: &Perception,
        nav: &mut dyn Navigation,
        weapon: &mut dyn Weapon,
        now: f32,
    ) -> Option<GuardTransition> {
        match self.state {
            GuardState::Patrol => self.tick_patrol(config, route, perception, nav),
            GuardState::Chase => self.tick_chase(config, perception, nav, weapon, now),
            GuardState::Search => self.tick_search(config, perception, nav, now),
        }
    }

    fn tick_patrol(
        &mut self,
        config: &GuardConfig,
        route: &[Vec3],
        perception: &Perception,
        nav: &mut dyn Navigation,
    ) -> Option<GuardTransition> {
        nav.set_speed(config.patrol_speed);

        if perception.visible_target().is_some() {
            return Some(self.transition(GuardState::Chase));
        }

        if route.is_empty() {
            return None;
        }

        // Маршрут мог укоротиться
        self.patrol_index %= route.len();

        if !nav.has_path() {
            nav.set_destination(route[self.patrol_index]);
        }

        if !nav.has_pending_path() && nav.remaining_distance() <= config.waypoint_tolerance {
            self.patrol_index = (self.patrol_index + 1) % route.len();
            nav.set_destination(route[self.patrol_index]);
        }

        None
    }

    fn tick_chase(
        &mut self,
        config: &GuardConfig,
        perception: &Perception,
        nav: &mut dyn Navigation,
        weapon: &mut dyn Weapon,
        now: f32,
    ) -> Option<GuardTransition> {
        nav.set_speed(config.chase_speed);

        if let Some((_, target_position)) = perception.visible_target() {
            nav.set_destination(target_position);
            weapon.aim_at(target_position);
            if weapon.can_fire() {
                weapon.fire();
            }
            return None;
        }

        self.search_until = now + config.search_duration;
        nav.set_speed(config.search_speed);
        nav.set_destination(perception.last_known_target_position);
        Some(self.transition(GuardState::Search))
    }

    fn tick_search(
        &mut self,
        config: &GuardConfig,
        perception: &Perception,
        nav: &mut dyn Navigation,
        now: f32,
    ) -> Option<GuardTransition> {
        nav.set_speed(config.search_speed);

        if perception.visible_target().is_some() {
            return Some(self.transition(GuardState::Chase));
        }

        if now >= self.search_until {
            nav.reset_path();
            return Some(self.transition(GuardState::Patrol));
        }

        // Дошли до last known: стоим и ждём таймер
        if !nav.has_pending_path() && nav.remaining_distance() <= config.waypoint_tolerance {
            nav.reset_path();
        }

        None
    }

    fn transition(&mut self, to: GuardState) -> GuardTransition {
        let from = self.state;
        self.state = to;
        GuardTransition { from, to }
    }
}
