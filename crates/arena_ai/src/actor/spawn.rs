//! Spawn helpers: готовые bundles для арены

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::respawn::Respawn;
use crate::ai::{GuardBrain, PatrolRoute, StrategistBrain};
use crate::combat::Blaster;
use crate::components::{Actor, Ammo, Collider, Health, Obstacle, TeamId};
use crate::config::ArenaConfig;
use crate::navigation::NavAgent;
use crate::perception::Perception;
use crate::pickups::{Pickup, PickupCategory, PickupConfig};

/// Пулы ресурсов актора при спавне
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Reflect)]
#[serde(default)]
pub struct ActorConfig {
    pub max_health: f32,
    pub max_ammo: u32,
}

impl Default for ActorConfig {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            max_ammo: 30,
        }
    }
}

/// Общая часть всех агентов: тело, ресурсы, сенсор, ноги, оружие
fn agent_body(team: TeamId, position: Vec3, config: &ArenaConfig) -> impl Bundle {
    let transform = Transform::from_translation(position);
    (
        Actor { team },
        transform,
        Health::new(config.actor.max_health),
        Ammo::new(config.actor.max_ammo),
        Collider::actor(),
        Perception::default(),
        config.perception.clone(),
        NavAgent::default(),
        Blaster::new(config.blaster.clone()),
        Respawn::at(&transform),
    )
}

/// Guard агент (FSM) с маршрутом патруля
pub fn guard_bundle(team: TeamId, position: Vec3, waypoints: Vec<Vec3>, config: &ArenaConfig) -> impl Bundle {
    (
        agent_body(team, position, config),
        GuardBrain::default(),
        config.guard.clone(),
        PatrolRoute::new(waypoints),
        Name::new("Guard"),
    )
}

/// Strategist агент (utility planner)
pub fn strategist_bundle(team: TeamId, position: Vec3, config: &ArenaConfig) -> impl Bundle {
    (
        agent_body(team, position, config),
        StrategistBrain::default(),
        config.strategist.clone(),
        Name::new("Strategist"),
    )
}

/// Стена / укрытие (axis-aligned box)
pub fn obstacle_bundle(center: Vec3, half_extents: Vec3) -> impl Bundle {
    (
        Obstacle,
        Collider::obstacle(half_extents),
        Transform::from_translation(center),
        Name::new("Obstacle"),
    )
}

/// Pickup категории с параметрами из конфига
pub fn pickup_bundle(category: PickupCategory, position: Vec3, config: &PickupConfig) -> impl Bundle {
    let pickup = match category {
        PickupCategory::Health => Pickup::health(config),
        PickupCategory::Ammo => Pickup::ammo(config),
    };
    (pickup, Transform::from_translation(position), Name::new("Pickup"))
}
