//! Utility scoring для strategist.
//!
//! Все факторы нормализованы в [0, 1]. Scores пересчитываются каждый
//! decision tick и нигде не хранятся.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::strategist::PlannerAction;
use crate::components::ResourceState;
use crate::perception::Perception;
use crate::pickups::{PickupCategory, PickupLookup};
use crate::shared::AgentPose;

/// Engage score без видимой цели
pub const ENGAGE_WITHOUT_TARGET: f32 = 0.1;
/// Дальность, на которой distance factor engage обнуляется
pub const ENGAGE_RANGE: f32 = 20.0;
/// То же для pickups (heal / ammo)
pub const PICKUP_RANGE: f32 = 25.0;
/// Угроза дальше этого не влияет на flee
pub const THREAT_RANGE: f32 = 12.0;
/// Дистанция угрозы, когда цели нет
pub const NO_THREAT_DISTANCE: f32 = 999.0;

pub fn clamp01(value: f32) -> f32 {
    value.clamp(0.0, 1.0)
}

/// Веса важности действий
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Reflect)]
#[serde(default)]
pub struct UtilityWeights {
    pub engage: f32,
    pub heal: f32,
    pub collect_ammo: f32,
    pub flee: f32,
}

impl Default for UtilityWeights {
    fn default() -> Self {
        Self {
            engage: 1.0,
            heal: 1.25,
            collect_ammo: 0.8,
            flee: 1.2,
        }
    }
}

/// Входы scoring'а (snapshot мира на decision tick)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UtilityInputs {
    pub health01: f32,
    /// None: нет боезапаса
    pub ammo01: Option<f32>,
    /// Дистанция до видимой цели
    pub target_distance: Option<f32>,
    pub health_pickup_distance: Option<f32>,
    pub ammo_pickup_distance: Option<f32>,
}

impl UtilityInputs {
    pub fn gather(
        pose: &AgentPose,
        perception: &Perception,
        resources: &dyn ResourceState,
        pickups: &dyn PickupLookup,
    ) -> Self {
        let distance_to_pickup = |category: PickupCategory| {
            pickups
                .find_nearest(category, pose.position)
                .map(|sighting| sighting.position.distance(pose.position))
        };

        Self {
            health01: resources.health01(),
            ammo01: resources.ammo01(),
            target_distance: perception
                .visible_target()
                .map(|(_, position)| position.distance(pose.position)),
            health_pickup_distance: distance_to_pickup(PickupCategory::Health),
            ammo_pickup_distance: distance_to_pickup(PickupCategory::Ammo),
        }
    }
}

/// Scores четырёх действий
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct UtilityScores {
    pub engage: f32,
    pub heal: f32,
    pub collect_ammo: f32,
    pub flee: f32,
}

impl UtilityScores {
    /// Сырые (невзвешенные) scores
    pub fn evaluate(inputs: &UtilityInputs) -> Self {
        let health01 = inputs.health01;

        let engage = match inputs.target_distance {
            None => ENGAGE_WITHOUT_TARGET,
            Some(distance) => {
                let ammo_factor = inputs.ammo01.map_or(1.0, clamp01);
                0.45 * clamp01(health01)
                    + 0.35 * ammo_factor
                    + 0.20 * (1.0 - clamp01(distance / ENGAGE_RANGE))
            }
        };

        let heal = match inputs.health_pickup_distance {
            None => 0.0,
            Some(distance) => 0.7 * (1.0 - health01) + 0.3 * (1.0 - clamp01(distance / PICKUP_RANGE)),
        };

        let collect_ammo = match (inputs.ammo01, inputs.ammo_pickup_distance) {
            (Some(ammo01), Some(distance)) => {
                0.7 * (1.0 - ammo01) + 0.3 * (1.0 - clamp01(distance / PICKUP_RANGE))
            }
            _ => 0.0,
        };

        let threat_distance = inputs.target_distance.unwrap_or(NO_THREAT_DISTANCE);
        let flee = clamp01(0.6 * (1.0 - health01) + 0.4 * (1.0 - clamp01(threat_distance / THREAT_RANGE)));

        Self {
            engage,
            heal,
            collect_ammo,
            flee,
        }
    }

    pub fn weighted(&self, weights: &UtilityWeights) -> Self {
        Self {
            engage: self.engage * weights.engage,
            heal: self.heal * weights.heal,
            collect_ammo: self.collect_ammo * weights.collect_ammo,
            flee: self.flee * weights.flee,
        }
    }

    /// Пары (действие, score) в порядке tie-break
    pub fn ranked(&self) -> [(PlannerAction, f32); 4] {
        [
            (PlannerAction::Engage, self.engage),
            (PlannerAction::Heal, self.heal),
            (PlannerAction::CollectAmmo, self.collect_ammo),
            (PlannerAction::Flee, self.flee),
        ]
    }

    /// Выбор с anti-repeat правилом
    ///
    /// Лучший == `last_action` → лучший из оставшихся с score > 0;
    /// если таких нет: остаётся исключённый.
    pub fn select(&self, last_action: PlannerAction) -> PlannerAction {
        let options = self.ranked();

        let Some(best) = best_of(options.iter().copied()) else {
            return PlannerAction::None;
        };

        if best != last_action {
            return best;
        }

        best_of(
            options
                .iter()
                .copied()
                .filter(|(action, score)| *action != last_action && *score > 0.0),
        )
        .unwrap_or(best)
    }
}

/// Строго наибольший score, при равенстве: первый
fn best_of(options: impl Iterator<Item = (PlannerAction, f32)>) -> Option<PlannerAction> {
    let mut best = None;
    let mut best_score = f32::NEG_INFINITY;

    for (action, score) in options {
        if score > best_score {
            best_score = score;
            best = Some(action);
        }
    }

    best
}
