//! Strategist AI: иерархический utility planner.
//!
//! Каждый decision interval (если action lock истёк):
//! 1. Survival override: health01 <= critical → Heal (есть аптечка) / Flee
//! 2. Utility scoring 4 действий × веса
//! 3. Anti-repeat: лучший == last_action → следующий лучший
//! 4. Новое действие включает lock и сбрасывает путь
//!
//! Каждый тик выполняется текущее действие. Heal / CollectAmmo могут сами
//! переключить действие (в обход lock), если выполнять их нечем.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::scoring::{UtilityInputs, UtilityScores, UtilityWeights};
use crate::combat::Weapon;
use crate::components::ResourceState;
use crate::navigation::Navigation;
use crate::perception::Perception;
use crate::pickups::{PickupCategory, PickupLookup};
use crate::shared::{flatten, AgentPose};

/// Действия планировщика
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect, Serialize, Deserialize)]
pub enum PlannerAction {
    #[default]
    None,
    Engage,
    Heal,
    CollectAmmo,
    Flee,
}

/// Hysteresis: текущее действие держится минимум `lock_duration`
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct ActionLock {
    pub current_action: PlannerAction,
    pub last_action: PlannerAction,
    pub locked_until: f32,
}

impl Default for ActionLock {
    fn default() -> Self {
        Self {
            current_action: PlannerAction::None,
            last_action: PlannerAction::None,
            locked_until: f32::NEG_INFINITY,
        }
    }
}

impl ActionLock {
    pub fn is_locked(&self, now: f32) -> bool {
        now < self.locked_until
    }

    /// Сменить действие. То же действие: no-op (lock не продлевается).
    pub fn set(&mut self, next: PlannerAction, now: f32, lock_duration: f32) -> bool {
        if next == self.current_action {
            return false;
        }

        self.last_action = self.current_action;
        self.current_action = next;
        self.locked_until = now + lock_duration;
        true
    }
}

/// Почему сменилось действие
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeCause {
    SurvivalOverride,
    Utility,
    /// Heal без аптечек, CollectAmmo без нужды/патронов
    ExecutionFallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionChange {
    pub from: PlannerAction,
    pub to: PlannerAction,
    pub cause: ChangeCause,
}

/// Параметры strategist
#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize, Reflect)]
#[reflect(Component)]
#[serde(default)]
pub struct StrategistConfig {
    pub decision_interval: f32,
    pub action_lock_duration: f32,
    pub critical_health01: f32,
    pub normal_speed: f32,
    pub flee_speed: f32,
    pub weights: UtilityWeights,
    pub flee_distance: f32,
    /// Радиус поиска проходимой точки вокруг flee target
    pub flee_sample_radius: f32,
    /// CollectAmmo завершается когда ammo01 выше этого
    pub ammo_satisfied01: f32,
}

impl Default for StrategistConfig {
    fn default() -> Self {
        Self {
            decision_interval: 0.5,
            action_lock_duration: 1.0,
            critical_health01: 0.25,
            normal_speed: 4.0,
            flee_speed: 5.5,
            weights: UtilityWeights::default(),
            flee_distance: 10.0,
            flee_sample_radius: 4.0,
            ammo_satisfied01: 0.6,
        }
    }
}

/// Всё, что strategist видит и чем управляет за один тик
pub struct StrategistContext<'a> {
    pub pose: AgentPose,
    pub perception: &'a Perception,
    pub resources: &'a dyn ResourceState,
    pub pickups: &'a dyn PickupLookup,
    pub nav: &'a mut dyn Navigation,
    pub weapon: &'a mut dyn Weapon,
    pub now: f32,
}

/// Состояние strategist (persist между тиками)
#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Reflect)]
#[reflect(Component)]
pub struct StrategistBrain {
    pub lock: ActionLock,
    pub next_decision_at: f32,
}

impl StrategistBrain {
    pub fn current_action(&self) -> PlannerAction {
        self.lock.current_action
    }

    /// Сброс при respawn
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Один тик: (возможно) решение, затем выполнение текущего действия
    pub fn tick(&mut self, config: &StrategistConfig, ctx: &mut StrategistContext) -> Vec<ActionChange> {
        let mut changes = Vec::new();

        if ctx.now >= self.next_decision_at {
            self.next_decision_at = ctx.now + config.decision_interval;
            changes.extend(self.decide(config, ctx));
        }

        changes.extend(self.execute(config, ctx));
        changes
    }

    /// Decision procedure (skip пока действует lock)
    pub fn decide(&mut self, config: &StrategistConfig, ctx: &mut StrategistContext) -> Option<ActionChange> {
        if self.lock.is_locked(ctx.now) {
            return None;
        }

        if ctx.resources.health01() <= config.critical_health01 {
            let next = if ctx.pickups.any(PickupCategory::Health) {
                PlannerAction::Heal
            } else {
                PlannerAction::Flee
            };
            return self.switch_to(next, ChangeCause::SurvivalOverride, config, ctx);
        }

        let inputs = UtilityInputs::gather(&ctx.pose, ctx.perception, ctx.resources, ctx.pickups);
        let scores = UtilityScores::evaluate(&inputs).weighted(&config.weights);
        let chosen = scores.select(self.lock.last_action);

        self.switch_to(chosen, ChangeCause::Utility, config, ctx)
    }

    /// Выполнение текущего действия
    pub fn execute(&mut self, config: &StrategistConfig, ctx: &mut StrategistContext) -> Option<ActionChange> {
        ctx.nav.set_speed(config.normal_speed);

        match self.lock.current_action {
            PlannerAction::None => None,
            PlannerAction::Engage => {
                execute_engage(ctx);
                None
            }
            PlannerAction::Heal => {
                match ctx.pickups.find_nearest(PickupCategory::Health, ctx.pose.position) {
                    Some(pickup) => {
                        ctx.nav.set_destination(pickup.position);
                        None
                    }
                    None => self.switch_to(PlannerAction::Flee, ChangeCause::ExecutionFallback, config, ctx),
                }
            }
            PlannerAction::CollectAmmo => {
                let satisfied = ctx
                    .resources
                    .ammo01()
                    .is_some_and(|ammo01| ammo01 > config.ammo_satisfied01);
                if satisfied {
                    return self.switch_to(PlannerAction::Engage, ChangeCause::ExecutionFallback, config, ctx);
                }

                match ctx.pickups.find_nearest(PickupCategory::Ammo, ctx.pose.position) {
                    Some(pickup) => {
                        ctx.nav.set_destination(pickup.position);
                        None
                    }
                    None => self.switch_to(PlannerAction::Engage, ChangeCause::ExecutionFallback, config, ctx),
                }
            }
            PlannerAction::Flee => {
                execute_flee(config, ctx);
                None
            }
        }
    }

    fn switch_to(
        &mut self,
        next: PlannerAction,
        cause: ChangeCause,
        config: &StrategistConfig,
        ctx: &mut StrategistContext,
    ) -> Option<ActionChange> {
        let from = self.lock.current_action;
        if !self.lock.set(next, ctx.now, config.action_lock_duration) {
            return None;
        }

        ctx.nav.reset_path();
        Some(ActionChange { from, to: next, cause })
    }
}

fn execute_engage(ctx: &mut StrategistContext) {
    let Some((_, target_position)) = ctx.perception.visible_target() else {
        // Цели нет: дрейфуем к last known
        ctx.nav.set_destination(ctx.perception.last_known_target_position);
        return;
    };

    ctx.nav.set_destination(target_position);
    ctx.weapon.aim_at(target_position);
    if ctx.weapon.can_fire() {
        ctx.weapon.fire();
    }
}

fn execute_flee(config: &StrategistConfig, ctx: &mut StrategistContext) {
    ctx.nav.set_speed(config.flee_speed);

    let threat = ctx
        .perception
        .visible_target()
        .map_or(ctx.perception.last_known_target_position, |(_, position)| position);

    let mut away = flatten(ctx.pose.position - threat);
    if away.length_squared() < 0.01 {
        away = ctx.pose.forward;
    }

    let flee_target = ctx.pose.position + away.normalize_or_zero() * config.flee_distance;

    if let Some(point) = ctx.nav.sample_navigable_point(flee_target, config.flee_sample_radius) {
        ctx.nav.set_destination(point);
    }
}
