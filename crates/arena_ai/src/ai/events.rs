//! AI Events: смены состояний brains (для логов, тестов, реакций)

use bevy::prelude::*;

use super::components::{ChangeCause, GuardState, PlannerAction};

/// Guard FSM сменил состояние
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct GuardStateChanged {
    pub entity: Entity,
    pub from: GuardState,
    pub to: GuardState,
}

/// Strategist сменил действие
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PlannerActionChanged {
    pub entity: Entity,
    pub from: PlannerAction,
    pub to: PlannerAction,
    pub cause: ChangeCause,
}
