//! Pickups: аптечки и патроны на арене
//!
//! `PickupRegistry` (Resource): список активных pickups мира, в порядке
//! регистрации. Brains только читают его через `PickupLookup`;
//! изменяют только lifecycle системы (register / collect / respawn).
//! Каждый Bevy World владеет своим реестром.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

pub mod systems;


pub use systems::{collect_pickups, register_new_pickups, respawn_pickups};

use crate::components::{Ammo, Health};

/// Категория для поиска (AI спрашивает "ближайшая аптечка")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum PickupCategory {
    Health,
    Ammo,
}

/// Что pickup даёт
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub enum PickupKind {
    Health { amount: f32 },
    Ammo { amount: u32 },
}

impl PickupKind {
    pub fn category(&self) -> PickupCategory {
        match self {
            PickupKind::Health { .. } => PickupCategory::Health,
            PickupKind::Ammo { .. } => PickupCategory::Ammo,
        }
    }

    /// Применить к подобравшему. false: pickup не израсходован
    /// (мёртвый получатель или нет боезапаса).
    pub fn apply(&self, health: &mut Health, ammo: Option<&mut Ammo>) -> bool {
        match *self {
            PickupKind::Health { amount } => {
                if health.is_dead() {
                    return false;
                }
                health.heal(amount);
                true
            }
            PickupKind::Ammo { amount } => {
                let Some(ammo) = ammo else {
                    return false;
                };
                ammo.add(amount);
                true
            }
        }
    }
}

/// Pickup component
///
/// Неактивен пока `active_again_at.is_some()` (ждёт respawn).
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
#[require(Transform)]
pub struct Pickup {
    pub kind: PickupKind,
    pub respawn: bool,
    pub respawn_delay: f32,
    /// Радиус подбора (по земле)
    pub trigger_radius: f32,
    pub active_again_at: Option<f32>,
}

impl Pickup {
    pub fn health(config: &PickupConfig) -> Self {
        Self::from_kind(PickupKind::Health { amount: config.health_amount }, config)
    }

    pub fn ammo(config: &PickupConfig) -> Self {
        Self::from_kind(PickupKind::Ammo { amount: config.ammo_amount }, config)
    }

    pub fn from_kind(kind: PickupKind, config: &PickupConfig) -> Self {
        Self {
            kind,
            respawn: config.respawn,
            respawn_delay: config.respawn_delay,
            trigger_radius: config.trigger_radius,
            active_again_at: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active_again_at.is_none()
    }
}

/// Параметры pickups
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Reflect)]
#[serde(default)]
pub struct PickupConfig {
    pub health_amount: f32,
    pub ammo_amount: u32,
    pub respawn: bool,
    pub respawn_delay: f32,
    pub trigger_radius: f32,
}

impl Default for PickupConfig {
    fn default() -> Self {
        Self {
            health_amount: 40.0,
            ammo_amount: 10,
            respawn: true,
            respawn_delay: 8.0,
            trigger_radius: 1.0,
        }
    }
}

/// Найденный pickup
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickupSighting {
    pub entity: Entity,
    pub position: Vec3,
}

/// Поиск pickups для AI (read-only)
pub trait PickupLookup {
    /// Ближайший активный pickup категории. При равных расстояниях -
    /// зарегистрированный раньше.
    fn find_nearest(&self, category: PickupCategory, from: Vec3) -> Option<PickupSighting>;

    fn any(&self, category: PickupCategory) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct RegisteredPickup {
    entity: Entity,
    category: PickupCategory,
    position: Vec3,
}

/// Реестр активных pickups
#[derive(Resource, Debug, Default, Clone)]
pub struct PickupRegistry {
    entries: Vec<RegisteredPickup>,
}

impl PickupRegistry {
    /// Регистрация (повторная: обновляет запись, порядок сохраняется)
    pub fn register(&mut self, entity: Entity, category: PickupCategory, position: Vec3) {
        if let Some(entry) = self.entries.iter_mut().find(|entry| entry.entity == entity) {
            entry.category = category;
            entry.position = position;
            return;
        }
        self.entries.push(RegisteredPickup {
            entity,
            category,
            position,
        });
    }

    pub fn unregister(&mut self, entity: Entity) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.entity != entity);
        self.entries.len() != before
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.entries.iter().any(|entry| entry.entity == entity)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PickupLookup for PickupRegistry {
    fn find_nearest(&self, category: PickupCategory, from: Vec3) -> Option<PickupSighting> {
        let mut best = f32::MAX;
        let mut nearest = None;

        for entry in self.entries.iter().filter(|entry| entry.category == category) {
            let distance = entry.position.distance_squared(from);
            if distance < best {
                best = distance;
                nearest = Some(PickupSighting {
                    entity: entry.entity,
                    position: entry.position,
                });
            }
        }

        nearest
    }

    fn any(&self, category: PickupCategory) -> bool {
        self.entries.iter().any(|entry| entry.category == category)
    }
}
