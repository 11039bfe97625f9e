//! Fake collaborators для unit tests AI brains.

use bevy::prelude::*;

use crate::combat::Weapon;
use crate::perception::Perception;

/// Weapon, который только считает вызовы
#[derive(Debug, Default)]
pub struct FakeWeapon {
    pub ready: bool,
    pub fired: u32,
    pub aimed_at: Option<Vec3>,
}

impl FakeWeapon {
    pub fn ready() -> Self {
        Self {
            ready: true,
            ..Self::default()
        }
    }
}

impl Weapon for FakeWeapon {
    fn can_fire(&self) -> bool {
        self.ready
    }

    fn fire(&mut self) {
        if self.ready {
            self.fired += 1;
        }
    }

    fn aim_at(&mut self, target: Vec3) {
        self.aimed_at = Some(target);
    }
}

/// Цель видна в `position`
pub fn seen(id: u32, position: Vec3) -> Perception {
    Perception {
        current_target: Some(Entity::from_raw(id)),
        last_known_target_position: position,
        has_line_of_sight: true,
    }
}

/// Цели нет, last known сохранён
pub fn unseen(last_known: Vec3) -> Perception {
    Perception {
        current_target: None,
        last_known_target_position: last_known,
        has_line_of_sight: false,
    }
}
