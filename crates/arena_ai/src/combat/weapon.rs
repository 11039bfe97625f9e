//! Weapon: blaster с cooldown и расходом патронов
//!
//! Core AI видит только trait `Weapon` (can_fire / fire / aim_at).
//! ECS адаптер `BlasterDriver` собирает выстрелы за тик в `ShotRequest`,
//! система потом спавнит Projectile entities через Commands.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::projectile::Projectile;
use crate::components::Ammo;
use crate::shared::flatten;

/// Оружие с точки зрения AI
pub trait Weapon {
    fn can_fire(&self) -> bool;

    /// Выстрел (no-op если `can_fire() == false`)
    fn fire(&mut self);

    /// Навести ствол на точку (только горизонтально)
    fn aim_at(&mut self, target: Vec3);
}

/// Параметры blaster'а
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Reflect)]
#[serde(default)]
pub struct BlasterConfig {
    pub damage: f32,
    pub projectile_speed: f32,
    /// Секунды между выстрелами
    pub fire_cooldown: f32,
    pub ammo_cost: u32,
    pub projectile_lifetime: f32,
    /// Высота ствола над позицией актора
    pub muzzle_height: f32,
}

impl Default for BlasterConfig {
    fn default() -> Self {
        Self {
            damage: 10.0,
            projectile_speed: 18.0,
            fire_cooldown: 0.35,
            ammo_cost: 1,
            projectile_lifetime: 3.0,
            muzzle_height: 1.2,
        }
    }
}

/// Blaster component
///
/// Cooldown хранится как timestamp (`next_fire_time`), не таймер.
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Blaster {
    pub config: BlasterConfig,
    pub next_fire_time: f32,
    /// Горизонтальное направление ствола (normalized)
    pub aim_direction: Vec3,
}

impl Default for Blaster {
    fn default() -> Self {
        Self::new(BlasterConfig::default())
    }
}

impl Blaster {
    pub fn new(config: BlasterConfig) -> Self {
        Self {
            config,
            next_fire_time: 0.0,
            aim_direction: Vec3::NEG_Z,
        }
    }

    pub fn is_ready(&self, now: f32, ammo: Option<&Ammo>) -> bool {
        now >= self.next_fire_time
            && ammo.is_none_or(|ammo| ammo.current >= self.config.ammo_cost)
    }

    pub fn reset(&mut self) {
        self.next_fire_time = 0.0;
    }
}

/// Запрос на спавн снаряда
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotRequest {
    pub origin: Vec3,
    pub direction: Vec3,
    pub speed: f32,
    pub damage: f32,
    pub lifetime: f32,
}

/// `Weapon` поверх Blaster + Ammo (на время одного тика)
pub struct BlasterDriver<'a> {
    pub blaster: &'a mut Blaster,
    /// None: у актора нет боезапаса (бесконечные патроны)
    pub ammo: Option<&'a mut Ammo>,
    pub muzzle: Vec3,
    pub now: f32,
    shots: Vec<ShotRequest>,
}

impl<'a> BlasterDriver<'a> {
    pub fn new(blaster: &'a mut Blaster, ammo: Option<&'a mut Ammo>, position: Vec3, now: f32) -> Self {
        let muzzle = position + Vec3::Y * blaster.config.muzzle_height;
        Self {
            blaster,
            ammo,
            muzzle,
            now,
            shots: Vec::new(),
        }
    }

    /// Выстрелы, сделанные за тик
    pub fn into_shots(self) -> Vec<ShotRequest> {
        self.shots
    }
}

impl Weapon for BlasterDriver<'_> {
    fn can_fire(&self) -> bool {
        self.blaster.is_ready(self.now, self.ammo.as_deref())
    }

    fn fire(&mut self) {
        if !self.can_fire() {
            return;
        }

        if let Some(ammo) = self.ammo.as_deref_mut() {
            if !ammo.consume(self.blaster.config.ammo_cost) {
                return;
            }
        }

        self.blaster.next_fire_time = self.now + self.blaster.config.fire_cooldown;

        let config = &self.blaster.config;
        self.shots.push(ShotRequest {
            origin: self.muzzle,
            direction: self.blaster.aim_direction,
            speed: config.projectile_speed,
            damage: config.damage,
            lifetime: config.projectile_lifetime,
        });
    }

    fn aim_at(&mut self, target: Vec3) {
        let direction = flatten(target - self.muzzle);
        if direction.length_squared() > 0.001 {
            self.blaster.aim_direction = direction.normalize();
        }
    }
}

/// Event: актор выстрелил
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct WeaponFired {
    pub shooter: Entity,
    pub projectile: Entity,
    pub origin: Vec3,
    pub direction: Vec3,
}

/// Спавн снарядов из ShotRequest'ов одного стрелка
pub fn spawn_shots(
    commands: &mut Commands,
    shooter: Entity,
    shots: Vec<ShotRequest>,
    now: f32,
    fired_events: &mut EventWriter<WeaponFired>,
) {
    for shot in shots {
        let projectile = commands
            .spawn((
                Projectile {
                    owner: shooter,
                    direction: shot.direction,
                    speed: shot.speed,
                    damage: shot.damage,
                    expires_at: now + shot.lifetime,
                },
                Transform::from_translation(shot.origin),
            ))
            .id();

        fired_events.write(WeaponFired {
            shooter,
            projectile,
            origin: shot.origin,
            direction: shot.direction,
        });
    }
}
