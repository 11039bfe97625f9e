//! Pickup lifecycle systems

use bevy::prelude::*;

use super::{Pickup, PickupRegistry};
use crate::combat::Dead;
use crate::components::{Actor, Ammo, Health};
use crate::shared::{flatten, SimulationClock};

/// Система: регистрация новых pickups и удаление despawned
pub fn register_new_pickups(
    mut registry: ResMut<PickupRegistry>,
    added: Query<(Entity, &Pickup, &Transform), Added<Pickup>>,
    mut removed: RemovedComponents<Pickup>,
) {
    for entity in removed.read() {
        registry.unregister(entity);
    }

    for (entity, pickup, transform) in added.iter() {
        if pickup.is_active() {
            registry.register(entity, pickup.kind.category(), transform.translation);
        }
    }
}

/// Система: подбор pickups живыми акторами внутри trigger радиуса
///
/// Первый подходящий актор (в порядке query) забирает pickup.
pub fn collect_pickups(
    mut commands: Commands,
    clock: Res<SimulationClock>,
    mut registry: ResMut<PickupRegistry>,
    mut pickups: Query<(Entity, &mut Pickup, &Transform)>,
    mut actors: Query<(Entity, &Transform, &mut Health, Option<&mut Ammo>), (With<Actor>, Without<Dead>)>,
) {
    for (pickup_entity, mut pickup, pickup_transform) in pickups.iter_mut() {
        if !pickup.is_active() {
            continue;
        }

        let radius_sq = pickup.trigger_radius * pickup.trigger_radius;
        let mut collected_by = None;

        for (actor, actor_transform, mut health, ammo) in actors.iter_mut() {
            if health.is_dead() {
                continue;
            }

            let offset = flatten(actor_transform.translation - pickup_transform.translation);
            if offset.length_squared() > radius_sq {
                continue;
            }

            if pickup.kind.apply(&mut health, ammo.map(|ammo| ammo.into_inner())) {
                collected_by = Some(actor);
                break;
            }
        }

        let Some(actor) = collected_by else {
            continue;
        };

        registry.unregister(pickup_entity);

        if pickup.respawn {
            pickup.active_again_at = Some(clock.now + pickup.respawn_delay);
            crate::log(&format!(
                "🎁 {:?} collected {:?} ({:?}), respawn at {:.2}",
                actor, pickup_entity, pickup.kind, clock.now + pickup.respawn_delay
            ));
        } else {
            commands.entity(pickup_entity).despawn();
            crate::log(&format!(
                "🎁 {:?} collected {:?} ({:?}), no respawn",
                actor, pickup_entity, pickup.kind
            ));
        }
    }
}

/// Система: вернуть pickups, у которых истёк respawn delay
pub fn respawn_pickups(
    clock: Res<SimulationClock>,
    mut registry: ResMut<PickupRegistry>,
    mut pickups: Query<(Entity, &mut Pickup, &Transform)>,
) {
    for (entity, mut pickup, transform) in pickups.iter_mut() {
        let Some(active_again_at) = pickup.active_again_at else {
            continue;
        };

        if clock.now < active_again_at {
            continue;
        }

        pickup.active_again_at = None;
        registry.register(entity, pickup.kind.category(), transform.translation);
        crate::log(&format!("♻️ Pickup {:?} ({:?}) is back", entity, pickup.kind));
    }
}
