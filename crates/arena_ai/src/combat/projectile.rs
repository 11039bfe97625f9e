//! Projectile: простой снаряд без физики
//!
//! Каждый тик: swept raycast на длину шага (владелец исключён).
//! Первое попадание → ProjectileHit + despawn. Истёк lifetime → despawn.

use bevy::prelude::*;

use super::damage::ProjectileHit;
use crate::perception::SpatialIndex;
use crate::shared::{SimulationClock, COLLISION_MASK_PROJECTILES};

#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Projectile {
    pub owner: Entity,
    /// Normalized
    pub direction: Vec3,
    pub speed: f32,
    pub damage: f32,
    pub expires_at: f32,
}

/// System: движение снарядов + попадания
pub fn advance_projectiles(
    mut commands: Commands,
    clock: Res<SimulationClock>,
    time: Res<Time<Fixed>>,
    index: Res<SpatialIndex>,
    mut projectiles: Query<(Entity, &mut Transform, &Projectile)>,
    mut hit_events: EventWriter<ProjectileHit>,
) {
    let delta = time.timestep().as_secs_f32();

    for (entity, mut transform, projectile) in projectiles.iter_mut() {
        if clock.now >= projectile.expires_at {
            commands.entity(entity).despawn();
            continue;
        }

        let step = projectile.speed * delta;
        let hit = index.raycast_excluding(
            transform.translation,
            projectile.direction,
            step,
            COLLISION_MASK_PROJECTILES,
            Some(projectile.owner),
        );

        if let Some(hit) = hit {
            hit_events.write(ProjectileHit {
                shooter: projectile.owner,
                target: hit.entity,
                damage: projectile.damage,
            });
            commands.entity(entity).despawn();
            continue;
        }

        transform.translation += projectile.direction * step;
    }
}
