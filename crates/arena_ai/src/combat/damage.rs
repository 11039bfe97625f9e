//! Damage: применение урона от попаданий
//!
//! Projectile система генерирует ProjectileHit, здесь урон применяется к Health.
//! Health сам уведомляет подписчиков (Damaged/Died), а ECS слой дополнительно
//! генерирует DamageDealt / EntityDied для system-level реакций.

use bevy::prelude::*;

use crate::components::{DamageOutcome, Health};

/// Событие: попадание снаряда (до применения урона)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ProjectileHit {
    /// Кто выстрелил
    pub shooter: Entity,
    /// Во что попали (может быть стена без Health)
    pub target: Entity,
    pub damage: f32,
}

/// Событие: урон нанесен
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct DamageDealt {
    pub attacker: Option<Entity>,
    pub target: Entity,
    pub damage: f32,
    pub target_died: bool,
}

/// Событие: entity умер (health <= 0)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct EntityDied {
    pub entity: Entity,
    pub killer: Option<Entity>,
}

/// Компонент-маркер: entity мертв
///
/// Мёртвые не сенсят, не думают, не двигаются. Снимается при respawn.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Dead;

/// Применить урон и сгенерировать события
pub fn apply_damage(
    target: Entity,
    health: &mut Health,
    amount: f32,
    attacker: Option<Entity>,
    damage_events: &mut EventWriter<DamageDealt>,
    death_events: &mut EventWriter<EntityDied>,
) -> DamageOutcome {
    let outcome = health.take_damage(amount, attacker);

    // No-op урон (мёртвый или amount <= 0): Health молчит, событий тоже нет
    if outcome.applied <= 0.0 && !outcome.died {
        return outcome;
    }

    damage_events.write(DamageDealt {
        attacker,
        target,
        damage: outcome.applied,
        target_died: outcome.died,
    });

    if outcome.died {
        death_events.write(EntityDied {
            entity: target,
            killer: attacker,
        });
        crate::logger::log_info(&format!("💀 {:?} killed by {:?}", target, attacker));
    }

    outcome
}

/// System: ProjectileHit → урон по Health цели
pub fn process_projectile_hits(
    mut hit_events: EventReader<ProjectileHit>,
    mut targets: Query<&mut Health, Without<Dead>>,
    mut damage_events: EventWriter<DamageDealt>,
    mut death_events: EventWriter<EntityDied>,
) {
    for hit in hit_events.read() {
        if hit.shooter == hit.target {
            crate::logger::log_warning(&format!("⚠️ SELF-HIT ignored for {:?}", hit.shooter));
            continue;
        }

        // Стена / мёртвый / despawned: снаряд просто исчез
        let Ok(mut health) = targets.get_mut(hit.target) else {
            continue;
        };

        let before = health.current;
        let outcome = apply_damage(
            hit.target,
            &mut health,
            hit.damage,
            Some(hit.shooter),
            &mut damage_events,
            &mut death_events,
        );

        if outcome.applied > 0.0 {
            crate::log(&format!(
                "💥 {:?} hit {:?} for {} (HP: {} → {})",
                hit.shooter, hit.target, outcome.applied, before, health.current
            ));
        }
    }
}
