//! Strategist brain system (ECS адаптер над StrategistBrain::tick)

use bevy::prelude::*;

use crate::ai::components::{StrategistBrain, StrategistConfig, StrategistContext};
use crate::ai::events::PlannerActionChanged;
use crate::combat::{spawn_shots, Blaster, BlasterDriver, Dead, WeaponFired};
use crate::components::{Ammo, Health, ResourceSnapshot};
use crate::navigation::{NavAgent, NavDriver, NavigationArea};
use crate::perception::Perception;
use crate::pickups::PickupRegistry;
use crate::shared::{AgentPose, SimulationClock};

/// System: decision + execution для всех живых strategists
///
/// PickupRegistry читается (Res), изменяют его только pickup системы.
pub fn strategist_tick(
    mut commands: Commands,
    clock: Res<SimulationClock>,
    area: Res<NavigationArea>,
    registry: Res<PickupRegistry>,
    mut strategists: Query<
        (
            Entity,
            &Transform,
            &StrategistConfig,
            &Perception,
            &Health,
            &mut StrategistBrain,
            &mut NavAgent,
            &mut Blaster,
            Option<&mut Ammo>,
        ),
        Without<Dead>,
    >,
    mut fired_events: EventWriter<WeaponFired>,
    mut change_events: EventWriter<PlannerActionChanged>,
) {
    for (entity, transform, config, perception, health, mut brain, mut agent, mut blaster, ammo) in
        strategists.iter_mut()
    {
        let pose = AgentPose::from_transform(transform);
        let resources = ResourceSnapshot::capture(health, ammo.as_deref());

        let mut nav = NavDriver::new(&mut agent, pose.position, &area);
        let mut weapon = BlasterDriver::new(&mut blaster, ammo.map(Mut::into_inner), pose.position, clock.now);

        let changes = {
            let mut ctx = StrategistContext {
                pose,
                perception,
                resources: &resources,
                pickups: registry.as_ref(),
                nav: &mut nav,
                weapon: &mut weapon,
                now: clock.now,
            };
            brain.tick(config, &mut ctx)
        };

        spawn_shots(&mut commands, entity, weapon.into_shots(), clock.now, &mut fired_events);

        for change in changes {
            crate::log(&format!(
                "🧠 Strategist {:?}: {:?} → {:?} ({:?}, hp {:.2})",
                entity, change.from, change.to, change.cause, resources.health01
            ));
            change_events.write(PlannerActionChanged {
                entity,
                from: change.from,
                to: change.to,
                cause: change.cause,
            });
        }
    }
}
