//! Guard brain system (ECS адаптер над GuardBrain::tick)

use bevy::prelude::*;

use crate::ai::components::{GuardBrain, GuardConfig, PatrolRoute};
use crate::ai::events::GuardStateChanged;
use crate::combat::{spawn_shots, Blaster, BlasterDriver, Dead, WeaponFired};
use crate::components::Ammo;
use crate::navigation::{NavAgent, NavDriver, NavigationArea};
use crate::perception::Perception;
use crate::shared::SimulationClock;

/// System: один тик guard FSM для всех живых guards
///
/// Perception уже обновлён в Sense фазе этого тика.
pub fn guard_tick(
    mut commands: Commands,
    clock: Res<SimulationClock>,
    area: Res<NavigationArea>,
    mut guards: Query<
        (
            Entity,
            &Transform,
            &GuardConfig,
            Option<&PatrolRoute>,
            &Perception,
            &mut GuardBrain,
            &mut NavAgent,
            &mut Blaster,
            Option<&mut Ammo>,
        ),
        Without<Dead>,
    >,
    mut fired_events: EventWriter<WeaponFired>,
    mut transition_events: EventWriter<GuardStateChanged>,
) {
    for (entity, transform, config, route, perception, mut brain, mut agent, mut blaster, ammo) in
        guards.iter_mut()
    {
        let position = transform.translation;
        let waypoints = route.map_or(&[][..], |route| route.waypoints.as_slice());

        let mut nav = NavDriver::new(&mut agent, position, &area);
        let mut weapon = BlasterDriver::new(&mut blaster, ammo.map(Mut::into_inner), position, clock.now);

        let transition = brain.tick(config, waypoints, perception, &mut nav, &mut weapon, clock.now);

        spawn_shots(&mut commands, entity, weapon.into_shots(), clock.now, &mut fired_events);

        if let Some(transition) = transition {
            crate::log(&format!(
                "🛡️ Guard {:?}: {:?} → {:?} (target {:?})",
                entity, transition.from, transition.to, perception.current_target
            ));
            transition_events.write(GuardStateChanged {
                entity,
                from: transition.from,
                to: transition.to,
            });
        }
    }
}
