//! Character domain: per-frame systems driving the machine.

use bevy::prelude::*;

use super::contacts::ContactTracker;
use super::context::{CharacterContext, MovementTuning};
use super::events::{StateEntered, StateExited};
use super::machine::{ActiveChain, Machine, StateEvent, StateKind, StateRegistry};
use super::Player;

/// Builds the shared behavior registry; a kind without a behavior is a
/// wiring defect and stops the app.
pub(crate) fn setup_state_registry(mut commands: Commands, mut exit: MessageWriter<AppExit>) {
    match StateRegistry::build() {
        Ok(registry) => {
            info!("{}", registry.summary());
            commands.insert_resource(registry);
        }
        Err(err) => {
            error!("state registry construction failed: {}", err);
            exit.write(AppExit::error());
        }
    }
}

/// Spawns the character starting airborne, with the airborne root choosing
/// its initial sub-state, and reports the initial enters.
pub(crate) fn bootstrap_character(
    mut commands: Commands,
    tuning: Option<Res<MovementTuning>>,
    registry: Option<Res<StateRegistry>>,
    mut entered: MessageWriter<StateEntered>,
) {
    let (Some(tuning), Some(registry)) = (tuning, registry) else {
        warn!("movement tuning or state registry unavailable, character not spawned");
        return;
    };

    let mut ctx = CharacterContext::new(tuning.clone());
    let mut chain = ActiveChain::default();
    let mut events = Vec::new();
    Machine::new(&registry, &mut chain, &mut ctx, &mut events).install_root(StateKind::Airborne);

    let entity = commands
        .spawn((Player, ctx, chain, ContactTracker::default()))
        .id();
    for event in events {
        if let StateEvent::Entered(state) = event {
            entered.write(StateEntered { entity, state });
        }
    }
    debug!("character spawned airborne");
}

/// Jump apex countdown and dash elapsed time.
pub(crate) fn tick_ability_timers(time: Res<Time>, mut query: Query<&mut CharacterContext>) {
    let dt = time.delta_secs();
    for mut ctx in &mut query {
        ctx.tick_timers(dt);
    }
}

/// Fires deferred actions whose wait has elapsed.
pub(crate) fn run_deferred_actions(time: Res<Time>, mut query: Query<&mut CharacterContext>) {
    let dt = time.delta_secs();
    for mut ctx in &mut query {
        ctx.run_deferred(dt);
    }
}

/// Advances every character's machine one tick and publishes the resulting
/// enter/exit notifications.
pub(crate) fn drive_state_machine(
    time: Res<Time>,
    registry: Res<StateRegistry>,
    mut query: Query<(Entity, &mut CharacterContext, &mut ActiveChain)>,
    mut entered: MessageWriter<StateEntered>,
    mut exited: MessageWriter<StateExited>,
) {
    let dt = time.delta_secs();
    for (entity, mut ctx, mut chain) in &mut query {
        let mut events = Vec::new();
        Machine::new(&registry, &mut chain, &mut ctx, &mut events).update(dt);
        for event in events {
            match event {
                StateEvent::Entered(state) => {
                    entered.write(StateEntered { entity, state });
                }
                StateEvent::Exited(state) => {
                    exited.write(StateExited { entity, state });
                }
            }
        }
    }
}
