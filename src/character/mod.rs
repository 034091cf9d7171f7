//! Character domain: hierarchical movement state machine.
//!
//! A character carries three components: a [`CharacterContext`] holding all
//! mutable movement data, an [`ActiveChain`] naming the states currently
//! active, and a [`ContactTracker`] turning contact levels into edges. The
//! behaviors themselves live once in the [`StateRegistry`] resource.

mod contacts;
mod context;
mod events;
mod input;
mod machine;
mod scheduler;
mod systems;


pub use contacts::{ContactEdge, ContactTracker};
pub use context::{CharacterContext, MotionConstants, MovementTuning, WallClingStatus};
pub use events::{ContactEnded, ContactStarted, StateEntered, StateExited, Surface};
pub use input::ControlInput;
pub use machine::{
    ActiveChain, CheckOrder, Machine, MachineError, StateBehavior, StateDescriptor, StateEvent,
    StateKind, StateRegistry,
};
pub use scheduler::ActionScheduler;

pub(crate) use contacts::emit_contact_events;
pub(crate) use input::apply_control_input;

use bevy::prelude::*;

use crate::character::systems::{
    bootstrap_character, drive_state_machine, run_deferred_actions, setup_state_registry,
    tick_ability_timers,
};

/// Marker for the driven character entity.
#[derive(Component, Debug)]
pub struct Player;

pub struct CharacterPlugin;

impl Plugin for CharacterPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ControlInput>()
            .add_message::<StateEntered>()
            .add_message::<StateExited>()
            .add_message::<ContactStarted>()
            .add_message::<ContactEnded>()
            .add_systems(PreStartup, setup_state_registry)
            .add_systems(Startup, bootstrap_character)
            .add_systems(
                Update,
                (
                    apply_control_input,
                    tick_ability_timers,
                    run_deferred_actions,
                    drive_state_machine,
                )
                    .chain(),
            )
            .add_systems(FixedUpdate, emit_contact_events);
    }
}
