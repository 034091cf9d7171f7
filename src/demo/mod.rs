//! Demo domain: a scripted run through the move set.
//!
//! Stands in for a real game host: feeds the control input from a fixed
//! timeline, integrates positions at the fixed rate against hand-rolled
//! room geometry, reports contacts back into the context, and smooths a
//! render position between ticks.

mod script;
mod world;


pub(crate) use world::DemoBody;

use bevy::prelude::*;

use crate::character::{apply_control_input, emit_contact_events};
use script::{advance_script, InputScript};
use world::{attach_demo_body, integrate_bodies, interpolate_bodies, DemoRoom};

pub struct DemoPlugin;

impl Plugin for DemoPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DemoRoom>()
            .init_resource::<InputScript>()
            .add_systems(PostStartup, attach_demo_body)
            .add_systems(
                Update,
                (
                    advance_script.before(apply_control_input),
                    interpolate_bodies,
                ),
            )
            .add_systems(FixedUpdate, integrate_bodies.before(emit_contact_events));
    }
}
