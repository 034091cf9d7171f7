//! Character domain: control intent fed in by the host and the request
//! flags derived from it.

use bevy::prelude::*;

use super::context::{sign, CharacterContext};

const HEADING_DEADZONE: f32 = 0.5;

/// Host-supplied control sample for the current frame. The host owns edge
/// detection; the pressed/released fields are single-frame pulses.
#[derive(Resource, Debug, Clone, Default)]
pub struct ControlInput {
    pub axis: Vec2,
    pub run_held: bool,
    pub jump_pressed: bool,
    pub jump_released: bool,
    pub dash_pressed: bool,
    pub dive_pressed: bool,
}

/// Fold one control sample into a context's request flags.
///
/// Requests that cannot possibly be honored are dropped at the source: a
/// jump press past the jump budget, a dash without an axis or on top of an
/// active dash, a dive on the ground. Releasing jump clears the pending
/// request and ends the ascent early.
pub(crate) fn derive_intent(ctx: &mut CharacterContext, input: &ControlInput) {
    ctx.move_input = input.axis;
    ctx.direction_x = sign(input.axis.x);
    ctx.is_run_pressed = input.run_held;

    if input.jump_pressed && ctx.current_jumps < ctx.tuning.max_jumps {
        ctx.did_jump = true;
    }
    if input.jump_released {
        ctx.did_jump = false;
        ctx.is_jumping = false;
    }
    if input.dash_pressed && input.axis != Vec2::ZERO && !ctx.did_dash && !ctx.is_dashing {
        ctx.arm_dash();
    }
    if input.dive_pressed && !ctx.did_dive && !ctx.grounded {
        ctx.did_dive = true;
    }
}

/// Snap an axis sample to one of eight unit headings. A component counts
/// once it clears the deadzone; the snapped vector is normalized so
/// diagonal bursts cover the same distance as cardinal ones.
pub(crate) fn eight_way(axis: Vec2) -> Vec2 {
    let snapped = Vec2::new(snap(axis.x), snap(axis.y));
    snapped.normalize_or_zero()
}

fn snap(component: f32) -> f32 {
    if component > HEADING_DEADZONE {
        1.0
    } else if component < -HEADING_DEADZONE {
        -1.0
    } else {
        0.0
    }
}

/// Applies the frame's control sample to every character.
pub(crate) fn apply_control_input(
    input: Res<ControlInput>,
    mut query: Query<&mut CharacterContext>,
) {
    for mut ctx in &mut query {
        derive_intent(&mut ctx, &input);
    }
}
