//! Character domain: the wall cling root and the wall jump.

use bevy::prelude::*;

use super::behavior::{
    RootRule, StateBehavior, StateDescriptor, StateKind, SubstateAction, SubstateRule,
};
use super::grounded::launch;
use crate::character::context::CharacterContext;

fn grounded(ctx: &CharacterContext) -> bool {
    ctx.grounded
}

fn off_wall(ctx: &CharacterContext) -> bool {
    !ctx.on_wall
}

fn jump_requested(ctx: &CharacterContext) -> bool {
    ctx.did_jump && ctx.current_jumps < ctx.tuning.max_jumps
}

static WALL_CLING_ROOT_RULES: &[RootRule] = &[
    RootRule {
        when: grounded,
        to: StateKind::Grounded,
    },
    RootRule {
        when: off_wall,
        to: StateKind::Airborne,
    },
];

static WALL_CLING_SUBSTATE_RULES: &[SubstateRule] = &[SubstateRule {
    when: jump_requested,
    then: SubstateAction::Enter(StateKind::WallJump),
}];

/// Root: hanging on a wall. Entry restores the jump budget, arms the
/// one-shot vertical cancel, starts the cling countdown, and captures the
/// contact normal for the rest of the activation. No initial sub-state is
/// installed.
///
/// While the countdown runs, the horizontal law pins the character into the
/// wall; once it expires, it pushes away along the normal and the cling
/// ability stays spent until the next landing.
pub(super) struct WallClingState;

impl StateBehavior for WallClingState {
    fn kind(&self) -> StateKind {
        StateKind::WallCling
    }

    fn descriptor(&self) -> StateDescriptor {
        StateDescriptor {
            root_capable: true,
            ..Default::default()
        }
    }

    fn on_enter(&self, ctx: &mut CharacterContext) {
        ctx.current_jumps = 0;
        if ctx.is_dashing {
            ctx.reset_dash();
        }
        ctx.wall_cling.timer = ctx.tuning.wall_cling_time;
        ctx.wall_cling.cancel_y_armed = true;
        ctx.wall_cling.did_wall_jump = false;
        ctx.wall_cling.wall_normal = ctx.wall_normal();
    }

    fn velocity_x(&self, ctx: &mut CharacterContext, vel: &mut Vec2) {
        if ctx.wall_cling.did_wall_jump {
            return;
        }
        if ctx.wall_cling.timer > 0.0 {
            vel.x = -ctx.wall_cling.wall_normal.x;
        } else {
            ctx.can_wall_cling = false;
            vel.x = ctx.wall_cling.wall_normal.x;
        }
    }

    fn velocity_y(&self, ctx: &mut CharacterContext, vel: &mut Vec2, dt: f32) {
        if ctx.wall_cling.cancel_y_armed {
            vel.y = 0.0;
            ctx.wall_cling.cancel_y_armed = false;
        }
        let modifier = ctx.tuning.wall_cling_gravity_modifier;
        ctx.apply_gravity(vel, dt, modifier);
        ctx.wall_cling.timer -= dt;
    }

    fn root_rules(&self) -> &'static [RootRule] {
        WALL_CLING_ROOT_RULES
    }

    fn substate_rules(&self) -> &'static [SubstateRule] {
        WALL_CLING_SUBSTATE_RULES
    }

    // clinging forbids dashing
    fn after_substate_rules(&self, ctx: &mut CharacterContext) {
        if ctx.did_dash {
            ctx.did_dash = false;
            ctx.reset_dash();
        }
    }

    fn initial_substate_rules(&self) -> &'static [SubstateRule] {
        &[]
    }
}

/// Jump off a wall: the usual launch plus a horizontal kick away from the
/// captured normal.
pub(super) struct WallJumpState;

impl StateBehavior for WallJumpState {
    fn kind(&self) -> StateKind {
        StateKind::WallJump
    }

    fn descriptor(&self) -> StateDescriptor {
        StateDescriptor::default()
    }

    fn on_enter(&self, ctx: &mut CharacterContext) {
        ctx.wall_cling.did_wall_jump = true;
        // fresh read: the wall under the character now, not the one the
        // cling record captured
        let normal = ctx.wall_normal();
        let impulse = Vec2::new(
            ctx.constants.jump_velocity * -normal.x,
            ctx.constants.jump_velocity,
        );
        launch(ctx, impulse);
    }
}
