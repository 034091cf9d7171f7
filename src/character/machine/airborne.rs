//! Character domain: the airborne root and the states entered from it.

use bevy::prelude::*;

use super::behavior::{
    RootRule, StateBehavior, StateDescriptor, StateKind, SubstateAction, SubstateRule,
};
use super::grounded::launch;
use crate::character::context::CharacterContext;
use crate::character::input::eight_way;

fn grounded(ctx: &CharacterContext) -> bool {
    ctx.grounded
}

fn wall_reached(ctx: &CharacterContext) -> bool {
    ctx.on_wall && ctx.can_wall_cling
}

fn dive_requested(ctx: &CharacterContext) -> bool {
    ctx.did_dive
}

fn dash_requested(ctx: &CharacterContext) -> bool {
    ctx.did_dash
}

fn dash_active(ctx: &CharacterContext) -> bool {
    ctx.is_dashing
}

fn jump_requested(ctx: &CharacterContext) -> bool {
    ctx.did_jump && ctx.current_jumps < ctx.tuning.max_jumps
}

fn falling(ctx: &CharacterContext) -> bool {
    !ctx.is_jumping || ctx.velocity.y >= 0.0
}

static AIRBORNE_ROOT_RULES: &[RootRule] = &[
    RootRule {
        when: grounded,
        to: StateKind::Grounded,
    },
    RootRule {
        when: wall_reached,
        to: StateKind::WallCling,
    },
];

static AIRBORNE_SUBSTATE_RULES: &[SubstateRule] = &[
    SubstateRule {
        when: dive_requested,
        then: SubstateAction::Enter(StateKind::Dive),
    },
    SubstateRule {
        when: dash_requested,
        then: SubstateAction::Enter(StateKind::Dash),
    },
    SubstateRule {
        when: dash_active,
        then: SubstateAction::Hold,
    },
    SubstateRule {
        when: jump_requested,
        then: SubstateAction::Enter(StateKind::DoubleJump),
    },
    SubstateRule {
        when: falling,
        then: SubstateAction::Enter(StateKind::Fall),
    },
];

/// Root: off the ground. Applies baseline gravity unless a dash owns the
/// velocity this tick.
pub(super) struct AirborneState;

impl StateBehavior for AirborneState {
    fn kind(&self) -> StateKind {
        StateKind::Airborne
    }

    fn descriptor(&self) -> StateDescriptor {
        StateDescriptor {
            root_capable: true,
            ..Default::default()
        }
    }

    fn velocity_x(&self, ctx: &mut CharacterContext, vel: &mut Vec2) {
        let acceleration = ctx.tuning.air_acceleration;
        let deceleration = ctx.tuning.air_deceleration;
        ctx.approach_horizontal(vel, acceleration, deceleration);
    }

    fn velocity_y(&self, ctx: &mut CharacterContext, vel: &mut Vec2, dt: f32) {
        if ctx.is_dashing {
            return;
        }
        ctx.apply_gravity(vel, dt, 1.0);
    }

    fn root_rules(&self) -> &'static [RootRule] {
        AIRBORNE_ROOT_RULES
    }

    fn substate_rules(&self) -> &'static [SubstateRule] {
        AIRBORNE_SUBSTATE_RULES
    }
}

/// Airborne without an upward jump impulse carrying the character; gravity
/// runs heavier here.
pub(super) struct FallState;

impl StateBehavior for FallState {
    fn kind(&self) -> StateKind {
        StateKind::Fall
    }

    fn descriptor(&self) -> StateDescriptor {
        StateDescriptor {
            airborne_substate: true,
            ..Default::default()
        }
    }

    fn velocity_y(&self, ctx: &mut CharacterContext, vel: &mut Vec2, dt: f32) {
        let multiplier = ctx.tuning.fall_speed_multiplier;
        ctx.apply_gravity(vel, dt, multiplier);
    }
}

/// Mid-air jump, identical to the grounded launch.
pub(super) struct DoubleJumpState;

impl StateBehavior for DoubleJumpState {
    fn kind(&self) -> StateKind {
        StateKind::DoubleJump
    }

    fn descriptor(&self) -> StateDescriptor {
        StateDescriptor::default()
    }

    fn on_enter(&self, ctx: &mut CharacterContext) {
        let impulse = Vec2::new(0.0, ctx.constants.jump_velocity);
        launch(ctx, impulse);
    }
}

/// Mid-air dash along one of eight headings.
pub(super) struct DashState;

impl StateBehavior for DashState {
    fn kind(&self) -> StateKind {
        StateKind::Dash
    }

    fn descriptor(&self) -> StateDescriptor {
        StateDescriptor::default()
    }

    fn on_enter(&self, ctx: &mut CharacterContext) {
        ctx.cancel_velocity(true);
        ctx.is_dashing = true;
        ctx.did_dash = false;
        let impulse = eight_way(ctx.move_input) * ctx.constants.dash_force;
        ctx.add_impulse(impulse);
    }
}

/// Fast downward burst; horizontal momentum carries through.
pub(super) struct DiveState;

impl StateBehavior for DiveState {
    fn kind(&self) -> StateKind {
        StateKind::Dive
    }

    fn descriptor(&self) -> StateDescriptor {
        StateDescriptor::default()
    }

    fn on_enter(&self, ctx: &mut CharacterContext) {
        ctx.cancel_velocity(false);
        ctx.did_dive = false;
        let impulse = Vec2::new(0.0, ctx.constants.dash_force * 2.0);
        ctx.add_impulse(impulse);
    }
}
