//! Character domain: the grounded root and the states entered from it.

use bevy::prelude::*;

use super::behavior::{
    CheckOrder, RootRule, StateBehavior, StateDescriptor, StateKind, SubstateAction, SubstateRule,
};
use crate::character::context::CharacterContext;

fn airborne_wanted(ctx: &CharacterContext) -> bool {
    !ctx.grounded
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

fn standing(ctx: &CharacterContext) -> bool {
    !ctx.is_jumping && ctx.velocity.x == 0.0
}

fn running(ctx: &CharacterContext) -> bool {
    !ctx.is_jumping && ctx.velocity.x != 0.0 && ctx.is_run_pressed
}

fn walking(ctx: &CharacterContext) -> bool {
    !ctx.is_jumping && ctx.velocity.x != 0.0
}

static GROUNDED_ROOT_RULES: &[RootRule] = &[RootRule {
    when: airborne_wanted,
    to: StateKind::Airborne,
}];

static GROUNDED_SUBSTATE_RULES: &[SubstateRule] = &[
    SubstateRule {
        when: dash_requested,
        then: SubstateAction::Enter(StateKind::Slide),
    },
    SubstateRule {
        when: dash_active,
        then: SubstateAction::Hold,
    },
    SubstateRule {
        when: jump_requested,
        then: SubstateAction::Enter(StateKind::Jump),
    },
    SubstateRule {
        when: standing,
        then: SubstateAction::Enter(StateKind::Idle),
    },
    SubstateRule {
        when: running,
        then: SubstateAction::Enter(StateKind::Run),
    },
    SubstateRule {
        when: walking,
        then: SubstateAction::Enter(StateKind::Walk),
    },
];

/// Root: supported by solid ground. Entry restores the jump and wall cling
/// budgets and cuts any active dash short.
pub(super) struct GroundedState;

impl StateBehavior for GroundedState {
    fn kind(&self) -> StateKind {
        StateKind::Grounded
    }

    fn descriptor(&self) -> StateDescriptor {
        StateDescriptor {
            root_capable: true,
            ..Default::default()
        }
    }

    fn on_enter(&self, ctx: &mut CharacterContext) {
        ctx.current_jumps = 0;
        ctx.can_wall_cling = true;
        if ctx.is_dashing {
            ctx.reset_dash();
        }
    }

    fn velocity_x(&self, ctx: &mut CharacterContext, vel: &mut Vec2) {
        let acceleration = ctx.tuning.acceleration;
        let deceleration = ctx.tuning.deceleration;
        ctx.approach_horizontal(vel, acceleration, deceleration);
    }

    fn root_rules(&self) -> &'static [RootRule] {
        GROUNDED_ROOT_RULES
    }

    fn substate_rules(&self) -> &'static [SubstateRule] {
        GROUNDED_SUBSTATE_RULES
    }

    fn check_order(&self) -> CheckOrder {
        CheckOrder::RootFirst
    }
}

/// Standing still.
pub(super) struct IdleState;

impl StateBehavior for IdleState {
    fn kind(&self) -> StateKind {
        StateKind::Idle
    }

    fn descriptor(&self) -> StateDescriptor {
        StateDescriptor {
            grounded_substate: true,
            ..Default::default()
        }
    }
}

/// Moving along the ground at walk speed.
pub(super) struct WalkState;

impl StateBehavior for WalkState {
    fn kind(&self) -> StateKind {
        StateKind::Walk
    }

    fn descriptor(&self) -> StateDescriptor {
        StateDescriptor {
            grounded_substate: true,
            ..Default::default()
        }
    }
}

/// Moving along the ground with the run button held.
pub(super) struct RunState;

impl StateBehavior for RunState {
    fn kind(&self) -> StateKind {
        StateKind::Run
    }

    fn descriptor(&self) -> StateDescriptor {
        StateDescriptor {
            grounded_substate: true,
            ..Default::default()
        }
    }
}

/// Initial jump, entered from the ground.
pub(super) struct JumpState;

impl StateBehavior for JumpState {
    fn kind(&self) -> StateKind {
        StateKind::Jump
    }

    fn descriptor(&self) -> StateDescriptor {
        StateDescriptor::default()
    }

    fn on_enter(&self, ctx: &mut CharacterContext) {
        let impulse = Vec2::new(0.0, ctx.constants.jump_velocity);
        launch(ctx, impulse);
    }
}

/// Dash performed while grounded: a flat burst along the input direction.
pub(super) struct SlideState;

impl StateBehavior for SlideState {
    fn kind(&self) -> StateKind {
        StateKind::Slide
    }

    fn descriptor(&self) -> StateDescriptor {
        StateDescriptor::default()
    }

    fn on_enter(&self, ctx: &mut CharacterContext) {
        ctx.cancel_velocity(true);
        ctx.is_dashing = true;
        ctx.did_dash = false;
        let impulse = Vec2::new(ctx.direction_x * ctx.constants.dash_force, 0.0);
        ctx.add_impulse(impulse);
    }
}

/// Shared jump entry: cancel vertical motion, start the apex countdown,
/// consume the request, spend a jump, apply the impulse.
pub(super) fn launch(ctx: &mut CharacterContext, impulse: Vec2) {
    ctx.cancel_velocity(false);
    ctx.jump_timer = ctx.tuning.time_to_jump_apex;
    ctx.is_jumping = true;
    ctx.current_jumps += 1;
    ctx.did_jump = false;
    ctx.add_impulse(impulse);
}
