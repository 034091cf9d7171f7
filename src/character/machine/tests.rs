//! Machine tests: registry coverage, rule tables, chain maintenance, and
//! the per-root transition semantics.

use bevy::prelude::Vec2;

use super::{
    ActiveChain, CheckOrder, Machine, MachineError, StateEvent, StateKind, StateRegistry,
    SubstateAction,
};
use crate::character::context::{CharacterContext, MovementTuning};

fn registry() -> StateRegistry {
    StateRegistry::build().unwrap()
}

fn context() -> CharacterContext {
    CharacterContext::new(MovementTuning::default())
}

fn install(
    registry: &StateRegistry,
    chain: &mut ActiveChain,
    ctx: &mut CharacterContext,
    events: &mut Vec<StateEvent>,
    root: StateKind,
) {
    Machine::new(registry, chain, ctx, events).install_root(root);
}

fn step(
    registry: &StateRegistry,
    chain: &mut ActiveChain,
    ctx: &mut CharacterContext,
    events: &mut Vec<StateEvent>,
    dt: f32,
) {
    Machine::new(registry, chain, ctx, events).update(dt);
}

fn assert_single_root(registry: &StateRegistry, chain: &ActiveChain) {
    let nodes = chain.nodes();
    assert!(!nodes.is_empty());
    assert!(registry.behavior(nodes[0]).descriptor().root_capable);
    for kind in &nodes[1..] {
        assert!(!registry.behavior(*kind).descriptor().root_capable);
    }
}

// -----------------------------------------------------------------------------
// Registry tests
// -----------------------------------------------------------------------------

#[test]
fn test_registry_covers_every_kind() {
    let registry = registry();
    assert_eq!(registry.len(), StateKind::ALL.len());
    for kind in StateKind::ALL {
        assert_eq!(registry.behavior(kind).kind(), kind);
    }
}

#[test]
fn test_registry_descriptors() {
    let registry = registry();
    for kind in [StateKind::Grounded, StateKind::Airborne, StateKind::WallCling] {
        assert!(registry.behavior(kind).descriptor().root_capable);
    }
    for kind in [StateKind::Idle, StateKind::Walk, StateKind::Run] {
        let descriptor = registry.behavior(kind).descriptor();
        assert!(descriptor.grounded_substate);
        assert!(!descriptor.root_capable);
    }
    let fall = registry.behavior(StateKind::Fall).descriptor();
    assert!(fall.airborne_substate);
    assert!(!fall.root_capable);
    for kind in [
        StateKind::Jump,
        StateKind::DoubleJump,
        StateKind::WallJump,
        StateKind::Dash,
        StateKind::Dive,
        StateKind::Slide,
    ] {
        let descriptor = registry.behavior(kind).descriptor();
        assert!(!descriptor.root_capable);
        assert!(!descriptor.grounded_substate);
        assert!(!descriptor.airborne_substate);
    }
}

#[test]
fn test_registry_summary_counts() {
    let registry = registry();
    let summary = registry.summary();
    assert!(summary.contains("13"));
    assert!(summary.contains("3 root-capable"));
}

#[test]
fn test_missing_state_error_display() {
    let err = MachineError::MissingState(vec![StateKind::Idle]);
    assert!(format!("{err}").contains("Idle"));
}

// -----------------------------------------------------------------------------
// Rule table tests
// -----------------------------------------------------------------------------

#[test]
fn test_grounded_substate_rule_order() {
    let registry = registry();
    let actions: Vec<SubstateAction> = registry
        .behavior(StateKind::Grounded)
        .substate_rules()
        .iter()
        .map(|rule| rule.then)
        .collect();
    assert_eq!(
        actions,
        vec![
            SubstateAction::Enter(StateKind::Slide),
            SubstateAction::Hold,
            SubstateAction::Enter(StateKind::Jump),
            SubstateAction::Enter(StateKind::Idle),
            SubstateAction::Enter(StateKind::Run),
            SubstateAction::Enter(StateKind::Walk),
        ]
    );
}

#[test]
fn test_airborne_substate_rule_order() {
    let registry = registry();
    let actions: Vec<SubstateAction> = registry
        .behavior(StateKind::Airborne)
        .substate_rules()
        .iter()
        .map(|rule| rule.then)
        .collect();
    assert_eq!(
        actions,
        vec![
            SubstateAction::Enter(StateKind::Dive),
            SubstateAction::Enter(StateKind::Dash),
            SubstateAction::Hold,
            SubstateAction::Enter(StateKind::DoubleJump),
            SubstateAction::Enter(StateKind::Fall),
        ]
    );
}

#[test]
fn test_root_rule_targets() {
    let registry = registry();
    let targets = |kind: StateKind| -> Vec<StateKind> {
        registry
            .behavior(kind)
            .root_rules()
            .iter()
            .map(|rule| rule.to)
            .collect()
    };
    assert_eq!(targets(StateKind::Grounded), vec![StateKind::Airborne]);
    assert_eq!(
        targets(StateKind::Airborne),
        vec![StateKind::Grounded, StateKind::WallCling]
    );
    assert_eq!(
        targets(StateKind::WallCling),
        vec![StateKind::Grounded, StateKind::Airborne]
    );
}

#[test]
fn test_check_orders() {
    let registry = registry();
    assert_eq!(
        registry.behavior(StateKind::Grounded).check_order(),
        CheckOrder::RootFirst
    );
    assert_eq!(
        registry.behavior(StateKind::Airborne).check_order(),
        CheckOrder::SubstatesFirst
    );
    assert_eq!(
        registry.behavior(StateKind::WallCling).check_order(),
        CheckOrder::SubstatesFirst
    );
}

#[test]
fn test_wall_cling_installs_no_initial_substate() {
    let registry = registry();
    assert!(registry
        .behavior(StateKind::WallCling)
        .initial_substate_rules()
        .is_empty());
    assert!(!registry
        .behavior(StateKind::Grounded)
        .initial_substate_rules()
        .is_empty());
    assert!(!registry
        .behavior(StateKind::Airborne)
        .initial_substate_rules()
        .is_empty());
}

// -----------------------------------------------------------------------------
// Bootstrap tests
// -----------------------------------------------------------------------------

#[test]
fn test_install_starts_airborne_falling() {
    let registry = registry();
    let mut chain = ActiveChain::default();
    let mut ctx = context();
    let mut events = Vec::new();

    install(
        &registry,
        &mut chain,
        &mut ctx,
        &mut events,
        StateKind::Airborne,
    );

    assert_eq!(chain.nodes(), &[StateKind::Airborne, StateKind::Fall]);
    assert_eq!(
        events,
        vec![
            StateEvent::Entered(StateKind::Airborne),
            StateEvent::Entered(StateKind::Fall),
        ]
    );
}

// -----------------------------------------------------------------------------
// Grounded selection tests
// -----------------------------------------------------------------------------

#[test]
fn test_idle_walk_run_cycle() {
    let registry = registry();
    let mut chain = ActiveChain::default();
    let mut ctx = context();
    let mut events = Vec::new();
    ctx.grounded = true;
    install(
        &registry,
        &mut chain,
        &mut ctx,
        &mut events,
        StateKind::Grounded,
    );
    assert_eq!(chain.nodes(), &[StateKind::Grounded, StateKind::Idle]);

    ctx.direction_x = 1.0;
    step(&registry, &mut chain, &mut ctx, &mut events, 0.125);
    assert_eq!(chain.nodes(), &[StateKind::Grounded, StateKind::Walk]);
    assert_eq!(ctx.velocity.x, 10.0);

    ctx.is_run_pressed = true;
    step(&registry, &mut chain, &mut ctx, &mut events, 0.125);
    assert_eq!(chain.nodes(), &[StateKind::Grounded, StateKind::Run]);
    assert_eq!(ctx.velocity.x, 20.0);

    ctx.direction_x = 0.0;
    ctx.is_run_pressed = false;
    step(&registry, &mut chain, &mut ctx, &mut events, 0.125);
    assert_eq!(chain.nodes(), &[StateKind::Grounded, StateKind::Walk]);
    assert_eq!(ctx.velocity.x, 10.0);
    step(&registry, &mut chain, &mut ctx, &mut events, 0.125);
    assert_eq!(chain.nodes(), &[StateKind::Grounded, StateKind::Idle]);
    assert_eq!(ctx.velocity.x, 0.0);

    assert_single_root(&registry, &chain);
}

#[test]
fn test_grounded_jump_launches() {
    let registry = registry();
    let mut chain = ActiveChain::default();
    let mut ctx = context();
    let mut events = Vec::new();
    ctx.grounded = true;
    install(
        &registry,
        &mut chain,
        &mut ctx,
        &mut events,
        StateKind::Grounded,
    );
    events.clear();

    ctx.did_jump = true;
    step(&registry, &mut chain, &mut ctx, &mut events, 0.016);

    assert_eq!(chain.nodes(), &[StateKind::Grounded, StateKind::Jump]);
    assert_eq!(
        events,
        vec![
            StateEvent::Exited(StateKind::Idle),
            StateEvent::Entered(StateKind::Jump),
        ]
    );
    assert_eq!(ctx.velocity.y, ctx.constants.jump_velocity);
    assert_eq!(ctx.velocity.y, -256.0);
    assert!(ctx.is_jumping);
    assert!(!ctx.did_jump);
    assert_eq!(ctx.current_jumps, 1);
    assert_eq!(ctx.jump_timer, ctx.tuning.time_to_jump_apex);
}

#[test]
fn test_slide_burst_is_exactly_dash_force() {
    let registry = registry();
    let mut chain = ActiveChain::default();
    let mut ctx = context();
    let mut events = Vec::new();
    ctx.grounded = true;
    install(
        &registry,
        &mut chain,
        &mut ctx,
        &mut events,
        StateKind::Grounded,
    );

    ctx.direction_x = 1.0;
    ctx.did_dash = true;
    step(&registry, &mut chain, &mut ctx, &mut events, 0.125);

    assert_eq!(chain.nodes(), &[StateKind::Grounded, StateKind::Slide]);
    assert_eq!(ctx.velocity, Vec2::new(512.0, 0.0));
    assert!(ctx.is_dashing);
    assert!(!ctx.did_dash);

    // the hold rule keeps the slide alive and the approach law stays out
    step(&registry, &mut chain, &mut ctx, &mut events, 0.125);
    assert_eq!(chain.nodes(), &[StateKind::Grounded, StateKind::Slide]);
    assert_eq!(ctx.velocity, Vec2::new(512.0, 0.0));
}

#[test]
fn test_buffered_jump_on_landing_spends_fresh_budget() {
    let registry = registry();
    let mut chain = ActiveChain::default();
    let mut ctx = context();
    let mut events = Vec::new();
    install(
        &registry,
        &mut chain,
        &mut ctx,
        &mut events,
        StateKind::Airborne,
    );

    ctx.current_jumps = 2;
    ctx.did_jump = true;
    ctx.grounded = true;
    step(&registry, &mut chain, &mut ctx, &mut events, 0.016);

    assert_eq!(chain.nodes(), &[StateKind::Grounded, StateKind::Jump]);
    assert_eq!(ctx.current_jumps, 1);
    assert_eq!(ctx.velocity.y, -256.0);
}

#[test]
fn test_reselecting_active_substate_is_silent() {
    let registry = registry();
    let mut chain = ActiveChain::default();
    let mut ctx = context();
    let mut events = Vec::new();
    ctx.grounded = true;
    install(
        &registry,
        &mut chain,
        &mut ctx,
        &mut events,
        StateKind::Grounded,
    );
    events.clear();

    step(&registry, &mut chain, &mut ctx, &mut events, 0.125);
    step(&registry, &mut chain, &mut ctx, &mut events, 0.125);

    assert_eq!(chain.nodes(), &[StateKind::Grounded, StateKind::Idle]);
    assert!(events.is_empty());
}

// -----------------------------------------------------------------------------
// Airborne tests
// -----------------------------------------------------------------------------

#[test]
fn test_airborne_and_fall_gravity_stack() {
    let registry = registry();
    let mut chain = ActiveChain::default();
    let mut ctx = context();
    let mut events = Vec::new();
    install(
        &registry,
        &mut chain,
        &mut ctx,
        &mut events,
        StateKind::Airborne,
    );

    step(&registry, &mut chain, &mut ctx, &mut events, 0.25);

    // root integrates at 1x from rest (avg 128), the fall sub at 2x on top
    assert_eq!(ctx.velocity.y, 384.0);
}

#[test]
fn test_dash_holds_substate_and_skips_gravity() {
    let registry = registry();
    let mut chain = ActiveChain::default();
    let mut ctx = context();
    let mut events = Vec::new();
    install(
        &registry,
        &mut chain,
        &mut ctx,
        &mut events,
        StateKind::Airborne,
    );

    ctx.move_input = Vec2::new(1.0, 0.0);
    ctx.did_dash = true;
    ctx.is_dashing = true;
    step(&registry, &mut chain, &mut ctx, &mut events, 0.25);

    assert_eq!(chain.nodes(), &[StateKind::Airborne, StateKind::Dash]);
    assert_eq!(ctx.velocity, Vec2::new(512.0, 0.0));
    assert!(!ctx.did_dash);

    step(&registry, &mut chain, &mut ctx, &mut events, 0.25);
    assert_eq!(chain.nodes(), &[StateKind::Airborne, StateKind::Dash]);
    assert_eq!(ctx.velocity, Vec2::new(512.0, 0.0));
}

#[test]
fn test_diagonal_dash_covers_same_distance() {
    let registry = registry();
    let mut chain = ActiveChain::default();
    let mut ctx = context();
    let mut events = Vec::new();
    install(
        &registry,
        &mut chain,
        &mut ctx,
        &mut events,
        StateKind::Airborne,
    );

    ctx.move_input = Vec2::new(0.8, -0.9);
    ctx.did_dash = true;
    ctx.is_dashing = true;
    step(&registry, &mut chain, &mut ctx, &mut events, 0.25);

    assert_eq!(chain.nodes(), &[StateKind::Airborne, StateKind::Dash]);
    let speed = ctx.velocity.length();
    assert!((speed - 512.0).abs() < 1e-3);
    assert!(ctx.velocity.x > 0.0);
    assert!(ctx.velocity.y < 0.0);
}

#[test]
fn test_dive_beats_dash_and_jump_requests() {
    let registry = registry();
    let mut chain = ActiveChain::default();
    let mut ctx = context();
    let mut events = Vec::new();
    install(
        &registry,
        &mut chain,
        &mut ctx,
        &mut events,
        StateKind::Airborne,
    );

    ctx.did_dive = true;
    ctx.did_dash = true;
    ctx.did_jump = true;
    step(&registry, &mut chain, &mut ctx, &mut events, 0.016);

    assert_eq!(chain.nodes(), &[StateKind::Airborne, StateKind::Dive]);
    assert!(!ctx.did_dive);
    // dive cancels vertical motion before the downward burst
    assert_eq!(ctx.velocity.y, 1024.0);
    assert_eq!(ctx.velocity.x, 0.0);
}

#[test]
fn test_double_jump_consumes_remaining_budget() {
    let registry = registry();
    let mut chain = ActiveChain::default();
    let mut ctx = context();
    let mut events = Vec::new();
    install(
        &registry,
        &mut chain,
        &mut ctx,
        &mut events,
        StateKind::Airborne,
    );

    ctx.current_jumps = 1;
    ctx.did_jump = true;
    step(&registry, &mut chain, &mut ctx, &mut events, 0.016);

    assert_eq!(chain.nodes(), &[StateKind::Airborne, StateKind::DoubleJump]);
    assert_eq!(ctx.current_jumps, 2);
    assert_eq!(ctx.velocity.y, -256.0);
    assert!(!ctx.did_jump);

    // a third request is refused by the budget guard
    ctx.did_jump = true;
    step(&registry, &mut chain, &mut ctx, &mut events, 0.016);
    assert_eq!(chain.nodes(), &[StateKind::Airborne, StateKind::DoubleJump]);
    assert_eq!(ctx.current_jumps, 2);
}

#[test]
fn test_jump_chain_from_ground_to_spent_budget() {
    let registry = registry();
    let mut chain = ActiveChain::default();
    let mut ctx = context();
    let mut events = Vec::new();
    ctx.grounded = true;
    install(
        &registry,
        &mut chain,
        &mut ctx,
        &mut events,
        StateKind::Grounded,
    );

    ctx.did_jump = true;
    step(&registry, &mut chain, &mut ctx, &mut events, 0.016);
    assert_eq!(chain.nodes(), &[StateKind::Grounded, StateKind::Jump]);
    assert_eq!(ctx.current_jumps, 1);
    assert_eq!(ctx.velocity.y, -256.0);

    // leaving the ground swaps the root; still ascending, so no sub-state
    ctx.grounded = false;
    events.clear();
    step(&registry, &mut chain, &mut ctx, &mut events, 0.016);
    assert_eq!(chain.nodes(), &[StateKind::Airborne]);
    assert_eq!(
        events,
        vec![
            StateEvent::Exited(StateKind::Jump),
            StateEvent::Exited(StateKind::Grounded),
            StateEvent::Entered(StateKind::Airborne),
        ]
    );

    ctx.did_jump = true;
    step(&registry, &mut chain, &mut ctx, &mut events, 0.016);
    assert_eq!(chain.nodes(), &[StateKind::Airborne, StateKind::DoubleJump]);
    assert_eq!(ctx.current_jumps, 2);
    assert_eq!(ctx.velocity.y, -256.0);

    ctx.did_jump = true;
    step(&registry, &mut chain, &mut ctx, &mut events, 0.016);
    assert_eq!(chain.nodes(), &[StateKind::Airborne, StateKind::DoubleJump]);
    assert_eq!(ctx.current_jumps, 2);
}

#[test]
fn test_fall_selected_at_apex() {
    let registry = registry();
    let mut chain = ActiveChain::default();
    let mut ctx = context();
    let mut events = Vec::new();
    ctx.is_jumping = true;
    ctx.velocity.y = -10.0;
    install(
        &registry,
        &mut chain,
        &mut ctx,
        &mut events,
        StateKind::Airborne,
    );
    // still ascending with an active jump: no sub-state yet
    assert_eq!(chain.nodes(), &[StateKind::Airborne]);

    // vertical velocity crossing into non-negative picks Fall
    ctx.velocity.y = 0.0;
    step(&registry, &mut chain, &mut ctx, &mut events, 0.0);
    assert!(chain.is_active(StateKind::Fall));
    assert_single_root(&registry, &chain);
}

// -----------------------------------------------------------------------------
// Wall cling tests
// -----------------------------------------------------------------------------

fn clinging_context() -> (StateRegistry, ActiveChain, CharacterContext, Vec<StateEvent>) {
    let registry = registry();
    let mut chain = ActiveChain::default();
    let mut ctx = context();
    let mut events = Vec::new();
    ctx.current_jumps = 2;
    ctx.on_wall = true;
    ctx.wall_normals = vec![Vec2::new(-1.0, 0.0)];
    install(
        &registry,
        &mut chain,
        &mut ctx,
        &mut events,
        StateKind::Airborne,
    );
    step(&registry, &mut chain, &mut ctx, &mut events, 0.016);
    (registry, chain, ctx, events)
}

#[test]
fn test_wall_cling_entry_record() {
    let (_, chain, ctx, events) = clinging_context();

    assert_eq!(chain.nodes(), &[StateKind::WallCling]);
    assert_eq!(ctx.current_jumps, 0);
    assert_eq!(ctx.wall_cling.timer, 0.5);
    assert!(ctx.wall_cling.cancel_y_armed);
    assert_eq!(ctx.wall_cling.wall_normal, Vec2::new(-1.0, 0.0));
    assert!(events.contains(&StateEvent::Exited(StateKind::Fall)));
    assert!(events.contains(&StateEvent::Exited(StateKind::Airborne)));
    assert!(events.contains(&StateEvent::Entered(StateKind::WallCling)));
}

#[test]
fn test_wall_cling_pins_then_pushes_away() {
    let (registry, mut chain, mut ctx, mut events) = clinging_context();
    ctx.velocity = Vec2::new(30.0, 40.0);

    step(&registry, &mut chain, &mut ctx, &mut events, 0.125);
    // pinned into the wall, residual vertical motion canceled once
    assert_eq!(ctx.velocity.x, 1.0);
    assert_eq!(ctx.velocity.y, 12.8);
    assert!(!ctx.wall_cling.cancel_y_armed);
    assert_eq!(ctx.wall_cling.timer, 0.375);

    for _ in 0..3 {
        step(&registry, &mut chain, &mut ctx, &mut events, 0.125);
    }
    assert_eq!(ctx.wall_cling.timer, 0.0);
    assert!(ctx.can_wall_cling);

    // countdown spent: the law flips to pushing off the wall
    step(&registry, &mut chain, &mut ctx, &mut events, 0.125);
    assert_eq!(ctx.velocity.x, -1.0);
    assert!(!ctx.can_wall_cling);

    // losing the wall drops back to airborne, landing re-arms the cling
    ctx.on_wall = false;
    step(&registry, &mut chain, &mut ctx, &mut events, 0.125);
    assert_eq!(chain.root(), Some(StateKind::Airborne));
    ctx.grounded = true;
    step(&registry, &mut chain, &mut ctx, &mut events, 0.125);
    assert_eq!(chain.root(), Some(StateKind::Grounded));
    assert!(ctx.can_wall_cling);
}

#[test]
fn test_wall_jump_kicks_away_from_wall() {
    let (registry, mut chain, mut ctx, mut events) = clinging_context();

    ctx.did_jump = true;
    step(&registry, &mut chain, &mut ctx, &mut events, 0.125);

    assert_eq!(chain.nodes(), &[StateKind::WallCling, StateKind::WallJump]);
    // pin put 1 unit/s toward the wall, the kick adds -256 away from it
    assert_eq!(ctx.velocity, Vec2::new(-255.0, -256.0));
    assert!(ctx.wall_cling.did_wall_jump);
    assert_eq!(ctx.current_jumps, 1);
    assert!(ctx.is_jumping);

    // the pin stays released for the rest of the activation
    step(&registry, &mut chain, &mut ctx, &mut events, 0.125);
    assert_eq!(ctx.velocity.x, -255.0);
}

#[test]
fn test_wall_cling_rejects_dash() {
    let (registry, mut chain, mut ctx, mut events) = clinging_context();

    ctx.did_dash = true;
    ctx.is_dashing = true;
    step(&registry, &mut chain, &mut ctx, &mut events, 0.125);

    assert_eq!(chain.nodes(), &[StateKind::WallCling]);
    assert!(!ctx.did_dash);
    assert!(!ctx.is_dashing);
    assert_eq!(ctx.velocity, Vec2::ZERO);
}

// -----------------------------------------------------------------------------
// Switch protocol tests
// -----------------------------------------------------------------------------

#[test]
fn test_exit_order_deepest_first_on_landing() {
    let registry = registry();
    let mut chain = ActiveChain::default();
    let mut ctx = context();
    let mut events = Vec::new();
    install(
        &registry,
        &mut chain,
        &mut ctx,
        &mut events,
        StateKind::Airborne,
    );
    events.clear();

    ctx.grounded = true;
    step(&registry, &mut chain, &mut ctx, &mut events, 0.016);

    assert_eq!(
        events,
        vec![
            StateEvent::Exited(StateKind::Fall),
            StateEvent::Exited(StateKind::Airborne),
            StateEvent::Entered(StateKind::Grounded),
            StateEvent::Entered(StateKind::Idle),
        ]
    );
}

#[test]
fn test_non_root_switch_at_chain_base_is_invalid() {
    let registry = registry();
    let mut chain = ActiveChain::default();
    let mut ctx = context();
    let mut events = Vec::new();
    ctx.is_jumping = true;
    ctx.velocity.y = -1.0;
    install(
        &registry,
        &mut chain,
        &mut ctx,
        &mut events,
        StateKind::Airborne,
    );
    assert_eq!(chain.nodes(), &[StateKind::Airborne]);

    let mut machine = Machine::new(&registry, &mut chain, &mut ctx, &mut events);
    let err = machine.switch_from(0, StateKind::Fall).unwrap_err();
    assert_eq!(
        err,
        MachineError::InvalidTransition {
            from: StateKind::Airborne,
            to: StateKind::Fall,
        }
    );
    assert!(format!("{err}").contains("Fall"));
    assert_eq!(chain.nodes(), &[StateKind::Airborne]);
}

#[test]
fn test_delegated_switch_is_adopted_by_super_state() {
    let registry = registry();
    let mut chain = ActiveChain::default();
    let mut ctx = context();
    let mut events = Vec::new();
    ctx.grounded = true;
    ctx.velocity.x = 5.0;
    install(
        &registry,
        &mut chain,
        &mut ctx,
        &mut events,
        StateKind::Grounded,
    );
    assert_eq!(chain.nodes(), &[StateKind::Grounded, StateKind::Walk]);
    events.clear();

    let mut machine = Machine::new(&registry, &mut chain, &mut ctx, &mut events);
    machine.switch_from(1, StateKind::Run).unwrap();

    assert_eq!(chain.nodes(), &[StateKind::Grounded, StateKind::Run]);
    assert_eq!(
        events,
        vec![
            StateEvent::Exited(StateKind::Walk),
            StateEvent::Entered(StateKind::Run),
        ]
    );
}

#[test]
fn test_root_switch_takes_effect_next_tick() {
    let registry = registry();
    let mut chain = ActiveChain::default();
    let mut ctx = context();
    let mut events = Vec::new();
    install(
        &registry,
        &mut chain,
        &mut ctx,
        &mut events,
        StateKind::Airborne,
    );

    // landing swaps the chain but runs no grounded hooks this tick
    ctx.grounded = true;
    ctx.velocity = Vec2::new(40.0, 0.0);
    ctx.direction_x = 1.0;
    step(&registry, &mut chain, &mut ctx, &mut events, 0.125);
    assert_eq!(chain.root(), Some(StateKind::Grounded));
    let after_switch = ctx.velocity.x;

    // next tick the grounded approach law is live
    step(&registry, &mut chain, &mut ctx, &mut events, 0.125);
    assert_eq!(ctx.velocity.x, after_switch + 10.0);
}
