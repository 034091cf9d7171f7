//! Character domain: hierarchical state machine core.
//!
//! The machine separates three things that classic state-object designs fuse
//! together: behavior tables (one shared [`StateBehavior`] per kind, held in
//! the [`StateRegistry`]), per-character activation (the [`ActiveChain`]
//! component naming the root and its sub-states), and per-character data
//! (the `CharacterContext`). A [`Machine`] borrows all three for one tick.

mod airborne;
mod behavior;
mod grounded;
mod registry;
mod wall;

#[cfg(test)]
mod tests;

pub use behavior::{
    CheckOrder, RootRule, StateBehavior, StateDescriptor, StateKind, SubstateAction, SubstateRule,
};
pub use registry::StateRegistry;

use std::fmt;

use bevy::prelude::*;

use crate::character::context::CharacterContext;

/// Construction or transition defects. Both indicate a wiring bug rather
/// than a runtime condition, so callers report them and refuse to proceed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MachineError {
    /// Registry construction found kinds without a registered behavior.
    MissingState(Vec<StateKind>),
    /// A switch needed a super-state to adopt the target, but the acting
    /// node sat at the base of the chain.
    InvalidTransition { from: StateKind, to: StateKind },
}

impl fmt::Display for MachineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MachineError::MissingState(kinds) => {
                write!(f, "no behavior registered for {kinds:?}")
            }
            MachineError::InvalidTransition { from, to } => {
                write!(
                    f,
                    "{from:?} has no super-state to adopt non-root target {to:?}"
                )
            }
        }
    }
}

/// Enter/exit notification produced by chain operations, drained after each
/// tick into the public message streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateEvent {
    Entered(StateKind),
    Exited(StateKind),
}

/// Per-character record of the active root and its sub-state chain.
/// `nodes[0]` is the root; each later entry is the sub-state of the one
/// before it.
#[derive(Component, Debug, Default)]
pub struct ActiveChain {
    nodes: Vec<StateKind>,
}

impl ActiveChain {
    pub fn root(&self) -> Option<StateKind> {
        self.nodes.first().copied()
    }

    pub fn nodes(&self) -> &[StateKind] {
        &self.nodes
    }

    pub fn is_active(&self, kind: StateKind) -> bool {
        self.nodes.contains(&kind)
    }
}

/// Borrowed driver advancing one character's machine for one tick.
pub struct Machine<'a> {
    registry: &'a StateRegistry,
    chain: &'a mut ActiveChain,
    ctx: &'a mut CharacterContext,
    events: &'a mut Vec<StateEvent>,
}

impl<'a> Machine<'a> {
    pub fn new(
        registry: &'a StateRegistry,
        chain: &'a mut ActiveChain,
        ctx: &'a mut CharacterContext,
        events: &'a mut Vec<StateEvent>,
    ) -> Self {
        Self {
            registry,
            chain,
            ctx,
            events,
        }
    }

    /// Put the chain into its starting root and let that root pick its
    /// initial sub-state, firing enter notifications like any other
    /// transition.
    pub fn install_root(&mut self, root: StateKind) {
        debug_assert!(
            self.registry.behavior(root).descriptor().root_capable,
            "initial state {root:?} is not root-capable"
        );
        self.exit_chain_from(0);
        self.enter_root(root);
    }

    /// One tick of the update traversal. Each node in turn reads the context
    /// velocity into a working copy, runs its velocity hooks, writes the
    /// result back, then runs its transition rules. A sub-state installed
    /// mid-walk is updated this same tick; a root switch ends the walk and
    /// takes effect next tick.
    pub fn update(&mut self, dt: f32) {
        let registry = self.registry;
        let mut depth = 0;
        while depth < self.chain.nodes.len() {
            let kind = self.chain.nodes[depth];
            let behavior = registry.behavior(kind);

            let mut vel = self.ctx.velocity;
            behavior.velocity_x(self.ctx, &mut vel);
            behavior.velocity_y(self.ctx, &mut vel, dt);
            self.ctx.velocity = vel;

            if self.check_transitions(depth, behavior) {
                break;
            }
            depth += 1;
        }
    }

    /// Switch away from the node at `depth`. Root-capable targets swap the
    /// whole chain; any other target must be adopted by the node's
    /// super-state.
    pub fn switch_from(&mut self, depth: usize, target: StateKind) -> Result<(), MachineError> {
        let Some(from) = self.chain.nodes.get(depth).copied() else {
            return Ok(());
        };
        let from_root = self.registry.behavior(from).descriptor().root_capable;
        let to_root = self.registry.behavior(target).descriptor().root_capable;
        if from_root && to_root {
            self.exit_chain_from(0);
            self.enter_root(target);
            Ok(())
        } else if depth == 0 {
            Err(MachineError::InvalidTransition { from, to: target })
        } else {
            self.exit_chain_from(depth);
            self.set_substate(depth - 1, target);
            Ok(())
        }
    }

    /// Returns true when the root switched and the walk must stop.
    fn check_transitions(&mut self, depth: usize, behavior: &dyn StateBehavior) -> bool {
        match behavior.check_order() {
            CheckOrder::RootFirst => {
                if self.apply_root_rules(depth, behavior.root_rules()) {
                    return true;
                }
                self.apply_substate_rules(depth, behavior.substate_rules());
                behavior.after_substate_rules(self.ctx);
                false
            }
            CheckOrder::SubstatesFirst => {
                self.apply_substate_rules(depth, behavior.substate_rules());
                behavior.after_substate_rules(self.ctx);
                self.apply_root_rules(depth, behavior.root_rules())
            }
        }
    }

    fn apply_root_rules(&mut self, depth: usize, rules: &[RootRule]) -> bool {
        for rule in rules {
            if (rule.when)(self.ctx) {
                if let Err(err) = self.switch_from(depth, rule.to) {
                    debug_assert!(false, "{err}");
                    error!("state machine: {}", err);
                }
                return true;
            }
        }
        false
    }

    /// First matching rule wins and ends the pass.
    fn apply_substate_rules(&mut self, parent_depth: usize, rules: &[SubstateRule]) {
        for rule in rules {
            if (rule.when)(self.ctx) {
                if let SubstateAction::Enter(target) = rule.then {
                    self.set_substate(parent_depth, target);
                }
                return;
            }
        }
    }

    /// Install `target` as the sub-state below `parent_depth`, exiting
    /// whatever chain hangs there first. Re-selecting the already active
    /// sub-state is a no-op: no exit, no enter, no notifications.
    fn set_substate(&mut self, parent_depth: usize, target: StateKind) {
        if self.chain.nodes.get(parent_depth + 1) == Some(&target) {
            return;
        }
        self.exit_chain_from(parent_depth + 1);
        let behavior = self.registry.behavior(target);
        behavior.on_enter(self.ctx);
        self.chain.nodes.push(target);
        self.events.push(StateEvent::Entered(target));
    }

    /// Exit every node at `depth` and below, deepest first. Each node exits
    /// exactly once: hook, then notification.
    fn exit_chain_from(&mut self, depth: usize) {
        let registry = self.registry;
        while self.chain.nodes.len() > depth {
            if let Some(kind) = self.chain.nodes.pop() {
                registry.behavior(kind).on_exit(self.ctx);
                self.events.push(StateEvent::Exited(kind));
            }
        }
    }

    /// Enter `target` as the new chain base and run its initial sub-state
    /// selection. Sub-states entered here do not recurse further.
    fn enter_root(&mut self, target: StateKind) {
        let registry = self.registry;
        let behavior = registry.behavior(target);
        behavior.on_enter(self.ctx);
        self.chain.nodes.push(target);
        self.events.push(StateEvent::Entered(target));
        self.apply_substate_rules(0, behavior.initial_substate_rules());
    }
}
