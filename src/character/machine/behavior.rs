//! Character domain: state identities, descriptors, and the behavior
//! contract shared by every state kind.

use bevy::prelude::*;

use crate::character::context::CharacterContext;

/// Stable identity for every state kind in the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateKind {
    Grounded,
    Airborne,
    WallCling,
    Idle,
    Walk,
    Run,
    Jump,
    DoubleJump,
    Fall,
    WallJump,
    Dash,
    Dive,
    Slide,
}

impl StateKind {
    /// Every kind the registry must cover.
    pub const ALL: [StateKind; 13] = [
        StateKind::Grounded,
        StateKind::Airborne,
        StateKind::WallCling,
        StateKind::Idle,
        StateKind::Walk,
        StateKind::Run,
        StateKind::Jump,
        StateKind::DoubleJump,
        StateKind::Fall,
        StateKind::WallJump,
        StateKind::Dash,
        StateKind::Dive,
        StateKind::Slide,
    ];
}

/// Structural flags consumed by transition logic and downstream listeners.
#[derive(Debug, Clone, Copy, Default)]
pub struct StateDescriptor {
    /// May sit at the base of the chain.
    pub root_capable: bool,
    /// Counts as a grounded locomotion sub-state.
    pub grounded_substate: bool,
    /// Counts as an airborne locomotion sub-state.
    pub airborne_substate: bool,
}

/// Outcome of a matched sub-state rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubstateAction {
    /// Install this kind as the sub-state.
    Enter(StateKind),
    /// Keep the current sub-state and stop evaluating further rules.
    Hold,
}

/// Ordered sub-state selection rule; the first matching rule wins and ends
/// the pass.
pub struct SubstateRule {
    pub when: fn(&CharacterContext) -> bool,
    pub then: SubstateAction,
}

/// Ordered root transition rule; the first matching rule swaps the whole
/// chain onto its target.
pub struct RootRule {
    pub when: fn(&CharacterContext) -> bool,
    pub to: StateKind,
}

/// Which rule family a root consults first during its transition check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOrder {
    /// Root rules first; a match skips the sub-state pass entirely.
    RootFirst,
    /// Sub-state rules first, then root rules.
    SubstatesFirst,
}

/// Behavior table for one state kind. Implementations hold no per-character
/// data; everything mutable lives in the [`CharacterContext`], so one shared
/// instance serves every character.
pub trait StateBehavior: Send + Sync {
    fn kind(&self) -> StateKind;
    fn descriptor(&self) -> StateDescriptor;

    fn on_enter(&self, _ctx: &mut CharacterContext) {}
    fn on_exit(&self, _ctx: &mut CharacterContext) {}

    /// Horizontal velocity contribution, applied to the working copy.
    fn velocity_x(&self, _ctx: &mut CharacterContext, _vel: &mut Vec2) {}
    /// Vertical velocity contribution, applied to the working copy.
    fn velocity_y(&self, _ctx: &mut CharacterContext, _vel: &mut Vec2, _dt: f32) {}

    fn root_rules(&self) -> &'static [RootRule] {
        &[]
    }
    fn substate_rules(&self) -> &'static [SubstateRule] {
        &[]
    }
    fn check_order(&self) -> CheckOrder {
        CheckOrder::SubstatesFirst
    }

    /// Imperative work immediately after the sub-state pass.
    fn after_substate_rules(&self, _ctx: &mut CharacterContext) {}

    /// Rules used to pick the initial sub-state when this kind is entered as
    /// a root. Defaults to the regular sub-state rules; wall cling overrides
    /// this with an empty slice so entry installs no sub-state.
    fn initial_substate_rules(&self) -> &'static [SubstateRule] {
        self.substate_rules()
    }
}
