//! Character domain: flyweight registry of state behaviors.

use std::collections::HashMap;

use bevy::prelude::*;

use super::airborne::{AirborneState, DashState, DiveState, DoubleJumpState, FallState};
use super::behavior::{StateBehavior, StateKind};
use super::grounded::{GroundedState, IdleState, JumpState, RunState, SlideState, WalkState};
use super::wall::{WallClingState, WallJumpState};
use super::MachineError;

/// One shared behavior instance per state kind, built once at startup and
/// read by every character's machine.
#[derive(Resource)]
pub struct StateRegistry {
    states: HashMap<StateKind, Box<dyn StateBehavior>>,
}

impl StateRegistry {
    /// Build the full behavior set and verify that every kind is covered.
    pub fn build() -> Result<Self, MachineError> {
        let behaviors: Vec<Box<dyn StateBehavior>> = vec![
            Box::new(GroundedState),
            Box::new(IdleState),
            Box::new(WalkState),
            Box::new(RunState),
            Box::new(JumpState),
            Box::new(SlideState),
            Box::new(AirborneState),
            Box::new(FallState),
            Box::new(DoubleJumpState),
            Box::new(DashState),
            Box::new(DiveState),
            Box::new(WallClingState),
            Box::new(WallJumpState),
        ];

        let mut states = HashMap::with_capacity(behaviors.len());
        for behavior in behaviors {
            let kind = behavior.kind();
            states.insert(kind, behavior);
        }

        let missing: Vec<StateKind> = StateKind::ALL
            .iter()
            .copied()
            .filter(|kind| !states.contains_key(kind))
            .collect();
        if !missing.is_empty() {
            return Err(MachineError::MissingState(missing));
        }

        Ok(Self { states })
    }

    /// Shared behavior for a kind. `build` verified every kind is present.
    pub fn behavior(&self, kind: StateKind) -> &dyn StateBehavior {
        self.states[&kind].as_ref()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// One-line description for startup logging.
    pub fn summary(&self) -> String {
        let roots = self
            .states
            .values()
            .filter(|behavior| behavior.descriptor().root_capable)
            .count();
        format!(
            "State registry: {} behaviors ({} root-capable)",
            self.states.len(),
            roots
        )
    }
}
