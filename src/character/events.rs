//! Character domain: outbound notifications for animation, audio, and UI
//! listeners.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use super::machine::StateKind;

/// Fired for every chain node entered, sub-states included.
#[derive(Debug)]
pub struct StateEntered {
    pub entity: Entity,
    pub state: StateKind,
}

impl Message for StateEntered {}

/// Fired for every chain node exited, deepest first.
#[derive(Debug)]
pub struct StateExited {
    pub entity: Entity,
    pub state: StateKind,
}

impl Message for StateExited {}

/// Contact surface classification for edge notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Ground,
    Wall,
    Ceiling,
}

/// Fired on the tick a contact flag flips on.
#[derive(Debug)]
pub struct ContactStarted {
    pub entity: Entity,
    pub surface: Surface,
}

impl Message for ContactStarted {}

/// Fired on the tick a contact flag flips off.
#[derive(Debug)]
pub struct ContactEnded {
    pub entity: Entity,
    pub surface: Surface,
}

impl Message for ContactEnded {}
