//! Character domain: edge-triggered contact notifications.
//!
//! The host writes level-style contact flags into the context every physics
//! tick; the tracker turns those levels into start/end edges so listeners
//! hear about each touch exactly once.

use bevy::prelude::*;

use super::context::CharacterContext;
use super::events::{ContactEnded, ContactStarted, Surface};

/// One contact transition observed between two ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactEdge {
    Started(Surface),
    Ended(Surface),
}

/// Remembers the previous tick's contact flags for one character.
#[derive(Component, Debug, Default)]
pub struct ContactTracker {
    was_grounded: bool,
    was_on_wall: bool,
    was_on_ceiling: bool,
}

impl ContactTracker {
    /// Compare the stored flags against the current snapshot, store the
    /// snapshot, and return the edges this tick produced. Starts are
    /// reported before ends.
    pub fn detect(&mut self, grounded: bool, on_wall: bool, on_ceiling: bool) -> Vec<ContactEdge> {
        let mut edges = Vec::new();
        if grounded && !self.was_grounded {
            edges.push(ContactEdge::Started(Surface::Ground));
        }
        if on_wall && !self.was_on_wall {
            edges.push(ContactEdge::Started(Surface::Wall));
        }
        if on_ceiling && !self.was_on_ceiling {
            edges.push(ContactEdge::Started(Surface::Ceiling));
        }
        if !grounded && self.was_grounded {
            edges.push(ContactEdge::Ended(Surface::Ground));
        }
        if !on_ceiling && self.was_on_ceiling {
            edges.push(ContactEdge::Ended(Surface::Ceiling));
        }
        if !on_wall && self.was_on_wall {
            edges.push(ContactEdge::Ended(Surface::Wall));
        }
        self.was_grounded = grounded;
        self.was_on_wall = on_wall;
        self.was_on_ceiling = on_ceiling;
        edges
    }
}

/// Runs after the host has refreshed the contact snapshot for the tick.
pub(crate) fn emit_contact_events(
    mut query: Query<(Entity, &CharacterContext, &mut ContactTracker)>,
    mut started: MessageWriter<ContactStarted>,
    mut ended: MessageWriter<ContactEnded>,
) {
    for (entity, ctx, mut tracker) in &mut query {
        for edge in tracker.detect(ctx.grounded, ctx.on_wall, ctx.on_ceiling) {
            match edge {
                ContactEdge::Started(surface) => {
                    started.write(ContactStarted { entity, surface });
                }
                ContactEdge::Ended(surface) => {
                    ended.write(ContactEnded { entity, surface });
                }
            }
        }
    }
}
