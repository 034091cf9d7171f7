//! Character domain: deferred action scheduling.

use std::fmt;

use crate::character::context::CharacterContext;

/// Callback fired against the owning context when its wait elapses.
pub type DeferredCallback = Box<dyn FnOnce(&mut CharacterContext) + Send + Sync>;

struct DeferredAction {
    callback: DeferredCallback,
    wait: f32,
    elapsed: f32,
}

/// Pending deferred actions, owned by the context and drained once per tick.
///
/// `advance` hands fired callbacks back to the caller instead of invoking
/// them in place, so the owner can run them against itself without aliasing.
/// Fired entries leave the pending set in the same pass, which keeps each
/// one to a single invocation even when several come due on the same tick.
#[derive(Default)]
pub struct ActionScheduler {
    pending: Vec<DeferredAction>,
}

impl ActionScheduler {
    /// Queue `callback` to fire once `wait` seconds of tick time accumulate.
    pub fn schedule<F>(&mut self, wait: f32, callback: F)
    where
        F: FnOnce(&mut CharacterContext) + Send + Sync + 'static,
    {
        self.pending.push(DeferredAction {
            callback: Box::new(callback),
            wait,
            elapsed: 0.0,
        });
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Advance every pending entry by `dt` and return the callbacks that came
    /// due, removed from the pending set in order of scheduling.
    pub fn advance(&mut self, dt: f32) -> Vec<DeferredCallback> {
        let mut due = Vec::new();
        let mut retained = Vec::with_capacity(self.pending.len());
        for mut action in self.pending.drain(..) {
            action.elapsed += dt;
            if action.elapsed >= action.wait {
                due.push(action.callback);
            } else {
                retained.push(action);
            }
        }
        self.pending = retained;
        due
    }
}

impl fmt::Debug for ActionScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionScheduler")
            .field("pending", &self.pending.len())
            .finish()
    }
}
