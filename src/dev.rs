//! Developer logging for iteration on movement feel.
//!
//! Mirrors the state machine's notifications to the log and prints a
//! periodic context snapshot: active chain, position, velocity, jump
//! budget, and the live timers.

use bevy::prelude::*;

use crate::character::{
    ActiveChain, CharacterContext, ContactEnded, ContactStarted, StateEntered, StateExited,
};
use crate::demo::DemoBody;

/// Seconds between context snapshots.
const SNAPSHOT_PERIOD: f32 = 1.0;

pub struct DevPlugin;

impl Plugin for DevPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SnapshotTimer>().add_systems(
            Update,
            (log_state_transitions, log_contact_edges, snapshot_context),
        );
    }
}

#[derive(Resource)]
struct SnapshotTimer(Timer);

impl Default for SnapshotTimer {
    fn default() -> Self {
        Self(Timer::from_seconds(SNAPSHOT_PERIOD, TimerMode::Repeating))
    }
}

fn log_state_transitions(
    mut entered: MessageReader<StateEntered>,
    mut exited: MessageReader<StateExited>,
) {
    for message in exited.read() {
        info!("state exit: {:?}", message.state);
    }
    for message in entered.read() {
        info!("state enter: {:?}", message.state);
    }
}

fn log_contact_edges(
    mut started: MessageReader<ContactStarted>,
    mut ended: MessageReader<ContactEnded>,
) {
    for message in started.read() {
        info!("contact start: {:?}", message.surface);
    }
    for message in ended.read() {
        info!("contact end: {:?}", message.surface);
    }
}

fn snapshot_context(
    time: Res<Time>,
    mut timer: ResMut<SnapshotTimer>,
    query: Query<(&CharacterContext, &ActiveChain, Option<&DemoBody>)>,
) {
    if !timer.0.tick(time.delta()).just_finished() {
        return;
    }
    for (ctx, chain, body) in &query {
        let position = body.map(|body| body.position).unwrap_or_default();
        debug!(
            "chain {:?} pos ({:.0}, {:.0}) vel ({:.1}, {:.1}) jumps {}/{} jump timer {:.2} dash timer {:.2} cling timer {:.2} deferred {}",
            chain.nodes(),
            position.x,
            position.y,
            ctx.velocity.x,
            ctx.velocity.y,
            ctx.current_jumps,
            ctx.tuning.max_jumps,
            ctx.jump_timer,
            ctx.dash_timer,
            ctx.wall_cling.timer,
            ctx.deferred.pending()
        );
    }
}
