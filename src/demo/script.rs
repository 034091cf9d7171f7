//! Demo input script: a fixed timeline of control samples standing in for a
//! device.

use bevy::prelude::*;

use super::world::DemoBody;
use crate::character::{ActiveChain, ControlInput, Player};

/// One held control sample, active from `at` until the next cue.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ScriptCue {
    pub at: f32,
    pub axis: Vec2,
    pub run: bool,
    pub jump: bool,
    pub dash: bool,
    pub dive: bool,
}

impl ScriptCue {
    pub(crate) const fn neutral(at: f32) -> Self {
        Self {
            at,
            axis: Vec2::ZERO,
            run: false,
            jump: false,
            dash: false,
            dive: false,
        }
    }

    pub(crate) const fn held(at: f32, axis: Vec2) -> Self {
        Self {
            at,
            axis,
            run: false,
            jump: false,
            dash: false,
            dive: false,
        }
    }
}

/// Timeline of cues plus playback position.
#[derive(Resource, Debug)]
pub(crate) struct InputScript {
    cues: Vec<ScriptCue>,
    /// Seconds past the final cue before the app exits.
    tail: f32,
    clock: f32,
    previous: ScriptCue,
    finished: bool,
}

impl InputScript {
    pub(crate) fn new(cues: Vec<ScriptCue>, tail: f32) -> Self {
        Self {
            cues,
            tail,
            clock: 0.0,
            previous: ScriptCue::neutral(0.0),
            finished: false,
        }
    }

    /// The sample active at `clock`: the latest cue at or before it.
    pub(crate) fn sample(&self, clock: f32) -> ScriptCue {
        let mut current = ScriptCue::neutral(0.0);
        for cue in &self.cues {
            if cue.at <= clock {
                current = *cue;
            } else {
                break;
            }
        }
        current
    }

    pub(crate) fn end_time(&self) -> f32 {
        self.cues.last().map(|cue| cue.at).unwrap_or(0.0) + self.tail
    }
}

impl Default for InputScript {
    /// A tour of the whole move set: land, walk, run, jump with an early
    /// release, double jump, slide, cling to the right wall, wall jump,
    /// dive back to the floor.
    fn default() -> Self {
        let right = Vec2::new(1.0, 0.0);
        let left = Vec2::new(-1.0, 0.0);
        Self::new(
            vec![
                ScriptCue::neutral(0.0),
                ScriptCue::held(1.0, right),
                ScriptCue {
                    run: true,
                    ..ScriptCue::held(2.0, right)
                },
                ScriptCue::held(3.0, right),
                ScriptCue {
                    jump: true,
                    ..ScriptCue::held(3.2, right)
                },
                ScriptCue::held(3.5, right),
                ScriptCue {
                    jump: true,
                    ..ScriptCue::held(3.7, right)
                },
                ScriptCue::held(4.0, right),
                ScriptCue::neutral(5.2),
                ScriptCue {
                    dash: true,
                    ..ScriptCue::held(5.6, right)
                },
                ScriptCue::held(5.8, right),
                ScriptCue {
                    jump: true,
                    ..ScriptCue::held(8.0, right)
                },
                ScriptCue::held(8.2, left),
                ScriptCue {
                    dive: true,
                    ..ScriptCue::held(8.6, left)
                },
                ScriptCue::held(8.8, left),
                ScriptCue::neutral(9.5),
            ],
            1.5,
        )
    }
}

/// Plays the script into the shared control input, synthesizing press and
/// release edges from consecutive samples, and exits once the timeline runs
/// out.
pub(crate) fn advance_script(
    time: Res<Time>,
    mut script: ResMut<InputScript>,
    mut input: ResMut<ControlInput>,
    query: Query<(&DemoBody, &ActiveChain), With<Player>>,
    mut exit: MessageWriter<AppExit>,
) {
    if script.finished {
        return;
    }
    script.clock += time.delta_secs();
    let current = script.sample(script.clock);
    let previous = script.previous;

    *input = ControlInput {
        axis: current.axis,
        run_held: current.run,
        jump_pressed: current.jump && !previous.jump,
        jump_released: !current.jump && previous.jump,
        dash_pressed: current.dash && !previous.dash,
        dive_pressed: current.dive && !previous.dive,
    };
    script.previous = current;

    if script.clock >= script.end_time() {
        script.finished = true;
        for (body, chain) in &query {
            info!(
                "demo script finished at ({:.0}, {:.0}) in {:?}",
                body.position.x,
                body.position.y,
                chain.nodes()
            );
        }
        exit.write(AppExit::Success);
    }
}
