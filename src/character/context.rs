//! Character domain: the shared movement context and its tuning.

use bevy::prelude::*;
use serde::Deserialize;

use crate::character::scheduler::ActionScheduler;

/// Tunable movement parameters, loaded from `assets/data/movement_tuning.ron`
/// or falling back to these defaults. Distances are world units, times are
/// seconds, rates are units per tick.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MovementTuning {
    /// Baseline horizontal speed (default: 128)
    pub move_speed: f32,
    /// Multiplier on move_speed while the run button is held (default: 2)
    pub run_speed_multiplier: f32,
    /// Grounded horizontal approach step per tick (default: 10)
    pub acceleration: f32,
    /// Grounded horizontal decay step per tick (default: 10)
    pub deceleration: f32,
    /// Airborne horizontal approach step per tick (default: 5)
    pub air_acceleration: f32,
    /// Airborne horizontal decay step per tick (default: 5)
    pub air_deceleration: f32,
    /// Gravity multiplier while falling without a jump impulse (default: 2)
    pub fall_speed_multiplier: f32,
    /// Clamp on the applied vertical velocity (default: 512)
    pub max_fall_speed: f32,
    /// Peak height of a full jump (default: 32)
    pub jump_height: f32,
    /// Seconds from jump start to apex (default: 0.25)
    pub time_to_jump_apex: f32,
    /// Jumps allowed before landing is required (default: 2)
    pub max_jumps: u32,
    /// Seconds the character can cling to a wall (default: 0.5)
    pub wall_cling_time: f32,
    /// Gravity multiplier while clinging (default: 0.2)
    pub wall_cling_gravity_modifier: f32,
    /// Distance covered by a dash (default: 128)
    pub dash_units: f32,
    /// Seconds a dash lasts (default: 0.25)
    pub dash_time: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            move_speed: 128.0,
            run_speed_multiplier: 2.0,
            acceleration: 10.0,
            deceleration: 10.0,
            air_acceleration: 5.0,
            air_deceleration: 5.0,
            fall_speed_multiplier: 2.0,
            max_fall_speed: 512.0,
            jump_height: 32.0,
            time_to_jump_apex: 0.25,
            max_jumps: 2,
            wall_cling_time: 0.5,
            wall_cling_gravity_modifier: 0.2,
            dash_units: 128.0,
            dash_time: 0.25,
        }
    }
}

/// Constants derived from the tuning once at initialization, never re-derived
/// per frame.
#[derive(Debug, Clone, Copy)]
pub struct MotionConstants {
    pub gravity: f32,
    pub jump_velocity: f32,
    pub dash_force: f32,
}

impl MotionConstants {
    /// Gravity from the designed jump height and apex time, jump velocity
    /// from gravity, dash force from distance over duration. Requires the
    /// tuning to have passed validation (positive apex time and dash time).
    pub fn from_tuning(tuning: &MovementTuning) -> Self {
        let gravity =
            2.0 * tuning.jump_height / (tuning.time_to_jump_apex * tuning.time_to_jump_apex);
        Self {
            gravity,
            jump_velocity: -gravity * tuning.time_to_jump_apex,
            dash_force: tuning.dash_units / tuning.dash_time,
        }
    }
}

/// Per-activation wall cling record, reset each time the cling root is
/// entered.
#[derive(Debug, Clone, Default)]
pub struct WallClingStatus {
    /// Remaining cling time; once non-positive the horizontal law flips from
    /// pinning to pushing.
    pub timer: f32,
    /// One-shot cancel of residual vertical velocity, consumed on first use.
    pub cancel_y_armed: bool,
    /// Wall contact normal captured on entry.
    pub wall_normal: Vec2,
    /// Set when a wall jump happens during this activation; suppresses the
    /// horizontal pin for the rest of it.
    pub did_wall_jump: bool,
}

/// The mutable record every state reads and writes: kinematics, derived
/// input, contact flags, ability flags, timers, tuning, and the deferred
/// action scheduler.
///
/// Positive Y points down: gravity is positive, jump impulses are negative.
#[derive(Component, Debug)]
pub struct CharacterContext {
    pub velocity: Vec2,
    pub previous_velocity: Vec2,
    pub move_input: Vec2,
    /// Sign of the horizontal input: -1, 0 or +1.
    pub direction_x: f32,
    pub is_run_pressed: bool,
    pub grounded: bool,
    pub on_wall: bool,
    pub on_ceiling: bool,
    /// Wall contact normals reported by the host this tick, newest last.
    pub wall_normals: Vec<Vec2>,
    pub is_jumping: bool,
    pub is_dashing: bool,
    pub did_jump: bool,
    pub did_dash: bool,
    pub did_dive: bool,
    pub can_wall_cling: bool,
    pub current_jumps: u32,
    /// Countdown from time_to_jump_apex; while expired, is_jumping clears.
    pub jump_timer: f32,
    /// Elapsed time of the active dash, cleared by the reset.
    pub dash_timer: f32,
    pub wall_cling: WallClingStatus,
    pub tuning: MovementTuning,
    pub constants: MotionConstants,
    pub deferred: ActionScheduler,
    dash_generation: u32,
}

impl CharacterContext {
    pub fn new(tuning: MovementTuning) -> Self {
        let constants = MotionConstants::from_tuning(&tuning);
        Self {
            velocity: Vec2::ZERO,
            previous_velocity: Vec2::ZERO,
            move_input: Vec2::ZERO,
            direction_x: 0.0,
            is_run_pressed: false,
            grounded: false,
            on_wall: false,
            on_ceiling: false,
            wall_normals: Vec::new(),
            is_jumping: false,
            is_dashing: false,
            did_jump: false,
            did_dash: false,
            did_dive: false,
            can_wall_cling: true,
            current_jumps: 0,
            jump_timer: 0.0,
            dash_timer: 0.0,
            wall_cling: WallClingStatus::default(),
            tuning,
            constants,
            deferred: ActionScheduler::default(),
            dash_generation: 0,
        }
    }

    /// Instantaneous velocity addition, applied once on state entry.
    pub fn add_impulse(&mut self, impulse: Vec2) {
        self.velocity += impulse;
    }

    /// Zero the vertical velocity, and the horizontal as well if `cancel_x`.
    pub fn cancel_velocity(&mut self, cancel_x: bool) {
        if cancel_x {
            self.velocity = Vec2::ZERO;
        } else {
            self.velocity.y = 0.0;
        }
    }

    /// Wall contact normal; when the host reports several contacts the last
    /// one wins.
    pub fn wall_normal(&self) -> Vec2 {
        self.wall_normals.last().copied().unwrap_or(Vec2::ZERO)
    }

    /// Host-reported contact snapshot for this tick.
    pub fn set_contacts(
        &mut self,
        grounded: bool,
        on_wall: bool,
        on_ceiling: bool,
        wall_normals: &[Vec2],
    ) {
        self.grounded = grounded;
        self.on_wall = on_wall;
        self.on_ceiling = on_ceiling;
        self.wall_normals.clear();
        self.wall_normals.extend_from_slice(wall_normals);
    }

    /// Shared vertical integration: record the previous velocity, integrate
    /// gravity scaled by `multiplier`, apply the average of the pre- and
    /// post-update values, clamp to the fall speed limit.
    pub fn apply_gravity(&mut self, vel: &mut Vec2, dt: f32, multiplier: f32) {
        self.previous_velocity = *vel;
        vel.y += self.constants.gravity * multiplier * dt;
        let applied = (vel.y + self.previous_velocity.y) * 0.5;
        vel.y = applied.clamp(-self.tuning.max_fall_speed, self.tuning.max_fall_speed);
    }

    /// Horizontal approach toward the input-implied target speed: step by
    /// `acceleration` per tick while the input direction matches the current
    /// velocity sign, by `deceleration` otherwise, and decay to zero with no
    /// input. Does nothing while dashing.
    pub fn approach_horizontal(&self, vel: &mut Vec2, acceleration: f32, deceleration: f32) {
        if self.is_dashing {
            return;
        }
        let target = if self.is_run_pressed {
            self.direction_x * self.tuning.move_speed * self.tuning.run_speed_multiplier
        } else {
            self.direction_x * self.tuning.move_speed
        };
        if self.direction_x != 0.0 {
            let rate = if self.direction_x == sign(vel.x) {
                acceleration
            } else {
                deceleration
            };
            vel.x = move_toward(vel.x, target, rate);
        } else {
            vel.x = move_toward(vel.x, 0.0, deceleration);
        }
    }

    /// Per-frame ability timer upkeep: jump apex countdown and dash elapsed
    /// time.
    pub fn tick_timers(&mut self, dt: f32) {
        if self.jump_timer > 0.0 {
            self.jump_timer -= dt;
        } else {
            self.is_jumping = false;
        }
        if self.is_dashing {
            self.dash_timer += dt;
        }
    }

    /// Arm a dash: request and active flags now, the hard stop scheduled for
    /// when the dash duration elapses. The generation guard keeps a reset
    /// scheduled by an earlier dash from clipping a later one after a forced
    /// reset re-armed the ability.
    pub fn arm_dash(&mut self) {
        self.did_dash = true;
        self.is_dashing = true;
        self.dash_generation = self.dash_generation.wrapping_add(1);
        let generation = self.dash_generation;
        self.deferred.schedule(self.tuning.dash_time, move |ctx| {
            if ctx.is_dashing && ctx.dash_generation == generation {
                ctx.reset_dash();
            }
        });
    }

    /// Hard stop at dash end; also used by Grounded/WallCling entry to cut an
    /// active dash short.
    pub fn reset_dash(&mut self) {
        self.is_dashing = false;
        self.dash_timer = 0.0;
        self.velocity = Vec2::ZERO;
    }

    /// Drain due deferred actions and run them against this context.
    pub fn run_deferred(&mut self, dt: f32) {
        let due = self.deferred.advance(dt);
        for action in due {
            action(self);
        }
    }
}

/// Sign with a true zero case, unlike `f32::signum` on `0.0`.
pub(crate) fn sign(v: f32) -> f32 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Step `from` toward `to` by at most `step`, landing exactly on the target.
pub(crate) fn move_toward(from: f32, to: f32, step: f32) -> f32 {
    if (to - from).abs() <= step {
        to
    } else {
        from + sign(to - from) * step
    }
}
