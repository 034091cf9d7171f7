//! Startup validation for movement tuning values.

use crate::character::MovementTuning;

/// A tuning value that would corrupt the derived constants or the runtime
/// math.
#[derive(Debug)]
pub struct ConfigurationError {
    pub field: &'static str,
    pub value: f32,
    pub requirement: &'static str,
}

impl std::fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "movement tuning '{}' is {} but {}",
            self.field, self.value, self.requirement
        )
    }
}

/// Check every tuning field and return all failures, not just the first.
///
/// The apex time and dash time divide the derived constants, so zeros there
/// are rejected rather than allowed to poison every later computation; the
/// fall speed clamp must be positive for the clamp range to be ordered.
pub fn validate_tuning(tuning: &MovementTuning) -> Vec<ConfigurationError> {
    let mut errors = Vec::new();

    macro_rules! require {
        ($field:ident, $ok:expr, $requirement:expr) => {
            if !$ok {
                errors.push(ConfigurationError {
                    field: stringify!($field),
                    value: tuning.$field,
                    requirement: $requirement,
                });
            }
        };
    }

    require!(
        time_to_jump_apex,
        tuning.time_to_jump_apex > 0.0,
        "must be positive"
    );
    require!(dash_time, tuning.dash_time > 0.0, "must be positive");
    require!(
        max_fall_speed,
        tuning.max_fall_speed > 0.0,
        "must be positive"
    );
    require!(move_speed, tuning.move_speed >= 0.0, "must not be negative");
    require!(
        run_speed_multiplier,
        tuning.run_speed_multiplier >= 0.0,
        "must not be negative"
    );
    require!(
        acceleration,
        tuning.acceleration >= 0.0,
        "must not be negative"
    );
    require!(
        deceleration,
        tuning.deceleration >= 0.0,
        "must not be negative"
    );
    require!(
        air_acceleration,
        tuning.air_acceleration >= 0.0,
        "must not be negative"
    );
    require!(
        air_deceleration,
        tuning.air_deceleration >= 0.0,
        "must not be negative"
    );
    require!(
        fall_speed_multiplier,
        tuning.fall_speed_multiplier >= 0.0,
        "must not be negative"
    );
    require!(jump_height, tuning.jump_height >= 0.0, "must not be negative");
    require!(
        wall_cling_time,
        tuning.wall_cling_time >= 0.0,
        "must not be negative"
    );
    require!(
        wall_cling_gravity_modifier,
        tuning.wall_cling_gravity_modifier >= 0.0,
        "must not be negative"
    );
    require!(dash_units, tuning.dash_units >= 0.0, "must not be negative");

    errors
}
