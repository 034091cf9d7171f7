//! Config domain: movement tuning loading and validation.
//!
//! The tuning file is optional: a missing file falls back to the built-in
//! defaults with a warning, while a file that fails to parse or validate
//! stops the app before any character spawns.

mod loader;
mod validation;


pub use loader::ConfigLoadError;
pub use validation::{validate_tuning, ConfigurationError};

use std::path::Path;

use bevy::prelude::*;

use crate::character::{MotionConstants, MovementTuning};
use crate::config::loader::load_tuning;

/// Tuning file location, relative to the working directory.
pub const TUNING_PATH: &str = "assets/data/movement_tuning.ron";

pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PreStartup, load_movement_config);
    }
}

pub(crate) fn load_movement_config(mut commands: Commands, mut exit: MessageWriter<AppExit>) {
    let path = Path::new(TUNING_PATH);
    let tuning = if path.exists() {
        match load_tuning(path) {
            Ok(tuning) => tuning,
            Err(err) => {
                error!("{}", err);
                exit.write(AppExit::error());
                return;
            }
        }
    } else {
        warn!("{} not found, using built-in movement tuning", TUNING_PATH);
        MovementTuning::default()
    };

    let errors = validate_tuning(&tuning);
    if !errors.is_empty() {
        for err in &errors {
            error!("{}", err);
        }
        error!("movement tuning rejected: {} invalid values", errors.len());
        exit.write(AppExit::error());
        return;
    }

    let constants = MotionConstants::from_tuning(&tuning);
    info!(
        "Movement tuning loaded: gravity {}, jump velocity {}, dash force {}",
        constants.gravity, constants.jump_velocity, constants.dash_force
    );
    commands.insert_resource(tuning);
}
