//! RON loading for the movement tuning file.

use std::fs;
use std::path::Path;

use ron::Options;

use crate::character::MovementTuning;

/// Error type for tuning file failures.
#[derive(Debug)]
pub struct ConfigLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for ConfigLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "failed to load {}: {}", self.file, self.message)
    }
}

/// RON options used for the tuning file.
/// `IMPLICIT_SOME` lets the file omit `Some()` wrappers.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Parse tuning from RON text. Fields the text omits keep their defaults.
pub(crate) fn parse_tuning(contents: &str) -> Result<MovementTuning, ron::error::SpannedError> {
    ron_options().from_str(contents)
}

/// Load the tuning file from disk.
pub fn load_tuning(path: &Path) -> Result<MovementTuning, ConfigLoadError> {
    let file = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| ConfigLoadError {
        file: file.clone(),
        message: format!("read error: {}", e),
    })?;
    parse_tuning(&contents).map_err(|e| ConfigLoadError {
        file,
        message: format!("parse error: {}", e),
    })
}
