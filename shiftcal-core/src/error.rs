//! Error types for the shiftcal crates.

use thiserror::Error;

/// Errors that can occur while parsing shift plans or producing calendars.
#[derive(Error, Debug)]
pub enum ShiftCalError {
    #[error("Parse error in line '{line}': {reason}")]
    Parse { line: String, reason: String },

    #[error("no shifts to write")]
    NoShifts,

    #[error("ICS parse error: {0}")]
    IcsParse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for shiftcal operations.
pub type ShiftCalResult<T> = Result<T, ShiftCalError>;
