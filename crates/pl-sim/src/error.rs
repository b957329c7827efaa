//! Error types for simulation operations.

use pl_controls::ControlError;
use pl_core::{CoreError, Role};
use thiserror::Error;

/// Errors raised while assembling or running a closed loop.
///
/// Stepping a valid system never fails; everything here is reported at
/// construction or configuration time.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("System is missing its {role} component")]
    MissingRole { role: Role },

    #[error("Generator already registered: {name}")]
    DuplicateGenerator { name: String },

    #[error("Unknown generator: {name}")]
    UnknownGenerator { name: String },

    #[error("Core error: {0}")]
    Core(#[from] CoreError),

    #[error("Control block error: {0}")]
    Control(#[from] ControlError),
}

pub type SimResult<T> = Result<T, SimError>;

