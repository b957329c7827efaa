//! Error types for controller construction.

use pl_core::CoreError;
use thiserror::Error;

/// Result type for control block operations.
pub type ControlResult<T> = Result<T, ControlError>;

/// Errors that can occur while building control blocks.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ControlError {
    /// Invalid argument provided to a control block constructor.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// A parameter name is used twice when layering blocks.
    #[error("Parameter name collision: {name}")]
    NameCollision { name: String },

    /// Parameter descriptor could not be built.
    #[error("Parameter error: {0}")]
    Parameter(#[from] CoreError),
}
