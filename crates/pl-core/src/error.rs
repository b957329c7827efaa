use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: &'static str },

    #[error("Duplicate parameter name: {name}")]
    DuplicateParameter { name: String },
}
