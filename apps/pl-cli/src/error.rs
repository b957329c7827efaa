//! Error type for the command-line harness.

use std::path::PathBuf;

/// Wraps the library errors the CLI can surface.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Scenario error: {0}")]
    Project(#[from] pl_project::ProjectError),

    #[error("Simulation error: {0}")]
    Sim(#[from] pl_sim::SimError),

    #[error("Failed to write {path}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type CliResult<T> = Result<T, CliError>;
