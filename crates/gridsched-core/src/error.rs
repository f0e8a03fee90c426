//! Error types for pass-file handling.

use std::path::PathBuf;

use thiserror::Error;

use crate::action::ActionType;

/// Result type alias for pass-file operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while loading or replaying a pass file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read pass file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse pass file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize pass file: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("stage #{index} ({op} {workload}) does not name a member")]
    MissingMember {
        index: usize,
        op: ActionType,
        workload: String,
    },

    #[error("member declared more than once: {0}")]
    DuplicateMember(String),
}
