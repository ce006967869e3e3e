/*!
 * Error Types
 * Centralized error handling with thiserror and miette
 */

use miette::Diagnostic;
use thiserror::Error;

// Re-export domain errors so callers have one import path
pub use crate::memory::MemoryError;
pub use crate::process::ProcessError;

/// Configuration result
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration loading and validation errors
#[derive(Error, Debug, Diagnostic)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    #[diagnostic(
        code(config::io),
        help("Check that the path exists and is readable.")
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed config: {0}")]
    #[diagnostic(
        code(config::parse),
        help("The config file must be a JSON object. Unknown fields are rejected.")
    )]
    Parse(#[from] serde_json::Error),

    #[error("Pool has no partitions")]
    #[diagnostic(
        code(config::empty_pool),
        help("Provide at least one partition size, e.g. \"partitions\": [216, 250, 330, 256].")
    )]
    EmptyPool,

    #[error("Partition {index} has size 0")]
    #[diagnostic(
        code(config::zero_partition),
        help("Every partition must have a positive size.")
    )]
    ZeroPartition { index: usize },

    #[error("Invalid value for {key}: {message}")]
    #[diagnostic(code(config::invalid_value))]
    InvalidValue { key: String, message: String },
}

/// Top-level simulator error
#[derive(Error, Debug, Diagnostic)]
pub enum SimError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(code(sim::memory))]
    Memory(#[from] MemoryError),

    #[error(transparent)]
    #[diagnostic(code(sim::process))]
    Process(#[from] ProcessError),
}

pub type SimResult<T> = Result<T, SimError>;
