//! Error types for duet-gen

use thiserror::Error;

/// Failures reported by a generation library
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Failed to start generator '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Generator exited with status {status}: {stderr}")]
    Failed { status: String, stderr: String },

    #[error("Generator produced no artifact path")]
    EmptyOutput,

    #[error("Failed to encode generation call: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Library(String),
}
