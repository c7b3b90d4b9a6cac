use thiserror::Error;

/// Caller-facing failure class. Client errors are never retried; server
/// errors carry downstream or artifact-integrity failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Client,
    Server,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0} is required")]
    MissingField(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidConfig { field: String, message: String },

    #[error("Transcript file not found: {path}")]
    TranscriptNotFound { path: String },

    #[error("Invalid TTS provider '{provider}' (expected one of: {expected})")]
    InvalidProvider { provider: String, expected: String },

    #[error("Invalid voice selection for {field}: {voice}")]
    InvalidVoice { field: String, voice: String },

    #[error("Failed to generate {operation}: {message}")]
    Generation { operation: String, message: String },

    #[error("Generated {operation} file not found: {path}")]
    ArtifactMissing { operation: String, path: String },

    #[error("Error reading transcript file {path}: {message}")]
    TranscriptRead { path: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl Error {
    pub fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Error::InvalidConfig {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            Error::MissingField(_)
            | Error::InvalidConfig { .. }
            | Error::TranscriptNotFound { .. }
            | Error::InvalidProvider { .. }
            | Error::InvalidVoice { .. } => ErrorClass::Client,
            Error::Generation { .. }
            | Error::ArtifactMissing { .. }
            | Error::TranscriptRead { .. }
            | Error::Io(_)
            | Error::Configuration(_) => ErrorClass::Server,
        }
    }

    /// Stable machine-readable code used in API error bodies
    pub fn code(&self) -> &'static str {
        match self {
            Error::MissingField(_) => "MISSING_FIELD",
            Error::InvalidConfig { .. } => "INVALID_CONFIG",
            Error::TranscriptNotFound { .. } => "TRANSCRIPT_NOT_FOUND",
            Error::InvalidProvider { .. } => "INVALID_PROVIDER",
            Error::InvalidVoice { .. } => "INVALID_VOICE",
            Error::Generation { .. } => "GENERATION_FAILED",
            Error::ArtifactMissing { .. } => "ARTIFACT_MISSING",
            Error::TranscriptRead { .. } => "TRANSCRIPT_READ_FAILED",
            Error::Io(_) => "IO_ERROR",
            Error::Configuration(_) => "CONFIGURATION_ERROR",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
