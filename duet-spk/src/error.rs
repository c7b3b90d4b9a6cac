//! Error types for duet-spk

use thiserror::Error;

/// Reasons a catalog resource could not be used
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Catalog contains no languages")]
    Empty,

    #[error("Duplicate voice '{name}' in {language} / {tier}")]
    DuplicateVoice {
        language: String,
        tier: String,
        name: String,
    },
}
