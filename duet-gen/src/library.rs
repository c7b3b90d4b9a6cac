//! Seam to the external generation library

use crate::error::GenerationError;
use crate::request::ContentSources;
use async_trait::async_trait;
use duet_spk::conversation::ConversationConfig;
use duet_spk::model::ModelSelection;
use duet_spk::provider::SpeechProvider;
use serde::Serialize;
use std::path::PathBuf;

/// Flat TTS settings the library expects: provider id and two voice names
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TtsPayload {
    pub tts_model: SpeechProvider,
    pub question: String,
    pub answer: String,
}

/// The single call shape accepted by a generation library
#[derive(Debug, Clone, Serialize)]
pub struct GenerationCall {
    pub sources: ContentSources,
    pub conversation: ConversationConfig,
    /// Existing transcript to synthesize, for audio calls
    pub transcript_file: Option<PathBuf>,
    pub tts: Option<TtsPayload>,
    pub model: ModelSelection,
    pub transcript_only: bool,
    /// Directory the library writes its artifact into
    pub output_dir: PathBuf,
    /// Scratch directory for this call only
    pub temp_dir: Option<PathBuf>,
}

impl GenerationCall {
    pub fn operation(&self) -> &'static str {
        if self.transcript_only {
            "transcript"
        } else {
            "audio"
        }
    }
}

/// Trait for generation backends
#[async_trait]
pub trait GenerationLibrary: Send + Sync {
    /// Run one generation call and return the produced artifact path
    async fn generate(&self, call: GenerationCall) -> Result<PathBuf, GenerationError>;

    /// Get backend name
    fn name(&self) -> &str;
}
