//! Transcript and audio operations
//!
//! Validation runs before any generation call: every client error is reported
//! without touching the generation library.

use crate::library::{GenerationCall, GenerationLibrary, TtsPayload};
use crate::request::{AudioRequest, TranscriptRequest};
use crate::storage::ArtifactStorage;
use duet_core::{Error, Result};
use duet_spk::catalog::VoiceCatalog;
use duet_spk::conversation::{ConversationConfig, ConversationConfigInput};
use duet_spk::model::{ModelSelection, ModelSelectionInput};
use duet_spk::validator::validate_voice_configuration;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
pub struct TranscriptArtifact {
    pub path: PathBuf,
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct AudioArtifact {
    pub path: PathBuf,
}

impl AudioArtifact {
    /// File name used for the download
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "podcast.mp3".to_string())
    }
}

pub struct Orchestrator {
    catalog: Arc<VoiceCatalog>,
    generator: Arc<dyn GenerationLibrary>,
    storage: ArtifactStorage,
    timeout: Option<Duration>,
}

impl Orchestrator {
    pub fn new(
        catalog: Arc<VoiceCatalog>,
        generator: Arc<dyn GenerationLibrary>,
        storage: ArtifactStorage,
    ) -> Self {
        Self {
            catalog,
            generator,
            storage,
            timeout: None,
        }
    }

    /// Bound every generation call; zero disables the deadline
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = (!timeout.is_zero()).then_some(timeout);
        self
    }

    pub fn catalog(&self) -> &VoiceCatalog {
        &self.catalog
    }

    pub fn storage(&self) -> &ArtifactStorage {
        &self.storage
    }

    pub fn generator_name(&self) -> &str {
        self.generator.name()
    }

    /// Generate a transcript and read it back
    pub async fn generate_transcript(&self, request: TranscriptRequest) -> Result<TranscriptArtifact> {
        let request_id = Uuid::new_v4();
        let sources = request.sources();
        if sources.is_empty() {
            warn!(%request_id, operation = "transcript", "Transcript request without any content source");
            return Err(Error::MissingField("text".to_string()));
        }

        let (conversation, model) = normalize_settings(
            request_id,
            "transcript",
            &request.conversation_config,
            request.model_selection(),
        )?;

        info!(
            %request_id,
            urls = sources.urls.len(),
            has_text = sources.text.is_some(),
            has_topic = sources.topic.is_some(),
            images = sources.image_paths.len(),
            llm_model = %model.llm_model_name,
            "Generating transcript"
        );

        let call = GenerationCall {
            sources,
            conversation,
            transcript_file: None,
            tts: None,
            model,
            transcript_only: true,
            output_dir: self.storage.transcripts_dir().to_path_buf(),
            temp_dir: None,
        };

        let path = self.run(request_id, call).await?;
        let content = read_transcript(request_id, &path).await?;

        info!(%request_id, path = %path.display(), bytes = content.len(), "Transcript generated");
        Ok(TranscriptArtifact { path, content })
    }

    /// Synthesize audio for an existing transcript
    pub async fn generate_audio(&self, request: AudioRequest) -> Result<AudioArtifact> {
        let request_id = Uuid::new_v4();

        let transcript = request
            .transcript_file
            .as_deref()
            .map(str::trim)
            .filter(|path| !path.is_empty())
            .ok_or_else(|| {
                warn!(%request_id, operation = "audio", "Audio request without a transcript file");
                Error::MissingField("transcript_file".to_string())
            })?;

        if !tokio::fs::try_exists(transcript).await.unwrap_or(false) {
            warn!(%request_id, operation = "audio", path = %transcript, "Transcript file not found");
            return Err(Error::TranscriptNotFound {
                path: transcript.to_string(),
            });
        }

        let speech = request.tts_config.clone().unwrap_or_default().normalize();
        let (provider, settings) = speech.active().map_err(|e| {
            warn!(%request_id, operation = "audio", provider = %speech.default_tts_model, "Unknown TTS provider");
            e
        })?;

        let field_prefix = format!("tts_config.{}.default_voices", provider);
        validate_voice_configuration(&self.catalog, &settings.default_voices, &field_prefix)
            .map_err(|e| {
                warn!(%request_id, operation = "audio", %provider, error = %e, "Voice validation failed");
                e
            })?;

        let (conversation, model) = normalize_settings(
            request_id,
            "audio",
            &request.conversation_config,
            request.model_selection(),
        )?;

        let tts = TtsPayload {
            tts_model: provider,
            question: settings.default_voices.question.voice_name().to_string(),
            answer: settings.default_voices.answer.voice_name().to_string(),
        };

        let temp_dir = self.storage.ensure_audio_temp_dir().await.map_err(|e| {
            error!(%request_id, operation = "audio", error = %e, "Failed to create audio temp directory");
            Error::Io(e)
        })?;

        info!(
            %request_id,
            transcript = %transcript,
            %provider,
            question = %tts.question,
            answer = %tts.answer,
            "Generating audio"
        );

        let call = GenerationCall {
            sources: Default::default(),
            conversation,
            transcript_file: Some(PathBuf::from(transcript)),
            tts: Some(tts),
            model,
            transcript_only: false,
            output_dir: self.storage.audio_dir().to_path_buf(),
            temp_dir: Some(temp_dir),
        };

        let path = self.run(request_id, call).await?;

        // The library's own success signal is not trusted
        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            error!(%request_id, operation = "audio", path = %path.display(), "Generated audio file not found");
            return Err(Error::ArtifactMissing {
                operation: "audio".to_string(),
                path: path.display().to_string(),
            });
        }

        info!(%request_id, path = %path.display(), "Audio generated");
        Ok(AudioArtifact { path })
    }

    async fn run(&self, request_id: Uuid, call: GenerationCall) -> Result<PathBuf> {
        let operation = call.operation();
        let generation = self.generator.generate(call);

        let outcome = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, generation).await {
                Ok(outcome) => outcome,
                Err(_) => {
                    error!(%request_id, operation, timeout = ?limit, "Generation timed out");
                    return Err(Error::Generation {
                        operation: operation.to_string(),
                        message: format!("timed out after {:?}", limit),
                    });
                }
            },
            None => generation.await,
        };

        outcome.map_err(|e| {
            error!(
                %request_id,
                operation,
                generator = %self.generator.name(),
                error = %e,
                "Generation failed"
            );
            Error::Generation {
                operation: operation.to_string(),
                message: e.to_string(),
            }
        })
    }
}

/// Normalize the conversation and model settings shared by both operations
fn normalize_settings(
    request_id: Uuid,
    operation: &'static str,
    conversation: &Option<ConversationConfigInput>,
    model: ModelSelectionInput,
) -> Result<(ConversationConfig, ModelSelection)> {
    let normalized = conversation
        .clone()
        .unwrap_or_default()
        .normalize()
        .and_then(|conversation| Ok((conversation, model.normalize()?)));

    normalized.map_err(|e| {
        warn!(%request_id, operation, error = %e, "Invalid generation settings");
        e
    })
}

/// Read a transcript as UTF-8, replacing invalid sequences
async fn read_transcript(request_id: Uuid, path: &Path) -> Result<String> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
        Err(e) => {
            error!(%request_id, operation = "transcript", path = %path.display(), error = %e, "Error reading transcript file");
            Err(Error::TranscriptRead {
                path: path.display().to_string(),
                message: e.to_string(),
            })
        }
    }
}
