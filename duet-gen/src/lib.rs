//! duet-gen: podcast generation orchestration
//!
//! Wraps the external generation library behind [`GenerationLibrary`] and
//! runs the transcript and audio operations on top of the voice catalog.

pub mod error;
pub mod request;
pub mod library;
pub mod command;
pub mod storage;
pub mod orchestrator;

pub use error::GenerationError;
pub use request::{AudioRequest, ContentSources, TranscriptRequest};
pub use library::{GenerationCall, GenerationLibrary, TtsPayload};
pub use command::CommandGenerator;
pub use storage::ArtifactStorage;
pub use orchestrator::{AudioArtifact, Orchestrator, TranscriptArtifact};
