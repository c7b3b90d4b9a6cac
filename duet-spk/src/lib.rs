//! duet-spk: voices and speech configuration for two-voice podcasts
//!
//! Provides:
//! - The voice catalog (language → tier → voices), loaded once with a built-in fallback
//! - Structured and legacy voice validation against the catalog
//! - Normalization of conversation, speech-provider and model-selection input

pub mod error;
pub mod voice;
pub mod catalog;
pub mod validator;
pub mod provider;
pub mod conversation;
pub mod model;

pub use error::CatalogError;
pub use voice::{Gender, VoiceChoice, VoiceConfiguration, VoiceConfigurationInput, VoiceRecord, VoiceSelection};
pub use catalog::{CatalogLoad, CatalogOrigin, LanguageEntry, VoiceCatalog};
pub use validator::{is_valid_selection, is_valid_voice_name, validate_voice_configuration};
pub use provider::{ProviderSettings, ProviderSettingsInput, SpeechConfig, SpeechConfigInput, SpeechProvider};
pub use conversation::{ConversationConfig, ConversationConfigInput};
pub use model::{ModelSelection, ModelSelectionInput};
