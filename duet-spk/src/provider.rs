//! Speech providers and their per-provider settings

use crate::voice::{Gender, VoiceChoice, VoiceConfiguration, VoiceConfigurationInput, VoiceSelection};
use duet_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Provider selected when the caller does not name one
pub const DEFAULT_TTS_MODEL: &str = "geminimulti";

const DEFAULT_LANGUAGE: &str = "English (US)";

/// Supported text-to-speech backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeechProvider {
    /// Multi-speaker dialogue synthesis
    GeminiMulti,
    Gemini,
    Google,
}

impl SpeechProvider {
    pub const ALL: [SpeechProvider; 3] = [
        SpeechProvider::GeminiMulti,
        SpeechProvider::Gemini,
        SpeechProvider::Google,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SpeechProvider::GeminiMulti => "geminimulti",
            SpeechProvider::Gemini => "gemini",
            SpeechProvider::Google => "google",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "geminimulti" => Some(SpeechProvider::GeminiMulti),
            "gemini" => Some(SpeechProvider::Gemini),
            "google" => Some(SpeechProvider::Google),
            _ => None,
        }
    }

    /// Comma-separated identifiers, for error messages
    pub fn expected() -> String {
        Self::ALL
            .iter()
            .map(|p| p.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn default_settings(&self) -> ProviderSettings {
        let (tier, question, answer, model) = match self {
            SpeechProvider::GeminiMulti => (
                "Studio",
                "en-US-Studio-Q",
                "en-US-Studio-O",
                Some("en-US-Studio-MultiSpeaker"),
            ),
            SpeechProvider::Gemini => ("Journey", "en-US-Journey-D", "en-US-Journey-O", None),
            SpeechProvider::Google => ("Neural2", "en-US-Neural2-D", "en-US-Neural2-F", None),
        };

        ProviderSettings {
            default_voices: VoiceConfiguration {
                question: VoiceChoice::Structured(VoiceSelection::new(
                    DEFAULT_LANGUAGE,
                    tier,
                    question,
                    Gender::Male,
                )),
                answer: VoiceChoice::Structured(VoiceSelection::new(
                    DEFAULT_LANGUAGE,
                    tier,
                    answer,
                    Gender::Female,
                )),
            },
            model: model.map(str::to_string),
        }
    }
}

impl fmt::Display for SpeechProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Voices and optional model for one provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSettings {
    pub default_voices: VoiceConfiguration,
    pub model: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettingsInput {
    pub default_voices: Option<VoiceConfigurationInput>,
    pub model: Option<String>,
}

impl ProviderSettingsInput {
    pub fn normalize(self, provider: SpeechProvider) -> ProviderSettings {
        let defaults = provider.default_settings();
        ProviderSettings {
            default_voices: self
                .default_voices
                .unwrap_or_default()
                .normalize(defaults.default_voices),
            model: self.model.or(defaults.model),
        }
    }
}

impl From<ProviderSettings> for ProviderSettingsInput {
    fn from(settings: ProviderSettings) -> Self {
        Self {
            default_voices: Some(settings.default_voices.into()),
            model: settings.model,
        }
    }
}

/// Per-provider settings plus the active-provider selector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// Caller's provider identifier, resolved by [`SpeechConfig::active`]
    pub default_tts_model: String,
    pub providers: BTreeMap<SpeechProvider, ProviderSettings>,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        SpeechConfigInput::default().normalize()
    }
}

impl SpeechConfig {
    /// Resolve the active provider and its settings
    pub fn active(&self) -> Result<(SpeechProvider, &ProviderSettings)> {
        let invalid = || Error::InvalidProvider {
            provider: self.default_tts_model.clone(),
            expected: SpeechProvider::expected(),
        };

        let provider = SpeechProvider::from_str(&self.default_tts_model).ok_or_else(invalid)?;
        let settings = self.providers.get(&provider).ok_or_else(invalid)?;
        Ok((provider, settings))
    }

    pub fn settings(&self, provider: SpeechProvider) -> Option<&ProviderSettings> {
        self.providers.get(&provider)
    }
}

/// Caller speech configuration; every provider record is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfigInput {
    pub default_tts_model: Option<String>,
    pub geminimulti: Option<ProviderSettingsInput>,
    pub gemini: Option<ProviderSettingsInput>,
    pub google: Option<ProviderSettingsInput>,
}

impl SpeechConfigInput {
    fn take(&mut self, provider: SpeechProvider) -> Option<ProviderSettingsInput> {
        match provider {
            SpeechProvider::GeminiMulti => self.geminimulti.take(),
            SpeechProvider::Gemini => self.gemini.take(),
            SpeechProvider::Google => self.google.take(),
        }
    }

    fn slot(&mut self, provider: SpeechProvider) -> &mut Option<ProviderSettingsInput> {
        match provider {
            SpeechProvider::GeminiMulti => &mut self.geminimulti,
            SpeechProvider::Gemini => &mut self.gemini,
            SpeechProvider::Google => &mut self.google,
        }
    }

    /// Populate every provider record. The selector is kept verbatim so the
    /// audio operation can reject an unknown provider in its own order.
    pub fn normalize(mut self) -> SpeechConfig {
        let providers = SpeechProvider::ALL
            .iter()
            .map(|&provider| {
                let input = self.take(provider).unwrap_or_default();
                (provider, input.normalize(provider))
            })
            .collect();

        SpeechConfig {
            default_tts_model: self
                .default_tts_model
                .unwrap_or_else(|| DEFAULT_TTS_MODEL.to_string()),
            providers,
        }
    }
}

impl From<SpeechConfig> for SpeechConfigInput {
    fn from(config: SpeechConfig) -> Self {
        let mut input = SpeechConfigInput {
            default_tts_model: Some(config.default_tts_model),
            ..Default::default()
        };
        for (provider, settings) in config.providers {
            *input.slot(provider) = Some(settings.into());
        }
        input
    }
}
