//! Voice records and caller voice selections

use serde::{Deserialize, Serialize};
use std::fmt;

/// Voice gender as tagged in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Gender {
    #[serde(alias = "male", alias = "Male")]
    Male,
    #[serde(alias = "female", alias = "Female")]
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "MALE",
            Gender::Female => "FEMALE",
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Gender::Male => Gender::Female,
            Gender::Female => Gender::Male,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single synthesizable voice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceRecord {
    pub name: String,
    pub gender: Gender,
}

impl VoiceRecord {
    pub fn new(name: impl Into<String>, gender: Gender) -> Self {
        Self {
            name: name.into(),
            gender,
        }
    }
}

/// Fully qualified reference into the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceSelection {
    pub language: String,
    pub tier: String,
    pub name: String,
    pub gender: Gender,
}

impl VoiceSelection {
    pub fn new(
        language: impl Into<String>,
        tier: impl Into<String>,
        name: impl Into<String>,
        gender: Gender,
    ) -> Self {
        Self {
            language: language.into(),
            tier: tier.into(),
            name: name.into(),
            gender,
        }
    }
}

impl fmt::Display for VoiceSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} / {} / {})", self.name, self.language, self.tier, self.gender)
    }
}

/// A voice as the caller may send it: structured, or a bare legacy name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VoiceChoice {
    Structured(VoiceSelection),
    Legacy(String),
}

impl VoiceChoice {
    /// Flat voice name handed to the generation library
    pub fn voice_name(&self) -> &str {
        match self {
            VoiceChoice::Structured(selection) => &selection.name,
            VoiceChoice::Legacy(name) => name,
        }
    }
}

impl From<VoiceSelection> for VoiceChoice {
    fn from(selection: VoiceSelection) -> Self {
        VoiceChoice::Structured(selection)
    }
}

impl fmt::Display for VoiceChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VoiceChoice::Structured(selection) => selection.fmt(f),
            VoiceChoice::Legacy(name) => f.write_str(name),
        }
    }
}

/// Voice pair for the two conversation roles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceConfiguration {
    pub question: VoiceChoice,
    pub answer: VoiceChoice,
}

/// Partially specified voice pair
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceConfigurationInput {
    pub question: Option<VoiceChoice>,
    pub answer: Option<VoiceChoice>,
}

impl VoiceConfigurationInput {
    /// Fill missing roles from `defaults`
    pub fn normalize(self, defaults: VoiceConfiguration) -> VoiceConfiguration {
        VoiceConfiguration {
            question: self.question.unwrap_or(defaults.question),
            answer: self.answer.unwrap_or(defaults.answer),
        }
    }
}

impl From<VoiceConfiguration> for VoiceConfigurationInput {
    fn from(voices: VoiceConfiguration) -> Self {
        Self {
            question: Some(voices.question),
            answer: Some(voices.answer),
        }
    }
}
