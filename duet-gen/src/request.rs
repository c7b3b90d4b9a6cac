//! Caller request shapes for the two generation operations

use duet_spk::conversation::ConversationConfigInput;
use duet_spk::model::ModelSelectionInput;
use duet_spk::provider::SpeechConfigInput;
use serde::{Deserialize, Deserializer, Serialize};

/// List field that also accepts a single comma-separated string, as sent by
/// urlencoded forms
fn string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrList {
        List(Vec<String>),
        Joined(String),
    }

    Ok(match Option::<StringOrList>::deserialize(deserializer)? {
        Some(StringOrList::List(items)) => items,
        Some(StringOrList::Joined(joined)) => joined
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect(),
        None => Vec::new(),
    })
}

/// Source material for a transcript. Several sources may be combined.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentSources {
    #[serde(deserialize_with = "string_or_list")]
    pub urls: Vec<String>,
    pub url_file: Option<String>,
    pub text: Option<String>,
    pub topic: Option<String>,
    #[serde(deserialize_with = "string_or_list")]
    pub image_paths: Vec<String>,
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

impl ContentSources {
    /// True when no source carries any content
    pub fn is_empty(&self) -> bool {
        self.urls.iter().all(|u| u.trim().is_empty())
            && is_blank(&self.url_file)
            && is_blank(&self.text)
            && is_blank(&self.topic)
            && self.image_paths.iter().all(|p| p.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptRequest {
    #[serde(deserialize_with = "string_or_list")]
    pub urls: Vec<String>,
    pub url_file: Option<String>,
    pub text: Option<String>,
    pub topic: Option<String>,
    #[serde(deserialize_with = "string_or_list")]
    pub image_paths: Vec<String>,
    pub conversation_config: Option<ConversationConfigInput>,
    pub llm_model_name: Option<String>,
    pub api_key_label: Option<String>,
    pub is_local: Option<bool>,
    pub longform: Option<bool>,
}

impl TranscriptRequest {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn sources(&self) -> ContentSources {
        ContentSources {
            urls: self.urls.clone(),
            url_file: self.url_file.clone(),
            text: self.text.clone(),
            topic: self.topic.clone(),
            image_paths: self.image_paths.clone(),
        }
    }

    pub fn model_selection(&self) -> ModelSelectionInput {
        ModelSelectionInput {
            llm_model_name: self.llm_model_name.clone(),
            api_key_label: self.api_key_label.clone(),
            is_local: self.is_local,
            longform: self.longform,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioRequest {
    pub transcript_file: Option<String>,
    pub tts_config: Option<SpeechConfigInput>,
    pub conversation_config: Option<ConversationConfigInput>,
    pub llm_model_name: Option<String>,
    pub api_key_label: Option<String>,
    pub is_local: Option<bool>,
    pub longform: Option<bool>,
}

impl AudioRequest {
    pub fn for_transcript(path: impl Into<String>) -> Self {
        Self {
            transcript_file: Some(path.into()),
            ..Default::default()
        }
    }

    pub fn model_selection(&self) -> ModelSelectionInput {
        ModelSelectionInput {
            llm_model_name: self.llm_model_name.clone(),
            api_key_label: self.api_key_label.clone(),
            is_local: self.is_local,
            longform: self.longform,
        }
    }
}
