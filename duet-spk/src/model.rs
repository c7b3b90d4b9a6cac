//! LLM model-selection metadata passed through to the generator

use duet_core::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSelection {
    pub llm_model_name: String,
    /// Name of the credential the generator should read, never the key itself
    pub api_key_label: String,
    pub is_local: bool,
    pub longform: bool,
}

impl Default for ModelSelection {
    fn default() -> Self {
        Self {
            llm_model_name: "gemini-1.5-pro-latest".to_string(),
            api_key_label: "GEMINI_API_KEY".to_string(),
            is_local: false,
            longform: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSelectionInput {
    pub llm_model_name: Option<String>,
    pub api_key_label: Option<String>,
    pub is_local: Option<bool>,
    pub longform: Option<bool>,
}

impl ModelSelectionInput {
    pub fn normalize(self) -> Result<ModelSelection> {
        let defaults = ModelSelection::default();
        let selection = ModelSelection {
            llm_model_name: self.llm_model_name.unwrap_or(defaults.llm_model_name),
            api_key_label: self.api_key_label.unwrap_or(defaults.api_key_label),
            is_local: self.is_local.unwrap_or(defaults.is_local),
            longform: self.longform.unwrap_or(defaults.longform),
        };

        if selection.llm_model_name.trim().is_empty() {
            return Err(Error::invalid_config("llm_model_name", "cannot be empty"));
        }
        if selection.api_key_label.trim().is_empty() {
            return Err(Error::invalid_config("api_key_label", "cannot be empty"));
        }

        Ok(selection)
    }
}

impl From<ModelSelection> for ModelSelectionInput {
    fn from(selection: ModelSelection) -> Self {
        Self {
            llm_model_name: Some(selection.llm_model_name),
            api_key_label: Some(selection.api_key_label),
            is_local: Some(selection.is_local),
            longform: Some(selection.longform),
        }
    }
}
