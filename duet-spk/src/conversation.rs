//! Conversation style configuration for transcript generation

use duet_core::{Error, Result};
use serde::{Deserialize, Serialize};

pub const MIN_CREATIVITY: f64 = 0.0;
pub const MAX_CREATIVITY: f64 = 1.0;
pub const MIN_NUM_CHUNKS: u32 = 1;
pub const MIN_CHUNK_SIZE: u32 = 100;

const FIELD_PREFIX: &str = "conversation_config";

/// Fully populated conversation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationConfig {
    pub conversation_style: Vec<String>,
    pub roles_person1: String,
    pub roles_person2: String,
    pub dialogue_structure: Vec<String>,
    pub output_language: String,
    pub engagement_techniques: Vec<String>,
    /// 0.0 (deterministic) to 1.0 (most creative)
    pub creativity: f64,
    pub user_instructions: String,
    pub max_num_chunks: u32,
    pub min_chunk_size: u32,
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            conversation_style: strings(&["engaging", "fast-paced", "enthusiastic"]),
            roles_person1: "main summarizer".to_string(),
            roles_person2: "questioner/clarifier".to_string(),
            dialogue_structure: strings(&["Introduction", "Main Content Summary", "Conclusion"]),
            output_language: "English".to_string(),
            engagement_techniques: strings(&["rhetorical questions", "anecdotes", "analogies", "humor"]),
            creativity: 1.0,
            user_instructions: String::new(),
            max_num_chunks: 8,
            min_chunk_size: 600,
        }
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

impl ConversationConfig {
    /// Check numeric bounds
    pub fn validate(&self) -> Result<()> {
        if !(MIN_CREATIVITY..=MAX_CREATIVITY).contains(&self.creativity) {
            return Err(Error::invalid_config(
                format!("{}.creativity", FIELD_PREFIX),
                format!(
                    "must be between {} and {} (got {})",
                    MIN_CREATIVITY, MAX_CREATIVITY, self.creativity
                ),
            ));
        }

        if self.max_num_chunks < MIN_NUM_CHUNKS {
            return Err(Error::invalid_config(
                format!("{}.max_num_chunks", FIELD_PREFIX),
                format!("must be at least {} (got {})", MIN_NUM_CHUNKS, self.max_num_chunks),
            ));
        }

        if self.min_chunk_size < MIN_CHUNK_SIZE {
            return Err(Error::invalid_config(
                format!("{}.min_chunk_size", FIELD_PREFIX),
                format!("must be at least {} (got {})", MIN_CHUNK_SIZE, self.min_chunk_size),
            ));
        }

        Ok(())
    }
}

/// Caller conversation configuration; omitted or null fields take defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversationConfigInput {
    pub conversation_style: Option<Vec<String>>,
    pub roles_person1: Option<String>,
    pub roles_person2: Option<String>,
    pub dialogue_structure: Option<Vec<String>>,
    pub output_language: Option<String>,
    pub engagement_techniques: Option<Vec<String>>,
    pub creativity: Option<f64>,
    pub user_instructions: Option<String>,
    pub max_num_chunks: Option<u32>,
    pub min_chunk_size: Option<u32>,
}

impl ConversationConfigInput {
    pub fn normalize(self) -> Result<ConversationConfig> {
        let defaults = ConversationConfig::default();
        let config = ConversationConfig {
            conversation_style: self.conversation_style.unwrap_or(defaults.conversation_style),
            roles_person1: self.roles_person1.unwrap_or(defaults.roles_person1),
            roles_person2: self.roles_person2.unwrap_or(defaults.roles_person2),
            dialogue_structure: self.dialogue_structure.unwrap_or(defaults.dialogue_structure),
            output_language: self.output_language.unwrap_or(defaults.output_language),
            engagement_techniques: self
                .engagement_techniques
                .unwrap_or(defaults.engagement_techniques),
            creativity: self.creativity.unwrap_or(defaults.creativity),
            user_instructions: self.user_instructions.unwrap_or(defaults.user_instructions),
            max_num_chunks: self.max_num_chunks.unwrap_or(defaults.max_num_chunks),
            min_chunk_size: self.min_chunk_size.unwrap_or(defaults.min_chunk_size),
        };
        config.validate()?;
        Ok(config)
    }
}

impl From<ConversationConfig> for ConversationConfigInput {
    fn from(config: ConversationConfig) -> Self {
        Self {
            conversation_style: Some(config.conversation_style),
            roles_person1: Some(config.roles_person1),
            roles_person2: Some(config.roles_person2),
            dialogue_structure: Some(config.dialogue_structure),
            output_language: Some(config.output_language),
            engagement_techniques: Some(config.engagement_techniques),
            creativity: Some(config.creativity),
            user_instructions: Some(config.user_instructions),
            max_num_chunks: Some(config.max_num_chunks),
            min_chunk_size: Some(config.min_chunk_size),
        }
    }
}
