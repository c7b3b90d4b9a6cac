//! Tests for conversation, speech and model-selection normalization

use duet_core::Error;
use duet_spk::conversation::{ConversationConfig, ConversationConfigInput};
use duet_spk::model::{ModelSelection, ModelSelectionInput};
use duet_spk::provider::{SpeechConfigInput, SpeechProvider};
use duet_spk::voice::{Gender, VoiceChoice, VoiceSelection};
use proptest::prelude::*;

fn with_creativity(creativity: f64) -> ConversationConfigInput {
    ConversationConfigInput {
        creativity: Some(creativity),
        ..Default::default()
    }
}

#[test]
fn test_creativity_bounds() {
    assert!(with_creativity(0.0).normalize().is_ok());
    assert!(with_creativity(1.0).normalize().is_ok());
    assert!(with_creativity(0.5).normalize().is_ok());
    assert!(with_creativity(2.0).normalize().is_err());
    assert!(with_creativity(-1.0).normalize().is_err());
}

#[test]
fn test_min_chunk_size_bounds() {
    let at = |size: u32| ConversationConfigInput {
        min_chunk_size: Some(size),
        ..Default::default()
    };
    assert!(at(100).normalize().is_ok());
    match at(99).normalize() {
        Err(Error::InvalidConfig { field, message }) => {
            assert_eq!(field, "conversation_config.min_chunk_size");
            assert!(message.contains("100"));
        }
        other => panic!("Expected InvalidConfig, got {:?}", other),
    }
}

#[test]
fn test_max_num_chunks_bounds() {
    let at = |chunks: u32| ConversationConfigInput {
        max_num_chunks: Some(chunks),
        ..Default::default()
    };
    assert!(at(1).normalize().is_ok());
    assert!(at(0).normalize().is_err());
}

#[test]
fn test_defaults_table() {
    let config = ConversationConfig::default();
    assert_eq!(config.roles_person1, "main summarizer");
    assert_eq!(config.roles_person2, "questioner/clarifier");
    assert_eq!(
        config.dialogue_structure,
        vec!["Introduction", "Main Content Summary", "Conclusion"]
    );
    assert_eq!(config.output_language, "English");
    assert!(config.user_instructions.is_empty());

    let model = ModelSelection::default();
    assert!(!model.is_local);
    assert!(!model.longform);
}

#[test]
fn test_partial_json_input() {
    let input: ConversationConfigInput = serde_json::from_str(
        r#"{"conversation_style": ["calm"], "output_language": "French", "creativity": 0.2}"#,
    )
    .unwrap();
    let config = input.normalize().unwrap();
    assert_eq!(config.conversation_style, vec!["calm"]);
    assert_eq!(config.output_language, "French");
    assert_eq!(config.creativity, 0.2);
    assert_eq!(config.max_num_chunks, 8);
}

#[test]
fn test_speech_config_partial_role_override() {
    let input: SpeechConfigInput = serde_json::from_str(
        r#"{
            "default_tts_model": "google",
            "google": {
                "default_voices": {
                    "question": {"language": "English (UK)", "tier": "Neural2", "name": "en-GB-Neural2-B", "gender": "MALE"}
                }
            }
        }"#,
    )
    .unwrap();
    let config = input.normalize();
    let (provider, settings) = config.active().unwrap();

    assert_eq!(provider, SpeechProvider::Google);
    assert_eq!(
        settings.default_voices.question,
        VoiceChoice::Structured(VoiceSelection::new("English (UK)", "Neural2", "en-GB-Neural2-B", Gender::Male))
    );
    assert_eq!(
        settings.default_voices.answer,
        SpeechProvider::Google.default_settings().default_voices.answer
    );
}

#[test]
fn test_model_selection_rejects_blank_model() {
    let input = ModelSelectionInput {
        llm_model_name: Some("  ".to_string()),
        ..Default::default()
    };
    assert!(matches!(
        input.normalize(),
        Err(Error::InvalidConfig { ref field, .. }) if field == "llm_model_name"
    ));
}

#[test]
fn test_model_selection_idempotent() {
    let model = ModelSelectionInput {
        is_local: Some(true),
        ..Default::default()
    }
    .normalize()
    .unwrap();
    assert_eq!(ModelSelectionInput::from(model.clone()).normalize().unwrap(), model);
}

proptest! {
    #[test]
    fn test_conversation_normalize_idempotent(
        creativity in 0.0f64..=1.0,
        max_num_chunks in 1u32..64,
        min_chunk_size in 100u32..5000,
        style in prop::collection::vec("[a-z]{1,10}", 0..4),
        instructions in ".{0,40}",
    ) {
        let config = ConversationConfigInput {
            creativity: Some(creativity),
            max_num_chunks: Some(max_num_chunks),
            min_chunk_size: Some(min_chunk_size),
            conversation_style: Some(style),
            user_instructions: Some(instructions),
            ..Default::default()
        }
        .normalize()
        .unwrap();

        let again = ConversationConfigInput::from(config.clone()).normalize().unwrap();
        prop_assert_eq!(again, config);
    }

    #[test]
    fn test_out_of_range_creativity_rejected(creativity in prop_oneof![1.000001f64..100.0, -100.0f64..-0.000001]) {
        prop_assert!(with_creativity(creativity).normalize().is_err());
    }
}
