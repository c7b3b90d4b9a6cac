//! Voice validation against the catalog
//!
//! The structured check is scoped to a language and tier and requires the
//! gender to match. The legacy check accepts a bare name found anywhere in
//! the catalog.

use crate::catalog::VoiceCatalog;
use crate::voice::{VoiceChoice, VoiceConfiguration, VoiceSelection};
use duet_core::{Error, Result};
use tracing::debug;

/// Structured check: language, then tier, then a record with equal name and gender
pub fn is_valid_selection(catalog: &VoiceCatalog, selection: &VoiceSelection) -> bool {
    let Some(tiers) = catalog.tiers(&selection.language) else {
        debug!(language = %selection.language, "Unknown voice language");
        return false;
    };

    let Some(records) = tiers.get(&selection.tier) else {
        debug!(language = %selection.language, tier = %selection.tier, "Unknown voice tier");
        return false;
    };

    records
        .iter()
        .any(|record| record.name == selection.name && record.gender == selection.gender)
}

/// Legacy check: the name exists in any language and tier
pub fn is_valid_voice_name(catalog: &VoiceCatalog, name: &str) -> bool {
    catalog.iter_voices().any(|(_, _, record)| record.name == name)
}

impl VoiceChoice {
    pub fn is_valid(&self, catalog: &VoiceCatalog) -> bool {
        match self {
            VoiceChoice::Structured(selection) => is_valid_selection(catalog, selection),
            VoiceChoice::Legacy(name) => is_valid_voice_name(catalog, name),
        }
    }
}

/// Check both roles, reporting the first failing one by field name
pub fn validate_voice_configuration(
    catalog: &VoiceCatalog,
    voices: &VoiceConfiguration,
    field_prefix: &str,
) -> Result<()> {
    for (role, choice) in [("question", &voices.question), ("answer", &voices.answer)] {
        if !choice.is_valid(catalog) {
            return Err(Error::InvalidVoice {
                field: format!("{}.{}", field_prefix, role),
                voice: choice.to_string(),
            });
        }
    }
    Ok(())
}
