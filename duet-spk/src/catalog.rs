//! Voice catalog: language → tier → voices
//!
//! The catalog is loaded once at startup and never mutated afterwards, so it
//! is shared behind an `Arc` by every request.

use crate::error::CatalogError;
use crate::voice::{Gender, VoiceRecord};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Voices for one language, grouped by tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageEntry {
    pub language_code: String,
    pub voices: BTreeMap<String, Vec<VoiceRecord>>,
}

/// Immutable table of available voices
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VoiceCatalog {
    languages: BTreeMap<String, LanguageEntry>,
}

/// Where the process catalog came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CatalogOrigin {
    Resource { path: PathBuf },
    BuiltinFallback { reason: String },
}

/// Outcome of the startup load
#[derive(Debug, Clone)]
pub struct CatalogLoad {
    pub catalog: VoiceCatalog,
    pub origin: CatalogOrigin,
}

impl VoiceCatalog {
    pub fn new(languages: BTreeMap<String, LanguageEntry>) -> Result<Self, CatalogError> {
        let catalog = Self { languages };
        catalog.check()?;
        Ok(catalog)
    }

    /// Load from `path`, falling back to the built-in catalog on any failure
    pub fn load(path: &Path) -> CatalogLoad {
        match Self::from_file(path) {
            Ok(catalog) => {
                info!(
                    path = %path.display(),
                    languages = catalog.len(),
                    voices = catalog.voice_count(),
                    "Voice catalog loaded"
                );
                CatalogLoad {
                    catalog,
                    origin: CatalogOrigin::Resource {
                        path: path.to_path_buf(),
                    },
                }
            }
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "Failed to load voice catalog, using built-in fallback"
                );
                CatalogLoad {
                    catalog: Self::builtin(),
                    origin: CatalogOrigin::BuiltinFallback {
                        reason: e.to_string(),
                    },
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, CatalogError> {
        let catalog: VoiceCatalog = serde_json::from_str(content)?;
        catalog.check()?;
        Ok(catalog)
    }

    /// Small catalog used when the data file is unavailable. Covers every
    /// provider default voice.
    pub fn builtin() -> Self {
        let mut voices = BTreeMap::new();
        voices.insert(
            "Studio".to_string(),
            vec![
                VoiceRecord::new("en-US-Studio-O", Gender::Female),
                VoiceRecord::new("en-US-Studio-Q", Gender::Male),
            ],
        );
        voices.insert(
            "Journey".to_string(),
            vec![
                VoiceRecord::new("en-US-Journey-D", Gender::Male),
                VoiceRecord::new("en-US-Journey-F", Gender::Female),
                VoiceRecord::new("en-US-Journey-O", Gender::Female),
            ],
        );
        voices.insert(
            "Neural2".to_string(),
            vec![
                VoiceRecord::new("en-US-Neural2-A", Gender::Male),
                VoiceRecord::new("en-US-Neural2-C", Gender::Female),
                VoiceRecord::new("en-US-Neural2-D", Gender::Male),
                VoiceRecord::new("en-US-Neural2-F", Gender::Female),
            ],
        );

        let mut languages = BTreeMap::new();
        languages.insert(
            "English (US)".to_string(),
            LanguageEntry {
                language_code: "en-US".to_string(),
                voices,
            },
        );
        Self { languages }
    }

    fn check(&self) -> Result<(), CatalogError> {
        if self.languages.is_empty() {
            return Err(CatalogError::Empty);
        }

        for (language, entry) in &self.languages {
            for (tier, records) in &entry.voices {
                let mut seen = HashSet::new();
                for record in records {
                    if !seen.insert(record.name.as_str()) {
                        return Err(CatalogError::DuplicateVoice {
                            language: language.clone(),
                            tier: tier.clone(),
                            name: record.name.clone(),
                        });
                    }
                }
            }
        }

        Ok(())
    }

    /// Full catalog
    pub fn languages(&self) -> &BTreeMap<String, LanguageEntry> {
        &self.languages
    }

    pub fn language(&self, label: &str) -> Option<&LanguageEntry> {
        self.languages.get(label)
    }

    /// Tier table for a language, `None` when the language is unknown
    pub fn tiers(&self, label: &str) -> Option<&BTreeMap<String, Vec<VoiceRecord>>> {
        self.languages.get(label).map(|entry| &entry.voices)
    }

    pub fn voices(&self, label: &str, tier: &str) -> Option<&[VoiceRecord]> {
        self.tiers(label)
            .and_then(|tiers| tiers.get(tier))
            .map(Vec::as_slice)
    }

    pub fn language_labels(&self) -> impl Iterator<Item = &str> {
        self.languages.keys().map(String::as_str)
    }

    /// Every (language, tier, record) triple in catalog order
    pub fn iter_voices(&self) -> impl Iterator<Item = (&str, &str, &VoiceRecord)> {
        self.languages.iter().flat_map(|(language, entry)| {
            entry.voices.iter().flat_map(move |(tier, records)| {
                records
                    .iter()
                    .map(move |record| (language.as_str(), tier.as_str(), record))
            })
        })
    }

    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    pub fn voice_count(&self) -> usize {
        self.iter_voices().count()
    }
}
