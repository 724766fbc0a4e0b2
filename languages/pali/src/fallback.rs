use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use vacana_core::dictionary::{DictEntry, Dictionary, DictionaryMetadata, LoadError, PartOfSpeech};

/// Flat dictionary: normalized headword → entry, loaded once from JSON
pub struct FlatDictionary {
    entries: HashMap<String, DictEntry>,
}

// JSON structure of the flat dictionary artifact
#[derive(Debug, Deserialize)]
struct JsonEntry {
    part_of_speech: String,
    #[serde(default)]
    morphology: String,
    meaning: String,
    #[serde(default)]
    translation: Option<String>,
    #[serde(default)]
    root: Option<String>,
    #[serde(default)]
    sanskrit: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl FlatDictionary {
    /// Parse a `{ headword: { fields... } }` JSON document
    pub fn from_json(json_str: &str) -> Result<Self, LoadError> {
        let raw: HashMap<String, JsonEntry> =
            serde_json::from_str(json_str).map_err(|e| LoadError::ParseError(e.to_string()))?;

        let entries = raw
            .into_iter()
            .map(|(headword, json)| {
                let entry = DictEntry {
                    headword: headword.clone(),
                    part_of_speech: PartOfSpeech::from_tag(&json.part_of_speech),
                    morphology: json.morphology,
                    meaning: json.meaning,
                    translation: non_empty(json.translation),
                    root: non_empty(json.root),
                    sanskrit: non_empty(json.sanskrit),
                };
                (headword, entry)
            })
            .collect();

        Ok(Self { entries })
    }

    /// Get the number of entries in the dictionary
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }
}

impl Dictionary for FlatDictionary {
    fn lookup_exact(&self, query: &str) -> Option<DictEntry> {
        self.entries.get(query).cloned()
    }

    fn metadata(&self) -> DictionaryMetadata {
        DictionaryMetadata {
            name: "pali_dictionary.json".to_string(),
            language: "pi".to_string(),
            entry_count: self.entries.len(),
        }
    }
}

pub struct FlatDictionaryLoader;

impl FlatDictionaryLoader {
    /// Load embedded dictionary data
    pub fn load_embedded() -> Result<FlatDictionary, LoadError> {
        let json = include_str!("../data/pali_dictionary.json");
        tracing::info!("Loading embedded Pali dictionary...");
        let dict = FlatDictionary::from_json(json)?;
        tracing::info!("Loaded {} dictionary entries", dict.entry_count());
        Ok(dict)
    }

    /// Load dictionary from file path
    pub fn load_from_file(path: &Path) -> Result<FlatDictionary, LoadError> {
        if !path.exists() {
            return Err(LoadError::FileNotFound(path.display().to_string()));
        }

        tracing::info!("Loading Pali dictionary from file: {}", path.display());
        let json = std::fs::read_to_string(path)?;
        let dict = FlatDictionary::from_json(&json)?;
        tracing::info!("Loaded {} dictionary entries from file", dict.entry_count());
        Ok(dict)
    }
}
