/// Grammatical category of a headword.
///
/// The Digital Pali Dictionary tags entries with fine-grained abbreviations
/// (gender for nouns, tense/mood for verbs); `from_tag` folds those into the
/// broad categories used for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Participle,
    Adjective,
    Adverb,
    Pronoun,
    Numeral,
    Prefix,
    Indeclinable,
    Other(String),
}

impl PartOfSpeech {
    /// Map a DPD pos abbreviation to a category
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim() {
            "masc" | "fem" | "nt" | "noun" => PartOfSpeech::Noun,
            "pr" | "aor" | "fut" | "imp" | "opt" | "cond" | "perf" | "inf" | "abs" | "ger"
            | "verb" => PartOfSpeech::Verb,
            "pp" | "prp" | "ptp" => PartOfSpeech::Participle,
            "adj" => PartOfSpeech::Adjective,
            "adv" => PartOfSpeech::Adverb,
            "pron" => PartOfSpeech::Pronoun,
            "card" | "ordin" => PartOfSpeech::Numeral,
            "prefix" => PartOfSpeech::Prefix,
            "ind" | "abbrev" | "sandhi" | "idiom" => PartOfSpeech::Indeclinable,
            other => PartOfSpeech::Other(other.to_string()),
        }
    }

    /// Display label used in gloss output
    pub fn as_str(&self) -> &str {
        match self {
            PartOfSpeech::Noun => "noun",
            PartOfSpeech::Verb => "verb",
            PartOfSpeech::Participle => "participle",
            PartOfSpeech::Adjective => "adjective",
            PartOfSpeech::Adverb => "adverb",
            PartOfSpeech::Pronoun => "pronoun",
            PartOfSpeech::Numeral => "numeral",
            PartOfSpeech::Prefix => "prefix",
            PartOfSpeech::Indeclinable => "indeclinable",
            PartOfSpeech::Other(tag) => tag,
        }
    }
}

/// Single dictionary entry, read-only once loaded
#[derive(Debug, Clone, PartialEq)]
pub struct DictEntry {
    /// Normalized canonical headword
    pub headword: String,
    pub part_of_speech: PartOfSpeech,
    /// Free-text case/number/gender description, e.g. "masc. nom. sg."
    pub morphology: String,
    /// Primary gloss; multiple senses separated with "; "
    pub meaning: String,
    /// Secondary-language gloss
    pub translation: Option<String>,
    /// Etymological root label, e.g. "√dhar · 1 (bhvādi)"
    pub root: Option<String>,
    /// Sanskrit cognate
    pub sanskrit: Option<String>,
}

/// Dictionary lookup operations
pub trait Dictionary {
    /// Look up a normalized headword by exact match
    fn lookup_exact(&self, query: &str) -> Option<DictEntry>;

    /// Get dictionary metadata
    fn metadata(&self) -> DictionaryMetadata;
}

#[derive(Debug, Clone)]
pub struct DictionaryMetadata {
    pub name: String,
    pub language: String,
    pub entry_count: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noun_genders_fold_to_noun() {
        assert_eq!(PartOfSpeech::from_tag("masc"), PartOfSpeech::Noun);
        assert_eq!(PartOfSpeech::from_tag("fem"), PartOfSpeech::Noun);
        assert_eq!(PartOfSpeech::from_tag("nt"), PartOfSpeech::Noun);
    }

    #[test]
    fn unknown_tag_is_kept_verbatim() {
        let pos = PartOfSpeech::from_tag("ve");
        assert_eq!(pos, PartOfSpeech::Other("ve".to_string()));
        assert_eq!(pos.as_str(), "ve");
    }

    #[test]
    fn verb_tenses_fold_to_verb() {
        for tag in ["pr", "aor", "fut", "opt"] {
            assert_eq!(PartOfSpeech::from_tag(tag), PartOfSpeech::Verb);
        }
    }
}
