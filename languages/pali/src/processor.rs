use std::path::Path;
use std::sync::Arc;

use unicode_normalization::UnicodeNormalization;
use vacana_config::dictionary::DictionaryConfig;
use vacana_core::dictionary::{DictEntry, Dictionary, LoadError};
use vacana_core::error::GlossError;
use vacana_core::gloss::{Analysis, Report, SourceKind};
use vacana_core::language::{LanguageProcessor, Token};
use vacana_core::preprocess::{DefaultPreprocessor, Preprocessor};

use crate::cache::FallbackCache;
use crate::fallback::{FlatDictionary, FlatDictionaryLoader};
use crate::store::DpdStore;

/// Which dictionary the caller asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceSelection {
    /// DPD SQLite store first, flat dictionary as per-word fallback
    #[default]
    Primary,
    /// Flat dictionary only
    Fallback,
}

/// One source in the ordered lookup chain. Sources are tried in sequence;
/// the first hit wins, so an earlier source always shadows a later one.
pub enum LexiconSource {
    Store(DpdStore),
    Flat(Arc<FlatDictionary>),
}

impl LexiconSource {
    fn kind(&self) -> SourceKind {
        match self {
            LexiconSource::Store(_) => SourceKind::Primary,
            LexiconSource::Flat(_) => SourceKind::Fallback,
        }
    }

    fn lookup_exact(&self, query: &str) -> Option<DictEntry> {
        match self {
            LexiconSource::Store(store) => store.lookup_exact(query),
            LexiconSource::Flat(dict) => dict.lookup_exact(query),
        }
    }

    fn name(&self) -> String {
        match self {
            LexiconSource::Store(store) => store.metadata().name,
            LexiconSource::Flat(dict) => dict.metadata().name,
        }
    }
}

/// Pali language processor
pub struct PaliProcessor {
    sources: Vec<LexiconSource>,
}

impl PaliProcessor {
    /// Build the lookup chain for a source selection. A primary store that
    /// cannot be opened or validated downgrades the chain to the flat
    /// dictionary alone; only "no source usable at all" is an error.
    pub fn from_config(
        selection: SourceSelection,
        config: &DictionaryConfig,
    ) -> Result<Self, GlossError> {
        let mut sources = Vec::new();

        if selection == SourceSelection::Primary {
            let store_path = config.resolve_store_path();
            match DpdStore::open(&store_path) {
                Ok(store) => sources.push(LexiconSource::Store(store)),
                Err(e) => tracing::warn!(
                    "DPD store unavailable at {}: {e}; using flat dictionary only",
                    store_path.display()
                ),
            }
        }

        match Self::load_flat(config) {
            Ok(dict) => sources.push(LexiconSource::Flat(dict)),
            Err(e) if sources.is_empty() => return Err(e.into()),
            Err(e) => tracing::warn!("Flat dictionary unavailable: {e}"),
        }

        Ok(Self { sources })
    }

    /// Flat dictionary: configured file (through the process-wide cache)
    /// when it loads, embedded data otherwise
    fn load_flat(config: &DictionaryConfig) -> Result<Arc<FlatDictionary>, LoadError> {
        if let Some(path) = &config.fallback_path {
            match FallbackCache::shared().get_or_load(Path::new(path)) {
                Ok(dict) => return Ok(dict),
                Err(e) => {
                    tracing::warn!("Failed to load dictionary from {path}: {e}");
                }
            }
        }

        FlatDictionaryLoader::load_embedded().map(Arc::new)
    }

    /// Processor over an explicit source chain
    pub fn with_sources(sources: Vec<LexiconSource>) -> Self {
        Self { sources }
    }

    /// Names of the chain's sources in lookup order, for diagnostics
    pub fn source_names(&self) -> Vec<String> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    /// Run the whole pipeline on one block of text
    pub fn analyze(&self, text: &str) -> Result<Report, GlossError> {
        let text = DefaultPreprocessor.process(text)?;
        let analyses = self
            .tokenize(&text)
            .iter()
            .map(|token| self.lookup(token))
            .collect();
        Ok(Report::new(analyses))
    }
}

fn is_edge_punctuation(c: char) -> bool {
    c.is_ascii_punctuation()
        || matches!(c, '“' | '”' | '‘' | '’' | '…' | '–' | '—' | '।' | '॥')
}

impl LanguageProcessor for PaliProcessor {
    fn language_code(&self) -> &str {
        "pi"
    }

    /// NFC + lowercase; the dataset keys spell the anusvara as ṃ, so the
    /// ṁ variant is folded into it. All other diacritics pass through
    /// untouched.
    fn normalize(&self, text: &str) -> String {
        text.nfc()
            .collect::<String>()
            .to_lowercase()
            .replace('ṁ', "ṃ")
    }

    /// Split on whitespace, strip punctuation from token edges, keep
    /// original order and duplicates. Pure-punctuation tokens are dropped.
    fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut offset = 0;

        for raw in text.split_whitespace() {
            let position = text[offset..]
                .find(raw)
                .map(|i| offset + i)
                .unwrap_or(offset);
            offset = position + raw.len();

            let surface = raw.trim_matches(is_edge_punctuation);
            if surface.is_empty() {
                continue;
            }

            tokens.push(Token {
                surface: surface.to_string(),
                normalized: self.normalize(surface),
                position,
            });
        }

        tokens
    }

    fn lookup(&self, token: &Token) -> Analysis {
        for source in &self.sources {
            if let Some(entry) = source.lookup_exact(&token.normalized) {
                return Analysis::resolved(token.clone(), entry, source.kind());
            }
        }

        Analysis::missing(token.clone())
    }
}
