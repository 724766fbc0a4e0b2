use unicode_normalization::UnicodeNormalization;

use crate::error::GlossError;

pub trait Preprocessor {
    // Default Pali preprocessor
    fn process(&self, text: &str) -> Result<String, GlossError> {
        let text = text.trim();

        if text.is_empty() {
            return Err(GlossError::EmptyInput);
        }

        // Reject binary payloads early; newlines and tabs are ordinary
        // token separators and pass through.
        if text
            .chars()
            .any(|c| c == '\0' || c == char::REPLACEMENT_CHARACTER || (c.is_control() && !c.is_whitespace()))
        {
            return Err(GlossError::InvalidInput(
                "input contains non-text bytes".to_string(),
            ));
        }

        // Unicode normalization (NFC). NFC, not NFKC: Pali diacritics must
        // compose to the same code points the dictionary keys use without
        // any compatibility folding.
        Ok(text.nfc().collect())
    }
}

pub struct DefaultPreprocessor;
impl Preprocessor for DefaultPreprocessor {}
