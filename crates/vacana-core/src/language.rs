use crate::gloss::Analysis;

/// Text processing and lookup interface for language implementations.
/// `Send` only: implementations may hold a live database connection, and the
/// pipeline is synchronous per invocation.
pub trait LanguageProcessor: Send {
    /// Language identifier (ISO 639 code: "pi", "sa", etc.)
    fn language_code(&self) -> &str;

    /// Normalize text for dictionary lookup
    fn normalize(&self, text: &str) -> String;

    /// Break text into processable tokens
    fn tokenize(&self, text: &str) -> Vec<Token>;

    /// Resolve a token against the dictionary source chain
    fn lookup(&self, token: &Token) -> Analysis;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub surface: String,
    pub normalized: String,
    pub position: usize,
}
