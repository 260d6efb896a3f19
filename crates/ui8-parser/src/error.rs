//! Parser error types for ui8-parser.

/// Errors that can occur while reading and analyzing a source file.
#[derive(Debug, thiserror::Error)]
pub enum ParserError {
    #[error("Parse failed for {path}: {message}")]
    ParseFailed { path: String, message: String },

    #[error("Language not supported: {0}")]
    UnsupportedLanguage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
