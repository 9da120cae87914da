//! Error types for the lexicon engine
//!
//! Lookups never fail: a query that matches nothing simply produces no
//! translation. Errors only surface at the edges, when dictionaries are
//! loaded, configuration is read, or the HTTP server starts.

use thiserror::Error;

/// Main error type for lexicon operations
#[derive(Error, Debug)]
pub enum LexiconError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON document could not be decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP request error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration could not be parsed or failed validation
    #[error("Configuration error: {0}")]
    Config(String),

    /// Supplementary source string is neither a path nor an http(s) URL
    #[error("Invalid dictionary source: {0}")]
    InvalidSource(String),

    /// Dictionary document has the wrong overall shape
    #[error("Invalid dictionary document: {0}")]
    InvalidDocument(String),

    /// A dictionary document was fetched but could not be used
    #[error("Failed to load dictionary '{name}': {reason}")]
    DictionaryLoad { name: String, reason: String },

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

/// Result type alias for lexicon operations
pub type Result<T> = std::result::Result<T, LexiconError>;

impl From<anyhow::Error> for LexiconError {
    fn from(err: anyhow::Error) -> Self {
        LexiconError::Other(err.to_string())
    }
}

impl From<toml::de::Error> for LexiconError {
    fn from(err: toml::de::Error) -> Self {
        LexiconError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LexiconError::DictionaryLoad {
            name: "norwegian-verbs".to_string(),
            reason: "404 Not Found".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to load dictionary 'norwegian-verbs': 404 Not Found"
        );
    }

    #[test]
    fn test_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{ not json").unwrap_err();
        let err: LexiconError = json_err.into();
        assert!(matches!(err, LexiconError::Serialization(_)));

        let toml_err = toml::from_str::<toml::Value>("= broken").unwrap_err();
        let err: LexiconError = toml_err.into();
        assert!(matches!(err, LexiconError::Config(_)));
    }
}
