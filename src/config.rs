//! Engine configuration
//!
//! Loaded from TOML. Every field has a default, so an empty file (or no file
//! at all) yields the reference behaviour.

use crate::error::{LexiconError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Capacity of the result cache in the reference behaviour
pub const DEFAULT_CACHE_CAPACITY: usize = 10_000;

/// How intent trigger keywords are matched against a query
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordMatch {
    /// Keyword occurs anywhere in the query
    #[default]
    Substring,

    /// Keyword occurs at the start of a word in the query
    WordPrefix,
}

/// Main engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum number of cached lookups before FIFO eviction
    pub cache_capacity: usize,

    /// Intent keyword matching rule
    pub keyword_match: KeywordMatch,

    /// Also index translation targets so lookups work in both directions
    pub index_reverse_translations: bool,

    /// Fall back to built-in phrases when no dictionary defines a pool
    pub builtin_responses: bool,

    /// Register the embedded `main` dictionary at startup
    pub include_builtin_dictionary: bool,

    pub supplementary: SupplementaryConfig,
}

/// Dictionaries fetched in the background after startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupplementaryConfig {
    /// File paths or http(s) URLs of dictionary documents
    pub sources: Vec<String>,

    /// Wait before the first fetch (milliseconds)
    pub delay_ms: u64,

    /// Per-request timeout for URL sources (seconds)
    pub timeout_secs: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            keyword_match: KeywordMatch::Substring,
            index_reverse_translations: true,
            builtin_responses: true,
            include_builtin_dictionary: true,
            supplementary: SupplementaryConfig::default(),
        }
    }
}

impl Default for SupplementaryConfig {
    fn default() -> Self {
        Self {
            sources: Vec::new(),
            delay_ms: 0,
            timeout_secs: 10,
        }
    }
}

impl SupplementaryConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl EngineConfig {
    /// Load configuration from TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.cache_capacity == 0 {
            return Err(LexiconError::Config(
                "cache_capacity must be at least 1".to_string(),
            ));
        }

        if self.supplementary.timeout_secs == 0 {
            return Err(LexiconError::Config(
                "supplementary.timeout_secs must be at least 1".to_string(),
            ));
        }

        if let Some(blank) = self.supplementary.sources.iter().find(|s| s.trim().is_empty()) {
            return Err(LexiconError::Config(format!(
                "supplementary.sources contains a blank entry: {:?}",
                blank
            )));
        }

        Ok(())
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| LexiconError::Config(e.to_string()))
    }

    /// Save configuration to TOML file
    pub fn to_file(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.cache_capacity, 10_000);
        assert_eq!(config.keyword_match, KeywordMatch::Substring);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = EngineConfig::from_toml("").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_validate_zero_capacity() {
        let config = EngineConfig {
            cache_capacity: 0,
            ..Default::default()
        };

        let result = config.validate();
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("cache_capacity must be at least 1"));
    }

    #[test]
    fn test_validate_blank_source() {
        let mut config = EngineConfig::default();
        config.supplementary.sources.push("  ".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_toml() {
        let toml_str = r#"
            cache_capacity = 64
            keyword_match = "word_prefix"
            index_reverse_translations = false

            [supplementary]
            sources = ["dictionaries/norwegian-verbs.json", "https://example.org/norwegian-phrases.json"]
            delay_ms = 2000
        "#;

        let config = EngineConfig::from_toml(toml_str).unwrap();
        assert_eq!(config.cache_capacity, 64);
        assert_eq!(config.keyword_match, KeywordMatch::WordPrefix);
        assert!(!config.index_reverse_translations);
        assert!(config.builtin_responses);
        assert_eq!(config.supplementary.sources.len(), 2);
        assert_eq!(config.supplementary.delay(), Duration::from_secs(2));
        assert_eq!(config.supplementary.timeout_secs, 10);
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lexicon.toml");

        let mut config = EngineConfig::default();
        config.cache_capacity = 128;
        config.to_file(&path).unwrap();

        let loaded = EngineConfig::from_file(&path).unwrap();
        assert_eq!(loaded.cache_capacity, 128);
    }
}
