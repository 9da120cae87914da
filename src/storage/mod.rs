//! Storage layer for the lexicon engine
//!
//! [`LexiconStore`] owns the named dictionaries; [`index::SearchIndex`]
//! flattens them for lookup. Both live in process memory only.

pub mod index;

pub use index::{normalize, SearchIndex};

use crate::types::{Dictionary, VocabularyEntry};
use indexmap::IndexMap;

/// Named dictionaries in registration order
#[derive(Debug, Clone, Default)]
pub struct LexiconStore {
    dictionaries: IndexMap<String, Dictionary>,
}

impl LexiconStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a dictionary, returning the one it replaced
    ///
    /// A replaced dictionary keeps its original registration slot.
    pub fn register(&mut self, name: impl Into<String>, dictionary: Dictionary) -> Option<Dictionary> {
        self.dictionaries.insert(name.into(), dictionary)
    }

    /// Registered names, oldest first
    pub fn list_dictionaries(&self) -> Vec<String> {
        self.dictionaries.keys().cloned().collect()
    }

    pub fn get(&self, name: &str) -> Option<&Dictionary> {
        self.dictionaries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.dictionaries.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Dictionary)> {
        self.dictionaries
            .iter()
            .map(|(name, dictionary)| (name.as_str(), dictionary))
    }

    pub fn len(&self) -> usize {
        self.dictionaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dictionaries.is_empty()
    }

    /// Responses from every dictionary defining any of `pool_names`, concatenated
    /// in registration order
    pub fn responses(&self, pool_names: &[&str]) -> Vec<&str> {
        self.dictionaries
            .values()
            .flat_map(move |dictionary| {
                pool_names
                    .iter()
                    .filter_map(move |pool| dictionary.conversations.get(*pool))
                    .flatten()
                    .map(String::as_str)
            })
            .collect()
    }

    /// Vocabulary from every dictionary, tagged with the dictionary name
    pub fn vocabulary(&self) -> Vec<(&str, VocabularyEntry)> {
        self.iter()
            .flat_map(|(name, dictionary)| {
                dictionary.vocabulary_entries().map(move |entry| (name, entry))
            })
            .collect()
    }

    pub fn translation_count(&self) -> usize {
        self.dictionaries.values().map(Dictionary::translation_count).sum()
    }

    pub fn vocabulary_count(&self) -> usize {
        self.dictionaries.values().map(Dictionary::vocabulary_count).sum()
    }

    pub fn conversation_count(&self) -> usize {
        self.dictionaries.values().map(Dictionary::conversation_count).sum()
    }
}
