//! Core data types for the lexicon engine
//!
//! A [`Dictionary`] is the document shape every dictionary source provides:
//! translation pairs, categorized vocabulary and categorized conversation
//! pools. All three parts are optional. The index flattens dictionaries into
//! [`IndexEntry`] values tagged with the dictionary they came from.

use crate::error::{LexiconError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

/// Source term → target term, in document order
pub type Translations = IndexMap<String, String>;

/// Category → (term → gloss), in document order
pub type Vocabulary = IndexMap<String, IndexMap<String, String>>;

/// Intent pool name → responses
pub type Conversations = IndexMap<String, Vec<String>>;

/// A named dictionary's contents
///
/// Field order inside each map is the document order and is preserved all the
/// way into the search index, which makes collision handling deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dictionary {
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub translations: Translations,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub vocabulary: Vocabulary,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub conversations: Conversations,
}

impl Dictionary {
    /// Parse a dictionary document, tolerating missing or malformed fields
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Build a dictionary from an already decoded JSON document
    ///
    /// Decoding is entry by entry. A field that is absent, `null` or not an
    /// object counts as empty, and a malformed entry is skipped while its
    /// neighbours are kept. Only a document that is not an object at all is
    /// rejected.
    pub fn from_value(value: Value) -> Result<Self> {
        let mut fields = match value {
            Value::Object(fields) => fields,
            other => {
                return Err(LexiconError::InvalidDocument(format!(
                    "expected a JSON object, found {}",
                    json_kind(&other)
                )))
            }
        };

        Ok(Self {
            translations: take_translations(&mut fields),
            vocabulary: take_vocabulary(&mut fields),
            conversations: take_conversations(&mut fields),
        })
    }

    pub fn with_translation(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
        self.translations.insert(source.into(), target.into());
        self
    }

    pub fn with_vocabulary(
        mut self,
        category: impl Into<String>,
        term: impl Into<String>,
        gloss: impl Into<String>,
    ) -> Self {
        self.vocabulary
            .entry(category.into())
            .or_default()
            .insert(term.into(), gloss.into());
        self
    }

    pub fn with_responses<I, S>(mut self, intent: impl Into<String>, responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.conversations
            .entry(intent.into())
            .or_default()
            .extend(responses.into_iter().map(Into::into));
        self
    }

    /// Translation pairs in document order
    pub fn translation_entries(&self) -> impl Iterator<Item = TranslationEntry> + '_ {
        self.translations
            .iter()
            .map(|(source, target)| TranslationEntry {
                source_term: source.clone(),
                target_term: target.clone(),
            })
    }

    /// Vocabulary entries, category by category
    pub fn vocabulary_entries(&self) -> impl Iterator<Item = VocabularyEntry> + '_ {
        self.vocabulary.iter().flat_map(|(category, terms)| {
            terms.iter().map(move |(term, gloss)| VocabularyEntry {
                term: term.clone(),
                gloss: gloss.clone(),
                category: category.clone(),
            })
        })
    }

    /// Non-empty conversation pools
    pub fn conversation_pools(&self) -> impl Iterator<Item = ConversationPool> + '_ {
        self.conversations
            .iter()
            .filter(|(_, responses)| !responses.is_empty())
            .map(|(intent, responses)| ConversationPool {
                intent: intent.clone(),
                responses: responses.clone(),
            })
    }

    pub fn translation_count(&self) -> usize {
        self.translations.len()
    }

    pub fn vocabulary_count(&self) -> usize {
        self.vocabulary.values().map(IndexMap::len).sum()
    }

    /// Total number of responses across all pools
    pub fn conversation_count(&self) -> usize {
        self.conversations.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.translations.is_empty() && self.vocabulary.is_empty() && self.conversations.is_empty()
    }
}

fn take_object(fields: &mut Map<String, Value>, key: &str) -> Option<Map<String, Value>> {
    match fields.remove(key) {
        None | Some(Value::Null) => None,
        Some(Value::Object(map)) => Some(map),
        Some(other) => {
            warn!(field = key, found = json_kind(&other), "Ignoring malformed dictionary field");
            None
        }
    }
}

/// String values of `map`; anything else is skipped
fn string_entries(map: Map<String, Value>, field: &str) -> IndexMap<String, String> {
    map.into_iter()
        .filter_map(|(term, value)| match value {
            Value::String(text) => Some((term, text)),
            other => {
                warn!(field, %term, found = json_kind(&other), "Skipping malformed dictionary entry");
                None
            }
        })
        .collect()
}

fn take_translations(fields: &mut Map<String, Value>) -> Translations {
    take_object(fields, "translations")
        .map(|map| string_entries(map, "translations"))
        .unwrap_or_default()
}

fn take_vocabulary(fields: &mut Map<String, Value>) -> Vocabulary {
    let Some(categories) = take_object(fields, "vocabulary") else {
        return Vocabulary::default();
    };

    categories
        .into_iter()
        .filter_map(|(category, value)| match value {
            Value::Object(terms) => {
                let terms = string_entries(terms, "vocabulary");
                Some((category, terms))
            }
            other => {
                warn!(%category, found = json_kind(&other), "Skipping malformed vocabulary category");
                None
            }
        })
        .collect()
}

fn take_conversations(fields: &mut Map<String, Value>) -> Conversations {
    let Some(pools) = take_object(fields, "conversations") else {
        return Conversations::default();
    };

    pools
        .into_iter()
        .filter_map(|(pool, value)| {
            let responses = match &value {
                Value::Array(items) => items
                    .iter()
                    .map(|item| item.as_str().map(str::to_string))
                    .collect::<Option<Vec<_>>>(),
                _ => None,
            };
            if responses.is_none() {
                warn!(%pool, found = json_kind(&value), "Skipping malformed conversation pool");
            }
            responses.map(|responses| (pool, responses))
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// One translation pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationEntry {
    pub source_term: String,
    pub target_term: String,
}

/// One vocabulary item; the category is metadata only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyEntry {
    pub term: String,
    pub gloss: String,
    pub category: String,
}

/// Responses for one conversational intent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationPool {
    pub intent: String,
    pub responses: Vec<String>,
}

/// Where an index entry was taken from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// Translation pair, keyed by its source term
    Translation,

    /// Translation pair, keyed by its target term and pointing back
    ReverseTranslation,

    /// Categorized vocabulary item
    Vocabulary,
}

/// One key → value contribution to the search index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    /// Name of the dictionary that contributed this entry
    pub dictionary: String,

    pub kind: EntryKind,

    /// Term as written in the dictionary (not normalized)
    pub key: String,

    pub value: String,

    /// Vocabulary category, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl std::fmt::Display for IndexEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.category {
            Some(category) => write!(f, "{} → {} ({})", self.key, self.value, category),
            None => write!(f, "{} → {}", self.key, self.value),
        }
    }
}

/// Engine-wide counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LexiconStats {
    pub dictionary_count: usize,
    pub translation_count: usize,
    pub vocabulary_count: usize,
    pub conversation_count: usize,
    /// Number of distinct normalized keys
    pub index_size: usize,
    pub cache_size: usize,
}

impl std::fmt::Display for LexiconStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Dictionaries:  {}", self.dictionary_count)?;
        writeln!(f, "Translations:  {}", self.translation_count)?;
        writeln!(f, "Vocabulary:    {}", self.vocabulary_count)?;
        writeln!(f, "Conversations: {}", self.conversation_count)?;
        writeln!(f, "Index keys:    {}", self.index_size)?;
        write!(f, "Cached:        {}", self.cache_size)
    }
}
