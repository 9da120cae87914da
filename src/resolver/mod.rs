//! Query resolution
//!
//! Turns a free-text query into a reply. Evaluation is an ordered cascade
//! and the first rule that applies wins:
//!
//! 1. normalize (trim + lower-case); an empty query resolves to nothing
//! 2. conversational intent, by trigger keyword, in fixed priority order
//! 3. translation lookup through the result cache: exact key, else substring
//! 4. the `unknown` pool
//!
//! Intent replies are drawn at random on every call and never cached.

pub mod intents;

pub use intents::Intent;

use crate::cache::ResultCache;
use crate::config::{EngineConfig, KeywordMatch};
use crate::storage::{normalize, LexiconStore, SearchIndex};
use crate::types::IndexEntry;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;
use tracing::debug;

/// Reply for a vocabulary-less random word request
pub const EMPTY_VOCABULARY: &str = "Словарь пуст";

/// Outcome of resolving one query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Resolution {
    /// A conversational intent matched
    Intent {
        intent: Intent,
        response: Option<String>,
    },

    /// The first matching index entry
    Translation { entry: IndexEntry },

    /// Nothing matched; reply from the `unknown` pool
    Unknown { response: Option<String> },
}

impl Resolution {
    /// Text shown to the user, if any
    pub fn response(&self) -> Option<String> {
        match self {
            Resolution::Intent { response, .. } | Resolution::Unknown { response } => {
                response.clone()
            }
            Resolution::Translation { entry } => Some(entry.to_string()),
        }
    }

    pub fn into_response(self) -> Option<String> {
        match self {
            Resolution::Intent { response, .. } | Resolution::Unknown { response } => response,
            Resolution::Translation { entry } => Some(entry.to_string()),
        }
    }

    pub fn is_translation(&self) -> bool {
        matches!(self, Resolution::Translation { .. })
    }
}

/// Stateful part of resolution: matching rules and the random source
#[derive(Debug, Clone)]
pub struct QueryResolver {
    keyword_match: KeywordMatch,
    builtin_responses: bool,
    rng: StdRng,
}

impl QueryResolver {
    pub fn new(config: &EngineConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Resolver with reproducible random picks
    pub fn with_seed(config: &EngineConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: &EngineConfig, rng: StdRng) -> Self {
        Self {
            keyword_match: config.keyword_match,
            builtin_responses: config.builtin_responses,
            rng,
        }
    }

    /// First triggered intent for an already normalized query
    pub fn classify(&self, normalized: &str) -> Option<Intent> {
        Intent::classify(normalized, self.keyword_match)
    }

    /// Run the full cascade for a raw query
    pub fn resolve(
        &mut self,
        query: &str,
        store: &LexiconStore,
        index: &SearchIndex,
        cache: &mut ResultCache<Vec<IndexEntry>>,
    ) -> Option<Resolution> {
        let normalized = normalize(query);
        if normalized.is_empty() {
            return None;
        }

        if let Some(intent) = self.classify(&normalized) {
            debug!(query = %normalized, %intent, "Matched conversational intent");
            let response = match intent {
                Intent::RandomWord => Some(self.random_word(store)),
                _ => self.pick_response(store, intent),
            };
            return Some(Resolution::Intent { intent, response });
        }

        if let Some(entry) = Self::lookup(&normalized, index, cache).into_iter().next() {
            debug!(query = %normalized, dictionary = %entry.dictionary, "Resolved translation");
            return Some(Resolution::Translation { entry });
        }

        debug!(query = %normalized, "No translation found");
        Some(Resolution::Unknown {
            response: self.pick_response(store, Intent::Unknown),
        })
    }

    /// Index search for a normalized query, memoized in `cache`
    pub fn lookup(
        normalized: &str,
        index: &SearchIndex,
        cache: &mut ResultCache<Vec<IndexEntry>>,
    ) -> Vec<IndexEntry> {
        if let Some(cached) = cache.get(normalized) {
            debug!(query = %normalized, hits = cached.len(), "Result from cache");
            return cached.clone();
        }

        let results = index.search(normalized);
        debug!(query = %normalized, hits = results.len(), "Cache miss, searched index");
        cache.put(normalized.to_string(), results.clone());
        results
    }

    /// Uniform pick from the intent's pools across all dictionaries
    ///
    /// Falls back to the built-in phrase when no dictionary defines the pool,
    /// unless built-in responses are disabled.
    pub fn pick_response(&mut self, store: &LexiconStore, intent: Intent) -> Option<String> {
        let pool = store.responses(intent.pool_names());
        match pool.choose(&mut self.rng) {
            Some(response) => Some((*response).to_string()),
            None if self.builtin_responses => intent.default_response().map(str::to_string),
            None => None,
        }
    }

    /// Uniform pick over every vocabulary entry of every dictionary
    pub fn random_word(&mut self, store: &LexiconStore) -> String {
        let vocabulary = store.vocabulary();
        match vocabulary.choose(&mut self.rng) {
            Some((_, entry)) => format!("{} — {} ({})", entry.term, entry.gloss, entry.category),
            None => EMPTY_VOCABULARY.to_string(),
        }
    }
}
