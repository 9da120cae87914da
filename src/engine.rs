//! The lexicon engine
//!
//! [`LexiconEngine`] owns the dictionary store, the search index, the result
//! cache and the resolver. There is no global state: build one engine at
//! startup and hand it (or an [`EngineHandle`]) to whoever needs it.

use crate::builtin::{self, MAIN_DICTIONARY};
use crate::cache::ResultCache;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::resolver::{QueryResolver, Resolution};
use crate::storage::{normalize, LexiconStore, SearchIndex};
use crate::types::{Dictionary, IndexEntry, LexiconStats};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};

/// Dictionary store, search index and result cache behind one facade
#[derive(Debug)]
pub struct LexiconEngine {
    config: EngineConfig,
    store: LexiconStore,
    index: SearchIndex,
    cache: ResultCache<Vec<IndexEntry>>,
    resolver: QueryResolver,
}

impl LexiconEngine {
    /// Empty engine: no dictionaries registered yet
    pub fn new(config: EngineConfig) -> Self {
        let resolver = QueryResolver::new(&config);
        Self::with_resolver(config, resolver)
    }

    /// Empty engine whose random picks are reproducible
    pub fn with_seed(config: EngineConfig, seed: u64) -> Self {
        let resolver = QueryResolver::with_seed(&config, seed);
        Self::with_resolver(config, resolver)
    }

    fn with_resolver(config: EngineConfig, resolver: QueryResolver) -> Self {
        Self {
            index: SearchIndex::new(config.index_reverse_translations),
            cache: ResultCache::new(config.cache_capacity),
            store: LexiconStore::new(),
            resolver,
            config,
        }
    }

    /// Engine with the embedded `main` dictionary registered, if configured
    pub fn bootstrap(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let mut engine = Self::new(config);
        if engine.config.include_builtin_dictionary {
            engine.register(MAIN_DICTIONARY, builtin::main_dictionary()?);
        }
        Ok(engine)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Add or replace a named dictionary and update the index
    ///
    /// A new name is indexed incrementally after everything already
    /// registered. Replacing a name purges its old entries and rebuilds the
    /// index in registration order, so collisions keep resolving to the
    /// earliest-registered dictionary. Either way the result cache is cleared.
    pub fn register(&mut self, name: impl Into<String>, dictionary: Dictionary) {
        let name = name.into();
        let translations = dictionary.translation_count();
        let vocabulary = dictionary.vocabulary_count();

        match self.store.register(name.clone(), dictionary) {
            None => {
                if let Some(added) = self.store.get(&name) {
                    self.index.add_dictionary(&name, added);
                }
            }
            Some(_) => {
                let purged = self.index.remove_dictionary(&name);
                debug!(dictionary = %name, purged, "Replacing dictionary");
                self.index.rebuild(self.store.iter());
            }
        }

        self.cache.clear();
        info!(
            dictionary = %name,
            translations,
            vocabulary,
            index_keys = self.index.len(),
            "Registered dictionary"
        );
    }

    /// Registered dictionary names, oldest first
    pub fn list_dictionaries(&self) -> Vec<String> {
        self.store.list_dictionaries()
    }

    pub fn dictionary(&self, name: &str) -> Option<&Dictionary> {
        self.store.get(name)
    }

    /// Reply text for a query, or `None` when there is nothing to show
    pub fn resolve(&mut self, query: &str) -> Option<String> {
        self.resolve_detailed(query)
            .and_then(Resolution::into_response)
    }

    /// Like [`resolve`](Self::resolve) but reports which rule produced the reply
    pub fn resolve_detailed(&mut self, query: &str) -> Option<Resolution> {
        self.resolver
            .resolve(query, &self.store, &self.index, &mut self.cache)
    }

    /// Every index entry matching the query (exact key, else substring), cached
    pub fn lookup(&mut self, query: &str) -> Vec<IndexEntry> {
        let normalized = normalize(query);
        if normalized.is_empty() {
            return Vec::new();
        }
        QueryResolver::lookup(&normalized, &self.index, &mut self.cache)
    }

    /// A random vocabulary word formatted as `term — gloss (category)`
    pub fn random_word(&mut self) -> String {
        self.resolver.random_word(&self.store)
    }

    pub fn stats(&self) -> LexiconStats {
        LexiconStats {
            dictionary_count: self.store.len(),
            translation_count: self.store.translation_count(),
            vocabulary_count: self.store.vocabulary_count(),
            conversation_count: self.store.conversation_count(),
            index_size: self.index.len(),
            cache_size: self.cache.len(),
        }
    }

    pub fn clear_cache(&mut self) {
        let dropped = self.cache.len();
        self.cache.clear();
        debug!(dropped, "Cleared result cache");
    }

    /// Recompute the whole index from the store
    pub fn rebuild_index(&mut self) {
        self.index.rebuild(self.store.iter());
        self.cache.clear();
        info!(index_keys = self.index.len(), "Rebuilt search index");
    }

    /// Whether a normalized query currently has a cached result
    pub fn is_cached(&self, query: &str) -> bool {
        self.cache.contains(&normalize(query))
    }
}

/// Shared, lock-guarded engine
///
/// Every call holds the lock for its whole duration, so a registration can
/// never interleave with a resolution reading a half-rebuilt index.
#[derive(Debug, Clone)]
pub struct EngineHandle {
    inner: Arc<Mutex<LexiconEngine>>,
}

impl EngineHandle {
    pub fn new(engine: LexiconEngine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, LexiconEngine> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Run a closure with exclusive access to the engine
    pub fn with<R>(&self, f: impl FnOnce(&mut LexiconEngine) -> R) -> R {
        f(&mut self.lock())
    }

    pub fn register(&self, name: impl Into<String>, dictionary: Dictionary) {
        self.lock().register(name, dictionary);
    }

    pub fn resolve(&self, query: &str) -> Option<String> {
        self.lock().resolve(query)
    }

    pub fn resolve_detailed(&self, query: &str) -> Option<Resolution> {
        self.lock().resolve_detailed(query)
    }

    pub fn lookup(&self, query: &str) -> Vec<IndexEntry> {
        self.lock().lookup(query)
    }

    pub fn random_word(&self) -> String {
        self.lock().random_word()
    }

    pub fn list_dictionaries(&self) -> Vec<String> {
        self.lock().list_dictionaries()
    }

    pub fn stats(&self) -> LexiconStats {
        self.lock().stats()
    }

    pub fn clear_cache(&self) {
        self.lock().clear_cache();
    }
}

impl From<LexiconEngine> for EngineHandle {
    fn from(engine: LexiconEngine) -> Self {
        Self::new(engine)
    }
}
