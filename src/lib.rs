//! Norsk Lexicon - Russian/Norwegian phrasebook engine
//!
//! The lookup engine behind the Norwegian learning chat widget:
//! - Named dictionaries of translations, vocabulary and canned replies
//! - A flattened search index with exact and substring matching
//! - Conversational intent detection by trigger keyword
//! - A bounded FIFO cache of lookup results
//! - Supplementary dictionaries loaded from disk or HTTP in the background
//!
//! # Architecture
//!
//! - **Types**: Dictionary documents and index entries
//! - **Storage**: Dictionary store and search index
//! - **Resolver**: Intent table and the resolution cascade
//! - **Engine**: Owns all state; [`EngineHandle`] shares it across tasks
//! - **API**: HTTP JSON interface for the widget
//!
//! # Example
//!
//! ```
//! use norsk_lexicon::{EngineConfig, LexiconEngine};
//!
//! let mut engine = LexiconEngine::bootstrap(EngineConfig::default()).unwrap();
//! assert!(engine.resolve("спасибо большое").is_some());
//! assert_eq!(engine.resolve("дом").as_deref(), Some("дом → hus"));
//! ```

pub mod api;
pub mod builtin;
pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod loader;
pub mod resolver;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use cache::{CacheStats, ResultCache};
pub use config::{EngineConfig, KeywordMatch, SupplementaryConfig};
pub use engine::{EngineHandle, LexiconEngine};
pub use error::{LexiconError, Result};
pub use loader::{spawn_supplementary, DictionarySource, LoadOutcome, LoadReport};
pub use resolver::{Intent, Resolution};
pub use storage::{LexiconStore, SearchIndex};
pub use types::{Dictionary, EntryKind, IndexEntry, LexiconStats};
