//! Common test utilities and helpers

#![allow(dead_code)]

use norsk_lexicon::{builtin, Dictionary, EngineConfig, EngineHandle, KeywordMatch, LexiconEngine};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Engine with the built-in dictionary and reproducible random picks
pub fn seeded_engine(config: EngineConfig) -> LexiconEngine {
    let mut engine = LexiconEngine::with_seed(config, 2024);
    engine.register(
        builtin::MAIN_DICTIONARY,
        builtin::main_dictionary().expect("embedded dictionary parses"),
    );
    engine
}

/// Built-in engine matching intent keywords at word starts
pub fn word_prefix_engine() -> LexiconEngine {
    seeded_engine(EngineConfig {
        keyword_match: KeywordMatch::WordPrefix,
        ..Default::default()
    })
}

pub fn shared_engine() -> EngineHandle {
    EngineHandle::new(seeded_engine(EngineConfig::default()))
}

/// Conversation pool from the built-in dictionary
pub fn builtin_pool(name: &str) -> Vec<String> {
    builtin::main_dictionary()
        .expect("embedded dictionary parses")
        .conversations
        .get(name)
        .cloned()
        .unwrap_or_default()
}

/// Write dictionary documents into a fresh temp dir
pub fn write_dictionaries(files: &[(&str, &str)]) -> (TempDir, Vec<String>) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let paths = files
        .iter()
        .map(|(file_name, contents)| {
            let path: PathBuf = dir.path().join(file_name);
            fs::write(&path, contents).expect("Failed to write dictionary");
            path.display().to_string()
        })
        .collect();
    (dir, paths)
}

pub fn animals() -> Dictionary {
    Dictionary::default()
        .with_translation("кошка", "katt")
        .with_translation("собака", "hund")
        .with_vocabulary("animals", "hest", "лошадь")
}
