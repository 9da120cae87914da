//! End-to-end resolution against the built-in dictionary

mod common;

use common::{builtin_pool, seeded_engine, word_prefix_engine};
use norsk_lexicon::{EngineConfig, Intent, Resolution};

#[test]
fn test_greeting_comes_from_pool() {
    let mut engine = seeded_engine(EngineConfig::default());
    let greetings = builtin_pool("greetings");
    for _ in 0..10 {
        let reply = engine.resolve("привет").unwrap();
        assert!(greetings.contains(&reply), "unexpected greeting {}", reply);
    }
}

#[test]
fn test_positive_comes_from_pool() {
    let mut engine = seeded_engine(EngineConfig::default());
    let reply = engine.resolve("да").unwrap();
    assert!(builtin_pool("positive").contains(&reply));
}

#[test]
fn test_unknown_comes_from_pool() {
    let mut engine = seeded_engine(EngineConfig::default());
    let reply = engine.resolve("qqqq").unwrap();
    assert!(builtin_pool("unknown").contains(&reply));
}

#[test]
fn test_translation_both_directions() {
    let mut engine = word_prefix_engine();
    assert_eq!(engine.resolve("вода").as_deref(), Some("вода → vann"));
    assert_eq!(engine.resolve("vann").as_deref(), Some("vann → вода"));
    assert_eq!(engine.resolve("  ДОМ").as_deref(), Some("дом → hus"));
}

#[test]
fn test_substring_keywords_take_words_with_short_triggers() {
    // "да" is a substring of "вода", and intents are checked first
    let mut engine = seeded_engine(EngineConfig::default());
    match engine.resolve_detailed("вода").unwrap() {
        Resolution::Intent { intent, response } => {
            assert_eq!(intent, Intent::Positive);
            assert!(builtin_pool("positive").contains(&response.unwrap()));
        }
        other => panic!("expected positive intent, got {:?}", other),
    }
    assert!(!engine.is_cached("вода"));
}

#[test]
fn test_translation_is_stable_and_cached() {
    let mut engine = seeded_engine(EngineConfig::default());
    let first = engine.resolve("hus");
    assert!(engine.is_cached("hus"));
    for _ in 0..5 {
        assert_eq!(engine.resolve("HUS"), first);
    }
    assert_eq!(engine.stats().cache_size, 1);
}

#[test]
fn test_random_word_request() {
    let mut engine = seeded_engine(EngineConfig::default());
    let reply = engine.resolve("случайное слово").unwrap();
    assert!(reply.contains(" — "));
    assert!(reply.ends_with(')'));
}

#[test]
fn test_blank_query_resolves_to_nothing() {
    let mut engine = seeded_engine(EngineConfig::default());
    assert!(engine.resolve("").is_none());
    assert!(engine.resolve(" \n ").is_none());
}

#[test]
fn test_short_keys_match_inside_longer_queries() {
    let mut engine = seeded_engine(EngineConfig::default());

    // "nonsense" contains the numeral key "en"
    match engine.resolve_detailed("xyz-nonsense") {
        Some(Resolution::Translation { entry }) => {
            assert_eq!(entry.key, "en");
            assert_eq!(entry.to_string(), "en → один (numbers)");
        }
        other => panic!("expected a translation, got {:?}", other),
    }
    assert_eq!(
        engine.resolve("xyz-nonsense").as_deref(),
        Some("en → один (numbers)")
    );
}

#[test]
fn test_single_letter_query_takes_first_key_containing_it() {
    let mut engine = seeded_engine(EngineConfig::default());
    assert_eq!(
        engine.resolve("å").as_deref(),
        Some("åtte → восемь (numbers)")
    );

    let keys: Vec<String> = engine.lookup("å").into_iter().map(|e| e.key).collect();
    assert_eq!(keys[0], "åtte");
    assert!(keys.contains(&"dårlig".to_string()));
}
