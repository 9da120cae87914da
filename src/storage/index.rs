//! Search index over every registered dictionary
//!
//! Maps a normalized term to all entries that define it, across dictionaries
//! and across translation and vocabulary data. Keys keep the order in which
//! they were first inserted, and each key's entry list keeps contribution
//! order, so both exact and substring lookups are deterministic.

use crate::types::{Dictionary, EntryKind, IndexEntry};
use indexmap::IndexMap;
use tracing::debug;

/// Lower-case and trim a term or query
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Normalized key → entries, in insertion order
#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    entries: IndexMap<String, Vec<IndexEntry>>,
    reverse_translations: bool,
}

impl SearchIndex {
    pub fn new(reverse_translations: bool) -> Self {
        Self {
            entries: IndexMap::new(),
            reverse_translations,
        }
    }

    /// Append one dictionary's contribution, returning the number of entries added
    ///
    /// Translations go first (document order), then vocabulary (category by
    /// category), then reverse translations when enabled.
    pub fn add_dictionary(&mut self, name: &str, dictionary: &Dictionary) -> usize {
        let mut added = 0;

        for (source, target) in &dictionary.translations {
            added += self.push(IndexEntry {
                dictionary: name.to_string(),
                kind: EntryKind::Translation,
                key: source.clone(),
                value: target.clone(),
                category: None,
            });
        }

        for entry in dictionary.vocabulary_entries() {
            added += self.push(IndexEntry {
                dictionary: name.to_string(),
                kind: EntryKind::Vocabulary,
                key: entry.term,
                value: entry.gloss,
                category: Some(entry.category),
            });
        }

        if self.reverse_translations {
            for (source, target) in &dictionary.translations {
                added += self.push(IndexEntry {
                    dictionary: name.to_string(),
                    kind: EntryKind::ReverseTranslation,
                    key: target.clone(),
                    value: source.clone(),
                    category: None,
                });
            }
        }

        debug!(dictionary = name, entries = added, keys = self.len(), "Indexed dictionary");
        added
    }

    /// Purge every entry contributed by `name`, returning how many were removed
    ///
    /// Keys left without entries are dropped; the remaining keys keep their order.
    pub fn remove_dictionary(&mut self, name: &str) -> usize {
        let mut removed = 0;
        self.entries.retain(|_, list| {
            let before = list.len();
            list.retain(|entry| entry.dictionary != name);
            removed += before - list.len();
            !list.is_empty()
        });

        if removed > 0 {
            debug!(dictionary = name, entries = removed, "Purged index entries");
        }
        removed
    }

    /// Discard everything and index the given dictionaries in order
    pub fn rebuild<'a, I>(&mut self, dictionaries: I)
    where
        I: IntoIterator<Item = (&'a str, &'a Dictionary)>,
    {
        self.entries.clear();
        for (name, dictionary) in dictionaries {
            self.add_dictionary(name, dictionary);
        }
    }

    fn push(&mut self, entry: IndexEntry) -> usize {
        let key = normalize(&entry.key);
        if key.is_empty() {
            return 0;
        }
        self.entries.entry(key).or_default().push(entry);
        1
    }

    /// Entries stored under exactly this normalized key
    pub fn exact(&self, key: &str) -> Option<&[IndexEntry]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Entries whose key contains the query or is contained in it, in index order
    pub fn substring_matches(&self, query: &str) -> Vec<IndexEntry> {
        if query.is_empty() {
            return Vec::new();
        }

        self.entries
            .iter()
            .filter(|(key, _)| key.contains(query) || query.contains(key.as_str()))
            .flat_map(|(_, list)| list.iter().cloned())
            .collect()
    }

    /// Exact match if there is one, otherwise every substring match
    pub fn search(&self, query: &str) -> Vec<IndexEntry> {
        match self.exact(query) {
            Some(hits) => hits.to_vec(),
            None => self.substring_matches(query),
        }
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of entries across all keys
    pub fn entry_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn main_dict() -> Dictionary {
        Dictionary::default()
            .with_translation("Вода", "vann")
            .with_translation("дом", "hus")
            .with_vocabulary("family", "mor", "мать")
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  ПРИВЕТ \n"), "привет");
        assert_eq!(normalize("Hvordan Har Du Det?"), "hvordan har du det?");
    }

    #[test]
    fn test_keys_are_normalized_but_entries_keep_original_text() {
        let mut index = SearchIndex::new(false);
        index.add_dictionary("main", &main_dict());

        let hits = index.exact("вода").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].key, "Вода");
        assert_eq!(hits[0].kind, EntryKind::Translation);
        assert!(index.exact("Вода").is_none());
    }

    #[test]
    fn test_reverse_translations() {
        let mut index = SearchIndex::new(true);
        index.add_dictionary("main", &main_dict());

        let hits = index.exact("vann").unwrap();
        assert_eq!(hits[0].kind, EntryKind::ReverseTranslation);
        assert_eq!(hits[0].value, "Вода");
        assert_eq!(index.len(), 5);

        let keys: Vec<_> = index.keys().collect();
        assert_eq!(keys, vec!["вода", "дом", "mor", "vann", "hus"]);
    }

    #[test]
    fn test_collisions_accumulate_in_order() {
        let mut index = SearchIndex::new(false);
        index.add_dictionary("main", &main_dict());
        index.add_dictionary(
            "extra",
            &Dictionary::default()
                .with_translation("вода", "vannet")
                .with_vocabulary("basic", "дом", "hjem"),
        );

        let hits = index.exact("вода").unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].dictionary, "main");
        assert_eq!(hits[1].dictionary, "extra");

        let hits = index.exact("дом").unwrap();
        assert_eq!(hits[1].kind, EntryKind::Vocabulary);
        assert_eq!(index.entry_count(), 5);
    }

    #[test]
    fn test_remove_dictionary_purges_only_its_entries() {
        let mut index = SearchIndex::new(false);
        index.add_dictionary("main", &main_dict());
        index.add_dictionary("extra", &Dictionary::default().with_translation("вода", "vannet").with_translation("еда", "mat"));

        assert_eq!(index.remove_dictionary("extra"), 2);
        assert!(index.exact("еда").is_none());
        assert_eq!(index.exact("вода").unwrap().len(), 1);
        assert_eq!(index.remove_dictionary("missing"), 0);
    }

    #[test]
    fn test_substring_both_directions() {
        let mut index = SearchIndex::new(false);
        index.add_dictionary(
            "main",
            &Dictionary::default()
                .with_translation("доброе утро", "god morgen")
                .with_translation("утро", "morgen"),
        );

        // Key contains the query
        let hits = index.substring_matches("добр");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].key, "доброе утро");

        // Query contains the key: both keys qualify, index order decides
        let hits = index.substring_matches("доброе утро, друг");
        assert_eq!(hits[0].key, "доброе утро");
        assert_eq!(hits[1].key, "утро");
    }

    #[test]
    fn test_search_prefers_exact_match() {
        let mut index = SearchIndex::new(false);
        index.add_dictionary(
            "main",
            &Dictionary::default()
                .with_translation("доброе утро", "god morgen")
                .with_translation("утро", "morgen"),
        );

        let hits = index.search("утро");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].value, "morgen");
    }

    #[test]
    fn test_empty_query_and_blank_keys() {
        let mut index = SearchIndex::new(false);
        index.add_dictionary("main", &Dictionary::default().with_translation("  ", "tom"));
        assert!(index.is_empty());
        assert!(index.substring_matches("").is_empty());
    }

    proptest! {
        #[test]
        fn prop_normalize_is_idempotent(text in "[ A-Za-zА-Яа-яЁёÅåØøÆæ.,!?-]{0,24}") {
            let once = normalize(&text);
            prop_assert_eq!(normalize(&once), once.clone());
            prop_assert_eq!(once.trim(), once.as_str());
        }
    }

    #[test]
    fn test_rebuild() {
        let mut index = SearchIndex::new(false);
        index.add_dictionary("stale", &Dictionary::default().with_translation("еда", "mat"));

        let main = main_dict();
        index.rebuild([("main", &main)]);
        assert!(index.exact("еда").is_none());
        assert_eq!(index.len(), 3);
    }
}
