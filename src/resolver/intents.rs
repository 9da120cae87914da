//! Conversational intents and their trigger keywords
//!
//! The keyword lists are part of the chat widget's external contract and are
//! matched literally against the normalized query.

use crate::config::KeywordMatch;
use serde::{Deserialize, Serialize};

/// Fixed conversational category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Positive,
    Negative,
    Alternative,
    Uncertain,
    Greeting,
    Help,
    Thanks,
    Farewell,
    /// Request for a random vocabulary word
    RandomWord,
    /// Fallback when nothing else matched; has no trigger keywords
    Unknown,
}

impl Intent {
    /// Keyword-triggered intents in priority order; the first match wins
    pub const TRIGGERED: [Intent; 9] = [
        Intent::Positive,
        Intent::Negative,
        Intent::Alternative,
        Intent::Uncertain,
        Intent::Greeting,
        Intent::Help,
        Intent::Thanks,
        Intent::Farewell,
        Intent::RandomWord,
    ];

    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Intent::Positive => &[
                "да", "конечно", "хорошо", "отлично", "согласен", "согласна", "ок", "окей",
                "давайте", "пойдет", "супер", "класс", "круто",
            ],
            Intent::Negative => &[
                "нет", "не хочу", "не надо", "не нужно", "не то", "неправильно", "не подходит",
                "плохо",
            ],
            Intent::Alternative => &[
                "другое", "что-то другое", "по-другому", "еще", "альтернатива", "вариант",
                "что еще",
            ],
            Intent::Uncertain => &[
                "не знаю", "может быть", "возможно", "не уверен", "не уверена", "сомневаюсь",
                "хм", "эм",
            ],
            Intent::Greeting => &["привет", "здравств"],
            Intent::Help => &["помощь", "помоги"],
            Intent::Thanks => &["спасибо", "благодар"],
            Intent::Farewell => &["пока", "до свидания"],
            Intent::RandomWord => &["случайное слово", "случайное"],
            Intent::Unknown => &[],
        }
    }

    /// Conversation pool names this intent draws responses from
    pub fn pool_names(self) -> &'static [&'static str] {
        match self {
            Intent::Positive => &["positive"],
            Intent::Negative => &["negative"],
            Intent::Alternative => &["alternative"],
            Intent::Uncertain => &["uncertain"],
            Intent::Greeting => &["greetings", "greeting"],
            Intent::Help => &["help"],
            Intent::Thanks => &["thanks"],
            Intent::Farewell => &["farewell"],
            Intent::RandomWord => &[],
            Intent::Unknown => &["unknown"],
        }
    }

    /// Reply used when no registered dictionary defines a pool for this intent
    pub fn default_response(self) -> Option<&'static str> {
        match self {
            Intent::Positive => Some("Отлично! Что еще хотите изучить?"),
            Intent::Negative => Some("Понятно. Попробуем что-то другое?"),
            Intent::Alternative => {
                Some("Хорошо, давайте попробуем другой вариант. Что вас интересует?")
            }
            Intent::Uncertain => {
                Some("Не уверены? Могу предложить несколько вариантов для изучения.")
            }
            Intent::Greeting => Some("Привет! Я помогаю изучать норвежский язык."),
            Intent::Help => Some(
                "Спросите меня любое слово для перевода или попросите случайное слово.",
            ),
            Intent::Thanks => Some("Пожалуйста! Всегда рад помочь."),
            Intent::Farewell => Some("До свидания! Удачи в изучении норвежского!"),
            Intent::RandomWord => None,
            Intent::Unknown => {
                Some("Извините, не нашел перевод этого слова. Попробуйте другое слово.")
            }
        }
    }

    /// Whether any trigger keyword occurs in the normalized query
    pub fn matches(self, query: &str, mode: KeywordMatch) -> bool {
        self.keywords().iter().any(|keyword| match mode {
            KeywordMatch::Substring => query.contains(keyword),
            KeywordMatch::WordPrefix => contains_at_word_start(query, keyword),
        })
    }

    /// First triggered intent for a normalized query
    pub fn classify(query: &str, mode: KeywordMatch) -> Option<Intent> {
        Self::TRIGGERED
            .into_iter()
            .find(|intent| intent.matches(query, mode))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Intent::Positive => "positive",
            Intent::Negative => "negative",
            Intent::Alternative => "alternative",
            Intent::Uncertain => "uncertain",
            Intent::Greeting => "greeting",
            Intent::Help => "help",
            Intent::Thanks => "thanks",
            Intent::Farewell => "farewell",
            Intent::RandomWord => "random_word",
            Intent::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn contains_at_word_start(haystack: &str, needle: &str) -> bool {
    haystack.match_indices(needle).any(|(at, _)| {
        haystack[..at]
            .chars()
            .next_back()
            .map_or(true, |prev| !prev.is_alphanumeric())
    })
}
