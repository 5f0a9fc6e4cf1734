use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// How a candidate word relates to the words obtainable on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WordMatch {
    AlreadyFound,
    Match,
    Partial,
    NoMatch,
}

impl WordMatch {
    /// Wire name, as serialized.
    pub fn as_str(&self) -> &'static str {
        match self {
            WordMatch::AlreadyFound => "already_found",
            WordMatch::Match => "match",
            WordMatch::Partial => "partial",
            WordMatch::NoMatch => "no_match",
        }
    }
}

/// The set of valid words for one board, stored lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct WordCatalog {
    words: BTreeSet<String>,
}

impl WordCatalog {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        WordCatalog {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    /// Classify an in-progress candidate for highlighting.
    pub fn classify(&self, candidate: &str, found: &BTreeSet<String>) -> WordMatch {
        let candidate = candidate.to_lowercase();
        if candidate.is_empty() {
            return WordMatch::NoMatch;
        }
        if found.contains(&candidate) {
            return WordMatch::AlreadyFound;
        }
        if self.words.contains(&candidate) {
            return WordMatch::Match;
        }

        // Sorted set: the first word >= candidate is the only one that can share its prefix.
        let is_prefix = self
            .words
            .range(candidate.clone()..)
            .next()
            .is_some_and(|w| w.starts_with(&candidate));
        if is_prefix {
            WordMatch::Partial
        } else {
            WordMatch::NoMatch
        }
    }

    /// Catalog words the player has not found yet.
    pub fn missing<'a>(&'a self, found: &'a BTreeSet<String>) -> impl Iterator<Item = &'a str> {
        self.iter().filter(move |w| !found.contains(*w))
    }
}

impl From<Vec<String>> for WordCatalog {
    fn from(words: Vec<String>) -> Self {
        WordCatalog::new(words)
    }
}

impl From<WordCatalog> for Vec<String> {
    fn from(catalog: WordCatalog) -> Self {
        catalog.words.into_iter().collect()
    }
}
