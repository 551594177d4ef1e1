//! Keyword extraction
//!
//! Case-folded alphanumeric tokens with English stop-words removed,
//! counted in first-occurrence order so that `top(n)` is deterministic.

use std::collections::{HashMap, HashSet};

/// English stop-words (the NLTK list, minus apostrophe forms which the
/// tokenizer never produces)
pub const STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours",
    "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers", "herself",
    "it", "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
    "who", "whom", "this", "that", "these", "those", "am", "is", "are", "was", "were", "be",
    "been", "being", "have", "has", "had", "having", "do", "does", "did", "doing", "a", "an",
    "the", "and", "but", "if", "or", "because", "as", "until", "while", "of", "at", "by",
    "for", "with", "about", "against", "between", "into", "through", "during", "before",
    "after", "above", "below", "to", "from", "up", "down", "in", "out", "on", "off", "over",
    "under", "again", "further", "then", "once", "here", "there", "when", "where", "why",
    "how", "all", "any", "both", "each", "few", "more", "most", "other", "some", "such", "no",
    "nor", "not", "only", "own", "same", "so", "than", "too", "very", "s", "t", "can", "will",
    "just", "don", "should", "now", "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren",
    "couldn", "didn", "doesn", "hadn", "hasn", "haven", "isn", "ma", "mightn", "mustn",
    "needn", "shan", "shouldn", "wasn", "weren", "won", "wouldn",
];

/// Split text into lower-cased alphanumeric tokens.
///
/// Any non-alphanumeric character is a separator, so `it's` yields `it`
/// and `s`.
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
}

/// Word frequencies in first-occurrence order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordCounts {
    entries: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl KeywordCounts {
    fn add(&mut self, word: String) {
        match self.index.get(&word) {
            Some(&pos) => self.entries[pos].1 += 1,
            None => {
                self.index.insert(word.clone(), self.entries.len());
                self.entries.push((word, 1));
            }
        }
    }

    /// Frequency of a word (0 when absent)
    pub fn get(&self, word: &str) -> usize {
        self.index
            .get(word)
            .map(|&pos| self.entries[pos].1)
            .unwrap_or(0)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    /// Number of distinct words
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(w, c)| (w.as_str(), *c))
    }

    /// The `n` most frequent words, most frequent first; ties keep
    /// first-occurrence order.
    pub fn top(&self, n: usize) -> Vec<(String, usize)> {
        let mut ranked = self.entries.clone();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(n);
        ranked
    }

    /// Just the words of `top(n)`
    pub fn top_words(&self, n: usize) -> Vec<String> {
        self.top(n).into_iter().map(|(w, _)| w).collect()
    }
}

/// Keyword extractor with an injectable stop-word set
#[derive(Debug, Clone)]
pub struct KeywordExtractor {
    stop_words: HashSet<String>,
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new(STOP_WORDS.iter().copied())
    }
}

impl KeywordExtractor {
    /// Create an extractor with a custom stop-word list
    pub fn new<'a>(stop_words: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            stop_words: stop_words.into_iter().map(str::to_lowercase).collect(),
        }
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Count non-stop-word tokens. Empty text yields empty counts.
    pub fn extract(&self, text: &str) -> KeywordCounts {
        let mut counts = KeywordCounts::default();
        for token in tokenize(text) {
            if !self.stop_words.contains(&token) {
                counts.add(token);
            }
        }
        counts
    }
}
