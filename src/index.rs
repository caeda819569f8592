//! Reverse index from digit strings to the terms that encode them.

use std::time::Instant;

use ahash::AHashMap;
use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::encoder::Encoder;

/// Configuration for building a [`ReverseIndex`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Encode dictionary terms on the rayon thread pool.
    pub parallel: bool,
}

impl Default for IndexConfig {
    fn default() -> Self {
        IndexConfig { parallel: true }
    }
}

/// Immutable mapping from digit string to the alphabetically sorted terms
/// whose encoding is exactly that string.
#[derive(Debug, Clone, Default)]
pub struct ReverseIndex {
    terms_of: AHashMap<String, Vec<String>>,
    term_count: usize,
}

impl ReverseIndex {
    /// Encode every dictionary term and group terms by digit string.
    pub fn build(encoder: &Encoder<'_>, config: &IndexConfig) -> Self {
        let started = Instant::now();
        let dictionary = encoder.dictionary();

        let pairs: Vec<(String, String)> = if config.parallel {
            let entries: Vec<(&str, &[String])> = dictionary.entries().collect();
            entries
                .into_par_iter()
                .map(|(term, phonemes)| (encoder.encode_phonemes(phonemes), term.to_string()))
                .collect()
        } else {
            dictionary
                .entries()
                .map(|(term, phonemes)| (encoder.encode_phonemes(phonemes), term.to_string()))
                .collect()
        };

        let index = Self::from_pairs(pairs);

        info!(
            "built reverse index: {} terms under {} digit strings in {:?}",
            index.term_count(),
            index.len(),
            started.elapsed()
        );

        index
    }

    /// Build an index from `(digit_string, term)` pairs.
    pub fn from_pairs<I, D, T>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (D, T)>,
        D: Into<String>,
        T: Into<String>,
    {
        let mut terms_of: AHashMap<String, Vec<String>> = AHashMap::new();
        for (digits, term) in pairs {
            terms_of.entry(digits.into()).or_default().push(term.into());
        }

        for terms in terms_of.values_mut() {
            terms.sort_unstable();
            terms.dedup();
        }
        let term_count = terms_of.values().map(Vec::len).sum();

        ReverseIndex {
            terms_of,
            term_count,
        }
    }

    /// Terms encoding exactly `digits`, sorted alphabetically.
    pub fn terms_for(&self, digits: &str) -> &[String] {
        self.terms_of
            .get(digits)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Whether any term encodes exactly `digits`.
    pub fn contains(&self, digits: &str) -> bool {
        self.terms_of.contains_key(digits)
    }

    /// Number of distinct digit strings.
    pub fn len(&self) -> usize {
        self.terms_of.len()
    }

    /// Whether the index holds no terms.
    pub fn is_empty(&self) -> bool {
        self.terms_of.is_empty()
    }

    /// Number of indexed terms.
    pub fn term_count(&self) -> usize {
        self.term_count
    }

    /// All digit strings, sorted.
    pub fn digit_strings(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.terms_of.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}
