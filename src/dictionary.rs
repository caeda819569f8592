//! Pronunciation dictionaries.
//!
//! The encoder and reverse index only need two things from a dictionary:
//! looking up the phonemes of a term and walking every known term. Both are
//! captured by the [`PronunciationDictionary`] trait so tests and callers can
//! inject their own data instead of a parsed CMU file.

pub mod cmu;

pub use self::cmu::{CmuDictionary, TextEncoding};

/// Source of term pronunciations.
pub trait PronunciationDictionary: Send + Sync {
    /// Phonemes of a lowercase term, or `None` if the term is unknown.
    fn lookup(&self, term: &str) -> Option<&[String]>;

    /// Every term together with its phonemes, in no particular order.
    fn entries(&self) -> Box<dyn Iterator<Item = (&str, &[String])> + '_>;

    /// Number of terms.
    fn len(&self) -> usize;

    /// Whether the dictionary holds no terms.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the term is known.
    fn contains(&self, term: &str) -> bool {
        self.lookup(term).is_some()
    }
}
