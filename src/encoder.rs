//! Text to phonemes to digits.
//!
//! Unknown words contribute nothing: `"wild xyzzy cat"` encodes exactly like
//! `"wild cat"`. Use [`Encoder::unknown_terms`] to find out what was dropped.

use log::debug;

use crate::classifier::{Digit, PhonemeClassifier, digits_to_string};
use crate::dictionary::PronunciationDictionary;

/// Encodes terms and sentences with a dictionary and a classifier.
#[derive(Clone, Copy)]
pub struct Encoder<'a> {
    dictionary: &'a dyn PronunciationDictionary,
    classifier: &'a PhonemeClassifier,
}

impl<'a> Encoder<'a> {
    /// Create a new encoder.
    pub fn new(
        dictionary: &'a dyn PronunciationDictionary,
        classifier: &'a PhonemeClassifier,
    ) -> Self {
        Encoder {
            dictionary,
            classifier,
        }
    }

    /// The dictionary used by this encoder.
    pub fn dictionary(&self) -> &'a dyn PronunciationDictionary {
        self.dictionary
    }

    /// The classifier used by this encoder.
    pub fn classifier(&self) -> &'a PhonemeClassifier {
        self.classifier
    }

    /// Phonemes of every known word of `text`, in order.
    pub fn phonemes_of(&self, text: &str) -> Vec<&'a str> {
        text.split_whitespace()
            .filter_map(|word| self.lookup(word))
            .flat_map(|phonemes| phonemes.iter().map(String::as_str))
            .collect()
    }

    /// Phonemes of `text` that carry a digit.
    pub fn major_phonemes_of(&self, text: &str) -> Vec<&'a str> {
        self.phonemes_of(text)
            .into_iter()
            .filter(|phoneme| self.classifier.contains(phoneme))
            .collect()
    }

    /// Digits of `text`.
    pub fn digit_sequence_of(&self, text: &str) -> Vec<Digit> {
        text.split_whitespace()
            .filter_map(|word| self.lookup(word))
            .flat_map(|phonemes| self.digits_of_phonemes(phonemes))
            .collect()
    }

    /// Digits of `text` as decimal text.
    pub fn digit_string_of(&self, text: &str) -> String {
        digits_to_string(&self.digit_sequence_of(text))
    }

    /// Digit string of a single pronunciation.
    pub fn encode_phonemes(&self, phonemes: &[String]) -> String {
        self.digits_of_phonemes(phonemes)
            .map(Digit::as_char)
            .collect()
    }

    /// Words of `text` the dictionary does not know, lowercased.
    pub fn unknown_terms(&self, text: &str) -> Vec<String> {
        text.split_whitespace()
            .map(str::to_lowercase)
            .filter(|term| !self.dictionary.contains(term))
            .collect()
    }

    fn lookup(&self, word: &str) -> Option<&'a [String]> {
        let term = word.to_lowercase();
        let phonemes = self.dictionary.lookup(&term);
        if phonemes.is_none() {
            debug!("no pronunciation for {term:?}, dropping it");
        }
        phonemes
    }

    fn digits_of_phonemes<'p>(
        &self,
        phonemes: &'p [String],
    ) -> impl Iterator<Item = Digit> + use<'p, 'a> {
        let classifier = self.classifier;
        phonemes
            .iter()
            .filter_map(move |phoneme| classifier.digit_of(phoneme))
    }
}
