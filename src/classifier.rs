//! Digit classes of the Mnemonic Major System.
//!
//! Each digit 0-9 owns a set of consonant phonemes. Vowels and the remaining
//! consonants (`W`, `Y`, `HH`, `NG`, ...) carry no digit and are ignored when
//! a term is encoded.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use ahash::AHashMap;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::error::{MajorError, Result};

/// The classical Major System assignment, indexed by digit.
pub const MAJOR_SYSTEM_CLASSES: [&[&str]; 10] = [
    &["S", "Z"],
    &["T", "D", "TH", "DH"],
    &["N"],
    &["M"],
    &["R"],
    &["L"],
    &["CH", "SH", "JH"],
    &["K", "G"],
    &["F", "V"],
    &["P", "B"],
];

lazy_static! {
    static ref MAJOR_SYSTEM: PhonemeClassifier = PhonemeClassifier::from_static_table();
}

/// A single decimal digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Digit(u8);

impl Digit {
    /// Create a digit, rejecting values above 9.
    pub fn new(value: u8) -> Result<Self> {
        if value <= 9 {
            Ok(Digit(value))
        } else {
            Err(MajorError::invalid_input(format!(
                "{value} is not a decimal digit"
            )))
        }
    }

    /// Parse an ASCII digit character.
    pub fn from_char(c: char) -> Option<Self> {
        c.to_digit(10).map(|d| Digit(d as u8))
    }

    /// The numeric value.
    pub fn value(self) -> u8 {
        self.0
    }

    /// The digit as an ASCII character.
    pub fn as_char(self) -> char {
        (b'0' + self.0) as char
    }

    /// All ten digits in ascending order.
    pub fn all() -> impl Iterator<Item = Digit> {
        (0..10).map(Digit)
    }
}

impl TryFrom<u8> for Digit {
    type Error = MajorError;

    fn try_from(value: u8) -> Result<Self> {
        Digit::new(value)
    }
}

impl From<Digit> for u8 {
    fn from(digit: Digit) -> Self {
        digit.0
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Render a digit sequence as decimal text.
pub fn digits_to_string(digits: &[Digit]) -> String {
    digits.iter().map(|d| d.as_char()).collect()
}

/// Maps phonemes to digits and digits to their phoneme classes.
#[derive(Debug, Clone)]
pub struct PhonemeClassifier {
    /// Phoneme classes, indexed by digit value.
    classes: Vec<BTreeSet<String>>,
    /// Inverse mapping built from `classes`.
    digit_of: AHashMap<String, Digit>,
}

impl PhonemeClassifier {
    /// Build a classifier from a digit-to-phonemes table.
    ///
    /// Digits are visited in ascending order. A phoneme listed under two
    /// digits is rejected instead of being silently resolved.
    pub fn new<I, P>(classes: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Digit, P)>,
        P: IntoIterator,
        P::Item: Into<String>,
    {
        let mut table: BTreeMap<Digit, BTreeSet<String>> = BTreeMap::new();
        for (digit, phonemes) in classes {
            table
                .entry(digit)
                .or_default()
                .extend(phonemes.into_iter().map(Into::into));
        }

        let mut sorted_classes = vec![BTreeSet::new(); 10];
        let mut digit_of = AHashMap::new();

        for (digit, phonemes) in table {
            for phoneme in &phonemes {
                if phoneme.is_empty() {
                    return Err(MajorError::classifier(format!(
                        "empty phoneme in class {digit}"
                    )));
                }
                if let Some(previous) = digit_of.insert(phoneme.clone(), digit) {
                    return Err(MajorError::classifier(format!(
                        "phoneme '{phoneme}' is assigned to both {previous} and {digit}"
                    )));
                }
            }
            sorted_classes[digit.value() as usize] = phonemes;
        }

        Ok(PhonemeClassifier {
            classes: sorted_classes,
            digit_of,
        })
    }

    /// Build a classifier from a table keyed by raw integers, as found in
    /// configuration files.
    pub fn from_table(table: &BTreeMap<u8, Vec<String>>) -> Result<Self> {
        let classes = table
            .iter()
            .map(|(&value, phonemes)| {
                let digit = Digit::new(value).map_err(|_| {
                    MajorError::classifier(format!("class key {value} is not a digit"))
                })?;
                Ok((digit, phonemes.iter().map(|p| p.trim().to_uppercase())))
            })
            .collect::<Result<Vec<_>>>()?;

        Self::new(classes)
    }

    /// The standard Major System classifier.
    pub fn major_system() -> &'static PhonemeClassifier {
        &MAJOR_SYSTEM
    }

    fn from_static_table() -> Self {
        let mut classes = vec![BTreeSet::new(); 10];
        let mut digit_of = AHashMap::new();
        for (digit, phonemes) in Digit::all().zip(MAJOR_SYSTEM_CLASSES) {
            for &phoneme in phonemes {
                digit_of.insert(phoneme.to_string(), digit);
                classes[digit.value() as usize].insert(phoneme.to_string());
            }
        }
        PhonemeClassifier { classes, digit_of }
    }

    /// The digit a phoneme stands for, if any.
    pub fn digit_of(&self, phoneme: &str) -> Option<Digit> {
        self.digit_of.get(phoneme).copied()
    }

    /// Whether the phoneme belongs to any digit class.
    pub fn contains(&self, phoneme: &str) -> bool {
        self.digit_of.contains_key(phoneme)
    }

    /// The phoneme class of a digit.
    pub fn phonemes_for(&self, digit: Digit) -> &BTreeSet<String> {
        &self.classes[digit.value() as usize]
    }

    /// Iterate over `(digit, class)` pairs in ascending digit order.
    pub fn classes(&self) -> impl Iterator<Item = (Digit, &BTreeSet<String>)> {
        Digit::all().zip(self.classes.iter())
    }

    /// Number of classified phonemes.
    pub fn phoneme_count(&self) -> usize {
        self.digit_of.len()
    }
}

impl Default for PhonemeClassifier {
    fn default() -> Self {
        Self::major_system().clone()
    }
}
