//! CMU Pronouncing Dictionary reader.
//!
//! The flat text format has one entry per line, the term and its phonemes
//! separated by two spaces:
//!
//! ```text
//! ;;; comment lines start with three semicolons
//! ALS  AE1 L Z
//! CAT  K AE1 T
//! READ  R IY1 D
//! READ(1)  R EH1 D
//! ```
//!
//! Terms are lowercased on ingestion. `TERM(n)` lines are alternative
//! pronunciations; the first pronunciation of a term is the one that is kept.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::Instant;

use ahash::AHashMap;
use clap::ValueEnum;
use lazy_static::lazy_static;
use log::{debug, info};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::dictionary::PronunciationDictionary;
use crate::error::{MajorError, Result};

/// Separator between the term and the phoneme field.
const FIELD_SEPARATOR: &str = "  ";

/// Prefix of comment lines.
const COMMENT_PREFIX: &str = ";;;";

lazy_static! {
    // "read(1)" -> "read"
    static ref VARIANT_RE: Regex = Regex::new(r"^(.+)\((\d+)\)$").unwrap();
}

/// Character encoding of a dictionary file.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextEncoding {
    /// ISO-8859-1, one byte per character (the encoding cmudict ships in)
    #[default]
    Latin1,
    /// UTF-8
    Utf8,
}

impl TextEncoding {
    /// Decode raw bytes into text.
    pub fn decode(self, bytes: &[u8]) -> Result<String> {
        match self {
            TextEncoding::Latin1 => Ok(bytes.iter().map(|&b| b as char).collect()),
            TextEncoding::Utf8 => String::from_utf8(bytes.to_vec())
                .map_err(|e| MajorError::dictionary(format!("invalid UTF-8: {e}"))),
        }
    }
}

/// A pronunciation dictionary parsed from CMU-format text.
#[derive(Debug, Clone, Default)]
pub struct CmuDictionary {
    entries: AHashMap<String, Vec<String>>,
    /// Number of alternative pronunciations that were ignored.
    skipped_variants: usize,
}

impl CmuDictionary {
    /// Create a new empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a dictionary from `(term, phonemes)` pairs.
    ///
    /// Terms are lowercased. A term that appears twice keeps its first
    /// pronunciation.
    pub fn from_entries<I, T, P, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (T, P)>,
        T: AsRef<str>,
        P: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut dictionary = Self::new();
        for (term, phonemes) in entries {
            dictionary.insert(term.as_ref(), phonemes.into_iter().map(Into::into).collect());
        }
        dictionary
    }

    /// Parse CMU-format text.
    ///
    /// Fails on the first line that has no phoneme field, reporting its
    /// 1-based line number.
    pub fn parse(text: &str) -> Result<Self> {
        let started = Instant::now();
        let mut dictionary = Self::new();

        for (idx, line) in text.lines().enumerate() {
            if line.trim().is_empty() || line.starts_with(COMMENT_PREFIX) {
                continue;
            }

            let (raw_term, raw_phonemes) = line.split_once(FIELD_SEPARATOR).ok_or_else(|| {
                MajorError::dictionary(format!(
                    "line {}: expected 'TERM  PHONEMES', got {line:?}",
                    idx + 1
                ))
            })?;

            let phonemes: Vec<String> = raw_phonemes
                .split_whitespace()
                .map(str::to_string)
                .collect();
            if phonemes.is_empty() {
                return Err(MajorError::dictionary(format!(
                    "line {}: missing phoneme sequence for {raw_term:?}",
                    idx + 1
                )));
            }

            let raw_term = raw_term.trim();
            if raw_term.is_empty() {
                return Err(MajorError::dictionary(format!(
                    "line {}: missing term",
                    idx + 1
                )));
            }

            dictionary.insert(raw_term, phonemes);
        }

        info!(
            "parsed pronunciation dictionary: {} terms ({} alternative pronunciations skipped) in {:?}",
            dictionary.len(),
            dictionary.skipped_variants,
            started.elapsed()
        );

        Ok(dictionary)
    }

    /// Decode and parse raw dictionary bytes.
    pub fn from_bytes(bytes: &[u8], encoding: TextEncoding) -> Result<Self> {
        Self::parse(&encoding.decode(bytes)?)
    }

    /// Load a dictionary file.
    pub fn load_from_file<P: AsRef<Path>>(path: P, encoding: TextEncoding) -> Result<Self> {
        let path = path.as_ref();
        info!("loading pronunciation dictionary from {}", path.display());
        let bytes = fs::read(path)?;
        Self::from_bytes(&bytes, encoding)
    }

    fn insert(&mut self, raw_term: &str, phonemes: Vec<String>) {
        let lowered = raw_term.to_lowercase();
        let term = match VARIANT_RE.captures(&lowered) {
            Some(caps) => caps[1].to_string(),
            None => lowered.clone(),
        };

        if self.entries.contains_key(&term) {
            debug!("ignoring alternative pronunciation {lowered:?}");
            self.skipped_variants += 1;
            return;
        }
        self.entries.insert(term, phonemes);
    }

    /// Number of alternative pronunciations that were ignored.
    pub fn skipped_variants(&self) -> usize {
        self.skipped_variants
    }

    /// How often each phoneme occurs across all pronunciations, most common
    /// first. Ties are ordered alphabetically.
    pub fn phoneme_counts(&self) -> Vec<(String, usize)> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for phonemes in self.entries.values() {
            for phoneme in phonemes {
                *counts.entry(phoneme.as_str()).or_insert(0) += 1;
            }
        }

        let mut counts: Vec<(String, usize)> = counts
            .into_iter()
            .map(|(phoneme, count)| (phoneme.to_string(), count))
            .collect();
        // Stable sort keeps the alphabetical order among equal counts.
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
    }

    /// The sorted phoneme inventory.
    pub fn phonemes(&self) -> Vec<String> {
        let mut phonemes: Vec<String> = self
            .phoneme_counts()
            .into_iter()
            .map(|(phoneme, _)| phoneme)
            .collect();
        phonemes.sort();
        phonemes
    }
}

impl PronunciationDictionary for CmuDictionary {
    fn lookup(&self, term: &str) -> Option<&[String]> {
        self.entries.get(term).map(Vec::as_slice)
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (&str, &[String])> + '_> {
        Box::new(
            self.entries
                .iter()
                .map(|(term, phonemes)| (term.as_str(), phonemes.as_slice())),
        )
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    const SAMPLE: &str = ";;; # CMUdict  --  Major Version: 0.07
;;; a comment with  two spaces
ALS  AE1 L Z
CAT  K AE1 T
DOG  D AO1 G
READ  R IY1 D
READ(1)  R EH1 D
";

    #[test]
    fn test_parse_skips_comments() {
        let dict = CmuDictionary::parse(SAMPLE).unwrap();

        assert_eq!(dict.len(), 4);
        assert_eq!(
            dict.lookup("als").unwrap(),
            &["AE1".to_string(), "L".to_string(), "Z".to_string()]
        );
        assert!(dict.lookup("ALS").is_none());
        assert!(!dict.contains(";;;"));
    }

    #[test]
    fn test_first_variant_wins() {
        let dict = CmuDictionary::parse(SAMPLE).unwrap();

        assert_eq!(dict.lookup("read").unwrap()[1], "IY1");
        assert!(dict.lookup("read(1)").is_none());
        assert_eq!(dict.skipped_variants(), 1);
    }

    #[test]
    fn test_malformed_line_reports_line_number() {
        let text = "CAT  K AE1 T\nDOG\n";
        let err = CmuDictionary::parse(text).unwrap_err();

        assert!(matches!(err, MajorError::Dictionary(_)));
        assert!(err.to_string().contains("line 2"), "{err}");

        let text = "CAT  K AE1 T\nDOG   \n";
        let err = CmuDictionary::parse(text).unwrap_err();
        assert!(err.to_string().contains("line 2"), "{err}");
    }

    #[test]
    fn test_latin1_decoding() {
        // "DÉJÀ  D EY1 ZH AA1" with É = 0xC9 and À = 0xC0 in ISO-8859-1
        let mut bytes = b"D".to_vec();
        bytes.push(0xC9);
        bytes.extend_from_slice(b"J");
        bytes.push(0xC0);
        bytes.extend_from_slice(b"  D EY1 ZH AA1\n");

        let dict = CmuDictionary::from_bytes(&bytes, TextEncoding::Latin1).unwrap();
        assert!(dict.contains("déjà"));

        assert!(CmuDictionary::from_bytes(&bytes, TextEncoding::Utf8).is_err());
    }

    #[test]
    fn test_phoneme_counts() {
        let dict = CmuDictionary::parse(SAMPLE).unwrap();
        let counts = dict.phoneme_counts();

        assert_eq!(counts[0], ("AE1".to_string(), 2));
        assert_eq!(counts[1], ("D".to_string(), 2));
        assert!(counts.contains(&("K".to_string(), 1)));

        let phonemes = dict.phonemes();
        assert_eq!(phonemes.first().map(String::as_str), Some("AE1"));
        assert!(phonemes.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_from_entries() {
        let dict = CmuDictionary::from_entries([
            ("Cat", vec!["K", "AE1", "T"]),
            ("dog", vec!["D", "AO1", "G"]),
        ]);
        assert!(dict.contains("cat"));
        assert_eq!(dict.entries().count(), 2);
    }

    #[test]
    fn test_load_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{SAMPLE}").unwrap();
        temp_file.flush().unwrap();

        let dict = CmuDictionary::load_from_file(temp_file.path(), TextEncoding::Latin1).unwrap();
        assert_eq!(dict.len(), 4);
        assert!(dict.contains("dog"));
    }
}
