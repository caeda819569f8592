//! The Major System session: encode text, look up and decode digit strings.
//!
//! A [`MajorSystem`] owns its dictionary, classifier and configuration. The
//! reverse index is built on the first call that needs it and reused after
//! that; encoding never builds it.
//!
//! ```
//! use major_system::dictionary::CmuDictionary;
//! use major_system::system::MajorSystem;
//!
//! let dictionary = CmuDictionary::parse("CAT  K AE1 T\nDOG  D AO1 G\n").unwrap();
//! let system = MajorSystem::new(dictionary);
//!
//! assert_eq!(system.encode("cat dog"), "7117");
//! assert_eq!(system.reverse_lookup("71").unwrap(), &["cat".to_string()]);
//!
//! let first = system.decode("7117").unwrap().next().unwrap();
//! assert_eq!(first.to_string(), "cat dog");
//! ```

use std::sync::OnceLock;

use crate::classifier::{Digit, PhonemeClassifier};
use crate::config::MajorSystemConfig;
use crate::dictionary::{CmuDictionary, PronunciationDictionary};
use crate::encoder::Encoder;
use crate::error::{MajorError, Result};
use crate::index::ReverseIndex;
use crate::search::{CombinationSearch, Combinations, SearchConfig, validate_digits};

/// An encoding/decoding session over one dictionary.
pub struct MajorSystem<D: PronunciationDictionary = CmuDictionary> {
    dictionary: D,
    classifier: PhonemeClassifier,
    config: MajorSystemConfig,
    index: OnceLock<ReverseIndex>,
}

impl<D: PronunciationDictionary> MajorSystem<D> {
    /// Create a session with the standard digit classes and default settings.
    pub fn new(dictionary: D) -> Self {
        Self::with_classifier(dictionary, PhonemeClassifier::major_system().clone())
    }

    /// Create a session with custom digit classes.
    pub fn with_classifier(dictionary: D, classifier: PhonemeClassifier) -> Self {
        MajorSystem {
            dictionary,
            classifier,
            config: MajorSystemConfig::default(),
            index: OnceLock::new(),
        }
    }

    /// Create a session from a configuration. The dictionary source named in
    /// `config` is ignored in favour of `dictionary`.
    pub fn with_config(dictionary: D, config: MajorSystemConfig) -> Result<Self> {
        config.validate()?;
        let classifier = config.classifier()?;
        Ok(MajorSystem {
            dictionary,
            classifier,
            config,
            index: OnceLock::new(),
        })
    }

    /// The dictionary.
    pub fn dictionary(&self) -> &D {
        &self.dictionary
    }

    /// The phoneme classifier.
    pub fn classifier(&self) -> &PhonemeClassifier {
        &self.classifier
    }

    /// The session configuration.
    pub fn config(&self) -> &MajorSystemConfig {
        &self.config
    }

    /// An encoder over this session's dictionary and classifier.
    pub fn encoder(&self) -> Encoder<'_> {
        Encoder::new(&self.dictionary, &self.classifier)
    }

    /// The reverse index, built on first use.
    pub fn index(&self) -> &ReverseIndex {
        self.index
            .get_or_init(|| ReverseIndex::build(&self.encoder(), &self.config.index))
    }

    /// Whether the reverse index has been built yet.
    pub fn is_indexed(&self) -> bool {
        self.index.get().is_some()
    }

    /// Digit string of `text`. Unknown words are dropped.
    pub fn encode(&self, text: &str) -> String {
        self.encoder().digit_string_of(text)
    }

    /// Digits of `text`.
    pub fn digits(&self, text: &str) -> Vec<Digit> {
        self.encoder().digit_sequence_of(text)
    }

    /// Phonemes of `text`.
    pub fn phonemes(&self, text: &str) -> Vec<&str> {
        self.encoder().phonemes_of(text)
    }

    /// Terms whose encoding is exactly `digits`.
    pub fn reverse_lookup(&self, digits: &str) -> Result<&[String]> {
        validate_digits(digits)?;
        Ok(self.index().terms_for(digits))
    }

    /// Lazily decode `digits` with the session's search settings.
    pub fn decode(&self, digits: &str) -> Result<Combinations<'_>> {
        self.decode_with(digits, &self.config.search)
    }

    /// Lazily decode `digits` with explicit search settings.
    pub fn decode_with(&self, digits: &str, config: &SearchConfig) -> Result<Combinations<'_>> {
        // Reject bad input before paying for the index.
        validate_digits(digits)?;
        CombinationSearch::new(self.index(), config.clone()).enumerate(digits)
    }
}

impl MajorSystem<CmuDictionary> {
    /// Load the dictionary file named in `config` and create a session.
    pub fn from_config(config: MajorSystemConfig) -> Result<Self> {
        let path = config.dictionary.path.clone().ok_or_else(|| {
            MajorError::config("no dictionary path configured")
        })?;
        let dictionary = CmuDictionary::load_from_file(&path, config.dictionary.encoding)?;
        Self::with_config(dictionary, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::Decoding;

    fn dictionary() -> CmuDictionary {
        CmuDictionary::parse(
            ";;; test dictionary
ALS  AE1 L Z
CAT  K AE1 T
DOG  D AO1 G
EYE  AY1
MENTOR  M EH1 N T AO2 R
MANTRA  M AE1 N T R AH0
MAN  M AE1 N
TIRE  T AY1 R
TREE  T R IY1
",
        )
        .unwrap()
    }

    #[test]
    fn test_encode_and_reverse_lookup() {
        let system = MajorSystem::new(dictionary());

        assert_eq!(system.encode("als"), "50");
        assert!(system.reverse_lookup("50").unwrap().contains(&"als".to_string()));
        assert_eq!(system.encode("mentor"), "3214");
        assert_eq!(
            system.reverse_lookup("3214").unwrap(),
            &["mantra".to_string(), "mentor".to_string()]
        );
    }

    #[test]
    fn test_reverse_lookup_contains_every_term() {
        let system = MajorSystem::new(dictionary());

        for (term, _) in system.dictionary().entries() {
            let digits = system.encode(term);
            assert!(
                system.reverse_lookup(&digits).unwrap().iter().any(|t| t == term),
                "{term}"
            );
        }
    }

    #[test]
    fn test_custom_classes_scenario() {
        let classes = vec![
            (Digit::new(0).unwrap(), vec!["Z", "S"]),
            (Digit::new(5).unwrap(), vec!["L"]),
        ];
        let classifier = PhonemeClassifier::new(classes).unwrap();
        let dict = CmuDictionary::from_entries([("als", vec!["AE1", "L", "Z"])]);
        let system = MajorSystem::with_classifier(dict, classifier);

        assert_eq!(system.encode("als"), "50");
        assert_eq!(system.reverse_lookup("50").unwrap(), &["als".to_string()]);
    }

    #[test]
    fn test_decode_combinations() {
        let system = MajorSystem::new(dictionary());

        let results: Vec<Decoding<'_>> = system.decode("7117").unwrap().collect();
        assert!(results.contains(&Decoding::Combination(vec!["cat", "dog"])));

        let results: Vec<String> = system
            .decode("3214")
            .unwrap()
            .map(|d| d.to_string())
            .collect();
        assert_eq!(results, vec!["mantra", "mentor", "man tire", "man tree"]);

        for decoding in system.decode("32147117").unwrap() {
            let joined = decoding.terms().join(" ");
            assert_eq!(system.encode(&joined), "32147117");
        }
    }

    #[test]
    fn test_decode_edge_cases() {
        let system = MajorSystem::new(dictionary());

        assert_eq!(system.decode("").unwrap().count(), 0);
        assert!(matches!(
            system.decode("71x7"),
            Err(MajorError::InvalidInput(_))
        ));
        assert!(matches!(
            system.reverse_lookup("5O"),
            Err(MajorError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_index_built_lazily_once() {
        let system = MajorSystem::new(dictionary());

        system.encode("cat");
        assert!(!system.is_indexed());

        let first = system.index() as *const ReverseIndex;
        assert!(system.is_indexed());
        let second = system.index() as *const ReverseIndex;
        assert_eq!(first, second);
    }

    #[test]
    fn test_with_config_search_defaults() {
        let config = MajorSystemConfig::from_json(r#"{ "search": { "max_terms": 1 } }"#).unwrap();
        let system = MajorSystem::with_config(dictionary(), config).unwrap();

        let results: Vec<String> = system
            .decode("3214")
            .unwrap()
            .map(|d| d.to_string())
            .collect();
        assert_eq!(results, vec!["mantra", "mentor"]);

        let unbounded = SearchConfig::default();
        assert_eq!(system.decode_with("3214", &unbounded).unwrap().count(), 4);
    }

    #[test]
    fn test_from_config_requires_path() {
        assert!(matches!(
            MajorSystem::from_config(MajorSystemConfig::default()),
            Err(MajorError::Config(_))
        ));
    }
}
