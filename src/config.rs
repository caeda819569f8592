//! Configuration for a [`MajorSystem`](crate::system::MajorSystem) session.
//!
//! Configuration is plain serde data and can be kept in a JSON file:
//!
//! ```json
//! {
//!   "dictionary": { "path": "cmudict-0.7b", "encoding": "latin1" },
//!   "index": { "parallel": true },
//!   "search": { "max_terms": 3, "max_digits": 32, "unique": true }
//! }
//! ```
//!
//! Every field is optional. A `classes` table replaces the standard digit
//! classes, e.g. `"classes": { "0": ["S", "Z"], "1": ["T", "D"] }`.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::classifier::PhonemeClassifier;
use crate::dictionary::TextEncoding;
use crate::error::{MajorError, Result};
use crate::index::IndexConfig;
use crate::search::SearchConfig;

/// Where the pronunciation dictionary comes from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DictionaryConfig {
    /// Path of a CMU-format dictionary file.
    pub path: Option<PathBuf>,
    /// Character encoding of the file.
    pub encoding: TextEncoding,
}

/// Top-level session configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MajorSystemConfig {
    /// Dictionary source.
    pub dictionary: DictionaryConfig,
    /// Replacement digit classes, keyed by digit.
    pub classes: Option<BTreeMap<u8, Vec<String>>>,
    /// Reverse index construction.
    pub index: IndexConfig,
    /// Default search limits.
    pub search: SearchConfig,
}

impl MajorSystemConfig {
    /// Parse a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: MajorSystemConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON configuration file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        Self::from_json(&text).map_err(|e| match e {
            MajorError::Json(e) => {
                MajorError::config(format!("{}: {e}", path.as_ref().display()))
            }
            other => other,
        })
    }

    /// Check limits and the class table.
    pub fn validate(&self) -> Result<()> {
        if self.search.max_terms == Some(0) {
            return Err(MajorError::config("search.max_terms must be at least 1"));
        }
        if let Some(classes) = &self.classes {
            PhonemeClassifier::from_table(classes)?;
        }
        Ok(())
    }

    /// The classifier described by this configuration.
    pub fn classifier(&self) -> Result<PhonemeClassifier> {
        match &self.classes {
            Some(classes) => PhonemeClassifier::from_table(classes),
            None => Ok(PhonemeClassifier::major_system().clone()),
        }
    }
}
