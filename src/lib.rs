//! # Major System
//!
//! Encode words as numbers and numbers as words with the Mnemonic Major
//! System.
//!
//! ## Features
//!
//! - CMU Pronouncing Dictionary reader (Latin-1 or UTF-8)
//! - Standard or custom digit classes, validated for overlaps
//! - Reverse index from digit strings to terms
//! - Lazy, middle-out combination search for multi-word spellings
//! - Term count and input length guards for long numbers

pub mod classifier;
pub mod cli;
pub mod config;
pub mod dictionary;
pub mod encoder;
pub mod error;
pub mod index;
pub mod search;
pub mod system;

pub mod prelude {
    pub use crate::classifier::{Digit, PhonemeClassifier};
    pub use crate::config::MajorSystemConfig;
    pub use crate::dictionary::{CmuDictionary, PronunciationDictionary, TextEncoding};
    pub use crate::error::{MajorError, Result};
    pub use crate::search::{Decoding, SearchConfig};
    pub use crate::system::MajorSystem;
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
