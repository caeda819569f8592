//! Error types for the Major System library.
//!
//! All fallible operations return [`MajorError`] through the crate-wide
//! [`Result`] alias.
//!
//! # Examples
//!
//! ```
//! use major_system::error::{MajorError, Result};
//!
//! fn check(digits: &str) -> Result<()> {
//!     if digits.chars().all(|c| c.is_ascii_digit()) {
//!         Ok(())
//!     } else {
//!         Err(MajorError::invalid_input(format!("not a digit string: {digits}")))
//!     }
//! }
//!
//! assert!(check("3214").is_ok());
//! assert!(check("32a4").is_err());
//! ```

use std::io;

use anyhow;
use thiserror::Error;

/// The main error type for Major System operations.
#[derive(Error, Debug)]
pub enum MajorError {
    /// I/O errors (reading dictionary or configuration files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Caller supplied input that cannot be processed (e.g. non-digit queries)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Pronunciation dictionary ingestion errors
    #[error("Dictionary error: {0}")]
    Dictionary(String),

    /// Digit class table errors
    #[error("Classifier error: {0}")]
    Classifier(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with MajorError.
pub type Result<T> = std::result::Result<T, MajorError>;

impl MajorError {
    /// Create a new invalid input error.
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        MajorError::InvalidInput(msg.into())
    }

    /// Create a new dictionary error.
    pub fn dictionary<S: Into<String>>(msg: S) -> Self {
        MajorError::Dictionary(msg.into())
    }

    /// Create a new classifier error.
    pub fn classifier<S: Into<String>>(msg: S) -> Self {
        MajorError::Classifier(msg.into())
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        MajorError::Config(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        MajorError::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = MajorError::invalid_input("digit string contains 'x'");
        assert_eq!(
            error.to_string(),
            "Invalid input: digit string contains 'x'"
        );

        let error = MajorError::dictionary("line 3: missing phonemes");
        assert_eq!(error.to_string(), "Dictionary error: line 3: missing phonemes");

        let error = MajorError::classifier("phoneme 'S' assigned to 0 and 1");
        assert_eq!(
            error.to_string(),
            "Classifier error: phoneme 'S' assigned to 0 and 1"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let major_error = MajorError::from(io_error);

        match major_error {
            MajorError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }
}
