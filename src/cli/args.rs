//! Command line argument parsing for the `major` CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::dictionary::TextEncoding;

/// major - turn numbers into words and words into numbers
#[derive(Parser, Debug, Clone)]
#[command(name = "major")]
#[command(about = "Mnemonic Major System encoder and decoder")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct MajorArgs {
    /// Pronunciation dictionary in CMU format
    #[arg(short, long, env = "MAJOR_DICTIONARY", global = true)]
    pub dictionary: Option<PathBuf>,

    /// JSON configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Character encoding of the dictionary file
    #[arg(long, global = true)]
    pub encoding: Option<TextEncoding>,

    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl MajorArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Encode words as a digit string
    Encode(EncodeArgs),

    /// Show the phonemes of words
    Phonemes(PhonemesArgs),

    /// Find terms and term combinations spelling a number
    Decode(DecodeArgs),

    /// Find single terms spelling exactly a number
    Lookup(LookupArgs),

    /// Show dictionary and index statistics
    Stats(StatsArgs),

    /// Show the digit classes
    Classes,
}

/// Arguments for encoding text
#[derive(Parser, Debug, Clone)]
pub struct EncodeArgs {
    /// Words to encode
    #[arg(value_name = "TEXT", required = true, num_args = 1..)]
    pub text: Vec<String>,
}

impl EncodeArgs {
    /// The words joined into one sentence
    pub fn sentence(&self) -> String {
        self.text.join(" ")
    }
}

/// Arguments for showing phonemes
#[derive(Parser, Debug, Clone)]
pub struct PhonemesArgs {
    /// Words to transcribe
    #[arg(value_name = "TEXT", required = true, num_args = 1..)]
    pub text: Vec<String>,

    /// Only show phonemes that carry a digit
    #[arg(short, long)]
    pub major_only: bool,
}

/// Arguments for decoding a number
#[derive(Parser, Debug, Clone)]
pub struct DecodeArgs {
    /// Digit string to decode
    #[arg(value_name = "DIGITS")]
    pub digits: String,

    /// Maximum number of results to show
    #[arg(short, long, default_value = "20")]
    pub limit: usize,

    /// Maximum number of terms per combination
    #[arg(short = 't', long)]
    pub max_terms: Option<usize>,

    /// Longest digit string accepted
    #[arg(long)]
    pub max_digits: Option<usize>,

    /// Skip combinations already shown through another split
    #[arg(short, long)]
    pub unique: bool,
}

/// Arguments for reverse lookup
#[derive(Parser, Debug, Clone)]
pub struct LookupArgs {
    /// Digit string to look up
    #[arg(value_name = "DIGITS")]
    pub digits: String,
}

/// Arguments for statistics
#[derive(Parser, Debug, Clone)]
pub struct StatsArgs {
    /// Number of most common phonemes to show
    #[arg(short, long, default_value = "10")]
    pub top: usize,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
