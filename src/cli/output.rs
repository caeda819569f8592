//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{MajorArgs, OutputFormat};
use crate::error::Result;

/// Human-readable rendering of a command result.
pub trait HumanOutput {
    /// Render the result as lines of text.
    fn render_human(&self) -> String;
}

/// Result structure for encoding.
#[derive(Debug, Serialize, Deserialize)]
pub struct EncodeResult {
    pub text: String,
    pub digits: String,
    pub major_phonemes: Vec<String>,
    pub unknown_terms: Vec<String>,
}

/// Result structure for phoneme transcription.
#[derive(Debug, Serialize, Deserialize)]
pub struct PhonemesResult {
    pub text: String,
    pub phonemes: Vec<String>,
    pub unknown_terms: Vec<String>,
}

/// Result structure for decoding.
#[derive(Debug, Serialize, Deserialize)]
pub struct DecodeResult {
    pub digits: String,
    pub decodings: Vec<Vec<String>>,
    /// Whether more decodings exist beyond the limit.
    pub truncated: bool,
    pub duration_ms: u64,
}

/// Result structure for reverse lookup.
#[derive(Debug, Serialize, Deserialize)]
pub struct LookupResult {
    pub digits: String,
    pub terms: Vec<String>,
}

/// Occurrences of one phoneme in the dictionary.
#[derive(Debug, Serialize, Deserialize)]
pub struct PhonemeCount {
    pub phoneme: String,
    pub count: usize,
    pub digit: Option<u8>,
}

/// Dictionary and index statistics.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResult {
    pub terms: usize,
    pub skipped_variants: usize,
    pub distinct_phonemes: usize,
    pub digit_strings: usize,
    pub longest_digit_string: usize,
    pub index_build_ms: u64,
    pub top_phonemes: Vec<PhonemeCount>,
}

/// One digit class.
#[derive(Debug, Serialize, Deserialize)]
pub struct DigitClass {
    pub digit: u8,
    pub phonemes: Vec<String>,
}

/// The digit class table.
#[derive(Debug, Serialize, Deserialize)]
pub struct ClassesResult {
    pub classes: Vec<DigitClass>,
}

impl HumanOutput for EncodeResult {
    fn render_human(&self) -> String {
        let mut out = format!("{}\n", self.digits);
        if !self.major_phonemes.is_empty() {
            out.push_str(&format!("  phonemes: {}\n", self.major_phonemes.join(" ")));
        }
        if !self.unknown_terms.is_empty() {
            out.push_str(&format!(
                "  not in dictionary (ignored): {}\n",
                self.unknown_terms.join(", ")
            ));
        }
        out
    }
}

impl HumanOutput for PhonemesResult {
    fn render_human(&self) -> String {
        let mut out = format!("{}\n", self.phonemes.join(" "));
        if !self.unknown_terms.is_empty() {
            out.push_str(&format!(
                "  not in dictionary (ignored): {}\n",
                self.unknown_terms.join(", ")
            ));
        }
        out
    }
}

impl HumanOutput for DecodeResult {
    fn render_human(&self) -> String {
        if self.decodings.is_empty() {
            return format!("No terms spell {}\n", self.digits);
        }
        let mut out = String::new();
        for (i, terms) in self.decodings.iter().enumerate() {
            out.push_str(&format!("{:>4}. {}\n", i + 1, terms.join(" ")));
        }
        if self.truncated {
            out.push_str("  ... (more results, raise --limit)\n");
        }
        out
    }
}

impl HumanOutput for LookupResult {
    fn render_human(&self) -> String {
        if self.terms.is_empty() {
            format!("No single term spells {}\n", self.digits)
        } else {
            format!("{}\n", self.terms.join("\n"))
        }
    }
}

impl HumanOutput for StatsResult {
    fn render_human(&self) -> String {
        let mut out = String::new();
        out.push_str("Dictionary Statistics:\n");
        out.push_str("══════════════════════\n");
        out.push_str(&format!("Terms: {}\n", self.terms));
        out.push_str(&format!(
            "Alternative pronunciations skipped: {}\n",
            self.skipped_variants
        ));
        out.push_str(&format!("Distinct phonemes: {}\n", self.distinct_phonemes));
        out.push_str(&format!("Distinct digit strings: {}\n", self.digit_strings));
        out.push_str(&format!(
            "Longest digit string: {}\n",
            self.longest_digit_string
        ));
        out.push_str(&format!("Index build time: {}ms\n", self.index_build_ms));

        if !self.top_phonemes.is_empty() {
            out.push_str("\nMost common phonemes:\n");
            out.push_str("─────────────────────\n");
            for entry in &self.top_phonemes {
                let digit = entry
                    .digit
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "-".to_string());
                out.push_str(&format!(
                    "  {:<4} {:>9}  {}\n",
                    entry.phoneme, entry.count, digit
                ));
            }
        }
        out
    }
}

impl HumanOutput for ClassesResult {
    fn render_human(&self) -> String {
        self.classes
            .iter()
            .map(|class| format!("{}: {}\n", class.digit, class.phonemes.join(" ")))
            .collect()
    }
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize + HumanOutput>(
    message: &str,
    result: &T,
    args: &MajorArgs,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: HumanOutput>(message: &str, result: &T, args: &MajorArgs) -> Result<()> {
    if args.verbosity() > 1 {
        println!("{message}");
        println!();
    }
    print!("{}", result.render_human());
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &MajorArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    println!("{json}");
    Ok(())
}
