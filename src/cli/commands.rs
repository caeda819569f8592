//! Command implementations for the `major` CLI.

use std::time::Instant;

use log::{info, warn};

use crate::classifier::Digit;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::MajorSystemConfig;
use crate::dictionary::PronunciationDictionary;
use crate::error::{MajorError, Result};
use crate::system::MajorSystem;

/// Execute a CLI command.
pub fn execute_command(args: MajorArgs) -> Result<()> {
    match &args.command {
        Command::Encode(encode_args) => encode_text(encode_args.clone(), &args),
        Command::Phonemes(phonemes_args) => show_phonemes(phonemes_args.clone(), &args),
        Command::Decode(decode_args) => decode_digits(decode_args.clone(), &args),
        Command::Lookup(lookup_args) => lookup_digits(lookup_args.clone(), &args),
        Command::Stats(stats_args) => show_stats(stats_args.clone(), &args),
        Command::Classes => show_classes(&args),
    }
}

/// Merge the configuration file with command line overrides.
fn load_config(cli_args: &MajorArgs) -> Result<MajorSystemConfig> {
    let mut config = match &cli_args.config {
        Some(path) => {
            info!("loading configuration from {}", path.display());
            MajorSystemConfig::load_from_file(path)?
        }
        None => MajorSystemConfig::default(),
    };

    if let Some(path) = &cli_args.dictionary {
        config.dictionary.path = Some(path.clone());
    }
    if let Some(encoding) = cli_args.encoding {
        config.dictionary.encoding = encoding;
    }

    Ok(config)
}

/// Load the dictionary and open a session.
fn open_system(cli_args: &MajorArgs) -> Result<MajorSystem> {
    let config = load_config(cli_args)?;
    if config.dictionary.path.is_none() {
        return Err(MajorError::config(
            "no dictionary given; pass --dictionary or set MAJOR_DICTIONARY",
        ));
    }
    MajorSystem::from_config(config)
}

/// Encode words as digits.
fn encode_text(args: EncodeArgs, cli_args: &MajorArgs) -> Result<()> {
    let system = open_system(cli_args)?;
    let encoder = system.encoder();
    let text = args.sentence();

    let unknown_terms = encoder.unknown_terms(&text);
    if !unknown_terms.is_empty() {
        warn!("not in dictionary: {}", unknown_terms.join(", "));
    }

    output_result(
        "Encoded",
        &EncodeResult {
            digits: encoder.digit_string_of(&text),
            major_phonemes: encoder
                .major_phonemes_of(&text)
                .into_iter()
                .map(str::to_string)
                .collect(),
            unknown_terms,
            text,
        },
        cli_args,
    )
}

/// Show the phonemes of words.
fn show_phonemes(args: PhonemesArgs, cli_args: &MajorArgs) -> Result<()> {
    let system = open_system(cli_args)?;
    let encoder = system.encoder();
    let text = args.text.join(" ");

    let phonemes = if args.major_only {
        encoder.major_phonemes_of(&text)
    } else {
        encoder.phonemes_of(&text)
    };

    output_result(
        "Phonemes",
        &PhonemesResult {
            phonemes: phonemes.into_iter().map(str::to_string).collect(),
            unknown_terms: encoder.unknown_terms(&text),
            text,
        },
        cli_args,
    )
}

/// Decode a digit string into terms and term combinations.
fn decode_digits(args: DecodeArgs, cli_args: &MajorArgs) -> Result<()> {
    let system = open_system(cli_args)?;

    let mut search = system.config().search.clone();
    if let Some(max_terms) = args.max_terms {
        search.max_terms = Some(max_terms);
    }
    if let Some(max_digits) = args.max_digits {
        search.max_digits = max_digits;
    }
    search.unique |= args.unique;

    if cli_args.verbosity() > 1 {
        println!("Decoding: {}", args.digits);
        println!("Search: {search:?}");
    }

    let start_time = Instant::now();
    let mut decodings: Vec<Vec<String>> = system
        .decode_with(&args.digits, &search)?
        .take(args.limit.saturating_add(1))
        .map(|decoding| decoding.to_owned_terms())
        .collect();
    let truncated = decodings.len() > args.limit;
    decodings.truncate(args.limit);

    output_result(
        "Decoded",
        &DecodeResult {
            digits: args.digits,
            decodings,
            truncated,
            duration_ms: start_time.elapsed().as_millis() as u64,
        },
        cli_args,
    )
}

/// Look up single terms for a digit string.
fn lookup_digits(args: LookupArgs, cli_args: &MajorArgs) -> Result<()> {
    let system = open_system(cli_args)?;
    let terms = system.reverse_lookup(&args.digits)?.to_vec();

    output_result(
        "Lookup",
        &LookupResult {
            digits: args.digits,
            terms,
        },
        cli_args,
    )
}

/// Show dictionary and index statistics.
fn show_stats(args: StatsArgs, cli_args: &MajorArgs) -> Result<()> {
    let system = open_system(cli_args)?;
    let dictionary = system.dictionary();

    let start_time = Instant::now();
    let index = system.index();
    let index_build_ms = start_time.elapsed().as_millis() as u64;

    let counts = dictionary.phoneme_counts();
    let top_phonemes = counts
        .iter()
        .take(args.top)
        .map(|(phoneme, count)| PhonemeCount {
            phoneme: phoneme.clone(),
            count: *count,
            digit: system.classifier().digit_of(phoneme).map(Digit::value),
        })
        .collect();

    output_result(
        "Statistics",
        &StatsResult {
            terms: dictionary.len(),
            skipped_variants: dictionary.skipped_variants(),
            distinct_phonemes: counts.len(),
            digit_strings: index.len(),
            longest_digit_string: index
                .digit_strings()
                .iter()
                .map(|digits| digits.len())
                .max()
                .unwrap_or(0),
            index_build_ms,
            top_phonemes,
        },
        cli_args,
    )
}

/// Show the digit classes in use.
fn show_classes(cli_args: &MajorArgs) -> Result<()> {
    let config = load_config(cli_args)?;
    let classifier = config.classifier()?;

    let classes = classifier
        .classes()
        .map(|(digit, phonemes)| DigitClass {
            digit: digit.value(),
            phonemes: phonemes.iter().cloned().collect(),
        })
        .collect();

    output_result("Digit classes", &ClassesResult { classes }, cli_args)
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::PathBuf;

    use clap::Parser;
    use tempfile::NamedTempFile;

    use super::*;
    use crate::dictionary::TextEncoding;

    fn dictionary_file() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            ";;; sample\nCAT  K AE1 T\nDOG  D AO1 G\nALS  AE1 L Z\n"
        )
        .unwrap();
        file.flush().unwrap();
        file
    }

    fn parse(dictionary: &NamedTempFile, rest: &[&str]) -> MajorArgs {
        let path = dictionary.path().to_string_lossy().to_string();
        let mut argv = vec!["major", "--quiet", "--format", "json", "--dictionary", path.as_str()];
        argv.extend_from_slice(rest);
        MajorArgs::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_cli_overrides_config_file() {
        let mut config_file = NamedTempFile::new().unwrap();
        write!(
            config_file,
            r#"{{ "dictionary": {{ "path": "from-config.txt", "encoding": "utf8" }} }}"#
        )
        .unwrap();
        config_file.flush().unwrap();

        let config_path = config_file.path().to_string_lossy().to_string();
        let args = MajorArgs::try_parse_from([
            "major",
            "--config",
            config_path.as_str(),
            "--dictionary",
            "from-cli.txt",
            "classes",
        ])
        .unwrap();
        let config = load_config(&args).unwrap();

        assert_eq!(config.dictionary.path, Some(PathBuf::from("from-cli.txt")));
        assert_eq!(config.dictionary.encoding, TextEncoding::Utf8);
    }

    #[test]
    fn test_commands_run() {
        let dictionary = dictionary_file();

        execute_command(parse(&dictionary, &["encode", "cat", "dog"])).unwrap();
        execute_command(parse(&dictionary, &["phonemes", "cat", "--major-only"])).unwrap();
        execute_command(parse(&dictionary, &["decode", "7117", "--limit", "3"])).unwrap();
        execute_command(parse(&dictionary, &["lookup", "50"])).unwrap();
        execute_command(parse(&dictionary, &["stats", "--top", "3"])).unwrap();
        execute_command(parse(&dictionary, &["classes"])).unwrap();
    }

    #[test]
    fn test_invalid_digits_fail() {
        let dictionary = dictionary_file();

        let err = execute_command(parse(&dictionary, &["decode", "71a7"])).unwrap_err();
        assert!(matches!(err, MajorError::InvalidInput(_)));
    }

    #[test]
    fn test_missing_dictionary() {
        let args = MajorArgs::try_parse_from(["major", "--quiet", "lookup", "50"]).unwrap();
        if args.dictionary.is_none() {
            assert!(matches!(
                execute_command(args),
                Err(MajorError::Config(_))
            ));
        }
    }
}
