//! Criterion benchmarks for the Major System encoder and decoder.
//!
//! Covers:
//! - Dictionary parsing
//! - Reverse index construction (sequential and parallel)
//! - Single-term lookup and combination search

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use major_system::dictionary::CmuDictionary;
use major_system::encoder::Encoder;
use major_system::index::{IndexConfig, ReverseIndex};
use major_system::prelude::*;
use std::hint::black_box;

const ONSETS: &[&str] = &["S", "T", "N", "M", "R", "L", "SH", "K", "F", "P", "HH", "W"];
const VOWELS: &[&str] = &["AE1", "IY1", "OW1", "AH0"];

/// Generate a synthetic CMU-format dictionary.
///
/// Terms are named after their index so every line is unique.
fn generate_dictionary(count: usize) -> String {
    let mut text = String::from(";;; synthetic benchmark dictionary\n");
    for i in 0..count {
        let syllables = 1 + i % 3;
        let mut phonemes = Vec::with_capacity(syllables * 2);
        for s in 0..syllables {
            phonemes.push(ONSETS[(i * 7 + s * 13) % ONSETS.len()]);
            phonemes.push(VOWELS[(i + s) % VOWELS.len()]);
        }
        text.push_str(&format!("W{i}  {}\n", phonemes.join(" ")));
    }
    text
}

/// Benchmark dictionary parsing.
fn bench_dictionary(c: &mut Criterion) {
    let mut group = c.benchmark_group("dictionary");
    let text = generate_dictionary(10_000);

    group.throughput(Throughput::Elements(10_000));
    group.bench_function("parse_10k_terms", |b| {
        b.iter(|| {
            let dictionary = CmuDictionary::parse(black_box(&text)).unwrap();
            black_box(dictionary)
        })
    });

    group.finish();
}

/// Benchmark reverse index construction.
fn bench_index_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_build");
    group.sample_size(20);

    let dictionary = CmuDictionary::parse(&generate_dictionary(20_000)).unwrap();
    let classifier = PhonemeClassifier::major_system();
    let encoder = Encoder::new(&dictionary, classifier);

    group.throughput(Throughput::Elements(20_000));
    for parallel in [false, true] {
        group.bench_with_input(
            BenchmarkId::new("build", if parallel { "parallel" } else { "sequential" }),
            &IndexConfig { parallel },
            |b, config| {
                b.iter(|| {
                    let index = ReverseIndex::build(black_box(&encoder), config);
                    black_box(index)
                })
            },
        );
    }

    group.finish();
}

/// Benchmark lookups and combination search.
fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    let dictionary = CmuDictionary::parse(&generate_dictionary(20_000)).unwrap();
    let system = MajorSystem::new(dictionary);
    system.index();

    group.bench_function("reverse_lookup", |b| {
        b.iter(|| {
            let terms = system.reverse_lookup(black_box("7432")).unwrap();
            black_box(terms.len())
        })
    });

    for digits in ["314159", "314159265358", "31415926535897932384"] {
        group.bench_with_input(
            BenchmarkId::new("first_100_combinations", digits.len()),
            digits,
            |b, digits| {
                b.iter(|| {
                    let count = system.decode(black_box(digits)).unwrap().take(100).count();
                    black_box(count)
                })
            },
        );
    }

    let config = SearchConfig::default().max_terms(3).unique(true);
    group.bench_function("bounded_unique_12_digits", |b| {
        b.iter(|| {
            let count = system
                .decode_with(black_box("314159265358"), &config)
                .unwrap()
                .take(100)
                .count();
            black_box(count)
        })
    });

    group.finish();
}

criterion_group!(benches, bench_dictionary, bench_index_build, bench_decode);
criterion_main!(benches);
