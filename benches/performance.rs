// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Performance benchmarks for Cadenza
//!
//! Run with: cargo bench
//!
//! These benchmarks measure:
//! - Progression generation across lengths
//! - Chord realization
//! - Melody generation
//! - Harmonic analysis
//! - A full composition run

use cadenza::arrangement::compose_progression;
use cadenza::generators::{chord, melody, progression, MelodyOptions};
use cadenza::{analyze, compose, CompositionParams, Key, Mode, Note, Structure};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Benchmark progression generation for growing piece lengths
fn bench_progression(c: &mut Criterion) {
    let mut group = c.benchmark_group("progression");
    let mut rng = StdRng::seed_from_u64(1);

    for length in [4usize, 32, 256].iter() {
        group.bench_with_input(BenchmarkId::new("generate", length), length, |b, &length| {
            b.iter(|| progression::generate(Mode::Major, black_box(length), &mut rng))
        });
        group.bench_with_input(BenchmarkId::new("aaba", length), length, |b, &length| {
            b.iter(|| compose_progression(Structure::Aaba, Mode::Minor, black_box(length), &mut rng))
        });
    }

    group.finish();
}

/// Benchmark voicing a single chord
fn bench_realize(c: &mut Criterion) {
    let key = Key::new(Note::Ds, Mode::Minor);
    let mut rng = StdRng::seed_from_u64(2);

    c.bench_function("realize_v7", |b| {
        b.iter(|| chord::realize(black_box("V7"), &key, &mut rng))
    });
}

/// Benchmark melody generation over a fixed progression
fn bench_melody(c: &mut Criterion) {
    let key = Key::new(Note::C, Mode::Major);
    let mut rng = StdRng::seed_from_u64(3);
    let options = MelodyOptions::default();

    let mut group = c.benchmark_group("melody");
    for length in [8usize, 64].iter() {
        let progression = progression::generate(Mode::Major, *length, &mut rng).unwrap();
        group.bench_with_input(BenchmarkId::new("generate", length), &progression, |b, p| {
            b.iter(|| melody::generate(black_box(p), &key, &options, &mut rng))
        });
    }
    group.finish();
}

/// Benchmark analysis of a long progression
fn bench_analysis(c: &mut Criterion) {
    let key = Key::new(Note::A, Mode::Minor);
    let mut rng = StdRng::seed_from_u64(4);
    let progression = progression::generate(Mode::Minor, 128, &mut rng).unwrap();

    c.bench_function("analyze_128", |b| {
        b.iter(|| analyze(black_box(&progression), &key))
    });
}

/// Benchmark a full seeded composition
fn bench_compose(c: &mut Criterion) {
    let params = CompositionParams {
        length: 32,
        structure: Structure::Aaba,
        seed: Some(5),
        ..Default::default()
    };

    c.bench_function("compose_32", |b| b.iter(|| compose(black_box(params.clone()))));
}

criterion_group!(
    benches,
    bench_progression,
    bench_realize,
    bench_melody,
    bench_analysis,
    bench_compose,
);

criterion_main!(benches);
