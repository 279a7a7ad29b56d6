//! Benchmarks for cyclic code decoding
//!
//! This benchmark suite measures:
//! - Hard-decision BCH decoding with each error locator
//! - Errors-and-erasures Reed-Solomon decoding with naive and Forney values
//! - Min-sum soft-decision decoding variants

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use cyclic_codes::ecc::{
    Bch, Capability, CodeConfig, Decoder, ErrorCorrection, ErrorValues, Locator, MinSum,
    MinSumVariant, ReedSolomon, SoftDecision,
};
use rand::seq::index::sample;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

/// Received words with exactly `errors` flipped bits
fn noisy_words(code: &Bch, errors: usize, count: usize) -> Vec<Vec<u8>> {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let parameters = code.parameters();
    (0..count)
        .map(|_| {
            let message: Vec<u8> = (0..parameters.information_length)
                .map(|_| rng.gen_range(0..2))
                .collect();
            let mut word = code.encode(&message).unwrap();
            for position in sample(&mut rng, parameters.length, errors).into_vec() {
                word[position] ^= 1;
            }
            word
        })
        .collect()
}

/// Benchmark BCH(63, 45) hard-decision decoding
fn bench_bch_locators(c: &mut Criterion) {
    let mut group = c.benchmark_group("BCH(63,45)/Locator");

    for locator in Locator::ALL {
        let code =
            Bch::new(&CodeConfig::new(6, Capability::Errors(3)).with_locator(locator)).unwrap();
        let words = noisy_words(&code, 3, 64);

        group.bench_with_input(BenchmarkId::from_parameter(locator), &words, |b, words| {
            b.iter(|| {
                for word in words {
                    black_box(code.correct(black_box(word), &[]).unwrap());
                }
            });
        });
    }

    group.finish();
}

/// Benchmark RS(255, 223) decoding with 8 errors and 8 erasures
fn bench_reed_solomon(c: &mut Criterion) {
    let mut group = c.benchmark_group("RS(255,223)/ErrorValues");
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    for values in [ErrorValues::Naive, ErrorValues::Forney] {
        let config = CodeConfig::new(8, Capability::Errors(16))
            .with_locator(Locator::BerlekampMassey)
            .with_error_values(values);
        let code = ReedSolomon::new(&config).unwrap();

        let message: Vec<u32> = (0..223).map(|_| rng.gen_range(0..256)).collect();
        let mut received = code.encode(&message).unwrap();
        let positions = sample(&mut rng, 255, 16).into_vec();
        for &position in &positions {
            received[position] ^= rng.gen_range(1..256);
        }
        let erasures = &positions[..8];

        group.bench_function(values.name(), |b| {
            b.iter(|| black_box(code.correct(black_box(&received), erasures).unwrap()));
        });
    }

    group.finish();
}

/// Benchmark min-sum variants on BCH(31, 21) over an AWGN channel
fn bench_min_sum(c: &mut Criterion) {
    let mut group = c.benchmark_group("BCH(31,21)/MinSum");
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let noise = Normal::new(0.0, 0.5).unwrap();
    let observations: Vec<Vec<f64>> = (0..32)
        .map(|_| (0..31).map(|_| 1.0 + noise.sample(&mut rng)).collect())
        .collect();

    let variants = [
        MinSumVariant::Plain,
        MinSumVariant::Normalized { alpha: 0.8 },
        MinSumVariant::Offset { beta: 0.15 },
        MinSumVariant::SelfCorrecting1,
        MinSumVariant::SelfCorrecting2,
        MinSumVariant::TwoDimensional {
            alpha: 0.8,
            beta: 0.9,
        },
    ];
    for variant in variants {
        let config = CodeConfig::new(5, Capability::Errors(2))
            .with_decoder(Decoder::SoftDecision(MinSum::new(variant)));
        let code = Bch::new(&config).unwrap();

        group.bench_function(variant.name(), |b| {
            b.iter(|| {
                for y in &observations {
                    // failures count as word errors, not benchmark errors
                    let _ = black_box(code.correct_soft(black_box(y), &[]));
                }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_bch_locators, bench_reed_solomon, bench_min_sum);
criterion_main!(benches);
