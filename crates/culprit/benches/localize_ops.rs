//! Localization Pipeline Benchmarks
//!
//! Benchmarks for matrix parsing, aggregation, scoring and ranking.
//!
//! Run with: `cargo bench --bench localize_ops`

#![allow(clippy::unwrap_used)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use culprit::{aggregate, localize, rank, CoverageMatrix, DiagnosticsReport, Technique};

/// Deterministic pseudo-random matrix text, roughly 30% dense, 10% failing
fn matrix_text(tests: usize, elements: usize) -> String {
    let mut out = String::with_capacity(tests * (elements * 2 + 2));
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    for _ in 0..tests {
        for _ in 0..elements {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            out.push(if state % 10 < 3 { '1' } else { '0' });
            out.push(' ');
        }
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        out.push(if state % 10 == 0 { '-' } else { '+' });
        out.push('\n');
    }
    out
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("matrix_parse");

    for (tests, elements) in [(100, 100), (500, 1000), (2000, 2000)] {
        let text = matrix_text(tests, elements);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{tests}x{elements}")),
            &text,
            |bench, text| {
                bench.iter(|| {
                    let matrix = CoverageMatrix::parse(black_box(text));
                    black_box(matrix)
                });
            },
        );
    }

    group.finish();
}

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");

    for (tests, elements) in [(100, 100), (500, 1000), (2000, 2000)] {
        let matrix = CoverageMatrix::parse(&matrix_text(tests, elements)).unwrap();
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{tests}x{elements}")),
            &matrix,
            |bench, matrix| {
                bench.iter(|| black_box(aggregate(black_box(matrix))));
            },
        );
    }

    group.finish();
}

fn bench_techniques(c: &mut Criterion) {
    let mut group = c.benchmark_group("score_and_rank");
    let matrix = CoverageMatrix::parse(&matrix_text(500, 5000)).unwrap();

    for technique in Technique::ALL {
        group.bench_with_input(
            BenchmarkId::from_parameter(technique.name()),
            &technique,
            |bench, &technique| {
                bench.iter(|| black_box(localize(black_box(&matrix), technique)));
            },
        );
    }

    group.finish();
}

fn bench_rank(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank");

    for size in [1_000, 10_000, 100_000] {
        let scores: Vec<f64> = (0..size)
            .map(|i| if i % 97 == 0 { f64::NAN } else { f64::from((i * 31) % 113) / 113.0 })
            .collect();
        group.bench_with_input(BenchmarkId::from_parameter(size), &scores, |bench, scores| {
            bench.iter(|| black_box(rank(black_box(scores))));
        });
    }

    group.finish();
}

fn bench_diagnostics(c: &mut Criterion) {
    let matrix = CoverageMatrix::parse(&matrix_text(500, 1000)).unwrap();
    c.bench_function("diagnostics_500x1000", |bench| {
        bench.iter(|| black_box(DiagnosticsReport::from_matrix(black_box(&matrix))));
    });
}

criterion_group!(
    benches,
    bench_parse,
    bench_aggregate,
    bench_techniques,
    bench_rank,
    bench_diagnostics
);
criterion_main!(benches);
