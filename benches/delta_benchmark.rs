//! Benchmarks for the evidence filter and delta computation.

use cafa_holdout::holdout::{build_holdout_sets, EvidenceFilter};
use cafa_holdout::model::AnnotationTable;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

const CODES: [&str; 6] = ["EXP", "IDA", "IPI", "IEA", "TAS", "ISS"];

/// Synthetic snapshot; `shift` moves a slice of the terms so consecutive
/// snapshots share most but not all pairs.
fn synthetic_snapshot(rows: usize, shift: usize) -> AnnotationTable {
    let data = (0..rows)
        .map(|i| {
            let qualifier = if i % 17 == 0 { "NOT|enables" } else { "enables" };
            vec![
                format!("P{:05}", i / 8),
                format!("GO:{:07}", (i * 7 + shift) % 5000),
                CODES[i % CODES.len()].to_string(),
                qualifier.to_string(),
            ]
        })
        .collect();
    AnnotationTable::with_rows(["protein_id", "go_term", "evidence_code", "qualifier"], data)
        .expect("fixed width rows")
}

fn bench_filter(c: &mut Criterion) {
    let filter = EvidenceFilter::curated();
    let mut group = c.benchmark_group("evidence_filter");
    for rows in [1_000, 10_000, 100_000] {
        let table = synthetic_snapshot(rows, 0);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &table, |b, table| {
            b.iter(|| filter.apply(black_box(table)));
        });
    }
    group.finish();
}

fn bench_holdout(c: &mut Criterion) {
    let filter = EvidenceFilter::curated();
    let mut group = c.benchmark_group("holdout_sets");
    for rows in [1_000, 10_000, 100_000] {
        let n = synthetic_snapshot(rows, 0);
        let next = synthetic_snapshot(rows + rows / 10, 3);
        group.bench_with_input(
            BenchmarkId::from_parameter(rows),
            &(n, next),
            |b, (n, next)| {
                b.iter(|| build_holdout_sets(black_box(n), black_box(next), &filter));
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_filter, bench_holdout);
criterion_main!(benches);
