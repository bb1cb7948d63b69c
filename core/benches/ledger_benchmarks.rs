//! Ledger Benchmarks
//!
//! - Catalog loading from CSV
//! - Ledger line encode/decode
//! - Statistics aggregation over growing ledgers
//!
//! Run with: `cargo bench --bench ledger_benchmarks`

#![allow(missing_docs)] // Benchmarks don't need extensive docs
#![allow(clippy::expect_used)] // Benchmarks can use expect for setup

use chrono::{TimeZone, Utc};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use std::fmt::Write;
use ticket_ledger_core::{Catalog, LedgerStats, Purchase, PurchaseRecord};

const CATEGORIES: [&str; 4] = ["Adult", "Student", "Child", "Senior"];

fn catalog_csv(rows: usize) -> String {
    let mut csv = String::from("category_title,topup_title,topup_price_in_pence\n");
    for i in 0..rows {
        let category = CATEGORIES[i % CATEGORIES.len()];
        writeln!(csv, "{category},Ticket {i},{}", 100 + i).expect("write to string");
    }
    csv
}

fn ledger_lines(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            let category = CATEGORIES[i % CATEGORIES.len()];
            format!("2025-01-01 09:00:00|{category}|Single|{}|{}.5", i % 5 + 1, i % 20)
        })
        .collect()
}

/// Benchmark catalog loading
fn benchmark_catalog_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("catalog_load");

    for rows in [10, 100, 1000] {
        let csv = catalog_csv(rows);
        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &csv, |b, csv| {
            b.iter(|| black_box(Catalog::from_reader(black_box(csv.as_bytes()))));
        });
    }

    group.finish();
}

/// Benchmark ledger line codec
fn benchmark_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("ledger_codec");
    group.throughput(Throughput::Elements(1));

    let catalog = Catalog::from_reader(catalog_csv(1).as_bytes()).expect("catalog");
    let ticket = &catalog.categories()[0].tickets()[0];
    let at = Utc
        .with_ymd_and_hms(2025, 1, 1, 9, 30, 0)
        .single()
        .expect("valid timestamp");
    let purchase = Purchase::at(ticket, 3, at).expect("purchase");
    let line = purchase.encode();

    group.bench_function("encode", |b| {
        b.iter(|| black_box(purchase.encode()));
    });

    group.bench_function("decode", |b| {
        b.iter(|| black_box(PurchaseRecord::decode(black_box(&line))));
    });

    group.finish();
}

/// Benchmark statistics aggregation
fn benchmark_stats(c: &mut Criterion) {
    let mut group = c.benchmark_group("ledger_stats");

    for count in [100, 1000, 10_000] {
        let lines = ledger_lines(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &lines, |b, lines| {
            b.iter(|| black_box(LedgerStats::from_lines(black_box(lines))));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_catalog_load, benchmark_codec, benchmark_stats);
criterion_main!(benches);
