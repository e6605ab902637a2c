//! Criterion benchmarks for rust_tee_logger

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rust_tee_logger::prelude::*;
use std::sync::Arc;

/// Appender that discards everything, so only dispatch is measured
struct Discard;

impl Appender for Discard {
    fn append(&mut self, entry: &LogEntry) -> Result<()> {
        black_box(entry);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "discard"
    }
}

fn sink(level: LogLevel) -> SharedLogger {
    Arc::new(
        SinkLogger::builder()
            .min_level(level)
            .appender(Discard)
            .build(),
    )
}

fn tee_of(n: usize, level: LogLevel) -> SharedLogger {
    tee_or_nop((0..n).map(|_| sink(level)).collect())
}

// ============================================================================
// Fan-out Benchmarks
// ============================================================================

fn bench_fan_out(c: &mut Criterion) {
    let mut group = c.benchmark_group("fan_out");
    group.throughput(Throughput::Elements(1));
    let fields = Fields::new().with_field("user_id", 42).with_field("path", "/api");

    for n in [1usize, 2, 4, 8] {
        let logger = tee_of(n, LogLevel::Info);
        group.bench_with_input(BenchmarkId::new("info", n), &n, |b, _| {
            b.iter(|| logger.info(black_box("request handled"), black_box(&fields)));
        });
    }

    group.finish();
}

// ============================================================================
// Check Benchmarks
// ============================================================================

fn bench_check(c: &mut Criterion) {
    let mut group = c.benchmark_group("check");
    group.throughput(Throughput::Elements(1));

    let all_filtered = tee_of(8, LogLevel::Error);
    group.bench_function("all_filtered", |b| {
        b.iter(|| black_box(all_filtered.check(LogLevel::Debug, "noise").is_some()));
    });

    let first_enabled = tee_or_nop(
        std::iter::once(sink(LogLevel::Debug))
            .chain((0..7).map(|_| sink(LogLevel::Error)))
            .collect(),
    );
    group.bench_function("first_enabled", |b| {
        b.iter(|| black_box(first_enabled.check(LogLevel::Debug, "noise").is_some()));
    });

    group.bench_function("terminal", |b| {
        b.iter(|| black_box(all_filtered.check(LogLevel::Fatal, "exit").is_some()));
    });

    group.finish();
}

// ============================================================================
// Field Binding Benchmarks
// ============================================================================

fn bench_with(c: &mut Criterion) {
    let mut group = c.benchmark_group("with");
    let logger = tee_of(4, LogLevel::Info);
    let fields = Fields::new().with_field("request_id", "abc-123");

    group.bench_function("derive", |b| {
        b.iter(|| black_box(logger.with(black_box(&fields))));
    });

    group.finish();
}

criterion_group!(benches, bench_fan_out, bench_check, bench_with);
criterion_main!(benches);
