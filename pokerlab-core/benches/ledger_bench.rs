//! Criterion benchmarks for PokerLab hot paths.
//!
//! Benchmarks:
//! 1. Session aggregation over a shuffled ledger
//! 2. Trajectory build over a long session history

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use pokerlab_core::domain::{Interval, NewSession, PlayerId, Session, SessionId, SessionSummary};
use pokerlab_core::{aggregate, build};

// ── Helpers ──────────────────────────────────────────────────────────

fn make_intervals(n: usize) -> Vec<Interval> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 18, 0, 0).unwrap();
    // Reverse-chronological so the sort does real work.
    (0..n)
        .rev()
        .map(|i| {
            let stack = 500.0 + (i as f64 * 0.3).sin() * 200.0;
            let add_on = if i % 25 == 0 { 200.0 } else { 0.0 };
            Interval::new(start + Duration::minutes(i as i64 * 5), stack, add_on).unwrap()
        })
        .collect()
}

fn make_sessions(n: usize) -> Vec<Session> {
    let base = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    (0..n)
        .map(|i| {
            let mut s = Session::new(
                SessionId(i as u64),
                PlayerId(1),
                NewSession {
                    date: base + Duration::days(i as i64),
                    location: "bench".into(),
                    game_type: "NLH".into(),
                    memo: None,
                },
            );
            s.summary = Some(SessionSummary {
                buy_in: 300.0,
                cash_out: 300.0 + (i as f64).cos() * 150.0,
                duration_hours: 4.25,
            });
            s
        })
        .collect()
}

// ── Benchmarks ───────────────────────────────────────────────────────

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");
    for n in [10usize, 100, 1_000] {
        let intervals = make_intervals(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &intervals, |b, iv| {
            b.iter(|| aggregate(black_box(iv)).unwrap())
        });
    }
    group.finish();
}

fn bench_trajectory(c: &mut Criterion) {
    let mut group = c.benchmark_group("trajectory");
    for n in [100usize, 1_000, 10_000] {
        let sessions = make_sessions(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &sessions, |b, s| {
            b.iter(|| build(black_box(s)).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_aggregate, bench_trajectory);
criterion_main!(benches);
