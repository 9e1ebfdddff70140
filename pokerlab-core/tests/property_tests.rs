//! Property tests for aggregation and trajectory invariants.
//!
//! Uses proptest to verify:
//! 1. Order invariance — shuffled intervals aggregate identically
//! 2. Additivity — buy-in is the exact sum of add-ons
//! 3. Idempotence — repeat aggregation is bit-identical
//! 4. Trajectory shape — one point per session plus the origin

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use std::collections::BTreeSet;

use pokerlab_core::domain::{Interval, SessionSummary};
use pokerlab_core::{aggregate, build_from_summaries};

// ── Strategies (proptest) ────────────────────────────────────────────

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 18, 0, 0).unwrap()
}

/// Whole-chip amounts, as entered at the table.
fn arb_chips() -> impl Strategy<Value = f64> {
    (0u32..100_000).prop_map(f64::from)
}

/// Intervals with distinct minute offsets over a 24h window.
fn arb_intervals() -> impl Strategy<Value = Vec<Interval>> {
    prop::collection::btree_set(0i64..1440, 1..30).prop_flat_map(|minutes: BTreeSet<i64>| {
        let n = minutes.len();
        let minutes: Vec<i64> = minutes.into_iter().collect();
        prop::collection::vec((arb_chips(), arb_chips()), n).prop_map(move |amounts| {
            minutes
                .iter()
                .zip(amounts)
                .map(|(&m, (stack, add_on))| {
                    Interval::new(base_time() + Duration::minutes(m), stack, add_on).unwrap()
                })
                .collect::<Vec<_>>()
        })
    })
}

fn arb_summary() -> impl Strategy<Value = SessionSummary> {
    (arb_chips(), arb_chips(), 0u32..2400).prop_map(|(buy_in, cash_out, centi_hours)| {
        SessionSummary {
            buy_in,
            cash_out,
            duration_hours: f64::from(centi_hours) / 100.0,
        }
    })
}

proptest! {
    /// Shuffling intervals before aggregation changes nothing.
    #[test]
    fn aggregate_is_order_invariant(
        (intervals, shuffled) in arb_intervals()
            .prop_flat_map(|v| (Just(v.clone()), Just(v).prop_shuffle()))
    ) {
        let a = aggregate(&intervals).unwrap();
        let b = aggregate(&shuffled).unwrap();
        prop_assert_eq!(a.buy_in.to_bits(), b.buy_in.to_bits());
        prop_assert_eq!(a.cash_out.to_bits(), b.cash_out.to_bits());
        prop_assert_eq!(a.duration_hours.to_bits(), b.duration_hours.to_bits());
    }

    /// Buy-in is the sum of every add-on, the first interval included.
    #[test]
    fn buy_in_is_sum_of_add_ons(intervals in arb_intervals()) {
        let expected: f64 = intervals.iter().map(|i| i.add_on_amount).sum();
        let summary = aggregate(&intervals).unwrap();
        prop_assert_eq!(summary.buy_in, expected);
    }

    /// Cash-out is the stack at the latest timestamp.
    #[test]
    fn cash_out_is_latest_stack(intervals in arb_intervals()) {
        let latest = intervals.iter().max_by_key(|i| i.timestamp).unwrap();
        prop_assert_eq!(aggregate(&intervals).unwrap().cash_out, latest.stack);
    }

    /// Duration is never negative and has at most two decimals.
    #[test]
    fn duration_is_rounded_and_non_negative(intervals in arb_intervals()) {
        let hours = aggregate(&intervals).unwrap().duration_hours;
        prop_assert!(hours >= 0.0);
        prop_assert!(((hours * 100.0).round() - hours * 100.0).abs() < 1e-6);
    }

    /// Aggregating the same input twice is bit-identical.
    #[test]
    fn aggregate_is_idempotent(intervals in arb_intervals()) {
        let a = aggregate(&intervals).unwrap();
        let b = aggregate(&intervals).unwrap();
        prop_assert_eq!(a.buy_in.to_bits(), b.buy_in.to_bits());
        prop_assert_eq!(a.cash_out.to_bits(), b.cash_out.to_bits());
        prop_assert_eq!(a.duration_hours.to_bits(), b.duration_hours.to_bits());
    }

    /// The curve has one point per session plus the origin, and ends at the
    /// total profit.
    #[test]
    fn trajectory_shape(summaries in prop::collection::vec(arb_summary(), 0..40)) {
        let date = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let points = build_from_summaries(summaries.iter().map(|s| (date, *s)));

        prop_assert_eq!(points.len(), summaries.len() + 1);
        prop_assert_eq!(points[0].cumulative_hours, 0.0);
        prop_assert_eq!(points[0].cumulative_profit, 0.0);

        let total: f64 = summaries.iter().map(|s| s.cash_out - s.buy_in).sum();
        let last = points.last().unwrap();
        prop_assert!((last.cumulative_profit - total).abs() < 1e-6);
        for pair in points.windows(2) {
            prop_assert!(pair[1].cumulative_hours >= pair[0].cumulative_hours);
        }
    }
}
