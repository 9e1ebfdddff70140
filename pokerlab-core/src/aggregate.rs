//! Session aggregation — pure derivation of buy-in, cash-out and duration.
//!
//! Every call re-derives all three fields from the entire input. There is no
//! incremental path: a session's summary is always a function of its full
//! current ledger, whatever order the intervals were stored or delivered in.

use thiserror::Error;

use crate::domain::{Interval, SessionSummary};
use crate::ledger::chronological_order;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Aggregation was attempted on a ledger with no intervals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot aggregate a session with no intervals")]
pub struct InsufficientDataError;

/// Derive a session summary from its intervals.
///
/// - `buy_in`: sum of every `add_on_amount`, the first interval included.
/// - `cash_out`: `stack` of the chronologically last interval.
/// - `duration_hours`: last minus first timestamp in hours, rounded to two
///   decimals (half away from zero); 0 for a single interval.
///
/// The input need not be sorted. Intervals are stable-sorted by timestamp and
/// the buy-in is summed in that order, so any permutation of intervals with
/// distinct timestamps yields a bit-identical result.
pub fn aggregate<'a, I>(intervals: I) -> Result<SessionSummary, InsufficientDataError>
where
    I: IntoIterator<Item = &'a Interval>,
{
    let collected: Vec<&Interval> = intervals.into_iter().collect();
    let order = chronological_order(&collected);

    let (first, last) = match (order.first(), order.last()) {
        (Some(&first), Some(&last)) => (collected[first], collected[last]),
        _ => return Err(InsufficientDataError),
    };

    let buy_in: f64 = order.iter().map(|&idx| collected[idx].add_on_amount).sum();
    let cash_out = last.stack;
    let duration_hours = if order.len() < 2 {
        0.0
    } else {
        let millis = (last.timestamp - first.timestamp).num_milliseconds();
        round_hours(millis as f64 / MILLIS_PER_HOUR)
    };

    tracing::debug!(
        intervals = order.len(),
        buy_in,
        cash_out,
        duration_hours,
        "aggregated session ledger"
    );

    Ok(SessionSummary {
        buy_in,
        cash_out,
        duration_hours,
    })
}

/// Round to two decimals, half away from zero.
pub fn round_hours(hours: f64) -> f64 {
    (hours * 100.0).round() / 100.0
}
