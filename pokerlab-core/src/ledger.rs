//! Interval ledger — the append-only observation log of one session.
//!
//! Storage order is insertion order and is never rewritten. Chronological
//! order is produced on demand by [`Ledger::all_ordered`], which stable-sorts
//! by timestamp so that equal timestamps keep their insertion order.

use std::borrow::Borrow;

use serde::{Deserialize, Serialize};

use crate::aggregate::{aggregate, InsufficientDataError};
use crate::domain::{Interval, RawInterval, SessionSummary, ValidationError};

/// Append-only, validated interval log for one session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    intervals: Vec<Interval>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a ledger from stored intervals (in storage order), validating
    /// each one.
    pub fn from_intervals<I>(intervals: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = Interval>,
    {
        let mut ledger = Self::new();
        for interval in intervals {
            ledger.append(interval)?;
        }
        Ok(ledger)
    }

    /// Append one interval. On error the ledger is unchanged.
    pub fn append(&mut self, interval: Interval) -> Result<(), ValidationError> {
        interval.validate()?;
        self.intervals.push(interval);
        Ok(())
    }

    /// Parse and append a raw interval, returning the stored value.
    pub fn append_raw(&mut self, raw: &RawInterval) -> Result<&Interval, ValidationError> {
        let interval = raw.parse()?;
        self.intervals.push(interval);
        Ok(&self.intervals[self.intervals.len() - 1])
    }

    /// Intervals ascending by timestamp, ties in insertion order.
    ///
    /// Each call re-derives the order from the stored log, so the iterator
    /// can be requested any number of times with the same result.
    pub fn all_ordered(&self) -> impl Iterator<Item = &Interval> + '_ {
        chronological_order(&self.intervals)
            .into_iter()
            .map(move |idx| &self.intervals[idx])
    }

    /// Intervals in insertion order.
    pub fn as_slice(&self) -> &[Interval] {
        &self.intervals
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Aggregate the whole current ledger.
    pub fn summarize(&self) -> Result<SessionSummary, InsufficientDataError> {
        aggregate(&self.intervals)
    }
}

/// Indices of `intervals` in chronological order (stable on ties).
pub(crate) fn chronological_order<T: Borrow<Interval>>(intervals: &[T]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..intervals.len()).collect();
    order.sort_by_key(|&idx| intervals[idx].borrow().timestamp);
    order
}
