//! Trajectory builder — cumulative profit vs. hours across sessions.
//!
//! The builder trusts the order it is given. Chronological order by session
//! date is the intended use; callers that want to enforce it can run
//! [`check_chronological`] first. Out-of-order input still produces a curve,
//! and is logged at `warn`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Session, SessionId, SessionSummary};

/// One point on the cumulative profit curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    pub cumulative_hours: f64,
    pub cumulative_profit: f64,
    /// Session date; `None` for the origin.
    pub label: Option<NaiveDate>,
}

impl TrajectoryPoint {
    pub fn origin() -> Self {
        Self {
            cumulative_hours: 0.0,
            cumulative_profit: 0.0,
            label: None,
        }
    }

    pub fn is_origin(&self) -> bool {
        self.label.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrajectoryError {
    #[error("session {session_id} has no intervals and cannot be charted")]
    Unaggregated { session_id: SessionId },
}

/// Advisory: sessions were not supplied in chronological order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("session {session_id} at position {position} is dated {date}, before the preceding {previous}")]
pub struct OrderingViolation {
    pub position: usize,
    pub session_id: SessionId,
    pub date: NaiveDate,
    pub previous: NaiveDate,
}

/// Build the cumulative curve for `sessions` in the given order.
///
/// Fails if any session lacks derived fields; an unplayed session has no
/// profit and is never counted as zero.
pub fn build(sessions: &[Session]) -> Result<Vec<TrajectoryPoint>, TrajectoryError> {
    if let Err(violation) = check_chronological(sessions) {
        tracing::warn!(%violation, "building trajectory from out-of-order sessions");
    }

    let entries = sessions
        .iter()
        .map(|s| match s.summary {
            Some(summary) => Ok((s.date, summary)),
            None => Err(TrajectoryError::Unaggregated { session_id: s.id }),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(build_from_summaries(entries))
}

/// Build the cumulative curve from `(date, summary)` pairs in the given order.
pub fn build_from_summaries<I>(entries: I) -> Vec<TrajectoryPoint>
where
    I: IntoIterator<Item = (NaiveDate, SessionSummary)>,
{
    let entries = entries.into_iter();
    let mut points = Vec::with_capacity(entries.size_hint().0 + 1);
    points.push(TrajectoryPoint::origin());

    let mut cumulative_hours = 0.0;
    let mut cumulative_profit = 0.0;
    for (date, summary) in entries {
        cumulative_profit += summary.profit();
        cumulative_hours += summary.duration_hours;
        points.push(TrajectoryPoint {
            cumulative_hours,
            cumulative_profit,
            label: Some(date),
        });
    }
    points
}

/// Report the first session dated before its predecessor.
pub fn check_chronological(sessions: &[Session]) -> Result<(), OrderingViolation> {
    for (position, pair) in sessions.windows(2).enumerate() {
        if pair[1].date < pair[0].date {
            return Err(OrderingViolation {
                position: position + 1,
                session_id: pair[1].id,
                date: pair[1].date,
                previous: pair[0].date,
            });
        }
    }
    Ok(())
}
