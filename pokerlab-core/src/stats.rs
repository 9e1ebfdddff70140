//! Player statistics — pure functions over aggregated session summaries.
//!
//! Every statistic is summaries in, scalar out. Sessions without derived
//! fields are the caller's concern and never reach these functions.

use serde::{Deserialize, Serialize};

use crate::domain::SessionSummary;

/// Lifetime results for one player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub session_count: usize,
    pub total_buy_in: f64,
    pub total_cash_out: f64,
    pub net_profit: f64,
    pub total_hours: f64,
    pub hourly_rate: f64,
    pub winning_sessions: usize,
    pub win_rate: f64,
    pub best_session: Option<f64>,
    pub worst_session: Option<f64>,
}

impl PlayerStats {
    /// Compute all statistics from a player's aggregated sessions.
    pub fn compute(summaries: &[SessionSummary]) -> Self {
        Self {
            session_count: summaries.len(),
            total_buy_in: summaries.iter().map(|s| s.buy_in).sum(),
            total_cash_out: summaries.iter().map(|s| s.cash_out).sum(),
            net_profit: net_profit(summaries),
            total_hours: total_hours(summaries),
            hourly_rate: hourly_rate(summaries),
            winning_sessions: winning_sessions(summaries),
            win_rate: win_rate(summaries),
            best_session: best_session(summaries),
            worst_session: worst_session(summaries),
        }
    }
}

// ─── Individual statistic functions ─────────────────────────────────

pub fn net_profit(summaries: &[SessionSummary]) -> f64 {
    summaries.iter().map(SessionSummary::profit).sum()
}

pub fn total_hours(summaries: &[SessionSummary]) -> f64 {
    summaries.iter().map(|s| s.duration_hours).sum()
}

/// Net profit per hour played. Returns 0.0 when no time has been logged.
pub fn hourly_rate(summaries: &[SessionSummary]) -> f64 {
    let hours = total_hours(summaries);
    if hours <= 0.0 {
        return 0.0;
    }
    net_profit(summaries) / hours
}

pub fn winning_sessions(summaries: &[SessionSummary]) -> usize {
    summaries.iter().filter(|s| s.is_winner()).count()
}

/// Fraction of sessions that finished in profit. Returns 0.0 with no sessions.
pub fn win_rate(summaries: &[SessionSummary]) -> f64 {
    if summaries.is_empty() {
        return 0.0;
    }
    winning_sessions(summaries) as f64 / summaries.len() as f64
}

pub fn best_session(summaries: &[SessionSummary]) -> Option<f64> {
    summaries.iter().map(SessionSummary::profit).reduce(f64::max)
}

pub fn worst_session(summaries: &[SessionSummary]) -> Option<f64> {
    summaries.iter().map(SessionSummary::profit).reduce(f64::min)
}
