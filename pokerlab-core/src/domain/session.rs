//! Session — one playing sitting, with its derived ledger summary.

use super::ids::{PlayerId, SessionId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Derived financial and time summary of a session ledger.
///
/// Produced only by [`crate::aggregate::aggregate`]; never adjusted in place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Total capital committed: sum of every interval's add-on.
    pub buy_in: f64,
    /// Stack of the chronologically last interval.
    pub cash_out: f64,
    /// Elapsed hours between first and last interval, rounded to 2 decimals.
    pub duration_hours: f64,
}

impl SessionSummary {
    pub fn profit(&self) -> f64 {
        self.cash_out - self.buy_in
    }

    pub fn is_winner(&self) -> bool {
        self.profit() > 0.0
    }
}

/// Descriptive fields supplied when a session is opened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSession {
    pub date: NaiveDate,
    pub location: String,
    pub game_type: String,
    #[serde(default)]
    pub memo: Option<String>,
}

/// A stored session.
///
/// `summary` is `None` until the session has at least one interval, and is
/// replaced wholesale every time an interval is appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub player_id: PlayerId,

    // ── Descriptive ──
    pub date: NaiveDate,
    pub location: String,
    pub game_type: String,
    pub memo: Option<String>,

    // ── Derived ──
    #[serde(default)]
    pub summary: Option<SessionSummary>,
}

impl Session {
    pub fn new(id: SessionId, player_id: PlayerId, fields: NewSession) -> Self {
        Self {
            id,
            player_id,
            date: fields.date,
            location: fields.location,
            game_type: fields.game_type,
            memo: fields.memo,
            summary: None,
        }
    }

    /// Net result, if the session has been aggregated.
    pub fn profit(&self) -> Option<f64> {
        self.summary.map(|s| s.profit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_session() -> Session {
        Session::new(
            SessionId(1),
            PlayerId(1),
            NewSession {
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                location: "Commerce".into(),
                game_type: "NLH 1-3".into(),
                memo: None,
            },
        )
    }

    #[test]
    fn new_session_has_no_derived_fields() {
        let session = sample_session();
        assert_eq!(session.summary, None);
        assert_eq!(session.profit(), None);
    }

    #[test]
    fn profit_is_cash_out_minus_buy_in() {
        let mut session = sample_session();
        session.summary = Some(SessionSummary {
            buy_in: 200.0,
            cash_out: 150.0,
            duration_hours: 2.0,
        });
        assert_eq!(session.profit(), Some(-50.0));
        assert!(!session.summary.unwrap().is_winner());
    }

    #[test]
    fn session_serialization_roundtrip() {
        let mut session = sample_session();
        session.summary = Some(SessionSummary {
            buy_in: 500.0,
            cash_out: 800.0,
            duration_hours: 3.5,
        });
        let json = serde_json::to_string(&session).unwrap();
        let deser: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(session, deser);
    }
}
