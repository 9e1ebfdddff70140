//! Ledger service — wires the record store to the aggregation engine.
//!
//! Mutations take `&mut self`, so a service (and the store it owns) handles
//! one append at a time. Appending an interval is a single step: the new
//! summary is computed from the stored ledger plus the new interval before
//! anything is written, then interval and summary are committed together.
//! A failure at any point leaves both the ledger and the derived fields as
//! they were.

use thiserror::Error;

use pokerlab_core::domain::{
    NewPlayer, NewSession, Player, PlayerId, RawInterval, Session, SessionId, SessionSummary,
    ValidationError,
};
use pokerlab_core::{InsufficientDataError, Ledger, PlayerStats, TrajectoryError, TrajectoryPoint};

use crate::store::{IntervalRecord, RecordStore, StoreError};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("invalid interval: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    InsufficientData(#[from] InsufficientDataError),

    #[error(transparent)]
    Trajectory(#[from] TrajectoryError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("a player with email '{0}' already exists")]
    DuplicateEmail(String),

    #[error("{0} must not be empty")]
    MissingField(&'static str),
}

/// Result of a successful append.
#[derive(Debug, Clone, PartialEq)]
pub struct AppendOutcome {
    pub record: IntervalRecord,
    pub summary: SessionSummary,
}

/// Player/session/interval operations over a record store.
pub struct LedgerService<S> {
    store: S,
}

impl<S: RecordStore> LedgerService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    // ── Players ──

    /// Register a player. Emails are unique, compared case-insensitively.
    pub fn register_player(&mut self, fields: NewPlayer) -> Result<Player, ServiceError> {
        require("name", &fields.name)?;
        require("email", &fields.email)?;
        if self
            .store
            .players()?
            .iter()
            .any(|p| p.has_email(&fields.email))
        {
            return Err(ServiceError::DuplicateEmail(fields.email));
        }

        let player = self.store.insert_player(fields)?;
        tracing::info!(player_id = %player.id, name = %player.name, "registered player");
        Ok(player)
    }

    pub fn player(&self, id: PlayerId) -> Result<Player, ServiceError> {
        Ok(self.store.player(id)?)
    }

    pub fn players(&self) -> Result<Vec<Player>, ServiceError> {
        let mut players = self.store.players()?;
        players.sort_by_key(|p| p.id);
        Ok(players)
    }

    // ── Sessions ──

    pub fn open_session(
        &mut self,
        player_id: PlayerId,
        fields: NewSession,
    ) -> Result<Session, ServiceError> {
        require("location", &fields.location)?;
        require("game_type", &fields.game_type)?;

        let session = self.store.insert_session(player_id, fields)?;
        tracing::info!(
            session_id = %session.id,
            player_id = %player_id,
            date = %session.date,
            "opened session"
        );
        Ok(session)
    }

    pub fn session(&self, id: SessionId) -> Result<Session, ServiceError> {
        Ok(self.store.session(id)?)
    }

    /// A player's sessions in chronological order: by date, then by id.
    pub fn sessions_for_player(&self, player_id: PlayerId) -> Result<Vec<Session>, ServiceError> {
        let mut sessions = self.store.sessions_for_player(player_id)?;
        sessions.sort_by_key(|s| (s.date, s.id));
        Ok(sessions)
    }

    // ── Intervals ──

    /// The session's current ledger, rebuilt from storage.
    pub fn ledger(&self, session_id: SessionId) -> Result<Ledger, ServiceError> {
        let records = self.store.intervals_for_session(session_id)?;
        Ok(Ledger::from_intervals(
            records.into_iter().map(|r| r.interval),
        )?)
    }

    /// A session's intervals ascending by timestamp (ties in entry order).
    pub fn intervals_for_session(
        &self,
        session_id: SessionId,
    ) -> Result<Vec<IntervalRecord>, ServiceError> {
        let mut records = self.store.intervals_for_session(session_id)?;
        records.sort_by_key(|r| r.interval.timestamp);
        Ok(records)
    }

    /// Record one interval and refresh the session's derived fields.
    pub fn append_interval(
        &mut self,
        session_id: SessionId,
        raw: &RawInterval,
    ) -> Result<AppendOutcome, ServiceError> {
        let interval = raw.parse()?;

        let mut ledger = self.ledger(session_id)?;
        ledger.append(interval.clone())?;
        let summary = ledger.summarize()?;

        let record = self.store.commit_interval(session_id, interval, summary)?;
        tracing::info!(
            session_id = %session_id,
            interval_id = %record.id,
            intervals = ledger.len(),
            buy_in = summary.buy_in,
            cash_out = summary.cash_out,
            duration_hours = summary.duration_hours,
            "appended interval"
        );
        Ok(AppendOutcome { record, summary })
    }

    /// Re-derive a session's summary from its stored ledger and persist it.
    ///
    /// Safe to repeat: the result depends only on the stored intervals.
    pub fn recompute_session(&mut self, session_id: SessionId) -> Result<Session, ServiceError> {
        let summary = self.ledger(session_id)?.summarize()?;
        let session = self.store.write_summary(session_id, summary)?;
        tracing::info!(session_id = %session_id, "recomputed session summary");
        Ok(session)
    }

    // ── Derived views ──

    /// Cumulative profit curve over the player's played sessions.
    ///
    /// Sessions with no intervals yet have nothing to contribute and are left
    /// out of the chart.
    pub fn trajectory_for_player(
        &self,
        player_id: PlayerId,
    ) -> Result<Vec<TrajectoryPoint>, ServiceError> {
        let played = self.played_sessions(player_id)?;
        Ok(pokerlab_core::build(&played)?)
    }

    pub fn stats_for_player(&self, player_id: PlayerId) -> Result<PlayerStats, ServiceError> {
        let summaries: Vec<SessionSummary> = self
            .played_sessions(player_id)?
            .iter()
            .filter_map(|s| s.summary)
            .collect();
        Ok(PlayerStats::compute(&summaries))
    }

    fn played_sessions(&self, player_id: PlayerId) -> Result<Vec<Session>, ServiceError> {
        let sessions = self.sessions_for_player(player_id)?;
        let total = sessions.len();
        let played: Vec<Session> = sessions
            .into_iter()
            .filter(|s| s.summary.is_some())
            .collect();
        if played.len() < total {
            tracing::debug!(
                player_id = %player_id,
                skipped = total - played.len(),
                "sessions without intervals left out"
            );
        }
        Ok(played)
    }
}

fn require(field: &'static str, value: &str) -> Result<(), ServiceError> {
    if value.trim().is_empty() {
        return Err(ServiceError::MissingField(field));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use chrono::NaiveDate;

    fn service_with_session() -> (LedgerService<MemoryStore>, PlayerId, SessionId) {
        let mut service = LedgerService::new(MemoryStore::new());
        let player = service
            .register_player(NewPlayer {
                name: "Bob".into(),
                email: "bob@example.com".into(),
            })
            .unwrap();
        let session = service
            .open_session(
                player.id,
                NewSession {
                    date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                    location: "Aria".into(),
                    game_type: "NLH 1-3".into(),
                    memo: None,
                },
            )
            .unwrap();
        (service, player.id, session.id)
    }

    #[test]
    fn invalid_interval_writes_nothing() {
        let (mut service, _, session_id) = service_with_session();
        let err = service
            .append_interval(session_id, &RawInterval::new("2024-01-01T20:00", -10.0, 0.0))
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert!(service.intervals_for_session(session_id).unwrap().is_empty());
        assert_eq!(service.session(session_id).unwrap().summary, None);
    }

    #[test]
    fn recompute_on_empty_ledger_is_insufficient_data() {
        let (mut service, _, session_id) = service_with_session();
        let err = service.recompute_session(session_id).unwrap_err();
        assert!(matches!(err, ServiceError::InsufficientData(_)));
        assert_eq!(service.session(session_id).unwrap().summary, None);
    }

    #[test]
    fn duplicate_email_is_rejected() {
        let (mut service, _, _) = service_with_session();
        let err = service
            .register_player(NewPlayer {
                name: "Robert".into(),
                email: "BOB@example.com".into(),
            })
            .unwrap_err();
        assert!(matches!(err, ServiceError::DuplicateEmail(_)));
    }

    #[test]
    fn blank_location_is_rejected() {
        let (mut service, player_id, _) = service_with_session();
        let err = service
            .open_session(
                player_id,
                NewSession {
                    date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
                    location: "  ".into(),
                    game_type: "PLO".into(),
                    memo: None,
                },
            )
            .unwrap_err();
        assert!(matches!(err, ServiceError::MissingField("location")));
    }

    #[test]
    fn append_to_unknown_session_is_store_error() {
        let (mut service, _, _) = service_with_session();
        let err = service
            .append_interval(SessionId(99), &RawInterval::new("2024-01-01T20:00", 1.0, 1.0))
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Store(StoreError::SessionNotFound(SessionId(99)))
        ));
    }
}
