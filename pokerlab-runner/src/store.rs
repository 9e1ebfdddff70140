//! Record store — persistence boundary for players, sessions and intervals.
//!
//! Two implementations:
//! - `MemoryStore`: plain in-process collections, ids assigned monotonically.
//! - `JsonFileStore`: a `MemoryStore` snapshot written to one JSON file after
//!   every mutation. Writes are atomic (write to .tmp, rename into place) and
//!   the in-memory state only advances once the file write has succeeded.
//!
//! `commit_interval` is the one compound write: the new interval and the
//! session's recomputed summary land together or not at all.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use pokerlab_core::domain::{
    Interval, IntervalId, NewPlayer, NewSession, Player, PlayerId, Session, SessionId,
    SessionSummary,
};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("player {0} not found")]
    PlayerNotFound(PlayerId),

    #[error("session {0} not found")]
    SessionNotFound(SessionId),

    #[error("store I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("store file {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize store: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// A stored interval with its identity and owning session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalRecord {
    pub id: IntervalId,
    pub session_id: SessionId,
    pub interval: Interval,
}

/// Create/read/update operations the ledger service needs from storage.
///
/// List operations return records in storage order; callers sort.
pub trait RecordStore {
    fn insert_player(&mut self, fields: NewPlayer) -> Result<Player, StoreError>;

    fn player(&self, id: PlayerId) -> Result<Player, StoreError>;

    fn players(&self) -> Result<Vec<Player>, StoreError>;

    fn insert_session(
        &mut self,
        player_id: PlayerId,
        fields: NewSession,
    ) -> Result<Session, StoreError>;

    fn session(&self, id: SessionId) -> Result<Session, StoreError>;

    fn sessions_for_player(&self, player_id: PlayerId) -> Result<Vec<Session>, StoreError>;

    fn intervals_for_session(
        &self,
        session_id: SessionId,
    ) -> Result<Vec<IntervalRecord>, StoreError>;

    /// Append `interval` to the session and replace its derived fields with
    /// `summary`, as one write.
    fn commit_interval(
        &mut self,
        session_id: SessionId,
        interval: Interval,
        summary: SessionSummary,
    ) -> Result<IntervalRecord, StoreError>;

    /// Replace a session's derived fields without touching its ledger.
    fn write_summary(
        &mut self,
        session_id: SessionId,
        summary: SessionSummary,
    ) -> Result<Session, StoreError>;
}

// ─── In-memory store ─────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryStore {
    last_player_id: u64,
    last_session_id: u64,
    last_interval_id: u64,
    players: Vec<Player>,
    sessions: Vec<Session>,
    intervals: Vec<IntervalRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn session_mut(&mut self, id: SessionId) -> Result<&mut Session, StoreError> {
        self.sessions
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(StoreError::SessionNotFound(id))
    }
}

impl RecordStore for MemoryStore {
    fn insert_player(&mut self, fields: NewPlayer) -> Result<Player, StoreError> {
        self.last_player_id += 1;
        let player = Player::new(PlayerId(self.last_player_id), fields);
        self.players.push(player.clone());
        Ok(player)
    }

    fn player(&self, id: PlayerId) -> Result<Player, StoreError> {
        self.players
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(StoreError::PlayerNotFound(id))
    }

    fn players(&self) -> Result<Vec<Player>, StoreError> {
        Ok(self.players.clone())
    }

    fn insert_session(
        &mut self,
        player_id: PlayerId,
        fields: NewSession,
    ) -> Result<Session, StoreError> {
        self.player(player_id)?;
        self.last_session_id += 1;
        let session = Session::new(SessionId(self.last_session_id), player_id, fields);
        self.sessions.push(session.clone());
        Ok(session)
    }

    fn session(&self, id: SessionId) -> Result<Session, StoreError> {
        self.sessions
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or(StoreError::SessionNotFound(id))
    }

    fn sessions_for_player(&self, player_id: PlayerId) -> Result<Vec<Session>, StoreError> {
        self.player(player_id)?;
        Ok(self
            .sessions
            .iter()
            .filter(|s| s.player_id == player_id)
            .cloned()
            .collect())
    }

    fn intervals_for_session(
        &self,
        session_id: SessionId,
    ) -> Result<Vec<IntervalRecord>, StoreError> {
        self.session(session_id)?;
        Ok(self
            .intervals
            .iter()
            .filter(|r| r.session_id == session_id)
            .cloned()
            .collect())
    }

    fn commit_interval(
        &mut self,
        session_id: SessionId,
        interval: Interval,
        summary: SessionSummary,
    ) -> Result<IntervalRecord, StoreError> {
        let id = IntervalId(self.last_interval_id + 1);
        self.session_mut(session_id)?.summary = Some(summary);
        self.last_interval_id = id.0;

        let record = IntervalRecord {
            id,
            session_id,
            interval,
        };
        self.intervals.push(record.clone());
        Ok(record)
    }

    fn write_summary(
        &mut self,
        session_id: SessionId,
        summary: SessionSummary,
    ) -> Result<Session, StoreError> {
        let session = self.session_mut(session_id)?;
        session.summary = Some(summary);
        Ok(session.clone())
    }
}

// ─── JSON file store ─────────────────────────────────────────────────

/// File-backed store: the whole record set as one pretty-printed JSON file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    inner: MemoryStore,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file is an empty store; the file
    /// is created on the first write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let inner = match fs::read_to_string(&path) {
            Ok(json) => serde_json::from_str(&json).map_err(|source| StoreError::Corrupt {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => MemoryStore::new(),
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        tracing::debug!(path = %path.display(), "opened record store");
        Ok(Self { path, inner })
    }

    /// Apply `f` to a copy of the records, persist the copy, then adopt it.
    fn mutate<T, F>(&mut self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut MemoryStore) -> Result<T, StoreError>,
    {
        let mut next = self.inner.clone();
        let out = f(&mut next)?;
        write_atomic(&self.path, &next)?;
        self.inner = next;
        Ok(out)
    }
}

fn write_atomic(path: &Path, records: &MemoryStore) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(records).map_err(StoreError::Serialize)?;
    let io_err = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).map_err(io_err)?;
    if let Err(source) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(io_err(source));
    }
    Ok(())
}

impl RecordStore for JsonFileStore {
    fn insert_player(&mut self, fields: NewPlayer) -> Result<Player, StoreError> {
        self.mutate(|s| s.insert_player(fields))
    }

    fn player(&self, id: PlayerId) -> Result<Player, StoreError> {
        self.inner.player(id)
    }

    fn players(&self) -> Result<Vec<Player>, StoreError> {
        self.inner.players()
    }

    fn insert_session(
        &mut self,
        player_id: PlayerId,
        fields: NewSession,
    ) -> Result<Session, StoreError> {
        self.mutate(|s| s.insert_session(player_id, fields))
    }

    fn session(&self, id: SessionId) -> Result<Session, StoreError> {
        self.inner.session(id)
    }

    fn sessions_for_player(&self, player_id: PlayerId) -> Result<Vec<Session>, StoreError> {
        self.inner.sessions_for_player(player_id)
    }

    fn intervals_for_session(
        &self,
        session_id: SessionId,
    ) -> Result<Vec<IntervalRecord>, StoreError> {
        self.inner.intervals_for_session(session_id)
    }

    fn commit_interval(
        &mut self,
        session_id: SessionId,
        interval: Interval,
        summary: SessionSummary,
    ) -> Result<IntervalRecord, StoreError> {
        self.mutate(|s| s.commit_interval(session_id, interval, summary))
    }

    fn write_summary(
        &mut self,
        session_id: SessionId,
        summary: SessionSummary,
    ) -> Result<Session, StoreError> {
        self.mutate(|s| s.write_summary(session_id, summary))
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
