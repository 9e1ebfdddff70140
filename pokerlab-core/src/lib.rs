//! PokerLab Core — interval ledger, session aggregation, profit trajectory.
//!
//! This crate contains the session ledger aggregation engine:
//! - Domain types (players, sessions, intervals, ids)
//! - Append-only interval ledger with chronological views
//! - Session aggregator (buy-in, cash-out, duration) as a pure function
//! - Trajectory builder for the cumulative profit-vs-hours curve
//! - Player statistics over aggregated sessions
//!
//! Nothing here touches storage. Callers fetch snapshots, call in, and
//! persist the results.

pub mod aggregate;
pub mod domain;
pub mod ledger;
pub mod stats;
pub mod trajectory;

pub use aggregate::{aggregate, round_hours, InsufficientDataError};
pub use ledger::Ledger;
pub use stats::PlayerStats;
pub use trajectory::{
    build, build_from_summaries, check_chronological, OrderingViolation, TrajectoryError,
    TrajectoryPoint,
};
