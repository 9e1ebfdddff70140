//! Domain types for PokerLab

pub mod ids;
pub mod interval;
pub mod player;
pub mod session;

pub use ids::{IntervalId, PlayerId, SessionId};
pub use interval::{parse_timestamp, Interval, RawInterval, ValidationError};
pub use player::{NewPlayer, Player};
pub use session::{NewSession, Session, SessionSummary};
