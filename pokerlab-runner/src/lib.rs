//! PokerLab Runner — configuration, logging, storage and the ledger service.
//!
//! This crate builds on `pokerlab-core` to provide:
//! - TOML configuration with CLI overrides
//! - `tracing` subscriber setup
//! - Record store trait with in-memory and JSON-file implementations
//! - Ledger service: append → aggregate → write-back as one step
//! - Trajectory export to CSV/JSON

pub mod config;
pub mod export;
pub mod logging;
pub mod service;
pub mod store;

pub use config::{ConfigError, ExportConfig, LoggingConfig, PokerLabConfig, StoreConfig};
pub use export::{trajectory_json, write_trajectory_csv, write_trajectory_csv_file, ExportError};
pub use logging::init_logging;
pub use service::{AppendOutcome, LedgerService, ServiceError};
pub use store::{IntervalRecord, JsonFileStore, MemoryStore, RecordStore, StoreError};
