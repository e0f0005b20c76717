// Library crate for the Barcode Wars game core
// This file exposes the public API for the terminal shell and integration tests

pub mod config;
pub mod game;
pub mod scoring;
pub mod shared;
pub mod stats;

// Re-export commonly used types for easier access in tests
pub use config::AppConfig;
pub use game::{GameSession, ScanOutcome, ScanResult};
pub use scoring::{Attribute, ScanScore, ScoreCalculator, ScoreError};
pub use shared::AppError;
pub use stats::{InMemoryStatsStore, PlayerStats, SqliteStatsStore, StatsError, StatsStore};
