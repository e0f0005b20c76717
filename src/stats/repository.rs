use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Mutex;
use tracing::{debug, instrument, warn};

use super::{PlayerStats, StatsError};

/// Durable storage for the player's stats record
#[async_trait]
pub trait StatsStore: Send + Sync {
    /// Appends a new record and returns its row id
    async fn insert(&self, stats: &PlayerStats) -> Result<i64, StatsError>;
    /// Overwrites the record at `row_id`; false if there was none
    async fn update(&self, row_id: i64, stats: &PlayerStats) -> Result<bool, StatsError>;
    async fn get(&self, row_id: i64) -> Result<PlayerStats, StatsError>;
    /// All records in insertion order
    async fn get_all(&self) -> Result<Vec<PlayerStats>, StatsError>;
    async fn delete(&self, row_id: i64) -> Result<bool, StatsError>;
    async fn close(&self);
}

#[derive(Debug, Default)]
struct InMemoryState {
    rows: BTreeMap<i64, PlayerStats>,
    last_row_id: i64,
    closed: bool,
}

impl InMemoryState {
    fn open(&mut self) -> Result<&mut Self, StatsError> {
        if self.closed {
            return Err(StatsError::StorageClosed);
        }
        Ok(self)
    }
}

/// In-memory implementation of StatsStore for development and testing
///
/// Row ids are handed out like SQLite's AUTOINCREMENT: increasing and never
/// reused after a delete.
#[derive(Debug, Default)]
pub struct InMemoryStatsStore {
    state: Mutex<InMemoryState>,
}

impl InMemoryStatsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `rows`, ids assigned in order
    pub fn with_rows(rows: Vec<PlayerStats>) -> Self {
        let mut state = InMemoryState::default();
        for stats in rows {
            state.last_row_id += 1;
            state
                .rows
                .insert(state.last_row_id, stats.with_id(state.last_row_id));
        }
        Self {
            state: Mutex::new(state),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, InMemoryState> {
        // A poisoned lock only means another test thread panicked mid-call.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl StatsStore for InMemoryStatsStore {
    #[instrument(skip(self, stats))]
    async fn insert(&self, stats: &PlayerStats) -> Result<i64, StatsError> {
        let mut guard = self.lock();
        let state = guard.open()?;
        state.last_row_id += 1;
        let row_id = state.last_row_id;
        state.rows.insert(row_id, stats.clone().with_id(row_id));

        debug!(row_id, "Stats record inserted in memory");
        Ok(row_id)
    }

    #[instrument(skip(self, stats))]
    async fn update(&self, row_id: i64, stats: &PlayerStats) -> Result<bool, StatsError> {
        let mut guard = self.lock();
        let state = guard.open()?;
        match state.rows.get_mut(&row_id) {
            Some(row) => {
                *row = stats.clone().with_id(row_id);
                debug!(row_id, "Stats record updated in memory");
                Ok(true)
            }
            None => {
                warn!(row_id, "Stats record not found for update in memory");
                Ok(false)
            }
        }
    }

    #[instrument(skip(self))]
    async fn get(&self, row_id: i64) -> Result<PlayerStats, StatsError> {
        let mut guard = self.lock();
        let state = guard.open()?;
        state
            .rows
            .get(&row_id)
            .cloned()
            .ok_or(StatsError::NotFound(row_id))
    }

    #[instrument(skip(self))]
    async fn get_all(&self) -> Result<Vec<PlayerStats>, StatsError> {
        let mut guard = self.lock();
        let state = guard.open()?;
        Ok(state.rows.values().cloned().collect())
    }

    #[instrument(skip(self))]
    async fn delete(&self, row_id: i64) -> Result<bool, StatsError> {
        let mut guard = self.lock();
        let state = guard.open()?;
        let removed = state.rows.remove(&row_id).is_some();
        debug!(row_id, removed, "Stats record delete in memory");
        Ok(removed)
    }

    #[instrument(skip(self))]
    async fn close(&self) {
        self.lock().closed = true;
        debug!("In-memory stats store closed");
    }
}
