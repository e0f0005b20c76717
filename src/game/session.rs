use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use super::{ScanOutcome, ScanResult};
use crate::{
    scoring::ScoreCalculator,
    shared::AppError,
    stats::{PlayerStats, StatsError, StatsStore},
};

/// The player's running game: current totals plus the store that keeps them.
///
/// Stats only change after the store has accepted the new values, so a failed
/// write leaves the session exactly as it was.
pub struct GameSession {
    store: Arc<dyn StatsStore>,
    calculator: ScoreCalculator,
    row_id: i64,
    stats: PlayerStats,
}

impl GameSession {
    /// Loads the player's record, creating a zeroed one on first launch.
    #[instrument(skip(store, calculator))]
    pub async fn start(
        store: Arc<dyn StatsStore>,
        calculator: ScoreCalculator,
    ) -> Result<Self, AppError> {
        let existing = store.get_all().await?;

        let (row_id, stats) = match existing.into_iter().next() {
            Some(stats) => {
                let row_id = match stats.id {
                    Some(id) => id,
                    None => {
                        warn!("Stored stats record has no row id");
                        return Err(StatsError::Database("stats record missing row id".into()).into());
                    }
                };
                info!(row_id, "Loaded existing player stats");
                (row_id, stats)
            }
            None => {
                let fresh = PlayerStats::default();
                let row_id = store.insert(&fresh).await?;
                info!(row_id, "Created player stats for first launch");
                (row_id, fresh.with_id(row_id))
            }
        };

        Ok(Self {
            store,
            calculator,
            row_id,
            stats,
        })
    }

    pub fn stats(&self) -> &PlayerStats {
        &self.stats
    }

    pub fn row_id(&self) -> i64 {
        self.row_id
    }

    /// Scores a scan and credits the result to the player's stats.
    #[instrument(skip(self, scan))]
    pub async fn handle_scan(&mut self, scan: ScanResult) -> Result<ScanOutcome, AppError> {
        let text = match scan {
            ScanResult::Cancelled => {
                debug!("Scan cancelled, nothing to do");
                return Ok(ScanOutcome::Cancelled);
            }
            ScanResult::Scanned { text, format } => {
                debug!(%text, ?format, "Scan received");
                text
            }
        };

        let score = self.calculator.compute_points(&text)?;

        if !score.is_credit() {
            return Ok(ScanOutcome::NothingCredited {
                stats: self.stats.clone(),
            });
        }

        let next = score.apply_to(&self.stats);
        self.persist(next).await?;

        info!(
            points = score.points,
            attribute = ?score.attribute,
            energy = self.stats.energy,
            infantry = self.stats.infantry,
            knowledge = self.stats.knowledge,
            "Scan credited"
        );

        Ok(ScanOutcome::Credited {
            score,
            stats: self.stats.clone(),
        })
    }

    /// Adds a win or a loss to the player's record.
    #[instrument(skip(self))]
    pub async fn record_game(&mut self, won: bool) -> Result<&PlayerStats, AppError> {
        let next = self.stats.with_game_result(won);
        self.persist(next).await?;
        info!(wins = self.stats.wins, losses = self.stats.losses, "Game result recorded");
        Ok(&self.stats)
    }

    /// Re-reads the player's record from the store.
    pub async fn reload(&mut self) -> Result<&PlayerStats, AppError> {
        self.stats = self.store.get(self.row_id).await?;
        Ok(&self.stats)
    }

    pub async fn close(&self) {
        self.store.close().await;
    }

    async fn persist(&mut self, next: PlayerStats) -> Result<(), AppError> {
        if !self.store.update(self.row_id, &next).await? {
            warn!(row_id = self.row_id, "Player stats record disappeared");
            return Err(StatsError::NotFound(self.row_id).into());
        }
        self.stats = next.with_id(self.row_id);
        Ok(())
    }
}
