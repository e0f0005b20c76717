use std::sync::Arc;

use barcodewars::{
    scoring::{Attribute, FixedAttributePicker},
    AppConfig, GameSession, PlayerStats, ScoreCalculator, SqliteStatsStore, StatsStore,
};

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetup {
    pub store: Arc<SqliteStatsStore>,
    pub session: GameSession,
}

pub struct TestSetupBuilder {
    attribute: Option<Attribute>,
    existing: Vec<PlayerStats>,
}

#[allow(dead_code)]
impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            attribute: None,
            existing: vec![],
        }
    }

    /// Credits every scan to `attribute` instead of picking at random
    pub fn always_crediting(mut self, attribute: Attribute) -> Self {
        self.attribute = Some(attribute);
        self
    }

    pub fn with_existing_stats(mut self, stats: PlayerStats) -> Self {
        self.existing.push(stats);
        self
    }

    pub async fn build(self) -> TestSetup {
        let store = Arc::new(
            SqliteStatsStore::open(&AppConfig::in_memory())
                .await
                .expect("in-memory database should open"),
        );

        for stats in &self.existing {
            store.insert(stats).await.expect("seed insert should succeed");
        }

        let calculator = match self.attribute {
            Some(attribute) => {
                ScoreCalculator::with_picker(Arc::new(FixedAttributePicker::new(attribute)))
            }
            None => ScoreCalculator::new(),
        };

        let session = GameSession::start(store.clone(), calculator)
            .await
            .expect("session should start");

        TestSetup { store, session }
    }
}
