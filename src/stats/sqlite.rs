use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use std::str::FromStr;
use tracing::{debug, info, instrument, warn};

use super::{repository::StatsStore, schema, PlayerStats, StatsError};
use crate::config::AppConfig;

/// SQL text for every statement the store runs, built from the `schema` names
#[derive(Debug)]
struct Statements {
    create_table: String,
    insert: String,
    update: String,
    select_one: String,
    select_all: String,
    delete: String,
}

impl Statements {
    fn new() -> Self {
        let table = schema::TABLE;
        let id = schema::KEY_ROWID;
        let counters = schema::COUNTER_COLUMNS;

        let column_defs: Vec<String> = counters
            .iter()
            .map(|c| format!("{} INTEGER NOT NULL DEFAULT 0", c))
            .collect();
        let placeholders: Vec<String> = (1..=counters.len()).map(|i| format!("?{}", i)).collect();
        // ?1 is the row id in UPDATE, so the counters start at ?2
        let assignments: Vec<String> = counters
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{} = ?{}", c, i + 2))
            .collect();
        let select = format!("SELECT {}, {} FROM {}", id, counters.join(", "), table);

        Self {
            create_table: format!(
                "CREATE TABLE IF NOT EXISTS {} ({} INTEGER PRIMARY KEY AUTOINCREMENT, {})",
                table,
                id,
                column_defs.join(", ")
            ),
            insert: format!(
                "INSERT INTO {} ({}) VALUES ({})",
                table,
                counters.join(", "),
                placeholders.join(", ")
            ),
            update: format!(
                "UPDATE {} SET {} WHERE {} = ?1",
                table,
                assignments.join(", "),
                id
            ),
            select_one: format!("{} WHERE {} = ?1", select, id),
            select_all: format!("{} ORDER BY {}", select, id),
            delete: format!("DELETE FROM {} WHERE {} = ?1", table, id),
        }
    }
}

/// SQLite implementation of StatsStore
///
/// The pool holds a single connection, so operations run one at a time and
/// `sqlite::memory:` databases survive for the life of the store.
pub struct SqliteStatsStore {
    pool: SqlitePool,
    statements: Statements,
}

impl SqliteStatsStore {
    /// Opens (or creates) the database described by `config` and makes sure
    /// the stats table exists.
    #[instrument(skip(config), fields(database_url = %config.database_url))]
    pub async fn open(config: &AppConfig) -> Result<Self, StatsError> {
        let options = SqliteConnectOptions::from_str(&config.database_url)
            .map_err(|e| {
                warn!(error = %e, "Invalid database url");
                StatsError::StorageUnavailable(e.to_string())
            })?
            .create_if_missing(config.create_if_missing);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to open stats database");
                StatsError::StorageUnavailable(e.to_string())
            })?;

        let statements = Statements::new();

        sqlx::query(&statements.create_table)
            .execute(&pool)
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to create stats table");
                StatsError::StorageUnavailable(e.to_string())
            })?;

        info!(table = schema::TABLE, "Stats database opened");
        Ok(Self { pool, statements })
    }

    fn ensure_open(&self) -> Result<(), StatsError> {
        if self.pool.is_closed() {
            return Err(StatsError::StorageClosed);
        }
        Ok(())
    }

    fn row_to_stats(row: &SqliteRow) -> Result<PlayerStats, sqlx::Error> {
        Ok(PlayerStats {
            id: Some(row.try_get(schema::KEY_ROWID)?),
            wins: row.try_get(schema::KEY_WINS)?,
            losses: row.try_get(schema::KEY_LOSSES)?,
            energy: row.try_get(schema::KEY_ENERGY)?,
            infantry: row.try_get(schema::KEY_INFANTRY)?,
            knowledge: row.try_get(schema::KEY_KNOWLEDGE)?,
        })
    }
}

#[async_trait]
impl StatsStore for SqliteStatsStore {
    #[instrument(skip(self, stats))]
    async fn insert(&self, stats: &PlayerStats) -> Result<i64, StatsError> {
        self.ensure_open()?;

        let result = sqlx::query(&self.statements.insert)
        .bind(stats.wins)
        .bind(stats.losses)
        .bind(stats.energy)
        .bind(stats.infantry)
        .bind(stats.knowledge)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to insert stats record");
            StatsError::from_sqlx(e)
        })?;

        let row_id = result.last_insert_rowid();
        debug!(row_id, "Stats record inserted");
        Ok(row_id)
    }

    #[instrument(skip(self, stats))]
    async fn update(&self, row_id: i64, stats: &PlayerStats) -> Result<bool, StatsError> {
        self.ensure_open()?;

        let result = sqlx::query(&self.statements.update)
        .bind(row_id)
        .bind(stats.wins)
        .bind(stats.losses)
        .bind(stats.energy)
        .bind(stats.infantry)
        .bind(stats.knowledge)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, row_id, "Failed to update stats record");
            StatsError::from_sqlx(e)
        })?;

        if result.rows_affected() == 0 {
            warn!(row_id, "Stats record not found for update");
            return Ok(false);
        }

        debug!(row_id, "Stats record updated");
        Ok(true)
    }

    #[instrument(skip(self))]
    async fn get(&self, row_id: i64) -> Result<PlayerStats, StatsError> {
        self.ensure_open()?;

        let row = sqlx::query(&self.statements.select_one)
            .bind(row_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, row_id, "Failed to fetch stats record");
                StatsError::from_sqlx(e)
            })?;

        match row {
            Some(row) => Self::row_to_stats(&row).map_err(StatsError::from_sqlx),
            None => {
                debug!(row_id, "Stats record not found");
                Err(StatsError::NotFound(row_id))
            }
        }
    }

    #[instrument(skip(self))]
    async fn get_all(&self) -> Result<Vec<PlayerStats>, StatsError> {
        self.ensure_open()?;

        let rows = sqlx::query(&self.statements.select_all)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to fetch stats records");
                StatsError::from_sqlx(e)
            })?;

        rows.iter()
            .map(Self::row_to_stats)
            .collect::<Result<Vec<_>, _>>()
            .map_err(StatsError::from_sqlx)
    }

    #[instrument(skip(self))]
    async fn delete(&self, row_id: i64) -> Result<bool, StatsError> {
        self.ensure_open()?;

        let result = sqlx::query(&self.statements.delete)
            .bind(row_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, row_id, "Failed to delete stats record");
                StatsError::from_sqlx(e)
            })?;

        let removed = result.rows_affected() > 0;
        debug!(row_id, removed, "Stats record delete");
        Ok(removed)
    }

    #[instrument(skip(self))]
    async fn close(&self) {
        if self.pool.is_closed() {
            return;
        }
        self.pool.close().await;
        info!("Stats database closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn open_in_memory() -> SqliteStatsStore {
        SqliteStatsStore::open(&AppConfig::in_memory())
            .await
            .expect("in-memory database should open")
    }

    #[tokio::test]
    async fn insert_then_get_returns_same_values() {
        let store = open_in_memory().await;
        let stats = PlayerStats::new(2, 5, 45, 0, 22);

        let row_id = store.insert(&stats).await.unwrap();
        assert_eq!(store.get(row_id).await.unwrap(), stats.with_id(row_id));
    }

    #[tokio::test]
    async fn update_then_get_reflects_new_values() {
        let store = open_in_memory().await;
        let row_id = store.insert(&PlayerStats::default()).await.unwrap();

        let updated = PlayerStats::new(1, 0, 10, 20, 30);
        assert!(store.update(row_id, &updated).await.unwrap());
        assert_eq!(store.get(row_id).await.unwrap(), updated.with_id(row_id));
    }

    #[tokio::test]
    async fn update_missing_row_returns_false() {
        let store = open_in_memory().await;
        assert!(!store.update(99, &PlayerStats::default()).await.unwrap());
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let store = open_in_memory().await;
        let row_id = store.insert(&PlayerStats::default()).await.unwrap();

        assert!(store.delete(row_id).await.unwrap());
        assert!(!store.delete(row_id).await.unwrap());
        assert!(matches!(
            store.get(row_id).await,
            Err(StatsError::NotFound(id)) if id == row_id
        ));
    }

    #[tokio::test]
    async fn get_all_is_in_insertion_order() {
        let store = open_in_memory().await;
        for knowledge in [7, 3, 5] {
            store
                .insert(&PlayerStats::new(0, 0, 0, 0, knowledge))
                .await
                .unwrap();
        }

        let all = store.get_all().await.unwrap();
        let knowledge: Vec<u32> = all.iter().map(|s| s.knowledge).collect();
        assert_eq!(knowledge, vec![7, 3, 5]);
        assert!(all.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[tokio::test]
    async fn operations_fail_after_close() {
        let store = open_in_memory().await;
        let row_id = store.insert(&PlayerStats::default()).await.unwrap();

        store.close().await;
        store.close().await;

        assert!(matches!(
            store.insert(&PlayerStats::default()).await,
            Err(StatsError::StorageClosed)
        ));
        assert!(matches!(
            store.get_all().await,
            Err(StatsError::StorageClosed)
        ));
        assert!(matches!(
            store.get(row_id).await,
            Err(StatsError::StorageClosed)
        ));
        assert!(matches!(
            store.update(row_id, &PlayerStats::default()).await,
            Err(StatsError::StorageClosed)
        ));
        assert!(matches!(
            store.delete(row_id).await,
            Err(StatsError::StorageClosed)
        ));
    }

    #[test]
    fn statements_use_the_schema_table_name() {
        let statements = Statements::new();
        let all = [
            &statements.create_table,
            &statements.insert,
            &statements.update,
            &statements.select_one,
            &statements.select_all,
            &statements.delete,
        ];

        for sql in all {
            assert!(sql.contains(schema::TABLE), "missing table name in {}", sql);
            assert!(!sql.contains("titles"));
        }
        assert_eq!(
            statements.update,
            "UPDATE user_stats SET wins = ?2, losses = ?3, energy = ?4, infantry = ?5, \
             knowledge = ?6 WHERE _id = ?1"
        );
        assert_eq!(
            statements.insert,
            "INSERT INTO user_stats (wins, losses, energy, infantry, knowledge) \
             VALUES (?1, ?2, ?3, ?4, ?5)"
        );
    }

    #[tokio::test]
    async fn open_fails_when_database_cannot_be_created() {
        let config = AppConfig::default()
            .with_database_url("sqlite:///barcodewars-missing-dir/nested/game_stats.db");

        let result = SqliteStatsStore::open(&config).await;
        assert!(matches!(result, Err(StatsError::StorageUnavailable(_))));
    }

    #[tokio::test]
    async fn open_fails_for_missing_file_without_create() {
        let config = AppConfig::default()
            .with_database_url("sqlite://barcodewars-does-not-exist.db")
            .with_create_if_missing(false);

        let result = SqliteStatsStore::open(&config).await;
        assert!(matches!(result, Err(StatsError::StorageUnavailable(_))));
    }
}
