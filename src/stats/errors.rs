use thiserror::Error;

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Storage is closed")]
    StorageClosed,

    #[error("No stats record with id {0}")]
    NotFound(i64),

    #[error("Database error: {0}")]
    Database(String),
}

impl StatsError {
    pub(crate) fn from_sqlx(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolClosed => StatsError::StorageClosed,
            other => StatsError::Database(other.to_string()),
        }
    }
}
