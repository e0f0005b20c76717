mod errors;
pub mod models;
pub mod repository;
pub mod sqlite;

pub use errors::StatsError;
pub use models::PlayerStats;
pub use repository::{InMemoryStatsStore, StatsStore};
pub use sqlite::SqliteStatsStore;

/// Table and column names of the persisted stats row
pub mod schema {
    pub const TABLE: &str = "user_stats";
    pub const KEY_ROWID: &str = "_id";
    pub const KEY_WINS: &str = "wins";
    pub const KEY_LOSSES: &str = "losses";
    pub const KEY_ENERGY: &str = "energy";
    pub const KEY_INFANTRY: &str = "infantry";
    pub const KEY_KNOWLEDGE: &str = "knowledge";

    /// Counter columns in the order they are bound
    pub const COUNTER_COLUMNS: [&str; 5] =
        [KEY_WINS, KEY_LOSSES, KEY_ENERGY, KEY_INFANTRY, KEY_KNOWLEDGE];
}
