//! Record stores: one interface, two backends (relational and legacy csv).

mod flat_file;
mod sqlite;

pub use flat_file::CsvStore;
pub use sqlite::SqliteStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{PlayerId, PlayerRecord};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("player {0} not found")]
    NotFound(PlayerId),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("data file error: {0}")]
    DataFile(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Persistent store of player records. The two implementations are treated
/// as behaviorally equivalent by callers but their histories are never
/// reconciled with each other; id uniqueness across both is guaranteed by
/// the external allocator, not by the stores.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Append a new record. The id must already be allocated.
    async fn insert(&self, record: &PlayerRecord) -> Result<(), StoreError>;

    /// Overwrite all mutable fields of an existing record.
    async fn update(&self, id: PlayerId, record: &PlayerRecord) -> Result<(), StoreError>;

    async fn delete(&self, id: PlayerId) -> Result<(), StoreError>;

    async fn find_by_id(&self, id: PlayerId) -> Result<Option<PlayerRecord>, StoreError>;

    /// Records whose name contains `term` (case-insensitively) or whose id
    /// contains it as a substring of its decimal form, newest first.
    async fn search(&self, term: &str) -> Result<Vec<PlayerRecord>, StoreError>;

    /// Every record, newest first.
    async fn all(&self) -> Result<Vec<PlayerRecord>, StoreError>;
}
