//! Storage seam for per-user search histories

use crate::models::{SearchEvent, UserHistory};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Store lock poisoned")]
    Poisoned,

    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

/// Durable, append-only log of search events keyed by user id.
///
/// Implementations must make `append` a single atomic operation: two
/// concurrent appends for the same user both end up in the history.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Append `event` to the user's history, creating the record on first use
    async fn append(&self, user_id: &str, event: SearchEvent) -> Result<(), StoreError>;

    /// Full history in insertion order, or `None` if the user has no record
    async fn find(&self, user_id: &str) -> Result<Option<UserHistory>, StoreError>;

    /// Cheap reachability check used by the health endpoint
    async fn ping(&self) -> Result<(), StoreError>;
}
