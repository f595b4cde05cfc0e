//! Record store abstraction over the `hewan` table.
//!
//! Every call is a single round trip to the backing service; nothing is
//! cached in process. Lookups that match no row yield `None`, never an error.

mod memory;
mod postgres;
mod supabase;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::models::animal::{Animal, AnimalChanges};

pub use memory::MemoryStore;
pub use postgres::PgAnimalStore;
pub use supabase::SupabaseStore;

/// Table holding the animal records.
pub const TABLE: &str = "hewan";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("request to record store failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("record store returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("invalid record store URL: {0}")]
    InvalidUrl(String),

    #[error("unexpected record store response: {0}")]
    Decode(String),

    #[error("record store unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait AnimalStore: Send + Sync {
    /// Fetch the record whose identifier equals `id`.
    async fn find_by_id(&self, id: &str) -> Result<Option<Animal>, StoreError>;

    /// Set `last_scanned` on the record with identifier `id`.
    async fn touch_last_scanned(&self, id: &str, at: DateTime<Utc>) -> Result<(), StoreError>;

    /// Apply `changes` and return the updated record, or `None` when no row matched.
    async fn update(&self, id: &str, changes: &AnimalChanges)
        -> Result<Option<Animal>, StoreError>;

    /// Delete the record, returning how many rows were removed.
    async fn delete(&self, id: &str) -> Result<u64, StoreError>;

    async fn health_check(&self) -> Result<(), StoreError>;
}
