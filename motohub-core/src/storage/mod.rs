//! Storage layer for the listing catalog.
//!
//! Defines the read interface the search service depends on, with a SQLite
//! implementation for real data and an in-memory one for demos and tests.

pub mod connection;
pub mod demo_catalog;
pub mod in_memory;
pub mod models;
pub mod schema;
pub mod seed;
pub mod sqlite_store;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_fixtures;

pub use connection::{DbPool, establish_pool, migrate_database, run_migrations};
pub use demo_catalog::demo_catalog;
pub use in_memory::InMemoryListingStore;
pub use seed::SeedSummary;
pub use sqlite_store::SqliteListingStore;

use crate::catalog::{BikeModel, ListingQuery, ListingRecord, Shop};

/// Read operations over the listing catalog.
///
/// Implementations are blocking; async callers should move calls onto a
/// blocking thread.
pub trait ListingStore: Send + Sync + std::fmt::Debug {
    /// Returns active listings whose title, model name or manufacturer name
    /// contains the query keyword, newest first, at most `query.limit()` rows.
    ///
    /// # Errors
    ///
    /// - `StorageError::Pool` - If no database connection is available
    /// - `StorageError::Query` - If the database query failed
    fn search_listings(&self, query: &ListingQuery) -> StorageResult<Vec<ListingRecord>>;

    /// Resolves a site-native model identifier to the canonical bike model.
    ///
    /// # Errors
    ///
    /// - `StorageError::Query` - If the database query failed
    fn model_by_external_id(&self, site: &str, identifier: &str)
    -> StorageResult<Option<BikeModel>>;

    /// Resolves a site-native shop identifier to the canonical shop.
    ///
    /// # Errors
    ///
    /// - `StorageError::Query` - If the database query failed
    fn shop_by_external_id(&self, site: &str, identifier: &str) -> StorageResult<Option<Shop>>;
}

/// Errors that occur while reading or writing the catalog.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Database file could not be opened
    #[error("Database connection failed: {0}")]
    Connection(#[from] diesel::ConnectionError),

    /// Query was rejected or failed while running
    #[error("Database query failed: {0}")]
    Query(#[from] diesel::result::Error),

    /// Connection pool could not hand out a connection
    #[error("Connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),

    /// Schema migration failed
    #[error("Migration failed: {reason}")]
    Migration {
        /// Description of the failing migration
        reason: String,
    },

    /// JSON list column could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;
