//! MotoHub Core - Catalog model, storage and configuration
//!
//! This crate provides the building blocks shared by the search, web and CLI
//! crates: the catalog domain types, the read-only listing store backed by
//! SQLite or an in-memory demo catalog, runtime configuration and tracing setup.

pub mod catalog;
pub mod config;
pub mod mode;
pub mod storage;
pub mod tracing_setup;

// Re-export main types for convenient access
pub use catalog::{
    BikeModel, Catalog, ExternalId, Listing, ListingQuery, ListingRecord, MAX_SEARCH_RESULTS,
    Manufacturer, Shop, Site,
};
pub use config::MotohubConfig;
pub use mode::RuntimeMode;
pub use storage::{
    InMemoryListingStore, ListingStore, SeedSummary, SqliteListingStore, StorageError,
    StorageResult,
};

/// Errors raised while setting up a MotoHub process.
#[derive(Debug, thiserror::Error)]
pub enum MotohubError {
    /// An environment value could not be parsed
    #[error("Configuration error: {reason}")]
    Configuration { reason: String },

    /// Log directory or log file could not be created
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MotohubError>;
