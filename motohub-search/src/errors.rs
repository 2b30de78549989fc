//! Error types for listing search functionality.

use motohub_core::StorageError;
use thiserror::Error;

/// Errors that can occur during listing search operations.
#[derive(Debug, Error)]
pub enum ListingSearchError {
    /// Underlying listing store failed.
    #[error("Listing store error: {0}")]
    Storage(#[from] StorageError),

    /// Blocking store task panicked or was cancelled.
    #[error("Search task failed: {reason}")]
    TaskFailed {
        /// The reason the task did not complete
        reason: String,
    },
}
