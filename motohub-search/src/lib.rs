//! MotoHub Search - Listing search and display formatting

#![deny(missing_docs)]
#![deny(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
#![warn(clippy::too_many_lines)]
//!
//! Resolves the requested keyword, runs the catalog query on a blocking
//! thread and turns the joined records into display-ready listing cards.

pub mod errors;
pub mod formatter;
pub mod keyword;
pub mod service;

// Re-export main types
pub use errors::ListingSearchError;
pub use formatter::ListingCard;
pub use keyword::resolve_keyword;
pub use service::{ListingSearchService, SearchResults};

/// Convenience type alias for Results with ListingSearchError.
pub type Result<T> = std::result::Result<T, ListingSearchError>;
