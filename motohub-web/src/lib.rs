//! MotoHub Web - Listing search page and JSON API

#![warn(missing_docs)]
#![warn(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
#![warn(clippy::too_many_lines)]
//!
//! Server-rendered search page plus JSON endpoints over the listing search
//! service.

pub mod components;
pub mod errors;
pub mod handlers;
pub mod pages;
pub mod server;

// Re-export main types
pub use errors::WebError;
pub use server::{AppState, build_router, run_server};
