//! Integration tests for MotoHub
//!
//! These tests verify the search service against a real SQLite database and
//! check that the SQLite and in-memory stores agree.

#[path = "integration/search_workflow.rs"]
mod search_workflow;

#[path = "integration/store_parity.rs"]
mod store_parity;
