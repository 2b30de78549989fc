//! End-to-end tests for MotoHub
//!
//! These tests drive the full HTTP router over a seeded SQLite database and
//! check the rendered page and JSON responses.

mod listing_workflow;
