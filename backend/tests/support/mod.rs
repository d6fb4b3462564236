//! Shared helpers for backend integration tests.
//!
//! Integration tests compile as separate crates under `backend/tests/`, so
//! helpers that would otherwise be copy/pasted between suites live here.

pub mod embedded_postgres;

pub use embedded_postgres::{drop_table, handle_cluster_setup_failure, provision_database};
