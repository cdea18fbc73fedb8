//! Shared helpers for integration suites that need a real PostgreSQL.
//!
//! Integration tests compile as separate crates under `backend/tests/`, so
//! database bootstrapping lives here instead of being repeated per suite.

pub mod cluster_skip;
pub mod embedded_postgres;

pub use cluster_skip::handle_cluster_setup_failure;
pub use embedded_postgres::provision_template_database;
