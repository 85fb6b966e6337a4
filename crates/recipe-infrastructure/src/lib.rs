//! # Recipe Infrastructure
//!
//! Storage adapters for the repository ports: PostgreSQL (JSONB documents)
//! and an in-process store for development and tests.

pub mod database;

pub use database::{create_pool, memory_repositories, pg_repositories, run_migrations};
