//! # Glimpse Infrastructure
//!
//! Concrete implementations of the ports defined in `glimpse-core`:
//! SeaORM repositories and diagnostics over PostgreSQL, plus in-memory
//! repositories used by handler tests and local experiments.

pub mod database;
pub mod memory;

pub use database::{DatabaseConfig, DatabaseConnections, PostgresProbe};
pub use memory::InMemoryStore;
