//! Database connection management, entities, and Postgres implementations
//! of the core ports.

mod connections;
mod postgres_base;
mod probe;
pub mod postgres_repo;
pub mod schema;

pub mod entity;

pub use connections::{DatabaseConfig, DatabaseConnections};
pub use postgres_repo::{PostgresLeadRepository, PostgresPostRepository, PostgresUserRepository};
pub use probe::{PostgresProbe, head_revision};

#[cfg(test)]
mod tests;
