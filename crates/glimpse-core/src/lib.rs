//! # Glimpse Core
//!
//! The domain layer of the Glimpse API.
//! This crate holds the entity types, their validation rules, the ports that
//! infrastructure implements, and the storage-agnostic pieces of the CSV lead
//! import and the startup database checks.

pub mod domain;
pub mod error;
pub mod health;
pub mod import;
pub mod ports;
pub mod schema;

pub use error::{DomainError, RepoError};
