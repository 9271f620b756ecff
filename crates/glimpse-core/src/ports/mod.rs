//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod probe;
mod repository;

pub use probe::{DatabaseProbe, MigrationRevisions};
pub use repository::{BaseRepository, LeadRepository, PostRepository, UserRepository};
