//! Application state - shared across all handlers.

use std::sync::Arc;

use glimpse_core::ports::{DatabaseProbe, LeadRepository, PostRepository, UserRepository};
use glimpse_infra::database::{
    DatabaseConnections, PostgresLeadRepository, PostgresPostRepository, PostgresProbe,
    PostgresUserRepository,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub leads: Arc<dyn LeadRepository>,
    pub probe: Arc<dyn DatabaseProbe>,
}

impl AppState {
    /// Repositories and probe over the PostgreSQL pool.
    pub fn postgres(connections: &DatabaseConnections) -> Self {
        let db = &connections.main;
        Self {
            users: Arc::new(PostgresUserRepository::new(db.clone())),
            posts: Arc::new(PostgresPostRepository::new(db.clone())),
            leads: Arc::new(PostgresLeadRepository::new(db.clone())),
            probe: Arc::new(PostgresProbe::new(db.clone())),
        }
    }

    /// Every port served by one in-memory store.
    #[cfg(test)]
    pub fn in_memory(store: Arc<glimpse_infra::InMemoryStore>) -> Self {
        Self {
            users: store.clone(),
            posts: store.clone(),
            leads: store.clone(),
            probe: store,
        }
    }
}
