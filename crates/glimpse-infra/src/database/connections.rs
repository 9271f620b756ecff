use std::sync::Arc;
use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DbConn, DbErr};

/// Configuration for the database pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Handle to the connection pool.
///
/// Each repository call checks a connection out for the duration of the
/// call; the pool takes it back on every exit path.
pub struct DatabaseConnections {
    pub main: Arc<DbConn>,
}

impl DatabaseConnections {
    /// Build the pool without waiting for the database.
    ///
    /// Reachability is established by the startup check or by the first
    /// query, not here.
    pub async fn init(config: &DatabaseConfig) -> Result<Self, DbErr> {
        tracing::info!("Initializing database pool...");

        let opts = ConnectOptions::new(&config.url)
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .connect_lazy(true)
            .sqlx_logging(false)
            .to_owned();

        let main = Database::connect(opts).await?;
        tracing::info!(pool = config.max_connections, "Database pool ready");

        Ok(Self {
            main: Arc::new(main),
        })
    }
}
