//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;

use glimpse_infra::database::DatabaseConfig;

const DEFAULT_DATABASE_URL: &str = "postgres://localhost/glimpse";
const DEFAULT_UPLOAD_MAX_BYTES: usize = 10 * 1024 * 1024;

fn parsed<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key).and_then(|s| s.trim().parse().ok())
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: DatabaseConfig,
    /// Body limit for `POST /files/`.
    pub upload_max_bytes: usize,
    /// Set when running on managed hosting; the startup checks are skipped.
    pub managed_hosting: bool,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    ///
    /// Unparseable numbers fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let database = DatabaseConfig {
            url: lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            max_connections: parsed::<u32, _>(&lookup, "DB_MAX_CONNECTIONS").unwrap_or(10),
            min_connections: parsed::<u32, _>(&lookup, "DB_MIN_CONNECTIONS").unwrap_or(1),
        };

        Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parsed::<u16, _>(&lookup, "PORT").unwrap_or(8888),
            database,
            upload_max_bytes: parsed::<usize, _>(&lookup, "UPLOAD_MAX_BYTES")
                .unwrap_or(DEFAULT_UPLOAD_MAX_BYTES),
            managed_hosting: lookup("RAILWAY_ENVIRONMENT_NAME").is_some_and(|v| !v.is_empty()),
        }
    }
}
