//! # Glimpse API Server
//!
//! The main entry point for the Actix-web HTTP server.

use actix_web::{App, HttpServer, web};
use anyhow::Context;
use tracing_actix_web::TracingLogger;

use glimpse_core::health::run_startup_checks;
use glimpse_infra::DatabaseConnections;

mod config;
mod handlers;
mod middleware;
mod state;
mod telemetry;

use config::AppConfig;
use state::AppState;
use telemetry::{TelemetryConfig, init_telemetry};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();

    tracing::info!(
        "Starting Glimpse API Server on {}:{}",
        config.host,
        config.port
    );

    let connections = DatabaseConnections::init(&config.database)
        .await
        .context("Failed to build database pool")?;
    let state = AppState::postgres(&connections);

    // Refuse to serve against an unreachable, outdated or drifted database.
    let outcome = run_startup_checks(state.probe.as_ref(), config.managed_hosting)
        .await
        .context("Startup database check failed")?;
    tracing::info!(?outcome, "Startup checks finished");

    let upload_max_bytes = config.upload_max_bytes;

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .app_data(web::PayloadConfig::new(upload_max_bytes))
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}
