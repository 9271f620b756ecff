//! Migration CLI tool.
//!
//! Reads `DATABASE_URL` (optionally from `.env`) and applies the
//! `glimpse-migration` revisions: `migration up`, `migration status`, ...

use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter("info")
        .init();

    cli::run_cli(glimpse_migration::Migrator).await;
}
