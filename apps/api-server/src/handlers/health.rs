//! Database status endpoint.

use actix_web::{HttpResponse, web};
use glimpse_shared::dto::DbStatusResponse;

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Run a trivial query against the store.
///
/// GET /db-status
pub async fn db_status(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    if let Err(e) = state.probe.ping().await {
        tracing::error!(error = %e, "Database status check failed");
        return Err(AppError::Failure("Database connection failed".to_string()));
    }

    Ok(HttpResponse::Ok().json(DbStatusResponse {
        status: "connected".to_string(),
        message: "Database connection successful".to_string(),
    }))
}
