//! Health check endpoint.

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Database reachability.
    pub database: String,
}

impl HealthResponse {
    fn healthy() -> Self {
        Self {
            status: "ok".to_string(),
            database: "ok".to_string(),
        }
    }

    fn degraded() -> Self {
        Self {
            status: "degraded".to_string(),
            database: "unavailable".to_string(),
        }
    }
}

/// GET /health - Health check endpoint.
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    match state.store().ping().await {
        Ok(()) => (StatusCode::OK, Json(HealthResponse::healthy())),
        Err(e) => {
            tracing::warn!(error = %e, "Health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, Json(HealthResponse::degraded()))
        }
    }
}

/// Build health check routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
