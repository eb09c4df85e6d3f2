//! notes-server: HTTP API server for the Notes Vault service
//!
//! This crate provides:
//! - REST endpoints to create, list, fetch, and delete notes
//! - Request body validation with structured 422 errors
//! - Health and OpenAPI description endpoints
//!
//! # Architecture
//!
//! The server is built on Axum with a middleware stack for:
//! - Request tracing and logging
//! - CORS handling
//! - Request ID generation
//! - JSON error responses
//!
//! Each request opens its own store session through the [`extract::DbSession`]
//! extractor and releases it when the handler returns.
//!
//! # Usage
//!
//! ```rust,ignore
//! use notes_server::{build_app, config::ServerConfig, state::AppState};
//! use notes_store::{Store, StoreConfig};
//!
//! let store = Store::connect(StoreConfig::from_env()?).await?;
//! let config = ServerConfig::from_env()?;
//! let app = build_app(AppState::new(store, config));
//! ```

#![recursion_limit = "256"]

pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::middleware::request_id::{propagate_request_id, request_id_layer};

// Re-exports for convenience
pub use config::{ConfigError, ServerConfig};
pub use error::{ApiError, ApiResult};
pub use state::AppState;

// Re-export dependent crates
pub use notes_core;
pub use notes_store;

/// Build the router with the full middleware stack.
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config().cors_allowed_origins);

    routes::build_router(state)
        .layer(axum::middleware::from_fn(propagate_request_id))
        .layer(request_id_layer())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Build CORS layer from configuration.
///
/// Origins that fail to parse as header values are logged and skipped.
fn build_cors_layer(allowed_origins: &str) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if allowed_origins.trim() == "*" {
        return layer.allow_origin(Any);
    }

    let origins: Vec<http::HeaderValue> = allowed_origins
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != "*")
        .filter_map(|s| match s.parse() {
            Ok(origin) => Some(origin),
            Err(_) => {
                tracing::warn!(origin = s, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(origins))
}
