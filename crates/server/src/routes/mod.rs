//! API route handlers
//!
//! - `health`: liveness and readiness probes
//! - `matching`: batch identifier resolution
//! - `index`: dataset statistics and hot reload

pub mod health;
pub mod index;
pub mod matching;

use crate::error::{ServerError, ServerResult};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// API version and base info
///
/// This is the root endpoint (GET /) and requires no authentication.
pub async fn api_info() -> ServerResult<impl IntoResponse> {
    Ok(Json(json!({
        "name": "CTSLite Server",
        "version": env!("CARGO_PKG_VERSION"),
        "api_version": "v1",
        "endpoints": [
            "/match",
            "/api/v1/match",
            "/api/v1/index/stats",
            "/api/v1/index/reload",
            "/health",
            "/status",
            "/ready"
        ]
    })))
}

/// 404 Not Found handler
pub async fn not_found() -> ServerError {
    ServerError::NotFound("route not found".to_string())
}
