use crate::error::ServerResult;
use crate::state::{ServerMetadata, ServerState};
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use std::sync::Arc;

/// Response from a successful reload
#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    pub status: String,
    pub dataset: String,
    pub index: index::IndexStats,
}

/// Counts of the index currently in service.
pub async fn index_stats(State(state): State<Arc<ServerState>>) -> ServerResult<impl IntoResponse> {
    let metadata = ServerMetadata {
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
        index: state.index().stats(),
    };

    Ok(Json(metadata))
}

/// Rebuild the index from the configured dataset and publish it.
///
/// Requests already running keep resolving against the previous index.
pub async fn reload_index(State(state): State<Arc<ServerState>>) -> ServerResult<impl IntoResponse> {
    let stats = state.reload().await?;

    Ok(Json(ReloadResponse {
        status: "reloaded".to_string(),
        dataset: state.config.dataset_path.display().to_string(),
        index: stats,
    }))
}
