use crate::encode::{csv_response, OutputFormat, ResponseShape};
use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use std::sync::Arc;

/// Query string of `GET /match`
#[derive(Debug, Default, Deserialize)]
pub struct MatchParams {
    /// Whitespace separated identifiers
    #[serde(default)]
    pub q: Option<String>,

    #[serde(default)]
    pub format: Option<OutputFormat>,

    #[serde(default)]
    pub shape: Option<ResponseShape>,
}

/// Body of `POST /api/v1/match`
#[derive(Debug, Deserialize)]
pub struct MatchBody {
    pub q: String,

    #[serde(default)]
    pub format: Option<OutputFormat>,

    #[serde(default)]
    pub shape: Option<ResponseShape>,
}

/// Resolve a batch passed in the query string.
///
/// A missing `q` is treated like an empty one.
pub async fn match_query(
    State(state): State<Arc<ServerState>>,
    headers: HeaderMap,
    Query(params): Query<MatchParams>,
) -> ServerResult<Response> {
    let raw = params.q.unwrap_or_default();
    respond(&state, &raw, params.format, params.shape, &headers)
}

/// Resolve a batch passed as a JSON body.
pub async fn match_body(
    State(state): State<Arc<ServerState>>,
    headers: HeaderMap,
    Json(body): Json<MatchBody>,
) -> ServerResult<Response> {
    respond(&state, &body.q, body.format, body.shape, &headers)
}

fn respond(
    state: &ServerState,
    raw: &str,
    format: Option<OutputFormat>,
    shape: Option<ResponseShape>,
    headers: &HeaderMap,
) -> ServerResult<Response> {
    let index = state.index();
    let results = matcher::resolve_batch(&index, raw)?;

    let found = results.iter().filter(|r| r.found_match).count();
    tracing::info!(queries = results.len(), found, "Batch resolved");

    if OutputFormat::negotiate(format, headers) == OutputFormat::Csv {
        return csv_response(&results);
    }

    match shape.unwrap_or_default() {
        ResponseShape::Results => Ok(Json(results).into_response()),
        ResponseShape::Compounds => {
            let compounds = matcher::flatten_matches(&results);
            if compounds.is_empty() {
                return Err(ServerError::NotFound(
                    "no compound matched any query".to_string(),
                ));
            }
            Ok(Json(compounds).into_response())
        }
    }
}
