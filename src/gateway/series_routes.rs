//! Series Routes
//!
//! `/db/:db/series`. The gateway's contract ends at validation and
//! authentication; parsing and the write path are delegated to the injected
//! collaborators.

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;

use crate::query::SeriesBatch;

use super::auth::Caller;
use super::response::{decode_json, ApiError};
use super::server::AppState;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SeriesQuery {
    #[serde(default)]
    q: Option<String>,
}

/// Parse the incoming query. Execution happens behind the collaborator, not
/// here.
pub(crate) async fn query_series(
    State(state): State<AppState>,
    Path(_db): Path<String>,
    Query(params): Query<SeriesQuery>,
    Extension(_caller): Extension<Caller>,
) -> Result<StatusCode, ApiError> {
    let q = params.q.unwrap_or_default();
    state
        .parser
        .parse(&q)
        .map_err(|e| ApiError::Validation(format!("parse error: {e}")))?;
    Ok(StatusCode::OK)
}

/// Decode a series batch and hand it to the write path.
pub(crate) async fn write_series(
    State(state): State<AppState>,
    Path(db): Path<String>,
    Extension(_caller): Extension<Caller>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let batches: Vec<SeriesBatch> = decode_json(&body)?;
    state.writer.write(&db, &batches)?;
    Ok(StatusCode::OK)
}
