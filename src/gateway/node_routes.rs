//! Data Node Routes
//!
//! `/data_nodes` cluster membership, plus the `/ping` liveness check. Node
//! URLs must be absolute network addresses; ids are assigned by the store and
//! re-read after creation so the response carries them.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{StatusCode, Uri};
use axum::{Extension, Json};
use serde::Deserialize;

use crate::store::{DataNode, StoreError};

use super::auth::Caller;
use super::response::{decode_json, ApiError};
use super::server::AppState;

#[derive(Debug, Deserialize)]
pub(crate) struct CreateDataNodeRequest {
    #[serde(default)]
    url: String,
}

/// Liveness check; reaching it at all is the answer.
pub(crate) async fn ping(Extension(_caller): Extension<Caller>) -> StatusCode {
    StatusCode::OK
}

pub(crate) async fn list_data_nodes(
    State(state): State<AppState>,
    Extension(_caller): Extension<Caller>,
) -> Result<Json<Vec<DataNode>>, ApiError> {
    Ok(Json(state.store.data_nodes()?))
}

pub(crate) async fn create_data_node(
    State(state): State<AppState>,
    Extension(_caller): Extension<Caller>,
    body: Bytes,
) -> Result<(StatusCode, Json<DataNode>), ApiError> {
    let req: CreateDataNodeRequest = decode_json(&body)?;

    let uri: Uri = req
        .url
        .parse()
        .map_err(|_| ApiError::Validation("invalid data node url".to_string()))?;
    if uri.scheme().is_none() || uri.authority().is_none() {
        return Err(ApiError::Validation("invalid data node url".to_string()));
    }

    state.store.create_data_node(&req.url)?;

    // Re-read so the response carries the store-assigned id.
    let node = state.store.data_node_by_url(&req.url)?.ok_or_else(|| {
        ApiError::Store(StoreError::Internal(
            "data node missing after create".to_string(),
        ))
    })?;
    Ok((StatusCode::CREATED, Json(node)))
}

pub(crate) async fn delete_data_node(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(_caller): Extension<Caller>,
) -> Result<StatusCode, ApiError> {
    let id: u64 = id
        .parse()
        .map_err(|_| ApiError::Validation("invalid node id".to_string()))?;
    state.store.delete_data_node(id)?;
    Ok(StatusCode::NO_CONTENT)
}
