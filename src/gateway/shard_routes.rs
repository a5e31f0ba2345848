//! Shard Routes
//!
//! `/db/:db/shards`. Shards are opaque here beyond enumeration and deletion
//! by id.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};

use crate::store::ShardInfo;

use super::auth::Caller;
use super::response::ApiError;
use super::server::AppState;

pub(crate) async fn list_shards(
    State(state): State<AppState>,
    Path(db): Path<String>,
    Extension(_caller): Extension<Caller>,
) -> Result<Json<Vec<ShardInfo>>, ApiError> {
    Ok(Json(state.store.shards(&db)?))
}

pub(crate) async fn delete_shard(
    State(state): State<AppState>,
    Path((db, id)): Path<(String, String)>,
    Extension(_caller): Extension<Caller>,
) -> Result<StatusCode, ApiError> {
    let id: u64 = id
        .parse()
        .map_err(|_| ApiError::Validation("invalid shard id".to_string()))?;
    state.store.delete_shard(&db, id)?;
    Ok(StatusCode::NO_CONTENT)
}
