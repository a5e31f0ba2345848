//! Database Routes
//!
//! `/db` list/create/delete. Existence and uniqueness are the store's call;
//! the gateway only validates the wire shape.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Deserialize;

use crate::store::DatabaseInfo;

use super::auth::Caller;
use super::response::{decode_json, ApiError};
use super::server::AppState;

#[derive(Debug, Deserialize)]
pub(crate) struct CreateDatabaseRequest {
    #[serde(default)]
    name: String,
}

pub(crate) async fn list_databases(
    State(state): State<AppState>,
    Extension(_caller): Extension<Caller>,
) -> Result<Json<Vec<DatabaseInfo>>, ApiError> {
    Ok(Json(state.store.databases()?))
}

pub(crate) async fn create_database(
    State(state): State<AppState>,
    Extension(_caller): Extension<Caller>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let req: CreateDatabaseRequest = decode_json(&body)?;
    if req.name.is_empty() {
        return Err(ApiError::Validation("database name required".to_string()));
    }
    state.store.create_database(&req.name)?;
    Ok(StatusCode::CREATED)
}

pub(crate) async fn delete_database(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Extension(_caller): Extension<Caller>,
) -> Result<StatusCode, ApiError> {
    state.store.delete_database(&name)?;
    Ok(StatusCode::NO_CONTENT)
}
