//! Retention Policy Routes
//!
//! `/db/:db/retention_policies`. Policy attributes beyond the name are opaque
//! and forwarded to the store as decoded.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};

use crate::store::{RetentionPolicy, RetentionPolicyUpdate};

use super::auth::Caller;
use super::response::{decode_json, ApiError};
use super::server::AppState;

pub(crate) async fn list_retention_policies(
    State(state): State<AppState>,
    Path(db): Path<String>,
    Extension(_caller): Extension<Caller>,
) -> Result<Json<Vec<RetentionPolicy>>, ApiError> {
    Ok(Json(state.store.retention_policies(&db)?))
}

pub(crate) async fn create_retention_policy(
    State(state): State<AppState>,
    Path(db): Path<String>,
    Extension(_caller): Extension<Caller>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let policy: RetentionPolicy = decode_json(&body)?;
    if policy.name.is_empty() {
        return Err(ApiError::Validation(
            "retention policy name required".to_string(),
        ));
    }
    state.store.create_retention_policy(&db, &policy)?;
    Ok(StatusCode::CREATED)
}

pub(crate) async fn update_retention_policy(
    State(state): State<AppState>,
    Path((db, name)): Path<(String, String)>,
    Extension(_caller): Extension<Caller>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let update: RetentionPolicyUpdate = decode_json(&body)?;
    state.store.update_retention_policy(&db, &name, &update)?;
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) async fn delete_retention_policy(
    State(state): State<AppState>,
    Path((db, name)): Path<(String, String)>,
    Extension(_caller): Extension<Caller>,
) -> Result<StatusCode, ApiError> {
    state.store.delete_retention_policy(&db, &name)?;
    Ok(StatusCode::NO_CONTENT)
}
