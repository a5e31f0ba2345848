//! User Routes
//!
//! `/authenticate` and `/users`. Create-user runs the gate itself so the
//! bootstrap exception can apply; everything else is wrapped by the route
//! table.

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::{Extension, Json};
use serde::Deserialize;

use crate::store::{UserInfo, UserUpdate};

use super::auth::{self, Caller};
use super::credentials::CredentialParams;
use super::response::{decode_json, ApiError};
use super::server::AppState;

// ==================
// Request Types
// ==================

#[derive(Debug, Deserialize)]
pub(crate) struct CreateUserRequest {
    #[serde(default)]
    name: String,
    #[serde(default)]
    password: String,
    #[serde(default)]
    admin: bool,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct UpdateUserRequest {
    password: Option<String>,
    admin: Option<bool>,
}

// ==================
// Handlers
// ==================

/// Reserved credential-check endpoint; deliberately a no-op.
pub(crate) async fn authenticate() -> StatusCode {
    StatusCode::OK
}

pub(crate) async fn list_users(
    State(state): State<AppState>,
    Extension(_caller): Extension<Caller>,
) -> Result<Json<Vec<UserInfo>>, ApiError> {
    Ok(Json(state.store.users()?))
}

/// Create a user.
///
/// The gate runs inside the handler: the very first admin may self-register
/// without credentials, every later create - admin or not - must present
/// valid credentials of an existing user.
pub(crate) async fn create_user(
    State(state): State<AppState>,
    Query(params): Query<CredentialParams>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let req: CreateUserRequest = decode_json(&body)?;

    if !auth::bootstrap_exempt(&state, req.admin)? {
        auth::check_credentials(&state, &params, &headers)?;
    }

    if req.name.is_empty() {
        return Err(ApiError::Validation("user name required".to_string()));
    }
    if req.password.is_empty() {
        return Err(ApiError::Validation("user password required".to_string()));
    }

    state.store.create_user(&req.name, &req.password, req.admin)?;
    Ok(StatusCode::CREATED)
}

pub(crate) async fn update_user(
    State(state): State<AppState>,
    Path(user): Path<String>,
    Extension(_caller): Extension<Caller>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let req: UpdateUserRequest = decode_json(&body)?;
    let update = UserUpdate {
        password: req.password,
        admin: req.admin,
    };
    state.store.update_user(&user, &update)?;
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) async fn delete_user(
    State(state): State<AppState>,
    Path(user): Path<String>,
    Extension(_caller): Extension<Caller>,
) -> Result<StatusCode, ApiError> {
    state.store.delete_user(&user)?;
    Ok(StatusCode::NO_CONTENT)
}
