use axum::extract::{Extension, Path, State};
use axum::Json;
use serde_json::{json, Value};

use crate::auth::policy::Principal;
use crate::database::models::alumni::{Alumni, AlumniInput};
use crate::error::ApiError;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::middleware::roles::ensure_admin;
use crate::state::AppState;

/// GET /api/alumni - All alumni records
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Alumni>> {
    let alumni = state.alumni.list_all().await?;
    Ok(ApiResponse::success(alumni))
}

/// GET /api/alumni/:number - Look up one alumni by number
pub async fn get(
    State(state): State<AppState>,
    Path(number): Path<String>,
) -> ApiResult<Alumni> {
    let alumni = state
        .alumni
        .find_by_number(&number)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("No alumni found with number '{}'", number)))?;

    Ok(ApiResponse::success(alumni))
}

/// POST /api/alumni - Create an alumni record (admin only)
pub async fn create(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(payload): Json<AlumniInput>,
) -> ApiResult<Alumni> {
    ensure_admin(&principal)?;

    if payload.number.is_empty() || payload.full_name.is_empty() {
        return Err(ApiError::bad_request("Number and full name are required"));
    }

    if state.alumni.find_by_number(&payload.number).await?.is_some() {
        return Err(ApiError::conflict(format!(
            "Alumni number '{}' already exists",
            payload.number
        )));
    }

    let alumni = state.alumni.create(payload).await?;
    Ok(ApiResponse::created(alumni))
}

/// PUT /api/alumni/:number - Update an alumni record (admin only)
pub async fn update(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(number): Path<String>,
    Json(payload): Json<AlumniInput>,
) -> ApiResult<Alumni> {
    ensure_admin(&principal)?;

    if payload.number.is_empty() || payload.full_name.is_empty() {
        return Err(ApiError::bad_request("Number and full name are required"));
    }

    let new_number = payload.number.clone();
    let updated = state.alumni.update_by_number(&number, payload).await?;
    if updated == 0 {
        return Err(ApiError::not_found(format!(
            "No alumni found with number '{}'",
            number
        )));
    }

    let alumni = state
        .alumni
        .find_by_number(&new_number)
        .await?
        .ok_or_else(|| ApiError::internal_server_error("Updated record could not be re-read"))?;

    Ok(ApiResponse::success(alumni))
}

/// DELETE /api/alumni/:number - Remove an alumni record (admin only)
pub async fn delete(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(number): Path<String>,
) -> ApiResult<Value> {
    ensure_admin(&principal)?;

    let deleted = state.alumni.delete_by_number(&number).await?;
    if deleted == 0 {
        return Err(ApiError::not_found(format!(
            "No alumni found with number '{}'",
            number
        )));
    }

    Ok(ApiResponse::success(json!({ "deleted": deleted })))
}
