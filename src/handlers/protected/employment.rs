use axum::extract::{Extension, Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::policy::Principal;
use crate::database::models::employment::{EmploymentRecord, EmploymentUpdate, NewEmployment};
use crate::database::repository::EmploymentStore;
use crate::error::ApiError;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::middleware::roles::ensure_admin;
use crate::state::AppState;

/// GET /api/employment - All active employment records
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<EmploymentRecord>> {
    let records = state.employment.list_active().await?;
    Ok(ApiResponse::success(records))
}

/// GET /api/employment/:id - One active record by id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<EmploymentRecord> {
    let record = state.employment.find_by_id(id).await?.ok_or_else(|| {
        ApiError::not_found(format!("No employment record found with id '{}'", id))
    })?;

    Ok(ApiResponse::success(record))
}

/// POST /api/employment - Create a record (admin only)
pub async fn create(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(payload): Json<NewEmployment>,
) -> ApiResult<EmploymentRecord> {
    ensure_admin(&principal)?;

    if payload.alumni_number.is_empty() || payload.employment_status.is_empty() {
        return Err(ApiError::bad_request(
            "Alumni number and employment status are required",
        ));
    }

    let record = state.employment.create(payload).await?;
    Ok(ApiResponse::created(record))
}

/// GET /api/employment/owner/:number - Active record(s) of one alumni
pub async fn list_by_owner(
    State(state): State<AppState>,
    Path(number): Path<String>,
) -> ApiResult<Vec<EmploymentRecord>> {
    let records = state.employment.find_active_by_owner(&number).await?;
    if records.is_empty() {
        return Err(ApiError::not_found(format!(
            "No active employment record found for alumni number '{}'",
            number
        )));
    }

    Ok(ApiResponse::success(records))
}

/// PUT /api/employment/owner/:number - Update the active record(s) of one
/// alumni (admin only)
pub async fn update(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(number): Path<String>,
    Json(payload): Json<EmploymentUpdate>,
) -> ApiResult<Value> {
    ensure_admin(&principal)?;

    if payload.employment_status.is_empty() {
        return Err(ApiError::bad_request("Employment status is required"));
    }

    let updated = state.employment.update_by_owner(&number, payload).await?;
    if updated == 0 {
        return Err(ApiError::not_found(format!(
            "No active employment record found for alumni number '{}'",
            number
        )));
    }

    Ok(ApiResponse::success(json!({ "updated": updated })))
}

/// PUT /api/employment/owner/:number/trash - Soft-delete every active record
/// of one alumni
pub async fn mark_trash(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(number): Path<String>,
) -> ApiResult<Value> {
    let transitioned = state.trash.mark_deleted(&principal, &number).await?;
    Ok(ApiResponse::success(json!({ "transitioned": transitioned })))
}

/// PUT /api/employment/owner/:number/restore - Restore every trashed record
/// of one alumni
pub async fn restore_trash(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(number): Path<String>,
) -> ApiResult<Value> {
    let transitioned = state.trash.restore(&principal, &number).await?;
    Ok(ApiResponse::success(json!({ "transitioned": transitioned })))
}

#[derive(Debug, Deserialize)]
pub struct TrashQuery {
    #[serde(default)]
    pub number: Option<String>,
}

/// GET /api/employment/trash[?number=] - Trashed records; admins may narrow
/// by owner, everyone else sees only their own
pub async fn list_trash(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Query(query): Query<TrashQuery>,
) -> ApiResult<Vec<EmploymentRecord>> {
    let records = state
        .trash
        .list_trash(&principal, query.number.as_deref())
        .await?;

    Ok(ApiResponse::success(records))
}

/// DELETE /api/employment/trash/:id?number= - Permanently remove one trashed
/// record
pub async fn purge(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
    Query(query): Query<TrashQuery>,
) -> ApiResult<Value> {
    let number = query
        .number
        .filter(|n| !n.is_empty())
        .ok_or_else(|| ApiError::bad_request("Alumni number is required"))?;

    state.trash.purge(&principal, id, &number).await?;
    Ok(ApiResponse::success(json!({ "purged": id })))
}
