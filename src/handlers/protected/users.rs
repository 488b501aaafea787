use axum::extract::{Extension, Query, State};
use serde::Deserialize;

use crate::auth::policy::Principal;
use crate::database::repository::UserPage;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::middleware::roles::ensure_admin;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UserListQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default = "default_sort")]
    pub sort_by: String,
    #[serde(default = "default_order")]
    pub order: String,
    #[serde(default)]
    pub search: String,
}

fn default_page() -> i64 {
    1
}
fn default_limit() -> i64 {
    10
}
fn default_sort() -> String {
    "created_at".to_string()
}
fn default_order() -> String {
    "asc".to_string()
}

/// GET /api/users - Paginated account listing (admin only)
pub async fn list(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Query(query): Query<UserListQuery>,
) -> ApiResult<UserPage> {
    ensure_admin(&principal)?;

    let page = state
        .users
        .list_page(
            &query.search,
            &query.sort_by,
            &query.order,
            query.page,
            query.limit,
        )
        .await?;

    Ok(ApiResponse::success(page))
}
