use axum::extract::State;
use axum::Json;

use crate::database::models::user::{LoginRequest, RegisterRequest, User};
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::services::auth::LoginOutcome;
use crate::state::AppState;

/// POST /auth/register - Create a user account
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> ApiResult<User> {
    let user = state.auth.register(payload).await?;
    Ok(ApiResponse::created(user))
}

/// POST /auth/login - Authenticate and receive a JWT
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<LoginOutcome> {
    let outcome = state.auth.login(payload).await?;
    Ok(ApiResponse::success(outcome))
}
