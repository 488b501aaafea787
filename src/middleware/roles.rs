use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
};

use crate::auth::policy::{Principal, ROLE_ADMIN, ROLE_USER};
use crate::error::ApiError;

/// Route-level gate: any recognized role (admin or user) may pass.
pub async fn require_member(request: Request, next: Next) -> Result<Response, Response> {
    let principal = request.extensions().get::<Principal>().ok_or_else(|| {
        error_response(ApiError::unauthorized("JWT authentication required"))
    })?;

    if principal.role != ROLE_ADMIN && principal.role != ROLE_USER {
        tracing::warn!(
            "Role gate rejected user '{}' with role '{}'",
            principal.username,
            principal.role
        );
        return Err(error_response(ApiError::forbidden(
            "Access denied: insufficient role",
        )));
    }

    Ok(next.run(request).await)
}

/// Handler-level gate for admin-only operations.
pub fn ensure_admin(principal: &Principal) -> Result<(), ApiError> {
    if principal.role != ROLE_ADMIN {
        return Err(ApiError::forbidden(
            "Access denied: administrator role required",
        ));
    }
    Ok(())
}

fn error_response(api_error: ApiError) -> Response {
    (
        StatusCode::from_u16(api_error.status_code()).unwrap(),
        Json(api_error.to_json()),
    )
        .into_response()
}
