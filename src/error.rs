// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),

    // 401 Unauthorized
    Unauthorized(String),

    // 403 Forbidden
    Forbidden(String),

    // 404 Not Found
    NotFound(String),

    // 409 Conflict
    Conflict(String),

    // 500 Internal Server Error
    InternalServerError(String),

    // 503 Service Unavailable
    ServiceUnavailable(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::Unauthorized(_) => 401,
            ApiError::Forbidden(_) => 403,
            ApiError::NotFound(_) => 404,
            ApiError::Conflict(_) => 409,
            ApiError::InternalServerError(_) => 500,
            ApiError::ServiceUnavailable(_) => 503,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg)
            | ApiError::Conflict(msg)
            | ApiError::InternalServerError(msg)
            | ApiError::ServiceUnavailable(msg) => msg,
        }
    }

    /// Get error code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::Forbidden(_) => "FORBIDDEN",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
            ApiError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        json!({
            "error": true,
            "message": self.message(),
            "code": self.error_code()
        })
    }
}

// Static constructor methods
impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        ApiError::ServiceUnavailable(message.into())
    }
}

// Convert domain error types to ApiError
impl From<crate::database::DatabaseError> for ApiError {
    fn from(err: crate::database::DatabaseError) -> Self {
        match err {
            crate::database::DatabaseError::NotFound(msg) => ApiError::not_found(msg),
            crate::database::DatabaseError::ConfigMissing(_) => {
                tracing::error!("Database configuration error: {}", err);
                ApiError::service_unavailable("Database temporarily unavailable")
            }
            crate::database::DatabaseError::Sqlx(sqlx_err) => {
                // Log the real error but return generic message
                tracing::error!("SQLx error: {}", sqlx_err);
                ApiError::internal_server_error("An error occurred while processing your request")
            }
            crate::database::DatabaseError::Migration(e) => {
                tracing::error!("Migration error: {}", e);
                ApiError::service_unavailable("Service is being updated, please try again later")
            }
        }
    }
}

impl From<crate::auth::policy::AccessError> for ApiError {
    fn from(err: crate::auth::policy::AccessError) -> Self {
        match err {
            crate::auth::policy::AccessError::Unauthenticated => {
                ApiError::unauthorized("Authentication context is incomplete or invalid")
            }
            crate::auth::policy::AccessError::Forbidden(msg) => ApiError::forbidden(msg),
        }
    }
}

impl From<crate::services::trash::TrashError> for ApiError {
    fn from(err: crate::services::trash::TrashError) -> Self {
        match err {
            crate::services::trash::TrashError::Access(e) => e.into(),
            crate::services::trash::TrashError::NotFound(msg) => ApiError::not_found(msg),
            crate::services::trash::TrashError::Store(e) => e.into(),
        }
    }
}

impl From<crate::services::auth::AuthServiceError> for ApiError {
    fn from(err: crate::services::auth::AuthServiceError) -> Self {
        match err {
            crate::services::auth::AuthServiceError::InvalidCredentials => {
                ApiError::unauthorized("Invalid email or password")
            }
            crate::services::auth::AuthServiceError::Validation(msg) => ApiError::bad_request(msg),
            crate::services::auth::AuthServiceError::EmailTaken(email) => {
                ApiError::conflict(format!("Email '{}' is already registered", email))
            }
            crate::services::auth::AuthServiceError::Token(e) => {
                tracing::error!("JWT generation failed: {}", e);
                ApiError::internal_server_error("Failed to issue authentication token")
            }
            crate::services::auth::AuthServiceError::Hash(e) => {
                tracing::error!("Password hashing failed: {}", e);
                ApiError::internal_server_error("An error occurred while processing your request")
            }
            crate::services::auth::AuthServiceError::Store(e) => e.into(),
        }
    }
}

impl From<crate::services::uploads::UploadError> for ApiError {
    fn from(err: crate::services::uploads::UploadError) -> Self {
        match err {
            crate::services::uploads::UploadError::MissingFile => {
                ApiError::bad_request("No file uploaded")
            }
            crate::services::uploads::UploadError::TooLarge(limit) => {
                ApiError::bad_request(format!("File size exceeds {} bytes", limit))
            }
            crate::services::uploads::UploadError::TypeNotAllowed(ct) => {
                ApiError::bad_request(format!("File type '{}' not allowed", ct))
            }
            crate::services::uploads::UploadError::NotFound(msg) => ApiError::not_found(msg),
            crate::services::uploads::UploadError::Io(e) => {
                tracing::error!("Upload storage error: {}", e);
                ApiError::internal_server_error("Failed to store file")
            }
            crate::services::uploads::UploadError::Store(e) => e.into(),
        }
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_json())).into_response()
    }
}
