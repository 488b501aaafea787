use axum::extract::{Multipart, Path, State};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::database::models::upload::StoredFile;
use crate::error::ApiError;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::services::uploads::UploadError;
use crate::state::AppState;

/// POST /api/files - Upload a file (multipart field "file")
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<StoredFile> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let original_name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(format!("Failed to read upload: {}", e)))?;

        let stored = state
            .uploads
            .store_file(&original_name, &content_type, &data)
            .await?;

        return Ok(ApiResponse::created(stored));
    }

    Err(UploadError::MissingFile.into())
}

/// GET /api/files - All stored file metadata
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<StoredFile>> {
    let files = state.uploads.list_files().await?;
    Ok(ApiResponse::success(files))
}

/// GET /api/files/:id - Metadata for one stored file
pub async fn get(State(state): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<StoredFile> {
    let file = state.uploads.get_file(id).await?;
    Ok(ApiResponse::success(file))
}

/// DELETE /api/files/:id - Remove a stored file and its metadata
pub async fn delete(State(state): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<Value> {
    state.uploads.delete_file(id).await?;
    Ok(ApiResponse::success(json!({ "deleted": id })))
}
