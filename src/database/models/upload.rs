use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Metadata for a file stored on disk under the upload directory.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StoredFile {
    pub id: Uuid,
    pub file_name: String,
    pub original_name: String,
    pub path: String,
    pub size: i64,
    pub content_type: String,
    pub uploaded_at: DateTime<Utc>,
}
