use std::path::{Path, PathBuf};

use thiserror::Error;
use uuid::Uuid;

use crate::database::models::upload::StoredFile;
use crate::database::repository::UploadRepository;
use crate::database::DatabaseError;

/// Content types accepted for upload.
const ALLOWED_TYPES: &[&str] = &[
    "image/jpeg",
    "image/jpg",
    "image/png",
    "application/pdf",
    "text/html",
    "text/plain",
];

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("no file uploaded")]
    MissingFile,
    #[error("file exceeds {0} bytes")]
    TooLarge(usize),
    #[error("content type not allowed: {0}")]
    TypeNotAllowed(String),
    #[error("{0}")]
    NotFound(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Store(#[from] DatabaseError),
}

/// Writes upload blobs to disk and keeps their metadata in the database.
pub struct UploadService {
    repo: UploadRepository,
    directory: PathBuf,
    max_file_size: usize,
}

impl UploadService {
    pub fn new(repo: UploadRepository, directory: impl Into<PathBuf>, max_file_size: usize) -> Self {
        Self {
            repo,
            directory: directory.into(),
            max_file_size,
        }
    }

    pub async fn store_file(
        &self,
        original_name: &str,
        content_type: &str,
        data: &[u8],
    ) -> Result<StoredFile, UploadError> {
        if data.len() > self.max_file_size {
            return Err(UploadError::TooLarge(self.max_file_size));
        }

        if !ALLOWED_TYPES.contains(&content_type) {
            return Err(UploadError::TypeNotAllowed(content_type.to_string()));
        }

        let extension = Path::new(original_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e))
            .unwrap_or_default();
        let file_name = format!("{}{}", Uuid::new_v4(), extension);
        let path = self.directory.join(&file_name);

        tokio::fs::create_dir_all(&self.directory).await?;
        tokio::fs::write(&path, data).await?;

        let stored = match self
            .repo
            .create(
                &file_name,
                original_name,
                &path.to_string_lossy(),
                data.len() as i64,
                content_type,
            )
            .await
        {
            Ok(stored) => stored,
            Err(e) => {
                // Metadata insert failed: don't leave an orphaned blob behind
                if let Err(rm) = tokio::fs::remove_file(&path).await {
                    tracing::warn!("Failed to clean up orphaned upload '{}': {}", file_name, rm);
                }
                return Err(e.into());
            }
        };

        tracing::info!(
            "Stored upload '{}' ({} bytes) as '{}'",
            original_name,
            data.len(),
            file_name
        );
        Ok(stored)
    }

    pub async fn list_files(&self) -> Result<Vec<StoredFile>, UploadError> {
        Ok(self.repo.find_all().await?)
    }

    pub async fn get_file(&self, id: Uuid) -> Result<StoredFile, UploadError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| UploadError::NotFound(format!("No file found with id '{}'", id)))
    }

    pub async fn delete_file(&self, id: Uuid) -> Result<(), UploadError> {
        let file = self.get_file(id).await?;

        // Remove the blob first; a missing blob is not fatal for the row
        if let Err(e) = tokio::fs::remove_file(&file.path).await {
            tracing::warn!("Failed to delete blob for upload '{}': {}", file.id, e);
        }

        self.repo.delete(id).await?;
        Ok(())
    }
}
