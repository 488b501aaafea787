use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::upload::StoredFile;
use crate::database::DatabaseError;

#[derive(Clone)]
pub struct UploadRepository {
    pool: PgPool,
}

impl UploadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        file_name: &str,
        original_name: &str,
        path: &str,
        size: i64,
        content_type: &str,
    ) -> Result<StoredFile, DatabaseError> {
        let file = sqlx::query_as::<_, StoredFile>(
            r#"
            INSERT INTO uploads (file_name, original_name, path, size, content_type)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(file_name)
        .bind(original_name)
        .bind(path)
        .bind(size)
        .bind(content_type)
        .fetch_one(&self.pool)
        .await?;

        Ok(file)
    }

    pub async fn find_all(&self) -> Result<Vec<StoredFile>, DatabaseError> {
        let files =
            sqlx::query_as::<_, StoredFile>("SELECT * FROM uploads ORDER BY uploaded_at DESC")
                .fetch_all(&self.pool)
                .await?;

        Ok(files)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<StoredFile>, DatabaseError> {
        let file = sqlx::query_as::<_, StoredFile>("SELECT * FROM uploads WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(file)
    }

    pub async fn delete(&self, id: Uuid) -> Result<u64, DatabaseError> {
        let result = sqlx::query("DELETE FROM uploads WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
