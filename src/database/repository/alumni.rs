use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::alumni::{Alumni, AlumniInput};
use crate::database::DatabaseError;

/// Identity -> owner-key resolver. The trash listing uses this for non-admin
/// callers instead of trusting the identity string in the token.
#[async_trait]
pub trait OwnerDirectory: Send + Sync {
    async fn owner_key_for_user(&self, user_id: Uuid) -> Result<Option<String>, DatabaseError>;
}

#[derive(Clone)]
pub struct AlumniRepository {
    pool: PgPool,
}

impl AlumniRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_number(&self, number: &str) -> Result<Option<Alumni>, DatabaseError> {
        let alumni = sqlx::query_as::<_, Alumni>("SELECT * FROM alumni WHERE number = $1")
            .bind(number)
            .fetch_optional(&self.pool)
            .await?;

        Ok(alumni)
    }

    pub async fn list_all(&self) -> Result<Vec<Alumni>, DatabaseError> {
        let alumni = sqlx::query_as::<_, Alumni>("SELECT * FROM alumni ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;

        Ok(alumni)
    }

    pub async fn create(&self, input: AlumniInput) -> Result<Alumni, DatabaseError> {
        let alumni = sqlx::query_as::<_, Alumni>(
            r#"
            INSERT INTO alumni
                (user_id, number, full_name, cohort_year, graduation_year, faculty_id, program_id, source)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(input.user_id)
        .bind(&input.number)
        .bind(&input.full_name)
        .bind(input.cohort_year)
        .bind(input.graduation_year)
        .bind(input.faculty_id)
        .bind(input.program_id)
        .bind(&input.source)
        .fetch_one(&self.pool)
        .await?;

        Ok(alumni)
    }

    /// Update the record addressed by its current number. Returns rows
    /// touched so callers can report NotFound.
    pub async fn update_by_number(
        &self,
        number: &str,
        input: AlumniInput,
    ) -> Result<u64, DatabaseError> {
        let result = sqlx::query(
            r#"
            UPDATE alumni
            SET user_id = $2,
                number = $3,
                full_name = $4,
                cohort_year = $5,
                graduation_year = $6,
                faculty_id = $7,
                program_id = $8,
                source = $9,
                updated_at = now()
            WHERE number = $1
            "#,
        )
        .bind(number)
        .bind(input.user_id)
        .bind(&input.number)
        .bind(&input.full_name)
        .bind(input.cohort_year)
        .bind(input.graduation_year)
        .bind(input.faculty_id)
        .bind(input.program_id)
        .bind(&input.source)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    pub async fn delete_by_number(&self, number: &str) -> Result<u64, DatabaseError> {
        let result = sqlx::query("DELETE FROM alumni WHERE number = $1")
            .bind(number)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

#[async_trait]
impl OwnerDirectory for AlumniRepository {
    async fn owner_key_for_user(&self, user_id: Uuid) -> Result<Option<String>, DatabaseError> {
        let number: Option<(String,)> =
            sqlx::query_as("SELECT number FROM alumni WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(number.map(|(n,)| n))
    }
}
