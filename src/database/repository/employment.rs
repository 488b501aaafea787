use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::employment::{EmploymentRecord, EmploymentUpdate, NewEmployment};
use crate::database::DatabaseError;

/// Persistence operations the soft-delete workflow depends on. Each mutation
/// is a single filtered statement and reports how many rows it touched; the
/// workflow turns zero counts into NotFound.
#[async_trait]
pub trait EmploymentStore: Send + Sync {
    async fn find_active_by_owner(
        &self,
        owner_key: &str,
    ) -> Result<Vec<EmploymentRecord>, DatabaseError>;

    /// Trashed records, optionally restricted to one owner key.
    async fn find_trashed(
        &self,
        owner_key: Option<&str>,
    ) -> Result<Vec<EmploymentRecord>, DatabaseError>;

    /// Stamp the tombstone on every active record of `owner_key`.
    async fn mark_deleted_by_owner(
        &self,
        owner_key: &str,
        at: DateTime<Utc>,
    ) -> Result<u64, DatabaseError>;

    /// Clear the tombstone on every trashed record of `owner_key`.
    async fn restore_by_owner(
        &self,
        owner_key: &str,
        at: DateTime<Utc>,
    ) -> Result<u64, DatabaseError>;

    /// Permanently remove one trashed record. Active records are never
    /// matched: purge must not bypass the trash stage.
    async fn purge_trashed(&self, id: Uuid) -> Result<u64, DatabaseError>;
}

#[derive(Clone)]
pub struct EmploymentRepository {
    pool: PgPool,
}

impl EmploymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, input: NewEmployment) -> Result<EmploymentRecord, DatabaseError> {
        let record = sqlx::query_as::<_, EmploymentRecord>(
            r#"
            INSERT INTO employment
                (alumni_number, employment_status, industry, job_title, employer, salary, years_worked)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&input.alumni_number)
        .bind(&input.employment_status)
        .bind(&input.industry)
        .bind(&input.job_title)
        .bind(&input.employer)
        .bind(input.salary)
        .bind(input.years_worked)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    /// All active records, newest first.
    pub async fn list_active(&self) -> Result<Vec<EmploymentRecord>, DatabaseError> {
        let records = sqlx::query_as::<_, EmploymentRecord>(
            "SELECT * FROM employment WHERE deleted_at IS NULL ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<EmploymentRecord>, DatabaseError> {
        let record = sqlx::query_as::<_, EmploymentRecord>(
            "SELECT * FROM employment WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Apply an update to the active record(s) of one owner key.
    pub async fn update_by_owner(
        &self,
        owner_key: &str,
        update: EmploymentUpdate,
    ) -> Result<u64, DatabaseError> {
        let result = sqlx::query(
            r#"
            UPDATE employment
            SET employment_status = $2,
                industry = $3,
                job_title = $4,
                employer = $5,
                salary = $6,
                years_worked = $7,
                updated_at = now()
            WHERE alumni_number = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(owner_key)
        .bind(&update.employment_status)
        .bind(&update.industry)
        .bind(&update.job_title)
        .bind(&update.employer)
        .bind(update.salary)
        .bind(update.years_worked)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}

#[async_trait]
impl EmploymentStore for EmploymentRepository {
    async fn find_active_by_owner(
        &self,
        owner_key: &str,
    ) -> Result<Vec<EmploymentRecord>, DatabaseError> {
        let records = sqlx::query_as::<_, EmploymentRecord>(
            "SELECT * FROM employment WHERE alumni_number = $1 AND deleted_at IS NULL",
        )
        .bind(owner_key)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    async fn find_trashed(
        &self,
        owner_key: Option<&str>,
    ) -> Result<Vec<EmploymentRecord>, DatabaseError> {
        let records = match owner_key {
            Some(number) => {
                sqlx::query_as::<_, EmploymentRecord>(
                    "SELECT * FROM employment WHERE alumni_number = $1 AND deleted_at IS NOT NULL",
                )
                .bind(number)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, EmploymentRecord>(
                    "SELECT * FROM employment WHERE deleted_at IS NOT NULL",
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(records)
    }

    async fn mark_deleted_by_owner(
        &self,
        owner_key: &str,
        at: DateTime<Utc>,
    ) -> Result<u64, DatabaseError> {
        let result = sqlx::query(
            r#"
            UPDATE employment
            SET deleted_at = $2, updated_at = $2
            WHERE alumni_number = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(owner_key)
        .bind(at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn restore_by_owner(
        &self,
        owner_key: &str,
        at: DateTime<Utc>,
    ) -> Result<u64, DatabaseError> {
        let result = sqlx::query(
            r#"
            UPDATE employment
            SET deleted_at = NULL, updated_at = $2
            WHERE alumni_number = $1 AND deleted_at IS NOT NULL
            "#,
        )
        .bind(owner_key)
        .bind(at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn purge_trashed(&self, id: Uuid) -> Result<u64, DatabaseError> {
        let result =
            sqlx::query("DELETE FROM employment WHERE id = $1 AND deleted_at IS NOT NULL")
                .bind(id)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected())
    }
}
