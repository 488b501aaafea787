use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Alumni master record. `number` is the institutional identifier that
/// employment records reference as their owner key.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Alumni {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub number: String,
    pub full_name: String,
    pub cohort_year: Option<i32>,
    pub graduation_year: Option<i32>,
    pub faculty_id: Option<i32>,
    pub program_id: Option<i32>,
    pub source: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create/update payload for alumni records
#[derive(Debug, Clone, Deserialize)]
pub struct AlumniInput {
    pub user_id: Option<Uuid>,
    pub number: String,
    pub full_name: String,
    pub cohort_year: Option<i32>,
    pub graduation_year: Option<i32>,
    pub faculty_id: Option<i32>,
    pub program_id: Option<i32>,
    pub source: Option<String>,
}
