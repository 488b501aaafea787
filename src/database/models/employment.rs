use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Employment history record for one alumni.
///
/// `deleted_at` is the soft-delete tombstone: `None` means the record is
/// active, `Some(t)` means it sits in the trash and entered it at `t`.
/// There is no third state.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EmploymentRecord {
    pub id: Uuid,
    pub alumni_number: String,
    pub employment_status: String,
    pub industry: String,
    pub job_title: String,
    pub employer: String,
    pub salary: i64,
    pub years_worked: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl EmploymentRecord {
    pub fn is_trashed(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Create payload; timestamps are assigned by the server.
#[derive(Debug, Clone, Deserialize)]
pub struct NewEmployment {
    pub alumni_number: String,
    pub employment_status: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub employer: String,
    #[serde(default)]
    pub salary: i64,
    #[serde(default)]
    pub years_worked: i32,
}

/// Update payload applied to the active record(s) of one owner key.
#[derive(Debug, Clone, Deserialize)]
pub struct EmploymentUpdate {
    pub employment_status: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub employer: String,
    #[serde(default)]
    pub salary: i64,
    #[serde(default)]
    pub years_worked: i32,
}
