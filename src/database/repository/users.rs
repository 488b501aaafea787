use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::user::User;
use crate::database::DatabaseError;

/// Sort columns accepted by the users listing; anything else falls back to
/// created_at. Keeps identifiers out of caller control.
const SORTABLE: &[&str] = &["username", "email", "created_at"];

#[derive(Debug, Serialize)]
pub struct PageMeta {
    pub current_page: i64,
    pub limit: i64,
    pub total: i64,
    pub pages: i64,
    pub sort_by: String,
    pub order: String,
    pub search: String,
}

#[derive(Debug, Serialize)]
pub struct UserPage {
    pub data: Vec<User>,
    pub meta: PageMeta,
}

#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    pub async fn create(
        &self,
        email: &str,
        username: &str,
        password_hash: &str,
        role: &str,
    ) -> Result<User, DatabaseError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, username, password_hash, role)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(email)
        .bind(username)
        .bind(password_hash)
        .bind(role)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn count(&self, search: &str) -> Result<i64, DatabaseError> {
        let (count,): (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM users
            WHERE ($1 = '' OR username ILIKE '%' || $1 || '%' OR email ILIKE '%' || $1 || '%')
            "#,
        )
        .bind(search)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    /// Paginated listing with case-insensitive search over username/email.
    pub async fn list_page(
        &self,
        search: &str,
        sort_by: &str,
        order: &str,
        page: i64,
        limit: i64,
    ) -> Result<UserPage, DatabaseError> {
        let page = page.max(1);
        let limit = limit.clamp(1, 100);
        let offset = (page - 1) * limit;

        let sort_by = if SORTABLE.contains(&sort_by) {
            sort_by
        } else {
            "created_at"
        };
        let order = if order.eq_ignore_ascii_case("desc") {
            "DESC"
        } else {
            "ASC"
        };

        // sort_by/order are whitelisted above, never raw caller input
        let query = format!(
            r#"
            SELECT * FROM users
            WHERE ($1 = '' OR username ILIKE '%' || $1 || '%' OR email ILIKE '%' || $1 || '%')
            ORDER BY {} {}
            LIMIT $2 OFFSET $3
            "#,
            sort_by, order
        );

        let users = sqlx::query_as::<_, User>(&query)
            .bind(search)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        let total = self.count(search).await?;

        Ok(UserPage {
            data: users,
            meta: PageMeta {
                current_page: page,
                limit,
                total,
                pages: (total + limit - 1) / limit,
                sort_by: sort_by.to_string(),
                order: order.to_lowercase(),
                search: search.to_string(),
            },
        })
    }
}
