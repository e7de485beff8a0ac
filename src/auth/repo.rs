use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::auth::repo_types::{NewUser, User};
use crate::db::{PgStore, StoreError};

/// Credential store.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// `email` must already be normalized to lowercase.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;
    /// Fails with `StoreError::Duplicate` when the email is taken.
    async fn create(&self, user: NewUser) -> Result<User, StoreError>;
}

#[async_trait]
impl UserStore for PgStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, full_name, email, password_hash, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, full_name, email, password_hash, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        let now = OffsetDateTime::now_utc();
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, full_name, email, password_hash, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $5)
            RETURNING id, full_name, email, password_hash, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&user.full_name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }
}
