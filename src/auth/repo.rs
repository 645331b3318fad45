use async_trait::async_trait;
use sqlx::PgPool;

use crate::auth::repo_types::User;
use crate::error::{conflict_on_unique, AppError};

const EMAIL_TAKEN: &str = "Email already registered";

/// Credential store: the only owner of user rows.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create(&self, name: &str, email: &str, password_hash: &str) -> Result<User, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;
    /// Returns `false` when no user with this id and email exists.
    async fn update_password(
        &self,
        id: i64,
        email: &str,
        password_hash: &str,
    ) -> Result<bool, AppError>;
    /// Returns `false` when the user does not exist.
    async fn update_profile(&self, id: i64, name: &str, email: &str) -> Result<bool, AppError>;
}

#[derive(Clone)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create(&self, name: &str, email: &str, password_hash: &str) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, password_hash, created_at
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.db)
        .await
        .map_err(|e| conflict_on_unique(e, EMAIL_TAKEN))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn update_password(
        &self,
        id: i64,
        email: &str,
        password_hash: &str,
    ) -> Result<bool, AppError> {
        let res = sqlx::query(r#"UPDATE users SET password_hash = $1 WHERE id = $2 AND email = $3"#)
            .bind(password_hash)
            .bind(id)
            .bind(email)
            .execute(&self.db)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn update_profile(&self, id: i64, name: &str, email: &str) -> Result<bool, AppError> {
        let res = sqlx::query(r#"UPDATE users SET name = $1, email = $2 WHERE id = $3"#)
            .bind(name)
            .bind(email)
            .bind(id)
            .execute(&self.db)
            .await
            .map_err(|e| conflict_on_unique(e, EMAIL_TAKEN))?;
        Ok(res.rows_affected() > 0)
    }
}
