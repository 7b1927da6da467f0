use anyhow::Result;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::password::hash_password;
use crate::models::{CreateUser, User, UserResponse};

#[derive(Debug, Clone)]
pub struct UserService {
    db: PgPool,
}

impl UserService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn create_user(&self, user_data: CreateUser) -> Result<UserResponse> {
        let password_hash = hash_password(&user_data.password)?;
        let role = user_data.role.unwrap_or_else(|| "member".to_string());

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash, role, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            RETURNING id, email, password_hash, role, training_hours_total, created_at, updated_at
            "#,
        )
        .bind(&user_data.email)
        .bind(&password_hash)
        .bind(&role)
        .bind(Utc::now())
        .fetch_one(&self.db)
        .await?;

        Ok(user.into())
    }

    pub async fn get_user_by_id(&self, user_id: Uuid) -> Result<Option<UserResponse>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, role, training_hours_total, created_at, updated_at \
             FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(user.map(UserResponse::from))
    }

    /// Full user row including the password hash, for credential checks.
    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, role, training_hours_total, created_at, updated_at \
             FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?;

        Ok(user)
    }

    pub async fn list_users(
        &self,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<UserResponse>> {
        let limit = limit.unwrap_or(50);
        let offset = offset.unwrap_or(0);

        let users = sqlx::query_as::<_, UserResponse>(
            "SELECT id, email, role, training_hours_total, created_at, updated_at \
             FROM users ORDER BY email ASC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await?;

        Ok(users)
    }
}
