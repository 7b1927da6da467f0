use anyhow::Result;
use sqlx::PgPool;

use crate::models::CreateUser;
use crate::services::UserService;

/// Bootstraps the first admin account so the settings page and the report
/// column are reachable on a fresh database.
pub struct DatabaseSeeder {
    pool: PgPool,
}

impl DatabaseSeeder {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn seed_admin(&self) -> Result<()> {
        let user_service = UserService::new(self.pool.clone());

        let email = std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@example.com".to_string());
        let password =
            std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "change-me-immediately".to_string());

        if user_service.get_user_by_email(&email).await?.is_none() {
            user_service
                .create_user(CreateUser {
                    email: email.clone(),
                    password,
                    role: Some("admin".to_string()),
                })
                .await?;
            tracing::info!(%email, "created bootstrap admin user");
        }

        Ok(())
    }
}
