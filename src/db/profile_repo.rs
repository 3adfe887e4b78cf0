// src/db/profile_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    common::{db_utils::begin_as_user, error::AppError},
    db::ProfileStore,
    models::{auth::CurrentUser, user::UserProfile},
};

#[derive(Clone)]
pub struct ProfileRepository {
    pool: PgPool,
    rls_role: String,
}

impl ProfileRepository {
    pub fn new(pool: PgPool, rls_role: impl Into<String>) -> Self {
        Self { pool, rls_role: rls_role.into() }
    }
}

#[async_trait]
impl ProfileStore for ProfileRepository {
    async fn list_profiles(&self, user: &CurrentUser) -> Result<Vec<UserProfile>, AppError> {
        let mut tx = begin_as_user(&self.pool, &self.rls_role, user).await?;

        let profiles = sqlx::query_as::<_, UserProfile>(
            "SELECT id, email, full_name, created_at FROM profiles ORDER BY created_at ASC",
        )
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(profiles)
    }
}
