// src/db/template_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{db_utils::begin_as_user, error::AppError},
    db::TemplateStore,
    models::{
        auth::CurrentUser,
        template::{NewTemplate, Template},
    },
};

const TEMPLATE_COLUMNS: &str =
    "id, title, content, COALESCE(is_default, false) AS is_default, user_id, created_at";

// Responsável por todas as interações com a tabela 'message_templates'
#[derive(Clone)]
pub struct TemplateRepository {
    pool: PgPool,
    rls_role: String,
}

impl TemplateRepository {
    pub fn new(pool: PgPool, rls_role: impl Into<String>) -> Self {
        Self { pool, rls_role: rls_role.into() }
    }
}

#[async_trait]
impl TemplateStore for TemplateRepository {
    async fn list_templates(&self, user: &CurrentUser) -> Result<Vec<Template>, AppError> {
        let mut tx = begin_as_user(&self.pool, &self.rls_role, user).await?;

        let sql = format!("SELECT {TEMPLATE_COLUMNS} FROM message_templates ORDER BY created_at ASC");
        let templates = sqlx::query_as::<_, Template>(&sql)
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(templates)
    }

    async fn insert_template(&self, user: &CurrentUser, new: &NewTemplate) -> Result<Template, AppError> {
        let mut tx = begin_as_user(&self.pool, &self.rls_role, user).await?;

        let sql = format!(
            r#"
            INSERT INTO message_templates (title, content, user_id, is_default)
            VALUES ($1, $2, $3, false)
            RETURNING {TEMPLATE_COLUMNS}
            "#
        );
        let template = sqlx::query_as::<_, Template>(&sql)
            .bind(&new.title)
            .bind(&new.content)
            .bind(new.user_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(template)
    }

    async fn update_template(
        &self,
        user: &CurrentUser,
        id: Uuid,
        title: &str,
        content: &str,
    ) -> Result<(), AppError> {
        let mut tx = begin_as_user(&self.pool, &self.rls_role, user).await?;

        let result = sqlx::query("UPDATE message_templates SET title = $1, content = $2 WHERE id = $3")
            .bind(title)
            .bind(content)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        // Com RLS, linha invisível e linha inexistente dão o mesmo resultado: nada afetado
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    async fn delete_template(&self, user: &CurrentUser, id: Uuid) -> Result<(), AppError> {
        let mut tx = begin_as_user(&self.pool, &self.rls_role, user).await?;

        let result = sqlx::query("DELETE FROM message_templates WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}
