// src/db/ledger_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    common::{db_utils::begin_as_user, error::AppError},
    db::LedgerStore,
    models::{
        auth::CurrentUser,
        finance::{LedgerEntry, LedgerRow},
    },
};

#[derive(Clone)]
pub struct LedgerRepository {
    pool: PgPool,
    rls_role: String,
}

impl LedgerRepository {
    pub fn new(pool: PgPool, rls_role: impl Into<String>) -> Self {
        Self { pool, rls_role: rls_role.into() }
    }
}

#[async_trait]
impl LedgerStore for LedgerRepository {
    async fn list_entries(&self, user: &CurrentUser) -> Result<Vec<LedgerEntry>, AppError> {
        let mut tx = begin_as_user(&self.pool, &self.rls_role, user).await?;

        // Valores e datas chegam como texto; a conversão acontece em LedgerEntry::from
        let rows = sqlx::query_as::<_, LedgerRow>(
            r#"
            SELECT
                id::text AS id,
                valor::text AS valor,
                status::text AS status,
                data_pagamento::text AS data_pagamento,
                data_vencimento::text AS data_vencimento
            FROM financeiro_lancamentos
            ORDER BY created_at DESC
            "#,
        )
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(rows.into_iter().map(LedgerEntry::from).collect())
    }
}
