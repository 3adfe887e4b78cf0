use serde_json::json;
use sqlx::{PgPool, Postgres, Transaction};

use crate::common::error::AppError;
use crate::models::auth::CurrentUser;

// ---
// Helper RLS: A "Chave" para o Banco de Dados
// ---
/// Abre uma transação com a identidade do usuário aplicada, do jeito que as
/// políticas RLS do Supabase esperam (`auth.uid()` lê `request.jwt.claims`).
/// As configurações são locais à transação e somem no commit.
pub(crate) async fn begin_as_user(
    pool: &PgPool,
    rls_role: &str,
    user: &CurrentUser,
) -> Result<Transaction<'static, Postgres>, AppError> {
    if !is_safe_identifier(rls_role) {
        return Err(AppError::InternalServerError(anyhow::anyhow!(
            "papel RLS inválido: {rls_role}"
        )));
    }

    // O operador '?' converte automaticamente sqlx::Error -> AppError::DatabaseError
    let mut tx = pool.begin().await?;

    let claims = json!({
        "sub": user.id,
        "role": user.role,
        "email": user.email,
    });

    sqlx::query("SELECT set_config('request.jwt.claims', $1, true)")
        .bind(claims.to_string())
        .execute(&mut *tx)
        .await?;

    // SET ROLE não aceita parâmetro; o nome já foi validado acima.
    let set_role = format!("SET LOCAL ROLE \"{rls_role}\"");
    sqlx::query(&set_role).execute(&mut *tx).await?;

    Ok(tx)
}

pub(crate) fn is_safe_identifier(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= 63
        && name.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        && !name.starts_with(|c: char| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::is_safe_identifier;

    #[test]
    fn accepts_postgres_role_names() {
        assert!(is_safe_identifier("authenticated"));
        assert!(is_safe_identifier("service_role"));
    }

    #[test]
    fn rejects_anything_that_needs_quoting() {
        assert!(!is_safe_identifier(""));
        assert!(!is_safe_identifier("anon\"; DROP TABLE profiles; --"));
        assert!(!is_safe_identifier("Authenticated"));
        assert!(!is_safe_identifier("1role"));
    }
}
