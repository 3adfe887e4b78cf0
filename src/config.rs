// src/config.rs

use std::{env, sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

use crate::{
    common::db_utils::is_safe_identifier,
    db::{
        LedgerRepository, LedgerStore, ProfileRepository, ProfileStore, TemplateRepository,
        TemplateStore,
    },
    screens::{
        password::PasswordController, reports::ReportController, templates::TemplateController,
        users::UserDirectoryController,
    },
    services::auth::{AuthGateway, AuthService, SupabaseAuthClient},
};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub jwt_secret: String,
    pub bind_addr: String,
    pub db_max_connections: u32,
    pub db_acquire_timeout_secs: u64,
    /// Papel assumido (`SET LOCAL ROLE`) em cada transação.
    pub rls_role: String,
    pub user_creation_delay: Duration,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let required = |key: &str| var(key).with_context(|| format!("{key} deve ser definida"));

        let config = Self {
            database_url: required("DATABASE_URL")?,
            supabase_url: required("SUPABASE_URL")?,
            supabase_anon_key: required("SUPABASE_ANON_KEY")?,
            jwt_secret: required("SUPABASE_JWT_SECRET")?,
            bind_addr: var("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:3000".to_string()),
            db_max_connections: parse_or(var("DB_MAX_CONNECTIONS"), "DB_MAX_CONNECTIONS", 5)?,
            db_acquire_timeout_secs: parse_or(var("DB_ACQUIRE_TIMEOUT_SECS"), "DB_ACQUIRE_TIMEOUT_SECS", 3)?,
            rls_role: var("DB_RLS_ROLE").unwrap_or_else(|| "authenticated".to_string()),
            user_creation_delay: Duration::from_millis(parse_or(
                var("USER_CREATION_DELAY_MS"),
                "USER_CREATION_DELAY_MS",
                1500,
            )?),
        };

        anyhow::ensure!(
            is_safe_identifier(&config.rls_role),
            "DB_RLS_ROLE inválido: {}",
            config.rls_role
        );
        Ok(config)
    }
}

fn parse_or<T>(value: Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match value {
        Some(raw) => raw.parse().with_context(|| format!("{key} inválida: {raw}")),
        None => Ok(default),
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub auth_service: AuthService,
    pub templates: TemplateController,
    pub reports: ReportController,
    pub users: UserDirectoryController,
    pub passwords: PasswordController,
}

impl AppState {
    pub async fn new(config: AppConfig) -> anyhow::Result<Self> {
        let db_pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(Duration::from_secs(config.db_acquire_timeout_secs))
            .connect(&config.database_url)
            .await
            .context("Falha ao conectar ao banco de dados")?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let templates = TemplateRepository::new(db_pool.clone(), config.rls_role.clone());
        let ledger = LedgerRepository::new(db_pool.clone(), config.rls_role.clone());
        let profiles = ProfileRepository::new(db_pool, config.rls_role.clone());
        let auth_client = SupabaseAuthClient::new(
            reqwest::Client::new(),
            &config.supabase_url,
            config.supabase_anon_key.clone(),
        );

        Ok(Self::from_parts(
            config,
            Arc::new(templates),
            Arc::new(ledger),
            Arc::new(profiles),
            Arc::new(auth_client),
        ))
    }

    pub fn from_parts(
        config: AppConfig,
        templates: Arc<dyn TemplateStore>,
        ledger: Arc<dyn LedgerStore>,
        profiles: Arc<dyn ProfileStore>,
        auth_gateway: Arc<dyn AuthGateway>,
    ) -> Self {
        Self {
            auth_service: AuthService::new(config.jwt_secret.clone()),
            templates: TemplateController::new(templates),
            reports: ReportController::new(ledger),
            users: UserDirectoryController::new(profiles, config.user_creation_delay),
            passwords: PasswordController::new(auth_gateway),
            config: Arc::new(config),
        }
    }
}
