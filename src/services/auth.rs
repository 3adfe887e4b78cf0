// src/services/auth.rs

use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use serde_json::json;

use crate::{
    common::error::AppError,
    models::auth::{Claims, CurrentUser},
};

const DEFAULT_ROLE: &str = "authenticated";

// Valida os tokens de acesso emitidos pelo Supabase (HS256 com o segredo do projeto)
#[derive(Clone)]
pub struct AuthService {
    jwt_secret: String,
}

impl AuthService {
    pub fn new(jwt_secret: String) -> Self {
        Self { jwt_secret }
    }

    pub fn validate_token(&self, token: &str) -> Result<CurrentUser, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[DEFAULT_ROLE]);

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|e| {
            tracing::debug!("Token rejeitado: {}", e);
            AppError::InvalidToken
        })?;

        let claims = token_data.claims;
        Ok(CurrentUser {
            id: claims.sub,
            email: claims.email,
            role: claims.role.unwrap_or_else(|| DEFAULT_ROLE.to_string()),
            access_token: token.to_string(),
        })
    }
}

/// Operações do serviço de autenticação que agem em nome do usuário.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    async fn update_password(&self, user: &CurrentUser, new_password: &str) -> Result<(), AppError>;
}

// Cliente do GoTrue (`/auth/v1`) do Supabase
#[derive(Clone)]
pub struct SupabaseAuthClient {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
}

// O GoTrue já respondeu erros em mais de um formato ao longo das versões
#[derive(Debug, Deserialize)]
struct GoTrueError {
    msg: Option<String>,
    message: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
}

impl GoTrueError {
    fn into_message(self) -> Option<String> {
        self.msg
            .or(self.message)
            .or(self.error_description)
            .or(self.error)
    }
}

impl SupabaseAuthClient {
    pub fn new(http: reqwest::Client, supabase_url: &str, anon_key: String) -> Self {
        Self {
            http,
            base_url: supabase_url.trim_end_matches('/').to_string(),
            anon_key,
        }
    }
}

#[async_trait]
impl AuthGateway for SupabaseAuthClient {
    async fn update_password(&self, user: &CurrentUser, new_password: &str) -> Result<(), AppError> {
        let response = self
            .http
            .put(format!("{}/auth/v1/user", self.base_url))
            .header("apikey", &self.anon_key)
            .bearer_auth(&user.access_token)
            .json(&json!({ "password": new_password }))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<GoTrueError>(&body)
            .ok()
            .and_then(GoTrueError::into_message)
            .unwrap_or_else(|| format!("Serviço de autenticação respondeu {status}"));

        tracing::warn!(user_id = %user.id, %status, "Troca de senha rejeitada: {}", message);
        Err(AppError::AuthServiceRejected(message))
    }
}
