// src/models/auth.rs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// O usuário autenticado, montado a partir do token emitido pelo Supabase
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: Option<String>,
    pub role: String,

    // Necessário para agir em nome do usuário no serviço de autenticação
    #[serde(skip_serializing)] // IMPORTANTE para segurança
    pub access_token: String,
}

// Estrutura de dados ("claims") dentro do JWT do Supabase
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,  // Subject (ID do usuário)
    pub exp: usize, // Expiration time
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub aud: Option<String>,
}

// Dados do formulário de troca de senha
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordPayload {
    #[serde(default)]
    pub new_password: String,
    #[serde(default)]
    pub confirm_password: String,
}
