use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Erros da aplicação. Falhas de tela (validação local, falha remota numa ação
// do usuário) viram notificações nos controladores; o que chega aqui é o que
// interrompe a requisição inteira.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("{0}")]
    InvalidInput(String),

    #[error("Token inválido")]
    InvalidToken,

    #[error("Registro não encontrado")]
    NotFound,

    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro de comunicação HTTP: {0}")]
    HttpError(#[from] reqwest::Error),

    // Rejeição do serviço de autenticação; a mensagem vem do próprio serviço.
    #[error("{0}")]
    AuthServiceRejected(String),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),

    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    /// Mensagem segura para exibir ao usuário final.
    pub fn user_message(&self) -> String {
        match self {
            AppError::InvalidInput(msg) | AppError::AuthServiceRejected(msg) => msg.clone(),
            AppError::DatabaseError(e) => match e {
                sqlx::Error::Database(db_err) => db_err.message().to_string(),
                _ => "Falha de comunicação com o banco de dados.".to_string(),
            },
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors.iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::UNPROCESSABLE_ENTITY, body).into_response();
            }
            AppError::InvalidInput(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            AppError::InvalidToken | AppError::JwtError(_) => (
                StatusCode::UNAUTHORIZED,
                "Token de autenticação inválido ou ausente.".to_string(),
            ),
            AppError::NotFound => (StatusCode::NOT_FOUND, "Registro não encontrado.".to_string()),
            AppError::AuthServiceRejected(msg) => (StatusCode::BAD_GATEWAY, msg),

            // Banco, HTTP e erros internos viram 500; o detalhe fica só no log.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocorreu um erro inesperado.".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_token_maps_to_unauthorized() {
        let response = AppError::InvalidToken.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn service_rejection_keeps_message_verbatim() {
        let err = AppError::AuthServiceRejected("Password should be at least 6 characters.".into());
        assert_eq!(err.user_message(), "Password should be at least 6 characters.");
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn internal_errors_hide_details() {
        let err = AppError::InternalServerError(anyhow::anyhow!("pool exhausted"));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
