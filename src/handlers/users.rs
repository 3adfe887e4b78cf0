use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    common::error::AppError,
    config::AppState,
    handlers::screen_response,
    middleware::auth::AuthenticatedUser,
    models::user::CreateUserPayload,
};

// GET /api/users
pub async fn list_users(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> impl IntoResponse {
    screen_response(app_state.users.list(&user).await, StatusCode::OK)
}

// POST /api/users
// Não cria nada: responde 202 com os avisos da simulação.
pub async fn request_user_creation(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    let transition = app_state.users.request_creation(&user, payload).await?;
    Ok(screen_response(transition, StatusCode::ACCEPTED))
}
