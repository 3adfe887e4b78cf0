use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    config::AppState,
    handlers::screen_response,
    middleware::auth::AuthenticatedUser,
    models::auth::{ChangePasswordPayload, CurrentUser},
};

// Handler da rota protegida /me
pub async fn get_me(AuthenticatedUser(user): AuthenticatedUser) -> Json<CurrentUser> {
    Json(user)
}

// PUT /api/me/password
pub async fn change_password(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<ChangePasswordPayload>,
) -> impl IntoResponse {
    let transition = app_state.passwords.change(&user, payload).await;
    screen_response(transition, StatusCode::OK)
}
