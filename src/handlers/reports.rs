use axum::{extract::State, http::StatusCode, response::IntoResponse};

use crate::{config::AppState, handlers::screen_response, middleware::auth::AuthenticatedUser};

// GET /api/reports/financial
// Recalculado a cada chamada; "hoje" é o relógio local do servidor.
pub async fn financial(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> impl IntoResponse {
    let now = chrono::Local::now().naive_local();
    let transition = app_state.reports.mount(&user, now).await;
    screen_response(transition, StatusCode::OK)
}
