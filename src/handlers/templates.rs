// src/handlers/templates.rs
//
// Rotas da tela de modelos de mensagem. As de CRUD agem direto sobre a lista;
// as de `/editor` conduzem o diálogo de edição guardado na sessão do usuário.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    config::AppState,
    handlers::screen_response,
    middleware::auth::AuthenticatedUser,
    models::template::{
        EditorFieldsPayload, InsertVariablePayload, OpenEditorPayload, TemplatePayload, PLACEHOLDERS,
    },
    screens::templates::TemplateAction,
};

// GET /api/templates
pub async fn mount(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> impl IntoResponse {
    screen_response(app_state.templates.mount(&user).await, StatusCode::OK)
}

// GET /api/templates/variables
pub async fn variables() -> Json<Vec<&'static str>> {
    Json(PLACEHOLDERS.to_vec())
}

// POST /api/templates
pub async fn create(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<TemplatePayload>,
) -> impl IntoResponse {
    let transition = app_state.templates.create(&user, payload.title, payload.content).await;
    screen_response(transition, StatusCode::CREATED)
}

// PUT /api/templates/{id}
pub async fn edit(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<TemplatePayload>,
) -> impl IntoResponse {
    let transition = app_state.templates.edit(&user, id, payload.title, payload.content).await;
    screen_response(transition, StatusCode::OK)
}

// POST /api/templates/{id}/duplicate
pub async fn duplicate(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    screen_response(app_state.templates.duplicate(&user, id).await, StatusCode::CREATED)
}

// DELETE /api/templates/{id}
pub async fn delete(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    screen_response(app_state.templates.delete(&user, id).await, StatusCode::OK)
}

// --- Editor ---

// POST /api/templates/editor
pub async fn open_editor(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<OpenEditorPayload>,
) -> impl IntoResponse {
    let action = match payload.template_id {
        Some(id) => TemplateAction::OpenEdit(id),
        None => TemplateAction::OpenCreate,
    };
    screen_response(app_state.templates.dispatch(&user, action).await, StatusCode::OK)
}

// PATCH /api/templates/editor
pub async fn update_editor(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<EditorFieldsPayload>,
) -> impl IntoResponse {
    let actions = payload
        .title
        .map(TemplateAction::SetTitle)
        .into_iter()
        .chain(payload.content.map(TemplateAction::SetContent));

    let mut transition = app_state.templates.current(&user).await;
    for action in actions {
        transition = app_state.templates.dispatch(&user, action).await;
        if !transition.is_applied() {
            break;
        }
    }
    screen_response(transition, StatusCode::OK)
}

// DELETE /api/templates/editor
pub async fn close_editor(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> impl IntoResponse {
    let transition = app_state.templates.dispatch(&user, TemplateAction::CloseEditor).await;
    screen_response(transition, StatusCode::OK)
}

// POST /api/templates/editor/variables
pub async fn insert_variable(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<InsertVariablePayload>,
) -> impl IntoResponse {
    let action = TemplateAction::InsertVariable(payload.variable);
    screen_response(app_state.templates.dispatch(&user, action).await, StatusCode::OK)
}

// POST /api/templates/editor/copy
// A cópia em si é do cliente; aqui só confirmamos e devolvemos o conteúdo atual.
pub async fn copy_content(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> impl IntoResponse {
    let transition = app_state.templates.dispatch(&user, TemplateAction::ContentCopied).await;
    screen_response(transition, StatusCode::OK)
}

// POST /api/templates/editor/save
pub async fn save_editor(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> impl IntoResponse {
    screen_response(app_state.templates.save(&user).await, StatusCode::OK)
}
