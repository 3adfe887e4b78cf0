//src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

mod common;
mod config;
mod db;
mod handlers;
mod middleware;
mod models;
mod screens;
mod services;

use crate::config::{AppConfig, AppState};
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    // Se a configuração falhar, a aplicação não deve iniciar
    let config = AppConfig::from_env()?;
    let app_state = AppState::new(config).await?;

    let listener = TcpListener::bind(&app_state.config.bind_addr).await?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);
    axum::serve(listener, app(app_state)).await?;
    Ok(())
}

fn app(app_state: AppState) -> Router {
    let template_routes = Router::new()
        .route("/", get(handlers::templates::mount).post(handlers::templates::create))
        .route("/variables", get(handlers::templates::variables))
        .route(
            "/editor",
            post(handlers::templates::open_editor)
                .patch(handlers::templates::update_editor)
                .delete(handlers::templates::close_editor),
        )
        .route("/editor/variables", post(handlers::templates::insert_variable))
        .route("/editor/copy", post(handlers::templates::copy_content))
        .route("/editor/save", post(handlers::templates::save_editor))
        .route(
            "/{id}",
            put(handlers::templates::edit).delete(handlers::templates::delete),
        )
        .route("/{id}/duplicate", post(handlers::templates::duplicate));

    // Tudo sob /api exceto o health check exige um token válido
    let protected = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .route("/me/password", put(handlers::auth::change_password))
        .nest("/templates", template_routes)
        .route("/reports/financial", get(handlers::reports::financial))
        .route(
            "/users",
            get(handlers::users::list_users).post(handlers::users::request_user_creation),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api", protected)
        .with_state(app_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        common::error::AppError,
        db::{LedgerStore, ProfileStore},
        models::{auth::{Claims, CurrentUser}, finance::LedgerEntry, user::UserProfile},
        screens::templates::tests::{template, MemoryTemplates},
        services::auth::AuthGateway,
    };
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::{json, Value};
    use std::{sync::Arc, time::Duration};
    use tower::ServiceExt;
    use uuid::Uuid;

    const SECRET: &str = "segredo-de-teste";

    struct EmptyLedger;

    #[async_trait]
    impl LedgerStore for EmptyLedger {
        async fn list_entries(&self, _user: &CurrentUser) -> Result<Vec<LedgerEntry>, AppError> {
            Ok(Vec::new())
        }
    }

    struct NoProfiles;

    #[async_trait]
    impl ProfileStore for NoProfiles {
        async fn list_profiles(&self, _user: &CurrentUser) -> Result<Vec<UserProfile>, AppError> {
            Ok(Vec::new())
        }
    }

    struct AcceptingGateway;

    #[async_trait]
    impl AuthGateway for AcceptingGateway {
        async fn update_password(&self, _user: &CurrentUser, _new_password: &str) -> Result<(), AppError> {
            Ok(())
        }
    }

    fn test_app() -> Router {
        let config = AppConfig {
            database_url: "postgres://localhost/teste".into(),
            supabase_url: "http://localhost:54321".into(),
            supabase_anon_key: "anon".into(),
            jwt_secret: SECRET.into(),
            bind_addr: "127.0.0.1:0".into(),
            db_max_connections: 1,
            db_acquire_timeout_secs: 1,
            rls_role: "authenticated".into(),
            user_creation_delay: Duration::ZERO,
        };
        let templates = MemoryTemplates::seeded(vec![template("Boas-vindas", "Olá [nome_cliente]")]);
        app(AppState::from_parts(
            config,
            Arc::new(templates),
            Arc::new(EmptyLedger),
            Arc::new(NoProfiles),
            Arc::new(AcceptingGateway),
        ))
    }

    fn token() -> String {
        let claims = Claims {
            sub: Uuid::new_v4(),
            exp: (chrono::Utc::now().timestamp() + 3600) as usize,
            email: Some("ana@escritorio.com".into()),
            role: Some("authenticated".into()),
            aud: Some("authenticated".into()),
        };
        encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET.as_ref())).unwrap()
    }

    fn request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", token()));
        match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_is_public() {
        let response = test_app()
            .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn protected_routes_require_a_token() {
        let response = test_app()
            .oneshot(Request::builder().uri("/api/templates").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn templates_mount_lists_stored_templates() {
        let response = test_app().oneshot(request("GET", "/api/templates", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["data"]["templates"][0]["title"], "Boas-vindas");
        assert_eq!(body["outcome"], "applied");
    }

    #[tokio::test]
    async fn password_mismatch_is_unprocessable() {
        let payload = json!({ "newPassword": "segredo1", "confirmPassword": "segredo2" });
        let response = test_app()
            .oneshot(request("PUT", "/api/me/password", Some(payload)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = json_body(response).await;
        assert_eq!(body["notifications"][0]["description"], "As senhas não coincidem.");
    }

    #[tokio::test]
    async fn empty_ledger_report_has_zeroed_cards() {
        let response = test_app()
            .oneshot(request("GET", "/api/reports/financial", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["data"]["cards"].as_array().unwrap().len(), 3);
        assert_eq!(body["data"]["chart"]["series"].as_array().unwrap().len(), 12);
    }

    #[tokio::test]
    async fn user_creation_is_accepted_but_simulated() {
        let payload = json!({ "fullName": "Bruno Lima", "email": "bruno@escritorio.com", "password": "segredo" });
        let response = test_app()
            .oneshot(request("POST", "/api/users", Some(payload)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::ACCEPTED);

        let body = json_body(response).await;
        assert_eq!(body["notifications"][0]["variant"], "warning");
        assert!(body["data"]["users"].as_array().unwrap().is_empty());
    }
}
