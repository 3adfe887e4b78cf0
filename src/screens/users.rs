// src/screens/users.rs
//
// Usuários do sistema. A listagem é real; o cadastro é só simulado, porque
// criar contas exige a chave administrativa do Supabase, que nunca deve sair
// de um endpoint privilegiado (Edge Function ou API própria).

use std::{sync::Arc, time::Duration};

use serde::Serialize;
use validator::Validate;

use crate::{
    common::error::AppError,
    db::ProfileStore,
    models::{
        auth::CurrentUser,
        notification::Notification,
        user::{CreateUserPayload, UserListItem, UserProfile},
    },
    screens::Transition,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDirectory {
    pub users: Vec<UserListItem>,
    pub loading: bool,
    pub creating: bool,
    pub create_dialog_open: bool,
    pub empty_message: Option<String>,
}

#[derive(Debug, Clone)]
pub enum UserAction {
    FetchStarted,
    Fetched(Vec<UserProfile>),
    FetchFailed(Notification),
    CreationRequested,
    CreationSimulated { email: String },
}

fn with_profiles(mut directory: UserDirectory, profiles: Vec<UserProfile>) -> UserDirectory {
    directory.users = profiles.iter().map(UserListItem::from).collect();
    directory.empty_message = profiles
        .is_empty()
        .then(|| "Nenhum usuário encontrado. Cadastre o primeiro!".to_string());
    directory.loading = false;
    directory
}

pub fn reduce(mut directory: UserDirectory, action: UserAction) -> Transition<UserDirectory> {
    match action {
        UserAction::FetchStarted => {
            directory.loading = true;
            Transition::applied(directory)
        }
        UserAction::Fetched(profiles) => Transition::applied(with_profiles(directory, profiles)),
        UserAction::FetchFailed(notification) => {
            Transition::remote_failed(with_profiles(directory, Vec::new()), notification)
        }
        UserAction::CreationRequested => {
            directory.creating = true;
            directory.create_dialog_open = true;
            Transition::applied(directory).notify(Notification::warning(
                "Funcionalidade de Cadastro (Backend Necessário)",
                "Para criar um usuário de forma segura, você deve implementar uma Edge Function \
                 do Supabase ou uma API de backend que chame 'supabase.auth.admin.createUser()' \
                 com a service_role_key.",
            ))
        }
        UserAction::CreationSimulated { email } => {
            directory.creating = false;
            directory.create_dialog_open = false;
            Transition::applied(directory).notify(Notification::success(
                "Usuário Criado (Simulado)",
                format!("Um pedido de criação para {email} foi enviado. Verifique seu backend."),
            ))
        }
    }
}


#[derive(Clone)]
pub struct UserDirectoryController {
    profiles: Arc<dyn ProfileStore>,
    creation_delay: Duration,
}

impl UserDirectoryController {
    pub fn new(profiles: Arc<dyn ProfileStore>, creation_delay: Duration) -> Self {
        Self { profiles, creation_delay }
    }

    async fn fetch(&self, user: &CurrentUser, directory: UserDirectory) -> Transition<UserDirectory> {
        let started = reduce(directory, UserAction::FetchStarted).state;
        let action = match self.profiles.list_profiles(user).await {
            Ok(profiles) => UserAction::Fetched(profiles),
            Err(e) => {
                tracing::error!(user_id = %user.id, "Erro ao buscar usuários: {}", e);
                UserAction::FetchFailed(Notification::error("Erro ao buscar usuários", e.user_message()))
            }
        };
        reduce(started, action)
    }

    pub async fn list(&self, user: &CurrentUser) -> Transition<UserDirectory> {
        self.fetch(user, UserDirectory::default()).await
    }

    /// Avisa, espera o atraso fixo, "confirma" e recarrega a lista. Nada é gravado.
    pub async fn request_creation(
        &self,
        user: &CurrentUser,
        payload: CreateUserPayload,
    ) -> Result<Transition<UserDirectory>, AppError> {
        payload.validate()?;

        tracing::warn!(
            user_id = %user.id,
            email = %payload.email,
            "Cadastro de usuário pedido sem endpoint privilegiado; simulando"
        );

        let requested = reduce(UserDirectory::default(), UserAction::CreationRequested);
        let mut notifications = requested.notifications;

        tokio::time::sleep(self.creation_delay).await;

        let simulated = reduce(requested.state, UserAction::CreationSimulated { email: payload.email });
        notifications.extend(simulated.notifications);

        let mut reloaded = self.fetch(user, simulated.state).await;
        notifications.append(&mut reloaded.notifications);
        reloaded.notifications = notifications;
        Ok(reloaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::notification::Variant,
        screens::{templates::tests::user, Outcome},
    };
    use async_trait::async_trait;
    use chrono::Utc;
    use uuid::Uuid;

    struct Profiles(Vec<UserProfile>);

    #[async_trait]
    impl ProfileStore for Profiles {
        async fn list_profiles(&self, _user: &CurrentUser) -> Result<Vec<UserProfile>, AppError> {
            Ok(self.0.clone())
        }
    }

    struct Unreachable;

    #[async_trait]
    impl ProfileStore for Unreachable {
        async fn list_profiles(&self, _user: &CurrentUser) -> Result<Vec<UserProfile>, AppError> {
            Err(AppError::DatabaseError(sqlx::Error::PoolTimedOut))
        }
    }

    fn profile(email: &str) -> UserProfile {
        UserProfile { id: Uuid::new_v4(), email: email.into(), full_name: None, created_at: Utc::now() }
    }

    #[tokio::test]
    async fn lists_profiles_for_display() {
        let controller = UserDirectoryController::new(
            Arc::new(Profiles(vec![profile("a@x.com"), profile("b@x.com")])),
            Duration::ZERO,
        );
        let transition = controller.list(&user()).await;
        assert!(transition.is_applied());
        assert!(!transition.state.loading);
        assert_eq!(transition.state.users.len(), 2);
        assert!(transition.state.empty_message.is_none());
    }

    #[tokio::test]
    async fn transport_failure_is_reported_with_its_message() {
        let controller = UserDirectoryController::new(Arc::new(Unreachable), Duration::ZERO);
        let transition = controller.list(&user()).await;
        assert_eq!(transition.outcome, Outcome::RemoteFailed);
        assert!(transition.state.users.is_empty());
        assert_eq!(transition.notifications[0].title, "Erro ao buscar usuários");
        assert_eq!(
            transition.notifications[0].description,
            "Falha de comunicação com o banco de dados."
        );
    }

    #[tokio::test(start_paused = true)]
    async fn creation_is_only_simulated_after_the_delay() {
        let controller = UserDirectoryController::new(
            Arc::new(Profiles(vec![profile("a@x.com")])),
            Duration::from_millis(1500),
        );
        let payload = CreateUserPayload {
            full_name: "Bruno Lima".into(),
            email: "bruno@escritorio.com".into(),
            password: "segredo".into(),
        };

        let started = tokio::time::Instant::now();
        let transition = controller.request_creation(&user(), payload).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(1500));

        let variants: Vec<Variant> = transition.notifications.iter().map(|n| n.variant).collect();
        assert_eq!(variants, [Variant::Warning, Variant::Default]);
        assert!(transition.notifications[1].description.contains("bruno@escritorio.com"));
        assert!(!transition.state.create_dialog_open);
        assert!(!transition.state.creating);
        // A lista recarregada continua a mesma: nada foi persistido
        assert_eq!(transition.state.users.len(), 1);
    }

    #[tokio::test]
    async fn invalid_creation_form_is_rejected_before_anything_else() {
        let controller = UserDirectoryController::new(Arc::new(Profiles(vec![])), Duration::ZERO);
        let result = controller.request_creation(&user(), CreateUserPayload::default()).await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }
}
