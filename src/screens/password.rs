// src/screens/password.rs
//
// Diálogo "Alterar Senha" da tela de configurações.

use std::sync::Arc;

use serde::Serialize;

use crate::{
    models::{auth::{ChangePasswordPayload, CurrentUser}, notification::Notification},
    screens::Transition,
    services::auth::AuthGateway,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordForm {
    #[serde(skip_serializing)]
    pub new_password: String,
    #[serde(skip_serializing)]
    pub confirm_password: String,
    pub open: bool,
}

impl From<ChangePasswordPayload> for PasswordForm {
    fn from(payload: ChangePasswordPayload) -> Self {
        Self {
            new_password: payload.new_password,
            confirm_password: payload.confirm_password,
            open: true,
        }
    }
}

#[derive(Debug, Clone)]
pub enum PasswordAction {
    Changed,
    /// Mensagem do serviço de autenticação, exibida como veio.
    Failed(String),
}

/// Nenhuma política de força aqui; isso é do serviço de autenticação.
pub fn validate(form: &PasswordForm) -> Result<(), Notification> {
    if form.new_password.is_empty() || form.confirm_password.is_empty() {
        return Err(Notification::error("Erro", "Preencha todos os campos."));
    }
    if form.new_password != form.confirm_password {
        return Err(Notification::error("Erro", "As senhas não coincidem."));
    }
    Ok(())
}

pub fn reduce(form: PasswordForm, action: PasswordAction) -> Transition<PasswordForm> {
    match action {
        PasswordAction::Changed => Transition::applied(PasswordForm::default())
            .notify(Notification::success("Sucesso!", "Senha alterada com sucesso.")),
        PasswordAction::Failed(message) => {
            Transition::remote_failed(form, Notification::error("Erro", message))
        }
    }
}

#[derive(Clone)]
pub struct PasswordController {
    gateway: Arc<dyn AuthGateway>,
}

impl PasswordController {
    pub fn new(gateway: Arc<dyn AuthGateway>) -> Self {
        Self { gateway }
    }

    pub async fn change(&self, user: &CurrentUser, payload: ChangePasswordPayload) -> Transition<PasswordForm> {
        let form = PasswordForm::from(payload);
        if let Err(notification) = validate(&form) {
            return Transition::rejected(form, notification);
        }

        let action = match self.gateway.update_password(user, &form.new_password).await {
            Ok(()) => {
                tracing::info!(user_id = %user.id, "Senha alterada");
                PasswordAction::Changed
            }
            Err(e) => PasswordAction::Failed(e.user_message()),
        };
        reduce(form, action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        common::error::AppError,
        screens::{templates::tests::user, Outcome},
    };
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct FakeGateway {
        calls: AtomicUsize,
        reject_with: Option<String>,
    }

    #[async_trait]
    impl AuthGateway for FakeGateway {
        async fn update_password(&self, _user: &CurrentUser, _new_password: &str) -> Result<(), AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.reject_with {
                Some(msg) => Err(AppError::AuthServiceRejected(msg.clone())),
                None => Ok(()),
            }
        }
    }

    fn payload(new: &str, confirm: &str) -> ChangePasswordPayload {
        ChangePasswordPayload { new_password: new.into(), confirm_password: confirm.into() }
    }

    #[tokio::test]
    async fn mismatch_never_calls_the_auth_service() {
        let gateway = Arc::new(FakeGateway::default());
        let controller = PasswordController::new(gateway.clone());

        let transition = controller.change(&user(), payload("segredo1", "segredo2")).await;
        assert_eq!(transition.outcome, Outcome::Rejected);
        assert_eq!(transition.notifications[0].description, "As senhas não coincidem.");
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn empty_fields_are_rejected() {
        let gateway = Arc::new(FakeGateway::default());
        let controller = PasswordController::new(gateway.clone());

        let transition = controller.change(&user(), payload("", "")).await;
        assert_eq!(transition.notifications[0].description, "Preencha todos os campos.");
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn success_clears_and_closes_the_form() {
        let controller = PasswordController::new(Arc::new(FakeGateway::default()));

        let transition = controller.change(&user(), payload("nova-senha", "nova-senha")).await;
        assert!(transition.is_applied());
        assert_eq!(transition.state, PasswordForm::default());
        assert_eq!(transition.notifications[0].title, "Sucesso!");
    }

    #[tokio::test]
    async fn service_rejection_is_shown_verbatim() {
        let gateway = FakeGateway {
            reject_with: Some("Password should be at least 6 characters.".into()),
            ..Default::default()
        };
        let controller = PasswordController::new(Arc::new(gateway));

        let transition = controller.change(&user(), payload("123", "123")).await;
        assert_eq!(transition.outcome, Outcome::RemoteFailed);
        assert!(transition.state.open);
        assert_eq!(transition.notifications[0].description, "Password should be at least 6 characters.");
    }
}
