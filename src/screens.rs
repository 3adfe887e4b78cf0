// src/screens.rs
//
// Estado de cada tela como struct explícita. Os redutores recebem o estado
// anterior e uma ação e devolvem o novo estado junto com as notificações
// que a transição gerou; quem faz a chamada remota é o controlador.

use serde::Serialize;

use crate::models::notification::Notification;

pub mod password;
pub mod reports;
pub mod templates;
pub mod users;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Outcome {
    Applied,
    /// Validação local: nenhuma chamada remota foi feita.
    Rejected,
    /// A chamada remota falhou; o estado ficou como estava.
    RemoteFailed,
}

#[derive(Debug, Clone)]
pub struct Transition<S> {
    pub state: S,
    pub notifications: Vec<Notification>,
    pub outcome: Outcome,
}

impl<S> Transition<S> {
    pub fn applied(state: S) -> Self {
        Self { state, notifications: Vec::new(), outcome: Outcome::Applied }
    }

    pub fn rejected(state: S, notification: Notification) -> Self {
        Self { state, notifications: vec![notification], outcome: Outcome::Rejected }
    }

    pub fn remote_failed(state: S, notification: Notification) -> Self {
        Self { state, notifications: vec![notification], outcome: Outcome::RemoteFailed }
    }

    pub fn notify(mut self, notification: Notification) -> Self {
        self.notifications.push(notification);
        self
    }

    pub fn is_applied(&self) -> bool {
        self.outcome == Outcome::Applied
    }

    pub fn map<T>(self, f: impl FnOnce(S) -> T) -> Transition<T> {
        Transition {
            state: f(self.state),
            notifications: self.notifications,
            outcome: self.outcome,
        }
    }
}
