// src/screens/reports.rs
//
// Relatórios financeiros: um retrato dos lançamentos por montagem da tela.

use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::{
    db::LedgerStore,
    models::{
        auth::CurrentUser,
        finance::{FinancialReport, LedgerEntry},
        notification::Notification,
    },
    screens::Transition,
    services::report_service::build_report,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportScreen {
    pub entries: Vec<LedgerEntry>,
}

#[derive(Debug, Clone)]
pub enum ReportAction {
    Loaded(Vec<LedgerEntry>),
    LoadFailed,
}

pub fn reduce(mut screen: ReportScreen, action: ReportAction) -> Transition<ReportScreen> {
    match action {
        ReportAction::Loaded(entries) => {
            screen.entries = entries;
            Transition::applied(screen)
        }
        // Fica com o que tinha (na montagem, lista vazia: todos os indicadores zerados)
        ReportAction::LoadFailed => Transition::remote_failed(
            screen,
            Notification::error("Erro", "Não foi possível carregar os lançamentos."),
        ),
    }
}

impl ReportScreen {
    pub fn view(&self, now: NaiveDateTime) -> FinancialReport {
        build_report(&self.entries, now)
    }
}

#[derive(Clone)]
pub struct ReportController {
    ledger: Arc<dyn LedgerStore>,
}

impl ReportController {
    pub fn new(ledger: Arc<dyn LedgerStore>) -> Self {
        Self { ledger }
    }

    pub async fn mount(&self, user: &CurrentUser, now: NaiveDateTime) -> Transition<FinancialReport> {
        let action = match self.ledger.list_entries(user).await {
            Ok(entries) => {
                tracing::debug!(user_id = %user.id, total = entries.len(), "Lançamentos carregados");
                ReportAction::Loaded(entries)
            }
            Err(e) => {
                tracing::error!(user_id = %user.id, "Falha ao carregar lançamentos: {}", e);
                ReportAction::LoadFailed
            }
        };
        reduce(ReportScreen::default(), action).map(|screen| screen.view(now))
    }
}
