// src/models/finance.rs

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

use crate::common::format::{parse_amount, parse_timestamp};

pub const STATUS_PAID: &str = "Pago";
pub const STATUS_PENDING: &str = "Pendente";

// --- Status (texto livre na tabela) ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum LedgerStatus {
    Paid,
    Pending,
    Other(String),
}

impl From<&str> for LedgerStatus {
    fn from(value: &str) -> Self {
        match value {
            STATUS_PAID => LedgerStatus::Paid,
            STATUS_PENDING => LedgerStatus::Pending,
            other => LedgerStatus::Other(other.to_string()),
        }
    }
}

impl From<LedgerStatus> for String {
    fn from(status: LedgerStatus) -> Self {
        match status {
            LedgerStatus::Paid => STATUS_PAID.to_string(),
            LedgerStatus::Pending => STATUS_PENDING.to_string(),
            LedgerStatus::Other(s) => s,
        }
    }
}

// Linha crua de `financeiro_lancamentos`: tudo que pode vir malformado chega como texto
#[derive(Debug, Clone, FromRow)]
pub struct LedgerRow {
    pub id: String,
    pub valor: Option<String>,
    pub status: Option<String>,
    pub data_pagamento: Option<String>,
    pub data_vencimento: Option<String>,
}

/// Lançamento já validado na borda.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerEntry {
    pub id: String,
    /// `None` quando o valor remoto não é numérico; não entra em nenhuma soma.
    pub valor: Option<Decimal>,
    pub status: LedgerStatus,
    pub data_pagamento: Option<NaiveDateTime>,
    pub data_vencimento: Option<NaiveDateTime>,
}

impl From<LedgerRow> for LedgerEntry {
    fn from(row: LedgerRow) -> Self {
        Self {
            id: row.id,
            valor: parse_amount(row.valor.as_deref()),
            status: LedgerStatus::from(row.status.as_deref().unwrap_or_default()),
            data_pagamento: row.data_pagamento.as_deref().and_then(parse_timestamp),
            data_vencimento: row.data_vencimento.as_deref().and_then(parse_timestamp),
        }
    }
}

impl LedgerEntry {
    pub fn is_paid(&self) -> bool {
        self.status == LedgerStatus::Paid
    }
}

// --- Derivados (nunca persistidos) ---

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenueBucket {
    pub name: String,
    pub total: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialKpis {
    pub receivable: Decimal,
    pub received_last_30_days: Decimal,
    pub overdue_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiCard {
    pub title: String,
    pub value: Decimal,
    pub formatted: String,
    pub hint: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub name: String,
    pub total: Decimal,
    pub formatted: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueChart {
    pub title: String,
    pub description: String,
    pub series: Vec<ChartPoint>,
    pub empty_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialReport {
    pub kpis: FinancialKpis,
    pub cards: Vec<KpiCard>,
    pub chart: RevenueChart,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(valor: Option<&str>, status: &str, pagamento: Option<&str>) -> LedgerRow {
        LedgerRow {
            id: "1".into(),
            valor: valor.map(String::from),
            status: Some(status.into()),
            data_pagamento: pagamento.map(String::from),
            data_vencimento: None,
        }
    }

    #[test]
    fn parses_rows_at_the_boundary() {
        let entry = LedgerEntry::from(row(Some("150.75"), "Pago", Some("2026-02-10")));
        assert!(entry.is_paid());
        assert_eq!(entry.valor, Some(Decimal::new(15075, 2)));
        assert_eq!(entry.data_pagamento.map(|d| d.date().to_string()), Some("2026-02-10".into()));
    }

    #[test]
    fn invalid_amount_and_unknown_status_survive_as_typed_values() {
        let entry = LedgerEntry::from(row(Some("N/A"), "Cancelado", Some("sem data")));
        assert_eq!(entry.valor, None);
        assert_eq!(entry.status, LedgerStatus::Other("Cancelado".into()));
        assert_eq!(entry.data_pagamento, None);
    }

    #[test]
    fn status_serializes_as_stored_text() {
        let json = serde_json::to_string(&LedgerStatus::Pending).unwrap();
        assert_eq!(json, "\"Pendente\"");
    }
}
