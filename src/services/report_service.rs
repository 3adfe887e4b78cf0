// src/services/report_service.rs
//
// Indicadores do relatório financeiro. Tudo aqui é função pura sobre um
// retrato dos lançamentos; o "agora" entra como parâmetro.

use std::collections::HashMap;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::{
    common::format::{format_brl, month_label},
    models::finance::{
        FinancialKpis, FinancialReport, KpiCard, LedgerEntry, LedgerStatus, RevenueBucket,
    },
    services::revenue_chart::revenue_chart,
};

pub const RECEIVED_WINDOW_DAYS: i64 = 30;

// Somas saturam em `Decimal::MAX` em vez de estourar
fn total(values: impl Iterator<Item = Decimal>) -> Decimal {
    values.fold(Decimal::ZERO, Decimal::saturating_add)
}

fn month_key(year: i32, month: u32) -> String {
    format!("{year:04}-{month:02}")
}

/// Receita paga por mês do ano corrente: sempre 12 posições, janeiro a dezembro.
pub fn monthly_revenue(entries: &[LedgerEntry], today: NaiveDate) -> Vec<RevenueBucket> {
    let year = today.year();

    let mut totals: HashMap<String, Decimal> = HashMap::new();
    for entry in entries.iter().filter(|e| e.is_paid()) {
        let (Some(paid_at), Some(valor)) = (entry.data_pagamento, entry.valor) else {
            continue;
        };
        if paid_at.year() == year {
            let slot = totals.entry(month_key(year, paid_at.month())).or_insert(Decimal::ZERO);
            *slot = slot.saturating_add(valor);
        }
    }

    // O esqueleto do ano não depende dos dados
    (1..=12)
        .map(|month| RevenueBucket {
            name: month_label(year, month),
            total: totals
                .get(&month_key(year, month))
                .copied()
                .unwrap_or(Decimal::ZERO),
        })
        .collect()
}

/// Tudo que ainda não foi pago (qualquer status diferente de "Pago").
pub fn receivable_total(entries: &[LedgerEntry]) -> Decimal {
    total(entries.iter().filter(|e| !e.is_paid()).filter_map(|e| e.valor))
}

/// Pagos com data de pagamento a partir de `hoje - 30 dias`, por dia de calendário.
pub fn received_last_30_days(entries: &[LedgerEntry], today: NaiveDate) -> Decimal {
    let window_start = today - Duration::days(RECEIVED_WINDOW_DAYS);
    total(
        entries
            .iter()
            .filter(|e| e.is_paid())
            .filter(|e| e.data_pagamento.is_some_and(|paid| paid.date() >= window_start))
            .filter_map(|e| e.valor),
    )
}

/// Pendentes cujo vencimento já passou (estritamente antes de `now`).
pub fn overdue_count(entries: &[LedgerEntry], now: NaiveDateTime) -> usize {
    entries
        .iter()
        .filter(|e| e.status == LedgerStatus::Pending)
        .filter(|e| e.data_vencimento.is_some_and(|due| due < now))
        .count()
}

pub fn compute_kpis(entries: &[LedgerEntry], now: NaiveDateTime) -> FinancialKpis {
    FinancialKpis {
        receivable: receivable_total(entries),
        received_last_30_days: received_last_30_days(entries, now.date()),
        overdue_count: overdue_count(entries, now),
    }
}

fn kpi_cards(kpis: &FinancialKpis) -> Vec<KpiCard> {
    vec![
        KpiCard {
            title: "Total a Receber".into(),
            value: kpis.receivable,
            formatted: format_brl(kpis.receivable),
            hint: "Valor de todos lançamentos pendentes.".into(),
        },
        KpiCard {
            title: "Recebido (Últimos 30 dias)".into(),
            value: kpis.received_last_30_days,
            formatted: format_brl(kpis.received_last_30_days),
            hint: "Soma dos valores pagos recentemente.".into(),
        },
        KpiCard {
            title: "Lançamentos Atrasados".into(),
            value: Decimal::from(kpis.overdue_count),
            formatted: kpis.overdue_count.to_string(),
            hint: "Lançamentos pendentes com data vencida.".into(),
        },
    ]
}

pub fn build_report(entries: &[LedgerEntry], now: NaiveDateTime) -> FinancialReport {
    let kpis = compute_kpis(entries, now);
    FinancialReport {
        cards: kpi_cards(&kpis),
        chart: revenue_chart(monthly_revenue(entries, now.date())),
        kpis,
    }
}
