// src/common/format.rs
//
// Conversões de borda: texto vindo do banco -> tipos, e tipos -> texto pt-BR.

use std::str::FromStr;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
];

/// Coerção numérica de `valor`. Texto vazio ou não numérico não tem valor.
pub fn parse_amount(raw: Option<&str>) -> Option<Decimal> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

/// Lê datas no formato ISO (só data, RFC 3339 ou texto de `timestamptz` do
/// Postgres). Data sem hora vira meia-noite local; horários com fuso são
/// convertidos para o horário local do servidor.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local).naive_local());
    }

    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f%#z") {
        return Some(dt.with_timezone(&Local).naive_local());
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

/// Moeda em reais, ex.: `R$ 1.234,56`.
pub fn format_brl(value: Decimal) -> String {
    let rounded = value.round_dp(2);
    let digits = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    format!("{sign}R$ {grouped},{frac_part}")
}

/// `dd/mm/aaaa`
pub fn format_date_br(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Rótulo curto do mês com a inicial maiúscula, ex.: `Mar/26`.
pub fn month_label(year: i32, month: u32) -> String {
    let abbr = MONTH_ABBREVIATIONS
        .get(month.saturating_sub(1) as usize)
        .copied()
        .unwrap_or("???");
    let mut chars = abbr.chars();
    let capitalized: String = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };
    format!("{}/{:02}", capitalized, year.rem_euclid(100))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::prelude::FromPrimitive;

    #[test]
    fn coerces_numeric_text() {
        assert_eq!(parse_amount(Some("100")), Decimal::from_i32(100));
        assert_eq!(parse_amount(Some(" 12.50 ")), Decimal::from_str("12.50").ok());
        assert_eq!(parse_amount(Some("1e3")), Decimal::from_i32(1000));
    }

    #[test]
    fn rejects_non_numeric_amounts() {
        assert_eq!(parse_amount(Some("abc")), None);
        assert_eq!(parse_amount(Some("")), None);
        assert_eq!(parse_amount(None), None);
    }

    #[test]
    fn parses_date_only_as_midnight() {
        let parsed = parse_timestamp("2026-01-15").unwrap();
        assert_eq!(parsed, NaiveDate::from_ymd_opt(2026, 1, 15).unwrap().and_hms_opt(0, 0, 0).unwrap());
    }

    #[test]
    fn parses_naive_and_offset_timestamps() {
        let naive = parse_timestamp("2026-03-02T08:30:00").unwrap();
        assert_eq!(naive.date(), NaiveDate::from_ymd_opt(2026, 3, 2).unwrap());
        assert!(parse_timestamp("2026-03-02 08:30:00.123+00").is_some());
        assert!(parse_timestamp("2026-03-02T08:30:00Z").is_some());
        assert!(parse_timestamp("ontem").is_none());
    }

    #[test]
    fn formats_brazilian_currency() {
        assert_eq!(format_brl(Decimal::ZERO), "R$ 0,00");
        assert_eq!(format_brl(Decimal::from_str("1234.5").unwrap()), "R$ 1.234,50");
        assert_eq!(format_brl(Decimal::from_str("1234567.891").unwrap()), "R$ 1.234.567,89");
        assert_eq!(format_brl(Decimal::from_str("-50").unwrap()), "-R$ 50,00");
    }

    #[test]
    fn month_labels_are_capitalized() {
        assert_eq!(month_label(2026, 1), "Jan/26");
        assert_eq!(month_label(2026, 9), "Set/26");
        assert_eq!(month_label(2030, 12), "Dez/30");
    }
}
