// src/services/revenue_chart.rs

use crate::{
    common::format::format_brl,
    models::finance::{ChartPoint, RevenueBucket, RevenueChart},
};

const CHART_TITLE: &str = "Receita Mensal";
const CHART_DESCRIPTION: &str = "Receitas pagas agrupadas por mês.";
const EMPTY_MESSAGE: &str = "Nenhuma receita registrada ainda.";

/// Dados do gráfico de barras: a série mais os rótulos em reais usados no eixo e no tooltip.
pub fn revenue_chart(buckets: Vec<RevenueBucket>) -> RevenueChart {
    let empty = buckets.iter().all(|b| b.total.is_zero());

    RevenueChart {
        title: CHART_TITLE.to_string(),
        description: CHART_DESCRIPTION.to_string(),
        series: buckets
            .into_iter()
            .map(|b| ChartPoint {
                formatted: format_brl(b.total),
                name: b.name,
                total: b.total,
            })
            .collect(),
        empty_message: empty.then(|| EMPTY_MESSAGE.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn empty_series_gets_empty_state_message() {
        let chart = revenue_chart(vec![RevenueBucket { name: "Jan/26".into(), total: Decimal::ZERO }]);
        assert_eq!(chart.empty_message.as_deref(), Some(EMPTY_MESSAGE));
        assert_eq!(chart.series[0].formatted, "R$ 0,00");
    }

    #[test]
    fn points_keep_order_and_currency_labels() {
        let chart = revenue_chart(vec![
            RevenueBucket { name: "Jan/26".into(), total: Decimal::new(123456, 2) },
            RevenueBucket { name: "Fev/26".into(), total: Decimal::ZERO },
        ]);
        assert!(chart.empty_message.is_none());
        assert_eq!(chart.series[0].name, "Jan/26");
        assert_eq!(chart.series[0].formatted, "R$ 1.234,56");
        assert_eq!(chart.title, "Receita Mensal");
    }
}
