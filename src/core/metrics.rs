use crate::core::coerce::to_number;
use crate::core::resolve::first_result_object;
use crate::domain::model::{
    CostKpis, InvestmentBreakdown, Metric, ScalarKpis, SeriesRow, Totals,
};
use serde_json::Value;

/// Arithmetic sum of one field across a series.
pub fn sum_field(rows: &[SeriesRow], field: &str) -> f64 {
    rows.iter().map(|row| row.value(field)).sum()
}

pub fn ratio(numerator: f64, denominator: f64) -> Metric {
    ratio_scaled(numerator, denominator, 1.0)
}

/// Guarded ratio: not computable unless the denominator is positive.
pub fn ratio_scaled(numerator: f64, denominator: f64, scale: f64) -> Metric {
    if denominator > 0.0 {
        Metric::Value(numerator / denominator * scale)
    } else {
        Metric::NotComputable
    }
}

/// Per-channel investment totals summed over the normalized rows.
pub fn investment_breakdown(rows: &[SeriesRow]) -> InvestmentBreakdown {
    let facebook_total = sum_field(rows, "facebook_amount");
    let google_total = sum_field(rows, "google_amount");
    InvestmentBreakdown {
        facebook_total,
        google_total,
        total: facebook_total + google_total,
    }
}

/// Cost KPIs from one cycle's totals. Valid only after the investment and
/// leads extractions of the same cycle have filled the totals; the engine
/// enforces that ordering.
pub fn derive_cost_kpis(totals: &Totals) -> CostKpis {
    CostKpis {
        cost_per_lead: ratio(totals.investment_total, totals.leads_total),
        cost_per_click: ratio(totals.investment_total, totals.clicks_total),
        cost_per_mille: ratio_scaled(totals.investment_total, totals.impressions_total, 1000.0),
    }
}

fn field(obj: &Value, key: &str) -> f64 {
    to_number(obj.get(key).unwrap_or(&Value::Null))
}

/// Extracts the scalar KPIs from the resolved primary object. A payload
/// without a recognizable primary object yields all zeros.
pub fn extract_kpis(raw: &Value) -> ScalarKpis {
    let Some(primary) = first_result_object(raw) else {
        return ScalarKpis::default();
    };

    let kpis = primary.get("kpis").unwrap_or(&Value::Null);
    let subscriber = primary
        .get("subscribers")
        .and_then(Value::as_array)
        .and_then(|subs| subs.first())
        .unwrap_or(&Value::Null);

    ScalarKpis {
        cac_daily: field(kpis, "cac_diario"),
        cac_month: field(kpis, "cac_mes"),
        cac_range: field(kpis, "cac_range"),
        sales_today: field(kpis, "vendas_hoje"),
        sales_month: field(kpis, "vendas_mes"),
        monthly_plans: field(kpis, "planos_mensais"),
        annual_plans: field(kpis, "planos_anuais"),
        conversion_pct: field(kpis, "conversion_pct"),
        total_leads: field(kpis, "total_leads"),
        clicks_total: field(kpis, "clicks_total"),
        impressions_total: field(kpis, "impressions_total"),
        ctr_pct: field(kpis, "ctr_pct"),
        goal_pct: field(kpis, "meta_pct"),
        total_subscribers: field(subscriber, "total_subscribers"),
    }
}
