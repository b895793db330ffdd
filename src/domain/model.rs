use serde::Serialize;
use std::collections::BTreeMap;

/// Raw upstream payload. The webhook's response shape is not contractually
/// fixed, so it stays an untyped JSON value until the resolvers have run.
pub type RawResponse = serde_json::Value;

/// Whether the upstream sends money amounts in major units or in integer
/// minor units (cents). Fixed once at configuration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MoneyConvention {
    MajorUnits,
    MinorUnits,
}

impl MoneyConvention {
    pub fn from_minor_flag(minor_units: bool) -> Self {
        if minor_units {
            MoneyConvention::MinorUnits
        } else {
            MoneyConvention::MajorUnits
        }
    }
}

/// One time-stamped record of a metric series, after normalization.
/// The date key is always non-empty and truncated to `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesRow {
    pub date: String,
    pub values: BTreeMap<String, f64>,
}

impl SeriesRow {
    /// Field lookup with the same defaulting the coercion layer applies.
    pub fn value(&self, field: &str) -> f64 {
        self.values.get(field).copied().unwrap_or(0.0)
    }
}

/// The named time series the dashboard plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKind {
    Investment,
    LeadsDaily,
    SalesDaily,
    CplDaily,
}

impl SeriesKind {
    pub const ALL: [SeriesKind; 4] = [
        SeriesKind::Investment,
        SeriesKind::LeadsDaily,
        SeriesKind::SalesDaily,
        SeriesKind::CplDaily,
    ];

    /// Sub-collection key inside the resolved payload object.
    pub fn key(&self) -> &'static str {
        match self {
            SeriesKind::Investment => "investment",
            SeriesKind::LeadsDaily => "leads_daily",
            SeriesKind::SalesDaily => "sales_daily",
            SeriesKind::CplDaily => "cpl_daily",
        }
    }
}

/// Accumulated scalars one refresh cycle produces. Rebuilt from scratch on
/// every successful fetch; never shared across cycles.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Totals {
    pub investment_total: f64,
    pub leads_total: f64,
    pub clicks_total: f64,
    pub impressions_total: f64,
}

/// Scalar KPIs extracted from the payload's `kpis` object (plus the first
/// `subscribers` row). Values arrive pre-aggregated upstream and are only
/// coerced, never re-derived here.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScalarKpis {
    pub cac_daily: f64,
    pub cac_month: f64,
    pub cac_range: f64,
    pub sales_today: f64,
    pub sales_month: f64,
    pub monthly_plans: f64,
    pub annual_plans: f64,
    pub conversion_pct: f64,
    pub total_leads: f64,
    pub clicks_total: f64,
    pub impressions_total: f64,
    pub ctr_pct: f64,
    pub goal_pct: f64,
    pub total_subscribers: f64,
}

/// Per-channel spend breakdown for the investment series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct InvestmentBreakdown {
    pub facebook_total: f64,
    pub google_total: f64,
    pub total: f64,
}

/// A derived metric, or the sentinel for a ratio whose denominator was not
/// positive. Call sites choose how to present the sentinel (zero or a dash).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Metric {
    Value(f64),
    NotComputable,
}

impl Metric {
    pub fn value(&self) -> Option<f64> {
        match self {
            Metric::Value(v) => Some(*v),
            Metric::NotComputable => None,
        }
    }

    pub fn or_zero(&self) -> f64 {
        self.value().unwrap_or(0.0)
    }
}

impl Default for Metric {
    fn default() -> Self {
        Metric::NotComputable
    }
}

/// Cost KPIs combining the investment total with lead/click/impression
/// totals from the same cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CostKpis {
    pub cost_per_lead: Metric,
    pub cost_per_click: Metric,
    pub cost_per_mille: Metric,
}

/// Date-range parameters forwarded to the upstream webhook. The engine does
/// not require start <= end; the upstream treats the range as-is.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateRange {
    pub entry_start: String,
    pub entry_end: String,
}

impl DateRange {
    pub fn new(entry_start: impl Into<String>, entry_end: impl Into<String>) -> Self {
        Self {
            entry_start: entry_start.into(),
            entry_end: entry_end.into(),
        }
    }
}

/// Everything one refresh cycle produced, in renderable form.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DashboardSnapshot {
    pub kpis: ScalarKpis,
    pub investment: InvestmentBreakdown,
    pub cost: CostKpis,
    pub series: BTreeMap<SeriesKind, Vec<SeriesRow>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_helpers() {
        assert_eq!(Metric::Value(12.5).value(), Some(12.5));
        assert_eq!(Metric::Value(12.5).or_zero(), 12.5);
        assert_eq!(Metric::NotComputable.value(), None);
        assert_eq!(Metric::NotComputable.or_zero(), 0.0);
    }

    #[test]
    fn test_metric_serializes_sentinel_as_null() {
        let json = serde_json::to_value(CostKpis {
            cost_per_lead: Metric::Value(15.0),
            cost_per_click: Metric::NotComputable,
            cost_per_mille: Metric::NotComputable,
        })
        .unwrap();

        assert_eq!(json["cost_per_lead"], serde_json::json!(15.0));
        assert!(json["cost_per_click"].is_null());
    }

    #[test]
    fn test_series_row_value_defaults_missing_fields_to_zero() {
        let row = SeriesRow {
            date: "2024-01-01".to_string(),
            values: BTreeMap::from([("leads_count".to_string(), 10.0)]),
        };
        assert_eq!(row.value("leads_count"), 10.0);
        assert_eq!(row.value("missing"), 0.0);
    }
}
