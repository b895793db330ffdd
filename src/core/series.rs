use crate::core::coerce::{normalize_money, to_number};
use crate::core::resolve::{first_result_object, resolve_named_rows};
use crate::domain::model::{MoneyConvention, SeriesKind, SeriesRow};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldCoercion {
    /// Plain numeric coercion.
    Count,
    /// Numeric coercion plus minor-to-major unit conversion when configured.
    Money,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub coercion: FieldCoercion,
}

/// Shape of one named series: where its rows live in the payload, which
/// field carries the date key, and how each metric field is coerced.
#[derive(Debug, Clone, Copy)]
pub struct SeriesSpec {
    pub kind: SeriesKind,
    pub date_field: &'static str,
    pub fields: &'static [FieldSpec],
}

const INVESTMENT_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "facebook_amount",
        coercion: FieldCoercion::Money,
    },
    FieldSpec {
        name: "google_amount",
        coercion: FieldCoercion::Money,
    },
];

const LEADS_FIELDS: &[FieldSpec] = &[FieldSpec {
    name: "leads_count",
    coercion: FieldCoercion::Count,
}];

const SALES_FIELDS: &[FieldSpec] = &[FieldSpec {
    name: "records_count",
    coercion: FieldCoercion::Count,
}];

// cpl arrives already divided upstream, so it is a plain number here.
const CPL_FIELDS: &[FieldSpec] = &[FieldSpec {
    name: "cpl",
    coercion: FieldCoercion::Count,
}];

static SPECS: [SeriesSpec; 4] = [
    SeriesSpec {
        kind: SeriesKind::Investment,
        date_field: "created_at",
        fields: INVESTMENT_FIELDS,
    },
    SeriesSpec {
        kind: SeriesKind::LeadsDaily,
        date_field: "day",
        fields: LEADS_FIELDS,
    },
    SeriesSpec {
        kind: SeriesKind::SalesDaily,
        date_field: "day",
        fields: SALES_FIELDS,
    },
    SeriesSpec {
        kind: SeriesKind::CplDaily,
        date_field: "day",
        fields: CPL_FIELDS,
    },
];

impl SeriesSpec {
    pub fn for_kind(kind: SeriesKind) -> &'static SeriesSpec {
        match kind {
            SeriesKind::Investment => &SPECS[0],
            SeriesKind::LeadsDaily => &SPECS[1],
            SeriesKind::SalesDaily => &SPECS[2],
            SeriesKind::CplDaily => &SPECS[3],
        }
    }
}

/// Extracts the date key from a raw field value: non-empty, truncated to the
/// first ten characters so full timestamps collapse to `YYYY-MM-DD`.
pub fn date_key(v: &Value) -> Option<String> {
    let s = match v {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    if s.is_empty() {
        return None;
    }
    if s.chars().count() > 10 {
        Some(s.chars().take(10).collect())
    } else {
        Some(s)
    }
}

/// Runs the row pipeline for one named series: resolve rows, map fields,
/// drop rows without a date key, sort ascending by date. Duplicate dates
/// are kept; the sort is stable so they keep their payload order.
pub fn collect_series(
    raw: &Value,
    spec: &SeriesSpec,
    convention: MoneyConvention,
) -> Vec<SeriesRow> {
    let key = spec.kind.key();

    // Prefer the sub-collection on the resolved primary object; fall back to
    // the shape cascade over the whole response when it is missing there.
    let rows = match first_result_object(raw) {
        Some(primary) if primary.get(key).map_or(false, Value::is_array) => {
            resolve_named_rows(primary, key)
        }
        _ => resolve_named_rows(raw, key),
    };

    let mut out: Vec<SeriesRow> = rows
        .into_iter()
        .filter_map(|row| {
            let date = row.get(spec.date_field).and_then(date_key)?;
            let mut values = BTreeMap::new();
            for field in spec.fields {
                let raw_value = row.get(field.name).unwrap_or(&Value::Null);
                let n = match field.coercion {
                    FieldCoercion::Money => normalize_money(raw_value, convention),
                    FieldCoercion::Count => to_number(raw_value),
                };
                values.insert(field.name.to_string(), n);
            }
            Some(SeriesRow { date, values })
        })
        .collect();

    out.sort_by(|a, b| a.date.cmp(&b.date));
    out
}
