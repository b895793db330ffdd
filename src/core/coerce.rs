use crate::domain::model::MoneyConvention;
use serde_json::Value;

/// Total numeric coercion: any JSON value becomes a finite f64, defaulting
/// to zero. Upstream fields flip between numbers and numeric strings, so
/// both are accepted; anything else is treated as absent.
pub fn to_number(v: &Value) -> f64 {
    let n = match v {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse::<f64>().unwrap_or(f64::NAN)
            }
        }
        Value::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        _ => 0.0,
    };

    if n.is_finite() {
        n
    } else {
        0.0
    }
}

/// Money coercion: integer minor units become major units when configured.
/// Pure function of the value and the convention.
pub fn normalize_money(v: &Value, convention: MoneyConvention) -> f64 {
    match convention {
        MoneyConvention::MinorUnits => to_number(v) / 100.0,
        MoneyConvention::MajorUnits => to_number(v),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_to_number_is_total() {
        assert_eq!(to_number(&json!(42)), 42.0);
        assert_eq!(to_number(&json!(42.5)), 42.5);
        assert_eq!(to_number(&json!("42.5")), 42.5);
        assert_eq!(to_number(&json!("  7 ")), 7.0);
        assert_eq!(to_number(&json!("")), 0.0);
        assert_eq!(to_number(&json!("   ")), 0.0);
        assert_eq!(to_number(&json!("abc")), 0.0);
        assert_eq!(to_number(&json!(null)), 0.0);
        assert_eq!(to_number(&json!(true)), 1.0);
        assert_eq!(to_number(&json!(false)), 0.0);
        assert_eq!(to_number(&json!([1, 2])), 0.0);
        assert_eq!(to_number(&json!({"a": 1})), 0.0);
    }

    #[test]
    fn test_to_number_rejects_non_finite_strings() {
        assert_eq!(to_number(&json!("inf")), 0.0);
        assert_eq!(to_number(&json!("NaN")), 0.0);
        assert_eq!(to_number(&json!("-inf")), 0.0);
    }

    #[test]
    fn test_normalize_money_round_trip() {
        assert_eq!(
            normalize_money(&json!(12345), MoneyConvention::MinorUnits),
            123.45
        );
        assert_eq!(
            normalize_money(&json!(12345), MoneyConvention::MajorUnits),
            12345.0
        );
        assert_eq!(
            normalize_money(&json!("12345"), MoneyConvention::MinorUnits),
            123.45
        );
        assert_eq!(normalize_money(&json!(null), MoneyConvention::MinorUnits), 0.0);
    }
}
