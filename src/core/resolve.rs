use serde_json::Value;

/// Structural classification of a raw response. The upstream webhook
/// sometimes wraps the payload in a one-element `res` array, sometimes
/// returns a bare array, sometimes the object directly; there is no version
/// flag, so shapes are tried in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultShape {
    WrappedInRes,
    BareArray,
    BareObject,
    None,
}

impl ResultShape {
    pub fn detect(raw: &Value) -> ResultShape {
        if let Some(res) = raw.get("res").and_then(Value::as_array) {
            if res.first().map_or(false, Value::is_object) {
                return ResultShape::WrappedInRes;
            }
        }
        if let Value::Array(items) = raw {
            if items.first().map_or(false, Value::is_object) {
                return ResultShape::BareArray;
            }
        }
        if raw.is_object() {
            return ResultShape::BareObject;
        }
        ResultShape::None
    }
}

/// Locates the primary result object holding the KPI and series
/// sub-collections. Borrows; the raw response is never mutated.
pub fn first_result_object(raw: &Value) -> Option<&Value> {
    match ResultShape::detect(raw) {
        ResultShape::WrappedInRes => raw
            .get("res")
            .and_then(Value::as_array)
            .and_then(|res| res.first()),
        ResultShape::BareArray => raw.as_array().and_then(|items| items.first()),
        ResultShape::BareObject => Some(raw),
        ResultShape::None => None,
    }
}

/// Locates the row array for a named sub-collection under the wrapping
/// conventions the upstream has been observed to use, first match wins.
/// Unrecognized shapes degrade to an empty row list rather than an error.
pub fn resolve_named_rows<'a>(payload: &'a Value, key: &str) -> Vec<&'a Value> {
    if let Value::Array(items) = payload {
        // A one-element array whose head wraps the named collection.
        if let Some(rows) = items
            .first()
            .and_then(|first| first.get(key))
            .and_then(Value::as_array)
        {
            return rows.iter().collect();
        }
        // Otherwise the array already is the row list.
        return items.iter().collect();
    }

    let Some(obj) = payload.as_object() else {
        return Vec::new();
    };

    if let Some(rows) = obj.get(key).and_then(Value::as_array) {
        return rows.iter().collect();
    }

    if let Some(res) = obj.get("res").and_then(Value::as_array) {
        if let Some(first) = res.first() {
            if let Some(rows) = first.get(key).and_then(Value::as_array) {
                return rows.iter().collect();
            }
            if let Value::Array(rows) = first {
                return rows.iter().collect();
            }
        }
    }

    for envelope in ["data", "items", "result"] {
        if let Some(rows) = obj.get(envelope).and_then(Value::as_array) {
            return rows.iter().collect();
        }
    }

    // A map of row objects keyed by some id counts as a row list.
    if !obj.is_empty() && obj.values().all(Value::is_object) {
        return obj.values().collect();
    }

    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detect_shapes_in_priority_order() {
        assert_eq!(
            ResultShape::detect(&json!({"res": [{"kpis": {}}]})),
            ResultShape::WrappedInRes
        );
        assert_eq!(
            ResultShape::detect(&json!([{"kpis": {}}])),
            ResultShape::BareArray
        );
        assert_eq!(
            ResultShape::detect(&json!({"kpis": {}})),
            ResultShape::BareObject
        );
        assert_eq!(ResultShape::detect(&json!([1, 2, 3])), ResultShape::None);
        assert_eq!(ResultShape::detect(&json!(null)), ResultShape::None);
        assert_eq!(ResultShape::detect(&json!("text")), ResultShape::None);
    }

    #[test]
    fn test_detect_res_wrapper_needs_object_head() {
        // res present but its head is not an object: the payload itself is
        // still a plain object.
        assert_eq!(
            ResultShape::detect(&json!({"res": [1, 2]})),
            ResultShape::BareObject
        );
        assert_eq!(
            ResultShape::detect(&json!({"res": []})),
            ResultShape::BareObject
        );
    }

    #[test]
    fn test_first_result_object_equivalent_shapes() {
        let expected = json!({"kpis": {"a": 1}});

        for raw in [
            json!({"res": [{"kpis": {"a": 1}}]}),
            json!([{"kpis": {"a": 1}}]),
            json!({"kpis": {"a": 1}}),
        ] {
            assert_eq!(first_result_object(&raw), Some(&expected));
        }

        assert_eq!(first_result_object(&json!(null)), None);
        assert_eq!(first_result_object(&json!([])), None);
        assert_eq!(first_result_object(&json!(42)), None);
    }

    #[test]
    fn test_named_rows_direct_and_array_wrapped() {
        let row = json!({"created_at": "2024-01-01"});

        let direct = json!({"investment": [row.clone()]});
        assert_eq!(resolve_named_rows(&direct, "investment"), vec![&row]);

        let wrapped = json!([{"investment": [row.clone()]}]);
        assert_eq!(resolve_named_rows(&wrapped, "investment"), vec![&row]);
    }

    #[test]
    fn test_named_rows_bare_array_is_the_row_list() {
        let payload = json!([{"created_at": "2024-01-01"}, {"created_at": "2024-01-02"}]);
        assert_eq!(resolve_named_rows(&payload, "investment").len(), 2);
    }

    #[test]
    fn test_named_rows_under_res() {
        let row = json!({"created_at": "2024-01-01"});

        let named = json!({"res": [{"investment": [row.clone()]}]});
        assert_eq!(resolve_named_rows(&named, "investment"), vec![&row]);

        let headless = json!({"res": [[row.clone()]]});
        assert_eq!(resolve_named_rows(&headless, "investment"), vec![&row]);
    }

    #[test]
    fn test_named_rows_envelope_keys_in_order() {
        let payload = json!({
            "items": [{"id": 2}],
            "data": [{"id": 1}],
            "result": [{"id": 3}]
        });
        let rows = resolve_named_rows(&payload, "investment");
        assert_eq!(rows, vec![&json!({"id": 1})]);
    }

    #[test]
    fn test_named_rows_map_of_objects() {
        let payload = json!({
            "a": {"created_at": "2024-01-02"},
            "b": {"created_at": "2024-01-01"}
        });
        assert_eq!(resolve_named_rows(&payload, "investment").len(), 2);

        // A single non-object value disqualifies the map treatment.
        let mixed = json!({"a": {"x": 1}, "b": [1, 2]});
        assert!(resolve_named_rows(&mixed, "investment").is_empty());
    }

    #[test]
    fn test_named_rows_unrecognized_shapes_are_empty() {
        assert!(resolve_named_rows(&json!(null), "investment").is_empty());
        assert!(resolve_named_rows(&json!("text"), "investment").is_empty());
        assert!(resolve_named_rows(&json!(42), "investment").is_empty());
        assert!(resolve_named_rows(&json!({}), "investment").is_empty());
    }
}
