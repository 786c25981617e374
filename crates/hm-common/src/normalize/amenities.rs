use serde_json::Value;

/// Flattens every stored amenities shape into trimmed, non-empty strings.
///
/// Accepted shapes (order preserved, no dedup):
/// - `["Wi-Fi", "AC"]`
/// - `["[\"Wi-Fi\",\"AC\"]"]` (array wrapping a JSON-encoded array)
/// - `"[\"Wi-Fi\",\"AC\"]"`
/// - `"Wi-Fi, AC"` / `"Wi-Fi"`
pub fn normalize_amenities(value: Option<&Value>) -> Vec<String> {
    let mut out = Vec::new();
    match value {
        Some(Value::Array(items)) => {
            for item in items {
                match item {
                    Value::String(s) => match decode_array(s) {
                        Some(inner) => push_strings(&mut out, &inner),
                        None => push_trimmed(&mut out, s),
                    },
                    Value::Array(inner) => push_strings(&mut out, inner),
                    _ => {}
                }
            }
        }
        Some(Value::String(s)) => match decode_array(s) {
            Some(inner) => push_strings(&mut out, &inner),
            None => s.split(',').for_each(|part| push_trimmed(&mut out, part)),
        },
        _ => {}
    }
    out
}

fn decode_array(raw: &str) -> Option<Vec<Value>> {
    if !raw.trim_start().starts_with('[') {
        return None;
    }
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(items)) => Some(items),
        _ => None,
    }
}

fn push_strings(out: &mut Vec<String>, items: &[Value]) {
    for item in items {
        if let Value::String(s) = item {
            push_trimmed(out, s);
        }
    }
}

fn push_trimmed(out: &mut Vec<String>, raw: &str) {
    let trimmed = raw.trim();
    if !trimmed.is_empty() {
        out.push(trimmed.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn plain_arrays_are_trimmed() {
        let value = json!([" Wi-Fi ", "", "AC", 3]);
        assert_eq!(normalize_amenities(Some(&value)), vec!["Wi-Fi", "AC"]);
    }

    #[test]
    fn double_encoded_array_is_unwrapped() {
        let value = json!(["[\"Wi-Fi\",\"AC\"]"]);
        assert_eq!(normalize_amenities(Some(&value)), vec!["Wi-Fi", "AC"]);
    }

    #[test]
    fn encoded_string_and_comma_lists() {
        assert_eq!(
            normalize_amenities(Some(&json!("[\"Laundry\",\"Gym\"]"))),
            vec!["Laundry", "Gym"]
        );
        assert_eq!(
            normalize_amenities(Some(&json!("Wi-Fi, AC ,, Parking"))),
            vec!["Wi-Fi", "AC", "Parking"]
        );
        assert_eq!(normalize_amenities(Some(&json!("Wi-Fi"))), vec!["Wi-Fi"]);
    }

    #[test]
    fn broken_encoding_falls_back_to_literal_text() {
        assert_eq!(
            normalize_amenities(Some(&json!(["[Wi-Fi"]))),
            vec!["[Wi-Fi"]
        );
    }

    #[test]
    fn duplicates_and_order_are_kept() {
        let value = json!(["AC", "Wi-Fi", "AC"]);
        assert_eq!(normalize_amenities(Some(&value)), vec!["AC", "Wi-Fi", "AC"]);
    }

    #[test]
    fn missing_or_other_shapes_are_empty() {
        assert!(normalize_amenities(None).is_empty());
        assert!(normalize_amenities(Some(&json!({"wifi": true}))).is_empty());
        assert!(normalize_amenities(Some(&json!(42))).is_empty());
    }
}
