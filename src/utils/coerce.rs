use serde_json::Value;

/// Money and hour fields arrive as numbers or numeric strings depending on
/// the client; anything else counts as 0 rather than an error.
pub fn num_or_zero(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// `num_or_zero` over a named key of a JSON object.
pub fn field_num(payload: &Value, key: &str) -> f64 {
    payload.get(key).map_or(0.0, num_or_zero)
}

pub fn field_int(payload: &Value, key: &str) -> i64 {
    field_num(payload, key) as i64
}

pub fn field_str(payload: &Value, key: &str) -> Option<String> {
    payload
        .get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}
