use super::value::Value;

/// Replace every NaN or infinite float in the tree with the integer `0`.
pub fn sanitize(value: Value) -> Value {
    match value {
        Value::Float(f) if !f.is_finite() => Value::Int(0),
        Value::Seq(items) => Value::Seq(items.into_iter().map(sanitize).collect()),
        Value::Map(entries) => {
            Value::Map(entries.into_iter().map(|(k, v)| (k, sanitize(v))).collect())
        }
        other => other,
    }
}

/// Whether any float in the tree is NaN or infinite.
pub fn contains_non_finite(value: &Value) -> bool {
    match value {
        Value::Float(f) => !f.is_finite(),
        Value::Seq(items) => items.iter().any(contains_non_finite),
        Value::Map(entries) => entries.iter().any(|(_, v)| contains_non_finite(v)),
        _ => false,
    }
}
