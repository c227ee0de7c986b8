use serde_yaml::Value;

/// Render a YAML scalar as a string; `None` for sequences and mappings.
///
/// Bare numbers and booleans occasionally show up where hand-edited
/// files meant strings, so they are stringified rather than dropped.
pub(crate) fn scalar_str(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
