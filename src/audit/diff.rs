//! Diff generation for audit logging
//!
//! Summarizes top-level field changes between two JSON snapshots.

use serde_json::Value;

/// Describe how `after` differs from `before`, or `None` if they're equal
///
/// Objects are compared field by field (one level deep); anything else is
/// shown as a whole-value change.
pub(crate) fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    let changes: Vec<String> = match (before, after) {
        (Value::Object(old), Value::Object(new)) => {
            let mut changes = Vec::new();
            for (key, old_val) in old {
                match new.get(key) {
                    Some(new_val) if new_val != old_val => changes.push(format!(
                        "{}: {} -> {}",
                        key,
                        format_value(old_val),
                        format_value(new_val)
                    )),
                    Some(_) => {}
                    None => changes.push(format!("{}: {} -> (removed)", key, format_value(old_val))),
                }
            }
            for (key, new_val) in new {
                if !old.contains_key(key) {
                    changes.push(format!("{}: (added) -> {}", key, format_value(new_val)));
                }
            }
            changes
        }
        _ if before != after => vec![format!(
            "{} -> {}",
            format_value(before),
            format_value(after)
        )],
        _ => Vec::new(),
    };

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => format!("\"{}\"", s),
        Value::Array(items) if items.iter().all(Value::is_string) => {
            let shown: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
            format!("[{}]", shown.join(", "))
        }
        Value::Array(items) => format!("[{} items]", items.len()),
        Value::Object(fields) => format!("{{{} fields}}", fields.len()),
        other => other.to_string(),
    }
}
