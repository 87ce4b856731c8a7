use serde_json::Value as JsonValue;

use crate::assert::render;
use crate::error::AssertionError;
use crate::scope::ScopedPayload;

/// Split a docstring into expected keys: one per line, trimmed, blanks skipped.
pub fn expected_keys(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect()
}

/// The scoped payload's key set must equal `expected` exactly (order-insensitive).
///
/// Arrays are matched on their indices, so `["0", "1"]` matches a two-element
/// array.
pub fn assert_structure<S: AsRef<str>>(
    payload: &ScopedPayload<'_>,
    expected: &[S],
) -> Result<(), AssertionError> {
    let current = payload.current();
    let scope = payload.scope();

    let mut remaining: Vec<String> = match current {
        Some(JsonValue::Object(map)) => map.keys().cloned().collect(),
        Some(JsonValue::Array(items)) => (0..items.len()).map(|i| i.to_string()).collect(),
        other => {
            return Err(AssertionError::new(format!(
                "Asserting the structure of the scope [{scope}] requires an object or array: {}",
                render(other)
            )));
        }
    };

    for key in expected {
        let key = key.as_ref();
        match remaining.iter().position(|k| k == key) {
            Some(i) => {
                remaining.remove(i);
            }
            None => {
                return Err(AssertionError::new(format!(
                    "Asserting the [{key}] property exists in the scope [{scope}]: {}",
                    render(current)
                )));
            }
        }
    }

    if !remaining.is_empty() {
        return Err(AssertionError::new(format!(
            "Unexpected properties [{}] found in payload: {}",
            remaining.join(", "),
            render(current)
        )));
    }
    Ok(())
}
