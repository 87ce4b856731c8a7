mod status;
mod structure;
mod typed;

pub use status::{assert_status, is_json_content_type};
pub use structure::{assert_structure, expected_keys};
pub use typed::{
    assert_array_len, assert_boolean_eq, assert_empty_array, assert_integer_eq, assert_item_count,
    assert_kind, assert_string_eq, parse_boolean_literal, ValueKind,
};

use serde_json::Value as JsonValue;

/// Compact JSON for failure messages; `nothing` when the value is absent.
pub(crate) fn render(value: Option<&JsonValue>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "nothing".to_string(),
    }
}
