use std::fmt;
use std::str::FromStr;

use serde_json::Value as JsonValue;

use crate::assert::render;
use crate::error::{AssertionError, ExpectationError, UsageError};
use crate::scope::{navigate, ScopedPayload};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Object,
    Array,
    Integer,
    String,
    Boolean,
}

impl ValueKind {
    pub fn matches(self, v: &JsonValue) -> bool {
        match self {
            ValueKind::Object => v.is_object(),
            ValueKind::Array => v.is_array(),
            // `1.0` is a float in the source text, not an integer.
            ValueKind::Integer => v.is_i64() || v.is_u64(),
            ValueKind::String => v.is_string(),
            ValueKind::Boolean => v.is_boolean(),
        }
    }

    fn with_article(self) -> &'static str {
        match self {
            ValueKind::Object => "an object",
            ValueKind::Array => "an array",
            ValueKind::Integer => "an integer",
            ValueKind::String => "a string",
            ValueKind::Boolean => "a boolean",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueKind::Object => "object",
            ValueKind::Array => "array",
            ValueKind::Integer => "integer",
            ValueKind::String => "string",
            ValueKind::Boolean => "boolean",
        })
    }
}

impl FromStr for ValueKind {
    type Err = UsageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "object" => Ok(ValueKind::Object),
            "array" => Ok(ValueKind::Array),
            "integer" => Ok(ValueKind::Integer),
            "string" => Ok(ValueKind::String),
            "boolean" => Ok(ValueKind::Boolean),
            other => Err(UsageError(format!("Unknown value type '{other}'."))),
        }
    }
}

/// Look up `property` and require it to be of `kind`, returning the value.
fn typed_value<'a>(
    payload: &ScopedPayload<'a>,
    property: &str,
    kind: ValueKind,
) -> Result<&'a JsonValue, AssertionError> {
    let actual = payload.get(property);
    match actual {
        Some(v) if kind.matches(v) => Ok(v),
        other => Err(AssertionError::new(format!(
            "Asserting the [{property}] property in current scope [{}] is {}, found {}",
            payload.scope(),
            kind.with_article(),
            render(other)
        ))),
    }
}

pub fn assert_kind(
    payload: &ScopedPayload<'_>,
    property: &str,
    kind: ValueKind,
) -> Result<(), AssertionError> {
    typed_value(payload, property, kind).map(|_| ())
}

pub fn assert_array_len(
    payload: &ScopedPayload<'_>,
    property: &str,
    count: usize,
) -> Result<(), AssertionError> {
    let v = typed_value(payload, property, ValueKind::Array)?;
    let len = v.as_array().map_or(0, Vec::len);
    if len != count {
        return Err(AssertionError::new(format!(
            "Asserting the [{property}] array in current scope [{}] contains [{count}] items, found [{len}]",
            payload.scope()
        )));
    }
    Ok(())
}

/// Item count of the object or array at `property`, resolved from the
/// response root whatever scope is active.
pub fn assert_item_count(
    root: &JsonValue,
    property: &str,
    count: usize,
) -> Result<(), AssertionError> {
    let actual = navigate(root, Some(property));
    let len = match actual {
        Some(JsonValue::Array(items)) => Some(items.len()),
        Some(JsonValue::Object(map)) => Some(map.len()),
        _ => None,
    };
    let found = match len {
        Some(len) if len == count => return Ok(()),
        Some(len) => format!("[{len}]"),
        None => render(actual),
    };
    Err(AssertionError::new(format!(
        "Asserting the [{property}] property contains [{count}] items, found {found}"
    )))
}

pub fn assert_empty_array(
    payload: &ScopedPayload<'_>,
    property: &str,
) -> Result<(), AssertionError> {
    let actual = payload.get(property);
    match actual {
        Some(JsonValue::Array(items)) if items.is_empty() => Ok(()),
        other => Err(AssertionError::new(format!(
            "Asserting the [{property}] property in current scope [{}] is an empty array, found {}",
            payload.scope(),
            render(other)
        ))),
    }
}

pub fn assert_integer_eq(
    payload: &ScopedPayload<'_>,
    property: &str,
    expected: i64,
) -> Result<(), AssertionError> {
    let v = typed_value(payload, property, ValueKind::Integer)?;
    if v.as_i64() != Some(expected) {
        return Err(equality_failure(
            payload,
            property,
            ValueKind::Integer,
            &expected.to_string(),
            v,
        ));
    }
    Ok(())
}

pub fn assert_string_eq(
    payload: &ScopedPayload<'_>,
    property: &str,
    expected: &str,
) -> Result<(), AssertionError> {
    let v = typed_value(payload, property, ValueKind::String)?;
    if v.as_str() != Some(expected) {
        return Err(equality_failure(payload, property, ValueKind::String, expected, v));
    }
    Ok(())
}

/// Only the exact literals `true` and `false` are accepted.
pub fn parse_boolean_literal(literal: &str) -> Result<bool, UsageError> {
    match literal {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(UsageError(format!(
            "The expected value can only be 'true' or 'false', got '{other}'."
        ))),
    }
}

/// The literal is validated before the payload is looked at.
pub fn assert_boolean_eq(
    payload: &ScopedPayload<'_>,
    property: &str,
    literal: &str,
) -> Result<(), ExpectationError> {
    let expected = parse_boolean_literal(literal)?;
    let v = typed_value(payload, property, ValueKind::Boolean)?;
    if v.as_bool() != Some(expected) {
        return Err(equality_failure(payload, property, ValueKind::Boolean, literal, v).into());
    }
    Ok(())
}

fn equality_failure(
    payload: &ScopedPayload<'_>,
    property: &str,
    kind: ValueKind,
    expected: &str,
    actual: &JsonValue,
) -> AssertionError {
    AssertionError::new(format!(
        "Asserting the [{property}] property in current scope [{}] is {} equaling [{expected}], found {actual}",
        payload.scope(),
        kind.with_article()
    ))
}
