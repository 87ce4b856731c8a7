use serde_json::Value as JsonValue;

use crate::error::DecodeError;

/// Decode a response body into a JSON tree.
pub fn decode_payload(body: &[u8]) -> Result<JsonValue, DecodeError> {
    Ok(serde_json::from_slice(body)?)
}
