use crate::error::AssertionError;

const JSON_MEDIA_TYPE: &str = "application/json";

/// Compares the media type essence, ignoring parameters such as `charset`.
pub fn is_json_content_type(content_type: Option<&str>) -> bool {
    content_type
        .and_then(|ct| ct.split(';').next())
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case(JSON_MEDIA_TYPE))
}

/// The response status must equal `expected`.
///
/// On mismatch the message carries the response body, or a content type
/// complaint when the server did not answer with JSON at all.
pub fn assert_status(
    expected: u16,
    actual: u16,
    content_type: Option<&str>,
    body: &[u8],
) -> Result<(), AssertionError> {
    if expected == actual {
        return Ok(());
    }
    let detail = if is_json_content_type(content_type) {
        String::from_utf8_lossy(body).into_owned()
    } else {
        format!(
            "Expected '{JSON_MEDIA_TYPE}' content type but got '{}' instead.",
            content_type.unwrap_or("")
        )
    };
    Err(AssertionError::new(format!(
        "Expected a [{expected}] response but got [{actual}]: {detail}"
    )))
}
