//! Redaction of credentials in request traces.

use std::collections::BTreeMap;

const REDACTED: &str = "<redacted>";

/// Header names whose values are credentials, compared case-insensitively.
const CREDENTIAL_HEADERS: &[&str] = &["authorization", "cookie", "proxy-authorization"];

/// Query parameter the context uses to pass a token without bearer auth.
const TOKEN_PARAM: &str = "access_token";

/// Copy of `headers` with credential values replaced.
pub fn sanitize_headers(headers: &BTreeMap<String, String>) -> BTreeMap<String, String> {
    headers
        .iter()
        .map(|(name, value)| {
            let credential = CREDENTIAL_HEADERS
                .iter()
                .any(|c| name.eq_ignore_ascii_case(c));
            let shown = if credential { REDACTED } else { value.as_str() };
            (name.clone(), shown.to_owned())
        })
        .collect()
}

/// `url` as text with the token query parameter masked.
pub fn sanitize_url(url: &url::Url) -> String {
    let Some(query) = url.query() else {
        return url.to_string();
    };
    if !url.query_pairs().any(|(k, _)| k == TOKEN_PARAM) {
        return url.to_string();
    }
    let masked = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(url::form_urlencoded::parse(query.as_bytes()).map(|(k, v)| {
            let v = if k == TOKEN_PARAM { REDACTED.into() } else { v };
            (k, v)
        }))
        .finish();
    let mut out = url.clone();
    out.set_query(Some(&masked));
    out.to_string()
}
