//! OAuth token grants: payload construction and token response handling.
//!
//! Sending the request and installing the token is the context's job; this
//! module only knows what goes on the wire and how to read the answer.

use jsonapi_core::{decode_payload, OAuthSettings, Secret, TokenEncoding};
use serde_json::Value as JsonValue;

use crate::error::StepError;
use crate::http::HttpResponseParts;

pub const MISSING_OAUTH: &str = "OAuth details not found in the settings file.";

#[derive(Debug, Clone)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: Secret,
}

impl ClientCredentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<Secret>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Grant {
    Password { username: String, password: Secret },
    /// Explicit credentials win over the configured client.
    ClientCredentials { credentials: Option<ClientCredentials> },
}

impl Grant {
    pub fn password(username: impl Into<String>, password: impl Into<Secret>) -> Self {
        Grant::Password {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn client_credentials() -> Self {
        Grant::ClientCredentials { credentials: None }
    }

    pub fn client_credentials_with(
        client_id: impl Into<String>,
        client_secret: impl Into<Secret>,
    ) -> Self {
        Grant::ClientCredentials {
            credentials: Some(ClientCredentials::new(client_id, client_secret)),
        }
    }

    pub fn grant_type(&self) -> &'static str {
        match self {
            Grant::Password { .. } => "password",
            Grant::ClientCredentials { .. } => "client_credentials",
        }
    }
}

/// Ordered token request fields for `grant`.
pub fn grant_fields(
    grant: &Grant,
    scope: Option<&str>,
    oauth: &OAuthSettings,
) -> Vec<(&'static str, String)> {
    let mut fields = vec![("grant_type", grant.grant_type().to_string())];
    match grant {
        Grant::Password { username, password } => {
            fields.push(("username", username.clone()));
            fields.push(("password", password.expose().to_string()));
            if let Some(scope) = scope {
                fields.push(("scope", scope.to_string()));
            }
            if oauth.password_grant_requires_client_credentials {
                fields.push(("client_id", oauth.client_id.clone()));
                fields.push(("client_secret", oauth.client_secret.expose().to_string()));
            }
        }
        Grant::ClientCredentials { credentials } => {
            let (id, secret) = match credentials {
                Some(c) => (c.client_id.clone(), c.client_secret.expose().to_string()),
                None => (oauth.client_id.clone(), oauth.client_secret.expose().to_string()),
            };
            fields.push(("client_id", id));
            fields.push(("client_secret", secret));
            if let Some(scope) = scope {
                fields.push(("scope", scope.to_string()));
            }
        }
    }
    fields
}

pub fn encode_fields(fields: &[(&'static str, String)], encoding: TokenEncoding) -> Vec<u8> {
    match encoding {
        TokenEncoding::Form => url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(fields.iter().map(|(k, v)| (*k, v.as_str())))
            .finish()
            .into_bytes(),
        TokenEncoding::Json => {
            let map: serde_json::Map<String, JsonValue> = fields
                .iter()
                .map(|(k, v)| (k.to_string(), JsonValue::String(v.clone())))
                .collect();
            JsonValue::Object(map).to_string().into_bytes()
        }
    }
}

/// Read the access token out of a token endpoint response.
pub fn read_access_token(resp: &HttpResponseParts) -> Result<String, StepError> {
    if resp.status != 200 {
        let description = decode_payload(&resp.body).ok().and_then(|v| {
            v.get("error_description")
                .and_then(JsonValue::as_str)
                .map(str::to_owned)
        });
        return Err(StepError::Authorization(match description {
            Some(d) => format!("Authorization Error: {d}"),
            None => "Authorization Error".to_string(),
        }));
    }

    let body = decode_payload(&resp.body)?;
    body.get("access_token")
        .and_then(JsonValue::as_str)
        .map(str::to_owned)
        .ok_or_else(|| {
            StepError::Authorization(
                "Authorization Error: no access_token in token response".to_string(),
            )
        })
}
