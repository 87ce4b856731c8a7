//! Runner settings, read from a YAML or JSON document.
//!
//! Every field has a default so an empty document is a valid configuration.
//! The `oauth` block is the one exception: its absence is meaningful and
//! makes every grant step fail with a configuration error.

mod secret;

use std::time::Duration;

use serde::Deserialize;

pub use secret::Secret;

pub const DEFAULT_BASE_URL: &str = "http://localhost";
pub const DEFAULT_TOKEN_URI: &str = "/v1/oauth/token";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub base_url: String,
    pub parameters: Parameters,
    pub http: HttpSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            parameters: Parameters::default(),
            http: HttpSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Parameters {
    /// Token installed by the "I use the access token" step.
    pub access_token: Option<Secret>,
    pub oauth: Option<OAuthSettings>,
}

impl Parameters {
    /// Acquired and supplied tokens go into an `Authorization` header only when
    /// the OAuth block asks for it; otherwise they travel as a query parameter.
    pub fn use_bearer_token(&self) -> bool {
        self.oauth.as_ref().is_some_and(|o| o.use_bearer_token)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OAuthSettings {
    pub uri: String,
    pub client_id: String,
    pub client_secret: Secret,
    pub password_grant_requires_client_credentials: bool,
    pub use_bearer_token: bool,
    pub token_request_encoding: TokenEncoding,
}

impl Default for OAuthSettings {
    fn default() -> Self {
        Self {
            uri: DEFAULT_TOKEN_URI.to_string(),
            client_id: "testclient".to_string(),
            client_secret: Secret::from("testsecret"),
            password_grant_requires_client_credentials: false,
            use_bearer_token: false,
            token_request_encoding: TokenEncoding::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenEncoding {
    /// `application/x-www-form-urlencoded`
    #[default]
    Form,
    Json,
}

impl TokenEncoding {
    pub fn content_type(self) -> &'static str {
        match self {
            TokenEncoding::Form => "application/x-www-form-urlencoded",
            TokenEncoding::Json => "application/json",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    pub timeout_ms: u64,
    pub max_response_bytes: usize,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_ms: 30_000,
            max_response_bytes: 4_194_304,
        }
    }
}

impl HttpSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
