//! The per-scenario context every step operates on.
//!
//! A context is created fresh for each scenario and configured once by the
//! host framework (`set_base_url` / `set_parameters`) before the first step.
//! It holds the header set for the next request, the request payload, the
//! installed access token, the active scope and the current response.

use std::fmt;
use std::sync::Arc;

use jsonapi_core::settings::DEFAULT_BASE_URL;
use jsonapi_core::{
    assert_array_len, assert_boolean_eq, assert_empty_array, assert_integer_eq, assert_item_count,
    assert_kind, assert_status, assert_string_eq, assert_structure, decode_payload, HttpSettings,
    Parameters, Scope, ScopedPayload, Settings, ValueKind,
};
use serde_json::Value as JsonValue;

use crate::echo::{render_request, render_response};
use crate::error::StepError;
use crate::headers::{HeaderSet, AUTHORIZATION, CONTENT_TYPE};
use crate::http::{HttpClient, HttpMethod, HttpRequestParts, HttpResponseParts};
use crate::oauth::{self, Grant, MISSING_OAUTH};
use crate::sanitize::{sanitize_headers, sanitize_url};

const MISSING_ACCESS_TOKEN: &str = "The access token is not found in the settings file.";

/// How an installed token is attached to outgoing requests.
#[derive(Clone, PartialEq, Eq)]
pub enum AccessToken {
    /// `Authorization: Bearer <token>` on every request without its own
    /// `Authorization` header.
    Bearer(String),
    /// `access_token=<token>` query parameter, same condition.
    Query(String),
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessToken::Bearer(_) => f.write_str("Bearer(<redacted>)"),
            AccessToken::Query(_) => f.write_str("Query(<redacted>)"),
        }
    }
}

pub struct ApiContext {
    http: Arc<dyn HttpClient>,
    base_url: String,
    parameters: Parameters,
    http_settings: HttpSettings,
    headers: HeaderSet,
    request_payload: Option<String>,
    token: Option<AccessToken>,
    scope: Scope,
    last_request: Option<HttpRequestParts>,
    response: Option<HttpResponseParts>,
}

impl fmt::Debug for ApiContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiContext")
            .field("base_url", &self.base_url)
            .field("headers", &self.headers)
            .field("token", &self.token)
            .field("scope", &self.scope)
            .field("status", &self.response.as_ref().map(|r| r.status))
            .finish_non_exhaustive()
    }
}

impl ApiContext {
    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
            parameters: Parameters::default(),
            http_settings: HttpSettings::default(),
            headers: HeaderSet::new(),
            request_payload: None,
            token: None,
            scope: Scope::default(),
            last_request: None,
            response: None,
        }
    }

    pub fn from_settings(http: Arc<dyn HttpClient>, settings: &Settings) -> Self {
        let mut ctx = Self::new(http);
        ctx.configure(settings);
        ctx
    }

    /// Apply everything a settings document carries.
    pub fn configure(&mut self, settings: &Settings) {
        self.set_base_url(&settings.base_url);
        self.set_parameters(settings.parameters.clone());
        self.http_settings = settings.http.clone();
    }

    pub fn set_base_url(&mut self, url: &str) {
        self.base_url = url.trim_end_matches('/').to_string();
    }

    pub fn set_parameters(&mut self, parameters: Parameters) {
        self.parameters = parameters;
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn headers(&self) -> &HeaderSet {
        &self.headers
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn access_token(&self) -> Option<&AccessToken> {
        self.token.as_ref()
    }

    pub fn last_request(&self) -> Option<&HttpRequestParts> {
        self.last_request.as_ref()
    }

    pub fn response(&self) -> Result<&HttpResponseParts, StepError> {
        self.response.as_ref().ok_or(StepError::NoResponse)
    }

    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.insert(name, value);
    }

    /// Raw JSON text sent with the next PUT, POST or PATCH.
    pub fn set_payload(&mut self, raw: impl Into<String>) {
        self.request_payload = Some(raw.into());
    }

    pub fn use_configured_access_token(&mut self) -> Result<(), StepError> {
        let token = self
            .parameters
            .access_token
            .as_ref()
            .map(|t| t.expose().to_string())
            .ok_or_else(|| StepError::Configuration(MISSING_ACCESS_TOKEN.to_string()))?;
        self.install_token(token);
        Ok(())
    }

    pub fn use_access_token(&mut self, token: impl Into<String>) {
        self.install_token(token.into());
    }

    fn install_token(&mut self, token: String) {
        let token = if self.parameters.use_bearer_token() {
            AccessToken::Bearer(token)
        } else {
            AccessToken::Query(token)
        };
        tracing::info!(mode = ?token, "access token installed");
        self.token = Some(token);
    }

    /// Acquire a token through `grant` and install it for later requests.
    ///
    /// The token response becomes the current response, so its status and
    /// body can be asserted on like any other.
    pub async fn oauth(&mut self, grant: Grant, scope: Option<&str>) -> Result<(), StepError> {
        let settings = self
            .parameters
            .oauth
            .as_ref()
            .ok_or_else(|| StepError::Configuration(MISSING_OAUTH.to_string()))?;

        let encoding = settings.token_request_encoding;
        let body = oauth::encode_fields(&oauth::grant_fields(&grant, scope, settings), encoding);
        let url = self.resolve_url(&settings.uri)?;

        let mut headers = self.headers.clone();
        headers.insert(CONTENT_TYPE, encoding.content_type());

        let resp = self
            .send(HttpRequestParts {
                method: HttpMethod::Post,
                url,
                headers: headers.to_map(),
                body,
            })
            .await?;

        let token = oauth::read_access_token(resp).inspect_err(|e| {
            tracing::warn!(grant = grant.grant_type(), error = %e, "token request rejected");
        })?;
        self.install_token(token);
        Ok(())
    }

    /// Send `METHOD resource` relative to the base URL.
    ///
    /// The header set is back at its baseline afterwards, whatever the outcome.
    pub async fn request(
        &mut self,
        method: HttpMethod,
        resource: &str,
    ) -> Result<&HttpResponseParts, StepError> {
        let mut headers = std::mem::take(&mut self.headers);
        let mut url = self.resolve_url(resource)?;

        if !headers.contains(AUTHORIZATION) {
            match &self.token {
                Some(AccessToken::Bearer(t)) => {
                    headers.insert(AUTHORIZATION, format!("Bearer {t}"))
                }
                Some(AccessToken::Query(t)) => {
                    url.query_pairs_mut().append_pair("access_token", t);
                }
                None => {}
            }
        }

        let body = if method.carries_body() {
            self.request_payload.clone().unwrap_or_default().into_bytes()
        } else {
            Vec::new()
        };

        self.send(HttpRequestParts {
            method,
            url,
            headers: headers.to_map(),
            body,
        })
        .await
    }

    fn resolve_url(&self, resource: &str) -> Result<url::Url, StepError> {
        let raw = if resource.starts_with("http://") || resource.starts_with("https://") {
            resource.to_string()
        } else {
            format!("{}{}", self.base_url, resource)
        };
        url::Url::parse(&raw).map_err(|e| StepError::InvalidUrl {
            url: raw,
            reason: e.to_string(),
        })
    }

    async fn send(&mut self, req: HttpRequestParts) -> Result<&HttpResponseParts, StepError> {
        tracing::debug!(
            method = %req.method,
            url = %sanitize_url(&req.url),
            headers = ?sanitize_headers(&req.headers),
            "dispatching request"
        );
        self.last_request = Some(req.clone());
        let resp = self
            .http
            .send(req, self.http_settings.timeout(), self.http_settings.max_response_bytes)
            .await?;
        tracing::debug!(status = resp.status, bytes = resp.body.len(), "received response");
        Ok(self.response.insert(resp))
    }

    pub fn assert_status(&self, expected: u16) -> Result<(), StepError> {
        let resp = self.response()?;
        Ok(assert_status(expected, resp.status, resp.content_type(), &resp.body)?)
    }

    pub fn scope_into_property(&mut self, path: impl Into<String>) {
        self.scope.select(path);
    }

    pub fn scope_into_first_element(&mut self, name: &str) {
        self.scope.select_first_element(name);
    }

    /// The current response body, decoded.
    pub fn payload(&self) -> Result<JsonValue, StepError> {
        Ok(decode_payload(&self.response()?.body)?)
    }

    fn with_scoped<T, E>(
        &self,
        check: impl FnOnce(&ScopedPayload<'_>) -> Result<T, E>,
    ) -> Result<T, StepError>
    where
        StepError: From<E>,
    {
        let root = self.payload()?;
        Ok(check(&ScopedPayload::new(&root, &self.scope))?)
    }

    pub fn assert_structure<S: AsRef<str>>(&self, expected: &[S]) -> Result<(), StepError> {
        self.with_scoped(|p| assert_structure(p, expected))
    }

    pub fn assert_kind(&self, property: &str, kind: ValueKind) -> Result<(), StepError> {
        self.with_scoped(|p| assert_kind(p, property, kind))
    }

    pub fn assert_array_len(&self, property: &str, count: usize) -> Result<(), StepError> {
        self.with_scoped(|p| assert_array_len(p, property, count))
    }

    /// Unscoped: `property` resolves from the response root.
    pub fn assert_response_item_count(
        &self,
        property: &str,
        count: usize,
    ) -> Result<(), StepError> {
        Ok(assert_item_count(&self.payload()?, property, count)?)
    }

    pub fn assert_empty_array(&self, property: &str) -> Result<(), StepError> {
        self.with_scoped(|p| assert_empty_array(p, property))
    }

    pub fn assert_integer_eq(&self, property: &str, expected: i64) -> Result<(), StepError> {
        self.with_scoped(|p| assert_integer_eq(p, property, expected))
    }

    pub fn assert_string_eq(&self, property: &str, expected: &str) -> Result<(), StepError> {
        self.with_scoped(|p| assert_string_eq(p, property, expected))
    }

    /// `literal` must be `true` or `false`; anything else is a usage error.
    pub fn assert_boolean_eq(&self, property: &str, literal: &str) -> Result<(), StepError> {
        jsonapi_core::parse_boolean_literal(literal)?;
        self.with_scoped(|p| assert_boolean_eq(p, property, literal))
    }

    pub fn echo_last_request(&self) -> Result<String, StepError> {
        self.last_request
            .as_ref()
            .map(render_request)
            .ok_or(StepError::NoRequest)
    }

    pub fn echo_last_response(&self) -> Result<String, StepError> {
        Ok(render_response(self.response()?))
    }
}
