//! Scenario world wrapping one [`ApiContext`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use cucumber::World;
use jsonapi_core::Settings;
use jsonapi_exec::{ApiContext, HttpClient, HttpError, HttpRequestParts, HttpResponseParts};

/// State shared by the steps of a single scenario.
///
/// The runner re-initializes the context from the loaded settings in a
/// `before` hook, so a world never sees state from a previous scenario.
#[derive(Debug, World)]
#[world(init = Self::new)]
pub struct ApiWorld {
    pub ctx: ApiContext,
}

impl ApiWorld {
    pub fn new() -> Self {
        Self {
            ctx: ApiContext::new(Arc::new(Unattached)),
        }
    }

    pub fn initialize(&mut self, settings: &Settings, http: Arc<dyn HttpClient>) {
        self.ctx = ApiContext::from_settings(http, settings);
    }
}

impl Default for ApiWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Stands in until the runner attaches the real client.
#[derive(Debug)]
struct Unattached;

#[async_trait]
impl HttpClient for Unattached {
    async fn send(
        &self,
        _req: HttpRequestParts,
        _timeout: Duration,
        _max_response_bytes: usize,
    ) -> Result<HttpResponseParts, HttpError> {
        Err(HttpError::Other(
            "no HTTP client attached to this scenario".to_string(),
        ))
    }
}
