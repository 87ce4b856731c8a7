#![forbid(unsafe_code)]

//! Runtime for JSON API scenarios: one [`ApiContext`] per scenario, talking to
//! the API through an injected [`HttpClient`].
//!
//! Pure lookups and assertions live in `jsonapi-core`; this crate owns the
//! state that changes from step to step (headers, token, scope, last response).

pub mod context;
pub mod echo;
pub mod error;
pub mod headers;
pub mod http;
pub mod oauth;
pub mod sanitize;

pub use crate::context::{AccessToken, ApiContext};
pub use crate::error::StepError;
pub use crate::headers::HeaderSet;
pub use crate::http::{
    HttpClient, HttpError, HttpMethod, HttpRequestParts, HttpResponseParts, ReqwestHttpClient,
};
pub use crate::oauth::{ClientCredentials, Grant};
