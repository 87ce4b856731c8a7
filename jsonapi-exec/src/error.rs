use jsonapi_core::{AssertionError, DecodeError, ExpectationError, UsageError};

use crate::http::HttpError;

/// Why a scenario step failed. Nothing is retried; the step reports the message.
#[derive(Debug, thiserror::Error)]
pub enum StepError {
    #[error("{0}")]
    Configuration(String),
    #[error("{0}")]
    Authorization(String),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Assertion(#[from] AssertionError),
    #[error(transparent)]
    Usage(#[from] UsageError),
    #[error("request failed: {0}")]
    Http(#[from] HttpError),
    #[error("invalid request url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("unsupported request method: {0}")]
    InvalidMethod(String),
    #[error("The response was not set.")]
    NoResponse,
    #[error("No request has been sent yet.")]
    NoRequest,
}

impl From<ExpectationError> for StepError {
    fn from(e: ExpectationError) -> Self {
        match e {
            ExpectationError::Assertion(a) => StepError::Assertion(a),
            ExpectationError::Usage(u) => StepError::Usage(u),
        }
    }
}
