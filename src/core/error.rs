//! Error types for rate lookups

use reqwest::StatusCode;
use thiserror::Error;

/// Why a call to the upstream API produced no usable document.
#[derive(Debug, Error)]
pub enum UpstreamFailure {
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error("unexpected HTTP status {0}")]
    Status(StatusCode),

    #[error("response body is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Errors surfaced by providers and the rate service.
#[derive(Debug, Error)]
pub enum RateError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("failed to call exchange rate API: {url}")]
    UpstreamCall {
        url: String,
        #[source]
        source: UpstreamFailure,
    },

    #[error("invalid response from exchange rate API: {0}")]
    InvalidUpstreamResponse(String),
}

impl RateError {
    pub fn upstream(url: &str, source: impl Into<UpstreamFailure>) -> Self {
        RateError::UpstreamCall {
            url: url.to_string(),
            source: source.into(),
        }
    }
}
