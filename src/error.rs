use axum::http::StatusCode;
use std::time::Duration;
use thiserror::Error;

/// Errors produced by the aggregation core. Every upstream-facing operation
/// resolves to one of these; nothing in the core retries.
#[derive(Debug, Error)]
pub enum PortfolioError {
    #[error("{0}")]
    Validation(String),

    /// Server misconfiguration. Must be raised before any network call.
    #[error("missing {0} API credential")]
    MissingCredential(&'static str),

    #[error("network error: {0}")]
    Network(String),

    #[error("upstream returned HTTP {status}")]
    UpstreamStatus { status: u16, body: String },

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("{0}")]
    Internal(String),
}

impl PortfolioError {
    /// Wire-level error tag used in the `{success:false, error, errorType}`
    /// envelope.
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::UpstreamStatus { .. } => "API_ERROR",
            Self::Network(_) => "NETWORK_ERROR",
            Self::Timeout(_) => "REQUEST_ERROR",
            Self::MissingCredential(_) | Self::Internal(_) => "UNKNOWN_ERROR",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type Result<T> = std::result::Result<T, PortfolioError>;
