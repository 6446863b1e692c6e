//! Error types for odds acquisition.
//!
//! [`SourceError`] describes a single failed fetch; [`AcquisitionError`] is
//! what the caller sees once the retry policy gives up.

use thiserror::Error;

/// Errors that can occur when fetching odds from a source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// Connection-level failure.
    #[error("network error: {0}")]
    Network(String),

    /// Request timed out.
    #[error("request timeout: {0}")]
    Timeout(String),

    /// Upstream answered with a non-success status.
    #[error("API error: {status_code} - {message}")]
    Api {
        /// HTTP status code.
        status_code: u16,
        /// Response body or reason.
        message: String,
    },

    /// Upstream asked us to slow down.
    #[error("rate limited by source{}", retry_hint(.retry_after_secs))]
    RateLimited {
        /// Seconds to wait, when the source says.
        retry_after_secs: Option<u64>,
    },

    /// Response body could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),

    /// Source is misconfigured.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Credentials missing or refused.
    #[error("authentication error: {0}")]
    Authentication(String),
}

impl SourceError {
    /// Creates an API error from status code and message.
    pub fn api(status_code: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status_code,
            message: message.into(),
        }
    }

    /// Creates a rate limited error.
    pub fn rate_limited(retry_after_secs: Option<u64>) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    /// Maps an unsuccessful HTTP status to an error.
    pub fn from_status(status_code: u16, message: impl Into<String>) -> Self {
        match status_code {
            401 | 403 => Self::Authentication(message.into()),
            408 => Self::Timeout(message.into()),
            429 => Self::RateLimited {
                retry_after_secs: None,
            },
            _ => Self::api(status_code, message),
        }
    }

    /// Returns true if another attempt may succeed.
    ///
    /// Every failed request is worth another attempt, whatever the status.
    /// Only a local misconfiguration is permanent: no request was made.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::Configuration(_))
    }

    /// The wait the source itself asked for, if any.
    #[must_use]
    pub fn retry_after_secs(&self) -> Option<u64> {
        match self {
            Self::RateLimited { retry_after_secs } => *retry_after_secs,
            _ => None,
        }
    }
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        // Request URLs may carry credentials in the query string.
        let err = err.without_url();
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::Network(format!("connection failed: {err}"))
        } else if err.is_decode() {
            Self::Parse(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

fn retry_hint(retry_after_secs: &Option<u64>) -> String {
    retry_after_secs
        .map(|secs| format!(", retry after {secs}s"))
        .unwrap_or_default()
}

/// Acquisition gave up on an endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("acquisition from {endpoint} failed after {attempts} attempt(s): {source}")]
pub struct AcquisitionError {
    /// Endpoint that was being fetched.
    pub endpoint: String,
    /// Attempts made, including the first.
    pub attempts: u32,
    /// Last error seen.
    pub source: SourceError,
}

/// Result type alias for a single fetch.
pub type Result<T> = std::result::Result<T, SourceError>;
