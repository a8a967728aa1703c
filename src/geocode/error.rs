//! Fetch failure taxonomy

use thiserror::Error;

/// Why a geocoding fetch produced no candidates
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Connection, DNS, TLS or body transfer failure
    #[error("network error: {0}")]
    Network(String),
    /// Request exceeded the configured timeout
    #[error("request timed out")]
    Timeout,
    /// Provider answered with a non-2xx status
    #[error("HTTP error: {0}")]
    Status(u16),
    /// Body was not a usable feature collection
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl FetchError {
    /// Short, stable name for log fields
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Network(_) => "network",
            Self::Timeout => "timeout",
            Self::Status(_) => "status",
            Self::Malformed(_) => "malformed",
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if let Some(status) = err.status() {
            Self::Status(status.as_u16())
        } else if err.is_decode() {
            Self::Malformed(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}
