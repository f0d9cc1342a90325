//! Error types for outage service calls.
//!
//! Failures are classified when they occur so the retry loop can tell
//! transient remote conditions apart from terminal ones.

use thiserror::Error;

/// Error type for outage service operations.
#[derive(Error, Debug, Clone)]
pub enum ApiError {
    /// Transport-level failure (connection refused, DNS failure, reset).
    #[error("transport error: {message}")]
    Transport { message: String },

    /// The request timed out.
    #[error("request timed out")]
    Timeout,

    /// The remote service itself errored (HTTP 5xx).
    #[error("server error: HTTP {status}")]
    Server { status: u16 },

    /// The request was rejected by the remote service (HTTP 4xx).
    #[error("client error: HTTP {status}")]
    Client { status: u16 },

    /// The response body could not be decoded.
    #[error("invalid response body: {message}")]
    Decode { message: String },

    /// The request could not be constructed.
    #[error("invalid request: {message}")]
    Request { message: String },
}

impl ApiError {
    /// Create a transport error.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a decode error.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create an invalid-request error.
    #[must_use]
    pub fn request(message: impl Into<String>) -> Self {
        Self::Request {
            message: message.into(),
        }
    }

    /// Classify a response status. Returns `None` for success statuses.
    #[must_use]
    pub fn from_status(status: reqwest::StatusCode) -> Option<Self> {
        if status.is_server_error() {
            Some(Self::Server {
                status: status.as_u16(),
            })
        } else if status.is_client_error() {
            Some(Self::Client {
                status: status.as_u16(),
            })
        } else {
            None
        }
    }

    /// Check if this error is retriable.
    ///
    /// Transport failures, timeouts, and server-side errors are transient;
    /// rejected requests and undecodable bodies are terminal.
    #[must_use]
    pub fn is_retriable(&self) -> bool {
        matches!(
            self,
            Self::Transport { .. } | Self::Timeout | Self::Server { .. }
        )
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::decode(err.to_string())
        } else if err.is_builder() {
            Self::request(err.to_string())
        } else {
            // Connection errors and interrupted transfers land here.
            Self::transport(err.to_string())
        }
    }
}
