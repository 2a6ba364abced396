//! Error types for the status client.

use thiserror::Error;

/// Errors from talking to the document status endpoint.
///
/// Every variant is terminal for a polling loop: a transport failure is
/// surfaced once and never retried.
#[derive(Debug, Error)]
pub enum StatusError {
    /// The configured endpoint is not a valid URL.
    #[error("invalid endpoint {0:?}: {1}")]
    InvalidEndpoint(String, url::ParseError),
    /// Network-level failure: connect, timeout, or mid-body error.
    #[error("connection error: {0}")]
    Connection(String),
    /// The endpoint answered with a non-success status.
    #[error("HTTP {0}")]
    Http(reqwest::StatusCode),
    /// The response body was not a valid status payload.
    #[error("invalid status payload: {0}")]
    Decode(String),
}
