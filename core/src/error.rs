//! Error types for the API client.
//!
//! # Design
//! A non-2xx status is not an error: the client hands every HTTP response
//! back to the caller, who asserts on the status code. Errors here cover what
//! happens before a response exists (transport, request encoding), a body
//! that breaks off mid-read, and decoding a response body on request.

use thiserror::Error;

/// Errors returned by `ApiClient` operations and `HttpResponse` helpers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No HTTP response was obtained: connection refused, DNS failure, I/O
    /// error before the status line.
    #[error("transport failure for {url}: {message}")]
    Transport { url: String, message: String },

    /// A response arrived but its body could not be read to the end.
    #[error("failed to read {status} response body from {url}: {message}")]
    Body {
        url: String,
        status: u16,
        message: String,
    },

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),
}

impl ApiError {
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport { .. })
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
