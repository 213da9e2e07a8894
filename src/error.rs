// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client error types shared by the gateway, stores and local cache.

/// Error returned by every fallible client operation.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ClientError {
    /// No usable response: connection failure, timeout, or non-2xx status.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Response body did not match the expected schema.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Device registration failed while resolving the user identity.
    #[error("Identity bootstrap failed: {0}")]
    Identity(#[source] Box<ClientError>),

    /// Input rejected before any request was sent.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Local durable store could not be read or written.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl ClientError {
    /// Wrap a bootstrap failure. Already-wrapped errors are not nested twice.
    pub fn identity(inner: ClientError) -> Self {
        match inner {
            ClientError::Identity(_) => inner,
            other => ClientError::Identity(Box::new(other)),
        }
    }

    /// True if this error came from resolving the user identity.
    pub fn is_identity_error(&self) -> bool {
        matches!(self, ClientError::Identity(_))
    }

    /// True if the server could not be reached or answered with a failure status.
    ///
    /// Identity errors caused by a transport failure also count.
    pub fn is_transport_error(&self) -> bool {
        match self {
            ClientError::Transport(_) => true,
            ClientError::Identity(inner) => inner.is_transport_error(),
            _ => false,
        }
    }

    /// True if a response arrived but could not be decoded.
    pub fn is_decode_error(&self) -> bool {
        match self {
            ClientError::Decode(_) => true,
            ClientError::Identity(inner) => inner.is_decode_error(),
            _ => false,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ClientError::Decode(e.to_string())
        } else if e.is_timeout() {
            ClientError::Transport(format!("Request timed out: {}", e))
        } else {
            ClientError::Transport(e.to_string())
        }
    }
}

impl From<validator::ValidationErrors> for ClientError {
    fn from(e: validator::ValidationErrors) -> Self {
        ClientError::InvalidInput(e.to_string())
    }
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;
