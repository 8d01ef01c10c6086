//! Networking: typed REST client, transport seam, and wire schema.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` maps every endpoint the client consumes onto typed calls,
//! `transport` abstracts the HTTP stack, and `types` defines the payloads.

pub mod api;
pub mod transport;
pub mod types;

use types::ServerMessage;

/// Failure of a single API call.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// No response was received (network down, CORS, DNS).
    #[error("request failed: {0}")]
    Transport(String),

    /// The server answered with a non-success status.
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body did not match the expected schema.
    #[error("unexpected response body: {0}")]
    Decode(String),

    /// The owning page or navigation went away before the response arrived.
    #[error("request cancelled")]
    Cancelled,

    /// An authenticated call was attempted without a stored token.
    #[error("not signed in")]
    MissingToken,
}

impl ApiError {
    /// Build a status error, lifting the server's own message when it sent one.
    #[must_use]
    pub fn from_response(response: &transport::ApiResponse) -> Self {
        let message = response
            .json::<ServerMessage>()
            .ok()
            .and_then(|m| m.text().map(str::to_owned))
            .unwrap_or_else(|| format!("HTTP {}", response.status));
        Self::Status { status: response.status, message }
    }

    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
