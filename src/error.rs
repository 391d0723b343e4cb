//! Error types shared by the fortune server and the client.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::warning;

pub const UNAUTHENTICATED_MESSAGE: &str = "Not authenticated or missing access token";

/// Failures while producing a fortune on the server side.
#[derive(Debug, Error)]
pub enum FortuneError {
    /// No bearer token accompanied the request.
    #[error("Not authenticated or missing access token")]
    Unauthenticated,

    /// An upstream listing call answered with a non-success status.
    #[error("Failed to fetch {endpoint}: {status}")]
    Upstream { endpoint: &'static str, status: u16 },

    /// Network or decoding failure while talking to the upstream API.
    #[error("Upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// A listing item lacked a field the canonical track needs.
    #[error("Malformed track record: missing {0}")]
    MalformedRecord(&'static str),
}

impl IntoResponse for FortuneError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            FortuneError::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                json!({ "error": UNAUTHENTICATED_MESSAGE }),
            ),
            FortuneError::Upstream { status: 403, .. } => (
                StatusCode::FORBIDDEN,
                json!({
                    "error": "Insufficient permissions",
                    "details": self.to_string(),
                }),
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "error": "Failed to generate fortune",
                    "details": self.to_string(),
                }),
            ),
        };

        if status != StatusCode::UNAUTHORIZED {
            warning!("Error generating fortune: {}", self);
        }

        (status, Json(body)).into_response()
    }
}

/// Failures of the injected fortune storage.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Outcomes of a client request to `/api/fortune` that did not yield a fortune.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Not signed in. Run sporfortune auth.")]
    NotAuthenticated,

    #[error("Need additional permissions. Please sign out and sign in again.")]
    NeedsPermissions,

    #[error("Failed to get your fortune. Please try again. ({0})")]
    Failed(String),

    #[error("Could not retrieve a fortune. Please try again.")]
    Missing,

    #[error("Failed to reach the fortune server: {0}")]
    Transport(#[from] reqwest::Error),
}
