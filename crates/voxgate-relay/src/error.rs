use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RelayError>;

/// Relay errors with appropriate HTTP status codes
#[derive(Debug, Error)]
pub enum RelayError {
    /// Request is missing required input
    #[error("{0}")]
    InvalidRequest(String),

    /// Worker could not be reached (connect failure or timeout).
    /// Transport detail is logged, never sent to the client.
    #[error("Voice worker unreachable")]
    UpstreamUnreachable(#[source] reqwest::Error),

    /// Worker replied with a non-success status
    #[error("Voice worker returned an error ({status})")]
    UpstreamError {
        status: u16,
        detail: serde_json::Value,
    },

    /// Internal server error, nothing leaked
    #[error("Internal server error")]
    Internal,
}

impl RelayError {
    /// Get the appropriate HTTP status code for this error
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::UpstreamUnreachable(_) | Self::UpstreamError { .. } | Self::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message that is safe to expose to API consumers
    pub fn client_message(&self) -> String {
        self.to_string()
    }

    /// Upstream body echoed back for worker-reported failures
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Self::UpstreamError { detail, .. } => Some(detail.clone()),
            _ => None,
        }
    }
}

/// Error envelope shared by every failure response
#[derive(Debug, Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let error_response = ErrorResponse {
            success: false,
            error: self.client_message(),
            details: self.details(),
        };

        (status, Json(error_response)).into_response()
    }
}
