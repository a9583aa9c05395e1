//! Error types for HTTP handlers.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::chat::UnknownModel;

/// Errors surfaced to widget requests.
#[derive(Error, Debug)]
pub enum ChatError {
    /// The session was never mounted, or was closed or expired.
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    /// The model selector sent a value outside the offered set.
    #[error(transparent)]
    UnknownModel(#[from] UnknownModel),

    /// A color-scheme report that is neither `light` nor `dark`.
    #[error("Unknown color scheme: {0}")]
    UnknownColorScheme(String),
}

impl ChatError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::SessionNotFound(_) => StatusCode::NOT_FOUND,
            Self::UnknownModel(_) | Self::UnknownColorScheme(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
        }
    }
}

impl IntoResponse for ChatError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::warn!(name: "request.rejected", status = %status, error = %self, "Request rejected");
        (status, self.to_string()).into_response()
    }
}

/// Result type alias for handlers.
pub type Result<T> = std::result::Result<T, ChatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(
            ChatError::SessionNotFound("x".into()).status(),
            StatusCode::NOT_FOUND
        );
        let err: ChatError = "llama".parse::<crate::chat::Model>().unwrap_err().into();
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.to_string(), "Unknown model: llama");
    }
}
