//! HTTP error envelope
//!
//! Every failure leaves the API as `{success: false, message, code}` with a
//! status derived from the domain error category.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use bizkit_domain::BizkitError;
use serde::Serialize;
use tracing::error;

#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub success: bool,
    pub message: String,
    pub code: &'static str,
}

/// Error returned by route handlers
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] BizkitError),

    /// The owner has no profile.
    #[error("No business found for this user")]
    NoBusiness,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NoBusiness => StatusCode::NOT_FOUND,
            Self::Domain(err) => match err {
                BizkitError::Validation(_) => StatusCode::BAD_REQUEST,
                BizkitError::Auth(_) => StatusCode::UNAUTHORIZED,
                BizkitError::NotFound(_) => StatusCode::NOT_FOUND,
                BizkitError::Storage(_) => StatusCode::SERVICE_UNAVAILABLE,
                BizkitError::Enhancement(_)
                | BizkitError::Config(_)
                | BizkitError::Network(_)
                | BizkitError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::NoBusiness => "not_found",
            Self::Domain(err) => err.code(),
        }
    }

    /// Message safe to show callers. Backend details stay in the logs.
    fn public_message(&self) -> String {
        match self {
            Self::NoBusiness => self.to_string(),
            Self::Domain(BizkitError::Validation(msg)) | Self::Domain(BizkitError::Auth(msg)) => {
                msg.clone()
            }
            Self::Domain(BizkitError::NotFound(_)) => "Not found".to_string(),
            Self::Domain(BizkitError::Storage(_)) => "Storage is unavailable".to_string(),
            Self::Domain(_) => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(code = self.code(), error = %self, "request failed");
        }

        let envelope =
            ErrorEnvelope { success: false, message: self.public_message(), code: self.code() };
        (status, Json(envelope)).into_response()
    }
}
