//! HTTP error responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::db::DbErrorKind;
use crate::service::ServiceError;

/// Error body: `{"error": {"code": "...", "message": "..."}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Error details.
    pub error: ErrorDetail,
}

/// Machine-readable code plus human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// One of `INVALID_MOVE`, `NOT_FOUND`, `CONFLICT`, `BAD_REQUEST`,
    /// `INTERNAL_ERROR`.
    pub code: String,
    /// Description of what went wrong.
    pub message: String,
}

/// Failure of an HTTP handler.
#[derive(Debug, Display, Error)]
pub enum ApiError {
    /// The service rejected or failed the operation.
    #[display("{_0}")]
    Service(ServiceError),

    /// The request itself is malformed.
    #[display("Bad request: {message}")]
    BadRequest {
        /// What was wrong with the request.
        message: String,
    },

    /// Unexpected server-side failure outside the service.
    #[display("Internal error: {message}")]
    Internal {
        /// Failure description.
        message: String,
    },
}

impl ApiError {
    /// Creates a bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// HTTP status and error code for this error.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Service(ServiceError::InvalidMove(_) | ServiceError::InvalidUpdate(_)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "INVALID_MOVE")
            }
            Self::Service(ServiceError::NotFound { .. }) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Service(ServiceError::Conflict { .. }) => (StatusCode::CONFLICT, "CONFLICT"),
            Self::Service(ServiceError::Database(_)) | Self::Internal { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
            Self::BadRequest { .. } => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        Self::Service(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = match &self {
            Self::Service(ServiceError::Database(db)) => {
                if db.kind == DbErrorKind::CorruptRecord {
                    error!(error = %db, "Corrupt game record");
                } else {
                    error!(error = %db, "Database failure");
                }
                "Internal server error".to_string()
            }
            Self::Internal { message } => {
                error!(%message, "Internal failure");
                "Internal server error".to_string()
            }
            other => {
                warn!(status = %status, error = %other, "Request rejected");
                other.to_string()
            }
        };

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };
        (status, Json(body)).into_response()
    }
}
