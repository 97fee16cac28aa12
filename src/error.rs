use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use std::fmt;

use crate::domain::store::StoreError;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Serialize)]
struct ErrorInfo {
    code: &'static str,
    message: String,
    details: Value,
}

/// Error taxonomy of the link registry.
///
/// One variant per externally distinguishable error kind; the HTTP status
/// mapping lives in the [`IntoResponse`] implementation.
#[derive(Debug)]
pub enum AppError {
    InvalidUrl { message: String, details: Value },
    InvalidIdentifier { message: String, details: Value },
    IdentifierTaken { message: String, details: Value },
    NotFound { message: String, details: Value },
    AllocationExhausted { message: String, details: Value },
    StoreUnavailable { message: String, details: Value },
}

impl AppError {
    pub fn invalid_url(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidUrl {
            message: message.into(),
            details,
        }
    }

    pub fn invalid_identifier(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidIdentifier {
            message: message.into(),
            details,
        }
    }

    pub fn identifier_taken(message: impl Into<String>, details: Value) -> Self {
        Self::IdentifierTaken {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn allocation_exhausted(message: impl Into<String>, details: Value) -> Self {
        Self::AllocationExhausted {
            message: message.into(),
            details,
        }
    }

    pub fn store_unavailable(message: impl Into<String>, details: Value) -> Self {
        Self::StoreUnavailable {
            message: message.into(),
            details,
        }
    }

    fn message(&self) -> &str {
        match self {
            Self::InvalidUrl { message, .. }
            | Self::InvalidIdentifier { message, .. }
            | Self::IdentifierTaken { message, .. }
            | Self::NotFound { message, .. }
            | Self::AllocationExhausted { message, .. }
            | Self::StoreUnavailable { message, .. } => message,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for AppError {}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::store_unavailable(
            "Key-value store unavailable",
            json!({ "reason": e.to_string() }),
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match self {
            AppError::InvalidUrl { message, details } => {
                (StatusCode::BAD_REQUEST, "invalid_url", message, details)
            }
            AppError::InvalidIdentifier { message, details } => (
                StatusCode::BAD_REQUEST,
                "invalid_identifier",
                message,
                details,
            ),
            AppError::IdentifierTaken { message, details } => {
                (StatusCode::CONFLICT, "identifier_taken", message, details)
            }
            AppError::NotFound { message, details } => {
                (StatusCode::NOT_FOUND, "not_found", message, details)
            }
            AppError::AllocationExhausted { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "allocation_exhausted",
                message,
                details,
            ),
            AppError::StoreUnavailable { message, details } => (
                StatusCode::SERVICE_UNAVAILABLE,
                "store_unavailable",
                message,
                details,
            ),
        };

        let body = ErrorBody {
            error: ErrorInfo {
                code,
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}
