//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server errors to Sentry
//! before responding to the client. All route handlers return
//! `Result<T, AppError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::CustomerError;

/// Application-level error type for the customer API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Resource not found.
    #[error("{0}")]
    NotFound(String),

    /// Request conflicts with stored data.
    #[error("{0}")]
    Conflict(String),

    /// Bad request from client.
    #[error("{0}")]
    BadRequest(String),
}

impl From<CustomerError> for AppError {
    fn from(err: CustomerError) -> Self {
        match err {
            CustomerError::NotFound(_) => Self::NotFound(err.to_string()),
            CustomerError::DuplicateEmail => Self::Conflict(err.to_string()),
            CustomerError::NoChanges => Self::BadRequest(err.to_string()),
            CustomerError::Repository(inner) => Self::Database(inner),
        }
    }
}

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::Database(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        // Don't expose internal error details to clients
        let error = match &self {
            Self::Database(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        };

        (status, Json(ErrorBody { error })).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use customer_registry_core::CustomerId;

    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_customer_error_messages_pass_through() {
        let err = AppError::from(CustomerError::NotFound(CustomerId::new(3)));
        assert_eq!(err.to_string(), "Customer with ID [3] is not found");

        let err = AppError::from(CustomerError::DuplicateEmail);
        assert_eq!(err.to_string(), "email already taken");

        let err = AppError::from(CustomerError::NoChanges);
        assert_eq!(err.to_string(), "no data changes found");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            get_status(CustomerError::NotFound(CustomerId::new(1)).into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(CustomerError::DuplicateEmail.into()),
            StatusCode::CONFLICT
        );
        assert_eq!(
            get_status(CustomerError::NoChanges.into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Database(RepositoryError::MissingId)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_repository_failure_maps_to_database() {
        let err = AppError::from(CustomerError::Repository(RepositoryError::DataCorruption(
            "bad row".to_string(),
        )));
        assert!(matches!(err, AppError::Database(_)));
    }
}
