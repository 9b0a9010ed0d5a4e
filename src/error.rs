use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;

use crate::models::ErrorResponse;
use crate::repositories::RepositoryError;
use crate::services::{AuthServiceError, UserServiceError};

// Type alias for Result with our AppError
pub type Result<T> = std::result::Result<T, AppError>;

/// Failure at the handler boundary.
///
/// Clients tell success from failure by body shape, so every variant is
/// rendered as `{"error": message}` with a 200 status.
#[derive(Error, Debug)]
pub enum AppError {
    /// The request body could not be read as the expected JSON.
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Repository(#[from] RepositoryError),

    #[error("{0}")]
    UserService(#[from] UserServiceError),

    #[error("{0}")]
    AuthService(#[from] AuthServiceError),
}

impl AppError {
    fn is_internal(&self) -> bool {
        matches!(
            self,
            AppError::Repository(RepositoryError::Database(_))
                | AppError::UserService(UserServiceError::HashingError(_))
                | AppError::UserService(UserServiceError::RepositoryError(
                    RepositoryError::Database(_)
                ))
                | AppError::AuthService(AuthServiceError::RepositoryError(
                    RepositoryError::Database(_)
                ))
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_internal() {
            tracing::error!("Request failed: {:?}", self);
        } else {
            tracing::debug!("Request rejected: {}", self);
        }

        let body = ErrorResponse {
            error: self.to_string(),
        };

        (StatusCode::OK, Json(body)).into_response()
    }
}
