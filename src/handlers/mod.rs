pub mod auth_handlers;
pub mod loan_handlers;

use crate::error::AppError;
use axum::{extract::rejection::JsonRejection, Json};

pub use auth_handlers::{login_handler, register_handler, LoginForm, RegisterForm};
pub use loan_handlers::{
    create_loan_handler, delete_loan_handler, list_loans_handler, update_loan_handler,
};

/// Unwraps a JSON body, turning any rejection (bad syntax, wrong field
/// types, missing content type) into an `{error}` reply.
pub fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    result.map(|Json(value)| value).map_err(|rejection| {
        tracing::debug!("Rejected request body: {}", rejection.body_text());
        AppError::BadRequest(rejection.body_text())
    })
}
