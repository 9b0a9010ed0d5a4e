pub mod loan_repository;
pub mod user_repository;

pub use loan_repository::{LoanRepository, SqliteLoanRepository};
pub use user_repository::{SqliteUserRepository, UserRepository};

use crate::models::ValidationError;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("{0}")]
    Validation(#[from] ValidationError),
    #[error("Cast to ObjectId failed for value \"{value}\" (type string) at path \"_id\" for model \"{model}\"")]
    Cast { model: &'static str, value: String },
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Document identifiers are UUIDs; anything else cannot name a document.
pub(crate) fn parse_id(model: &'static str, id: &str) -> RepositoryResult<String> {
    Uuid::parse_str(id)
        .map(|uuid| uuid.to_string())
        .map_err(|_| RepositoryError::Cast {
            model,
            value: id.to_string(),
        })
}

pub(crate) fn new_id() -> String {
    Uuid::new_v4().to_string()
}
