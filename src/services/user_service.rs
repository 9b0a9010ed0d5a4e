use crate::models::user::{NewUser, User};
use crate::repositories::{user_repository::UserRepository, RepositoryError};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum UserServiceError {
    #[error("Password hashing failed: {0}")]
    HashingError(String),
    #[error("{0}")]
    RepositoryError(#[from] RepositoryError),
}

/// Registration payload. Fields stay optional so the user schema, not the
/// caller, decides what is missing.
#[derive(Debug, Clone, Default)]
pub struct CreateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    pub async fn create_user(&self, request: CreateUserRequest) -> Result<User, UserServiceError> {
        // Hash only a real password; a blank one is left for the schema to reject
        let password_hash = match request.password.as_deref() {
            Some(password) if !password.is_empty() => Some(self.hash_password(password)?),
            _ => None,
        };

        let user = self
            .repository
            .create_user(NewUser {
                name: request.name,
                email: request.email,
                password_hash,
            })
            .await?;

        tracing::info!("Registered user {}", user.id);
        Ok(user)
    }

    fn hash_password(&self, password: &str) -> Result<String, UserServiceError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| UserServiceError::HashingError(e.to_string()))
    }
}
