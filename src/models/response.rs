use serde::{Deserialize, Serialize};

use super::user::User;

/// `{message, user?}` body used by login and delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

impl MessageResponse {
    pub const LOGIN_SUCCESSFUL: &'static str = "Login successful";
    pub const USER_NOT_FOUND: &'static str = "User not found";
    pub const INVALID_CREDENTIALS: &'static str = "Invalid credentials";
    pub const LOAN_DELETED: &'static str = "Loan deleted successfully";

    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            user: None,
        }
    }

    pub fn with_user(message: impl Into<String>, user: User) -> Self {
        Self {
            message: message.into(),
            user: Some(user),
        }
    }
}

/// `{error}` body returned, with a 200 status, by every failing handler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
