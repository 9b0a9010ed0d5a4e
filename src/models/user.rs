use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::ValidationError;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// A user about to be written. The password has already been hashed; a
/// missing hash means no password was supplied.
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
}

/// Validated fields of a [`NewUser`].
#[derive(Debug, Clone, PartialEq)]
pub struct ValidUser<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
}

impl NewUser {
    pub fn validate(&self) -> Result<ValidUser<'_>, ValidationError> {
        let mut errors = ValidationError::new("User");

        let name = present(&mut errors, "name", &self.name);
        let email = present(&mut errors, "email", &self.email);
        let password_hash = present(&mut errors, "password", &self.password_hash);

        match (name, email, password_hash) {
            (Some(name), Some(email), Some(password_hash)) => Ok(ValidUser {
                name,
                email,
                password_hash,
            }),
            _ => Err(errors),
        }
    }
}

fn present<'a>(
    errors: &mut ValidationError,
    path: &'static str,
    value: &'a Option<String>,
) -> Option<&'a str> {
    let value = value.as_deref().filter(|v| !v.is_empty());
    if value.is_none() {
        errors.required(path);
    }
    value
}
