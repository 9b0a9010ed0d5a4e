use super::extract_json;
use crate::error::{AppError, Result};
use crate::models::{scalar::optional_string, MessageResponse, User};
use crate::services::{AuthServiceError, CreateUserRequest, LoginRequest};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct RegisterForm {
    #[serde(default, deserialize_with = "optional_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "optional_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "optional_string")]
    pub password: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default, deserialize_with = "optional_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "optional_string")]
    pub password: Option<String>,
}

/// POST /register - Create a user and return it
pub async fn register_handler(
    State(state): State<AppState>,
    body: std::result::Result<Json<RegisterForm>, JsonRejection>,
) -> Result<Json<User>> {
    let form = extract_json(body)?;
    let user = state
        .user_service
        .create_user(CreateUserRequest {
            name: form.name,
            email: form.email,
            password: form.password,
        })
        .await?;

    Ok(Json(user))
}

/// POST /login - Check credentials
///
/// A rejected login is a normal `{message}` reply, not an error body.
pub async fn login_handler(
    State(state): State<AppState>,
    body: std::result::Result<Json<LoginForm>, JsonRejection>,
) -> Result<Json<MessageResponse>> {
    let form = extract_json(body)?;
    let request = LoginRequest {
        email: form.email.unwrap_or_default(),
        password: form.password.unwrap_or_default(),
    };

    match state.auth_service.authenticate(request).await {
        Ok(user) => Ok(Json(MessageResponse::with_user(
            MessageResponse::LOGIN_SUCCESSFUL,
            user,
        ))),
        Err(AuthServiceError::UserNotFound) => {
            Ok(Json(MessageResponse::new(MessageResponse::USER_NOT_FOUND)))
        }
        Err(AuthServiceError::InvalidCredentials) => Ok(Json(MessageResponse::new(
            MessageResponse::INVALID_CREDENTIALS,
        ))),
        Err(e) => Err(AppError::from(e)),
    }
}
