use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use super::ClientError;
use crate::models::{Loan, LoanInput, MessageResponse, User};

/// HTTP client for the loan tracker API.
///
/// The API reports failures as `{"error": ...}` bodies with a 200 status,
/// so every reply is checked for that shape before it is decoded.
#[derive(Debug, Clone)]
pub struct LoanApiClient {
    http: Client,
    base_url: String,
}

impl LoanApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, ClientError> {
        let body = json!({ "name": name, "email": email, "password": password });
        let response = self.http.post(self.url("/register")).json(&body).send().await?;
        decode(response).await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<MessageResponse, ClientError> {
        let body = json!({ "email": email, "password": password });
        let response = self.http.post(self.url("/login")).json(&body).send().await?;
        decode(response).await
    }

    pub async fn list_loans(&self) -> Result<Vec<Loan>, ClientError> {
        let response = self.http.get(self.url("/loans")).send().await?;
        decode(response).await
    }

    pub async fn create_loan(&self, input: &LoanInput) -> Result<Loan, ClientError> {
        let response = self.http.post(self.url("/loans")).json(input).send().await?;
        decode(response).await
    }

    /// `Ok(None)` when the loan no longer exists.
    pub async fn update_loan(
        &self,
        id: &str,
        input: &LoanInput,
    ) -> Result<Option<Loan>, ClientError> {
        let response = self
            .http
            .put(self.url(&format!("/loans/{}", id)))
            .json(input)
            .send()
            .await?;
        decode(response).await
    }

    pub async fn delete_loan(&self, id: &str) -> Result<MessageResponse, ClientError> {
        let response = self
            .http
            .delete(self.url(&format!("/loans/{}", id)))
            .send()
            .await?;
        decode(response).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let value: Value = response.error_for_status()?.json().await?;

    if let Some(message) = value.get("error") {
        let message = match message {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        return Err(ClientError::Server(message));
    }

    Ok(serde_json::from_value(value)?)
}
