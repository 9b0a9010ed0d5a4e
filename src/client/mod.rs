//! Client side of the loan tracker.
//!
//! [`LoanApiClient`] speaks the HTTP API; [`pages`] holds the state and
//! actions behind the Login, Register and Dashboard screens so the terminal
//! front end in `src/bin/cli.rs` only does input and output.

pub mod api;
pub mod config;
pub mod pages;
pub mod render;

pub use api::LoanApiClient;
pub use config::ClientConfig;
pub use pages::{Dashboard, FormMode, LoanForm, LoginPage, Page, RegisterPage, SubmitOutcome, Transition};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The server answered with an `{error}` body.
    #[error("{0}")]
    Server(String),
    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}
