use std::env;

pub const BACKEND_URL_VAR: &str = "LOAN_TRACKER_BACKEND_URL";
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";

/// Backend location baked in at build time, if the variable was set then.
const BUILD_BACKEND_URL: Option<&str> = option_env!("LOAN_TRACKER_BACKEND_URL");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub backend_url: String,
}

impl ClientConfig {
    /// Picks the backend URL: explicit value, then the runtime environment,
    /// then the build-time value, then the default.
    pub fn resolve(explicit: Option<String>) -> Self {
        let backend_url = explicit
            .or_else(|| env::var(BACKEND_URL_VAR).ok())
            .filter(|url| !url.trim().is_empty())
            .or_else(|| BUILD_BACKEND_URL.map(String::from))
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());

        Self {
            backend_url: backend_url.trim().trim_end_matches('/').to_string(),
        }
    }
}
