pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod services;

// Make test_utils available for both unit tests and integration tests
pub mod test_utils;

use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<services::user_service::UserService>,
    pub auth_service: Arc<services::auth_service::AuthService>,
    pub loan_repository: Arc<dyn repositories::LoanRepository>,
}

impl AppState {
    /// Wires the SQLite repositories and the services on top of them.
    pub fn from_pool(pool: sqlx::SqlitePool) -> Self {
        let user_repository = Arc::new(repositories::SqliteUserRepository::new(pool.clone()));
        let loan_repository = Arc::new(repositories::SqliteLoanRepository::new(pool));

        AppState {
            user_service: Arc::new(services::UserService::new(user_repository.clone())),
            auth_service: Arc::new(services::AuthService::new(user_repository)),
            loan_repository,
        }
    }
}

/// Build the API router
///
/// ```text
/// POST   /register    - create a user
/// POST   /login       - check credentials
/// GET    /loans       - list loans
/// POST   /loans       - create a loan
/// PUT    /loans/{id}  - update a loan
/// DELETE /loans/{id}  - delete a loan
/// ```
pub fn build_router(state: AppState) -> Router {
    // The browser frontend is served from another origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/register", post(handlers::register_handler))
        .route("/login", post(handlers::login_handler))
        .route(
            "/loans",
            get(handlers::list_loans_handler).post(handlers::create_loan_handler),
        )
        .route(
            "/loans/{id}",
            put(handlers::update_loan_handler).delete(handlers::delete_loan_handler),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
