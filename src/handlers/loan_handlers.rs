use super::extract_json;
use crate::error::Result;
use crate::models::{Loan, LoanInput, MessageResponse};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};

/// GET /loans - Every loan, oldest first
pub async fn list_loans_handler(State(state): State<AppState>) -> Result<Json<Vec<Loan>>> {
    let loans = state.loan_repository.list().await?;
    Ok(Json(loans))
}

/// POST /loans - Create a loan
pub async fn create_loan_handler(
    State(state): State<AppState>,
    body: std::result::Result<Json<LoanInput>, JsonRejection>,
) -> Result<Json<Loan>> {
    let input = extract_json(body)?;
    let loan = state.loan_repository.create(input).await?;
    tracing::debug!("Created loan {}", loan.id);
    Ok(Json(loan))
}

/// PUT /loans/{id} - Replace the supplied fields
///
/// Replies `null` when no loan has that id.
pub async fn update_loan_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: std::result::Result<Json<LoanInput>, JsonRejection>,
) -> Result<Json<Option<Loan>>> {
    let input = extract_json(body)?;
    let loan = state.loan_repository.update(&id, input).await?;
    Ok(Json(loan))
}

/// DELETE /loans/{id} - Remove a loan
pub async fn delete_loan_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    state.loan_repository.delete(&id).await?;
    Ok(Json(MessageResponse::new(MessageResponse::LOAN_DELETED)))
}
