use super::{new_id, parse_id, RepositoryError, RepositoryResult};
use crate::models::loan::{Loan, LoanInput, LoanRow};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

/// Loan collection. Writes are validated against the loan schema before
/// they reach the database.
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait LoanRepository: Send + Sync {
    async fn list(&self) -> RepositoryResult<Vec<Loan>>;
    async fn create(&self, input: LoanInput) -> RepositoryResult<Loan>;
    /// Returns `None` when no loan has `id`.
    async fn update(&self, id: &str, input: LoanInput) -> RepositoryResult<Option<Loan>>;
    /// Deleting a missing loan is not an error.
    async fn delete(&self, id: &str) -> RepositoryResult<()>;
}

pub struct SqliteLoanRepository {
    pool: SqlitePool,
}

impl SqliteLoanRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn into_loan(row: LoanRow) -> RepositoryResult<Loan> {
    Loan::try_from(row).map_err(|e| RepositoryError::Database(sqlx::Error::Decode(e.into())))
}

#[async_trait]
impl LoanRepository for SqliteLoanRepository {
    async fn list(&self) -> RepositoryResult<Vec<Loan>> {
        let rows = sqlx::query_as::<_, LoanRow>(
            r#"
            SELECT id, borrower, amount, status, created_at
            FROM loans
            ORDER BY rowid ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(into_loan).collect()
    }

    async fn create(&self, input: LoanInput) -> RepositoryResult<Loan> {
        let loan = input.validate_for_create()?;

        let row = sqlx::query_as::<_, LoanRow>(
            r#"
            INSERT INTO loans (id, borrower, amount, status, created_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, borrower, amount, status, created_at
            "#,
        )
        .bind(new_id())
        .bind(&loan.borrower)
        .bind(loan.amount)
        .bind(loan.status.as_str())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        into_loan(row)
    }

    async fn update(&self, id: &str, input: LoanInput) -> RepositoryResult<Option<Loan>> {
        let id = parse_id("Loan", id)?;
        let changes = input.validate_for_update()?;

        let row = sqlx::query_as::<_, LoanRow>(
            r#"
            UPDATE loans
            SET borrower = COALESCE(?, borrower),
                amount = COALESCE(?, amount),
                status = COALESCE(?, status)
            WHERE id = ?
            RETURNING id, borrower, amount, status, created_at
            "#,
        )
        .bind(changes.borrower)
        .bind(changes.amount)
        .bind(changes.status.map(|s| s.as_str()))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(into_loan).transpose()
    }

    async fn delete(&self, id: &str) -> RepositoryResult<()> {
        let id = parse_id("Loan", id)?;

        let result = sqlx::query("DELETE FROM loans WHERE id = ?")
            .bind(&id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            tracing::debug!("Delete of missing loan {} ignored", id);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AmountValue, LoanStatus};
    use crate::test_utils::create_test_pool;

    fn alice() -> LoanInput {
        LoanInput {
            borrower: Some("Alice".to_string()),
            amount: Some(AmountValue::Number(1000.0)),
            status: None,
        }
    }

    #[tokio::test]
    async fn test_create_then_list() {
        let repo = SqliteLoanRepository::new(create_test_pool().await);

        let created = repo.create(alice()).await.unwrap();
        assert_eq!(created.borrower, "Alice");
        assert_eq!(created.status, LoanStatus::Pending);

        let loans = repo.list().await.unwrap();
        assert_eq!(loans, vec![created]);
    }

    #[tokio::test]
    async fn test_invalid_create_persists_nothing() {
        let repo = SqliteLoanRepository::new(create_test_pool().await);

        let input = LoanInput {
            status: Some("Overdue".to_string()),
            ..alice()
        };
        let err = repo.create(input).await.unwrap_err();
        match err {
            RepositoryError::Validation(e) => assert_eq!(e.paths().collect::<Vec<_>>(), ["status"]),
            other => panic!("expected validation error, got {:?}", other),
        }

        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_keeps_unspecified_fields() {
        let repo = SqliteLoanRepository::new(create_test_pool().await);
        let created = repo.create(alice()).await.unwrap();

        let updated = repo
            .update(
                &created.id,
                LoanInput {
                    status: Some("Approved".to_string()),
                    ..LoanInput::default()
                },
            )
            .await
            .unwrap()
            .expect("loan should exist");

        assert_eq!(updated.status, LoanStatus::Approved);
        assert_eq!(updated.borrower, "Alice");
        assert_eq!(updated.amount, 1000.0);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_update_missing_loan_returns_none() {
        let repo = SqliteLoanRepository::new(create_test_pool().await);
        let missing = uuid::Uuid::new_v4().to_string();

        let result = repo.update(&missing, alice()).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_malformed_id_is_cast_error() {
        let repo = SqliteLoanRepository::new(create_test_pool().await);

        let err = repo.delete("not-an-id").await.unwrap_err();
        assert!(matches!(err, RepositoryError::Cast { model: "Loan", .. }));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let repo = SqliteLoanRepository::new(create_test_pool().await);
        let created = repo.create(alice()).await.unwrap();

        repo.delete(&created.id).await.unwrap();
        repo.delete(&created.id).await.unwrap();
        assert!(repo.list().await.unwrap().is_empty());
    }
}
