pub mod test_helpers {
    use crate::models::{AmountValue, Loan, LoanInput, LoanStatus, NewUser, User};
    use crate::repositories::{
        LoanRepository, RepositoryError, SqliteLoanRepository, SqliteUserRepository,
        UserRepository,
    };
    use crate::AppState;
    use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
    use tempfile::NamedTempFile;

    /// Create a new in-memory SQLite database for testing
    pub async fn create_test_db() -> Result<SqlitePool, sqlx::Error> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(":memory:")
            .await?;

        // Run migrations
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(pool)
    }

    /// Create a temporary file-based SQLite database for testing
    /// Useful when data has to survive reopening the pool
    pub async fn create_test_db_file() -> Result<(SqlitePool, NamedTempFile), sqlx::Error> {
        let temp_file = NamedTempFile::new().map_err(sqlx::Error::Io)?;
        let pool = open_test_db_file(&temp_file).await?;
        Ok((pool, temp_file))
    }

    /// Open (or reopen) a pool on an existing temporary database file
    pub async fn open_test_db_file(temp_file: &NamedTempFile) -> Result<SqlitePool, sqlx::Error> {
        let db_path = temp_file
            .path()
            .to_str()
            .ok_or_else(|| sqlx::Error::Configuration("Invalid database path".into()))?;
        let database_url = format!("sqlite://{}", db_path);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(&database_url)
            .await?;

        // Run migrations
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(pool)
    }

    /// Application state backed by `pool`
    pub fn test_state(pool: &SqlitePool) -> AppState {
        AppState::from_pool(pool.clone())
    }

    /// Insert a test user with hashed password
    pub async fn insert_test_user(
        pool: &SqlitePool,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, RepositoryError> {
        use argon2::{
            password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
            Argon2,
        };

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let password_hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| {
                sqlx::Error::Configuration(format!("Password hashing failed: {}", e).into())
            })?
            .to_string();

        SqliteUserRepository::new(pool.clone())
            .create_user(NewUser {
                name: Some(name.to_string()),
                email: Some(email.to_string()),
                password_hash: Some(password_hash),
            })
            .await
    }

    /// Create a test loan for testing
    pub async fn create_test_loan(
        pool: &SqlitePool,
        borrower: &str,
        amount: f64,
        status: LoanStatus,
    ) -> Result<Loan, RepositoryError> {
        SqliteLoanRepository::new(pool.clone())
            .create(LoanInput {
                borrower: Some(borrower.to_string()),
                amount: Some(AmountValue::Number(amount)),
                status: Some(status.to_string()),
            })
            .await
    }
}

// Re-export commonly used test functions at module level for convenience
// Note: This is test-only code. Panic on error is acceptable in tests.
#[cfg(test)]
pub async fn create_test_pool() -> sqlx::SqlitePool {
    match test_helpers::create_test_db().await {
        Ok(pool) => pool,
        Err(e) => panic!("Failed to create test pool: {}", e),
    }
}
