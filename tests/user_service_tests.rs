use loan_tracker::{
    repositories::{
        user_repository::{SqliteUserRepository, UserRepository},
        RepositoryError,
    },
    services::user_service::{CreateUserRequest, UserService, UserServiceError},
    test_utils::test_helpers,
};
use std::sync::Arc;

#[tokio::test]
async fn test_create_user_success() {
    // Create isolated test database
    let pool = test_helpers::create_test_db().await.unwrap();
    let repository = Arc::new(SqliteUserRepository::new(pool));
    let service = UserService::new(repository);

    let request = CreateUserRequest {
        name: Some("Test User".to_string()),
        email: Some("test@example.com".to_string()),
        password: Some("password123".to_string()),
    };

    let user = service.create_user(request).await.unwrap();
    assert_eq!(user.name, "Test User");
    assert_eq!(user.email, "test@example.com");
    assert!(user.password_hash.starts_with("$argon2"));
    assert_ne!(user.password_hash, "password123");
}

#[tokio::test]
async fn test_create_user_duplicate_email_allowed() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let repository = Arc::new(SqliteUserRepository::new(pool));
    let service = UserService::new(repository);

    let request = CreateUserRequest {
        name: Some("Twin".to_string()),
        email: Some("duplicate@example.com".to_string()),
        password: Some("password123".to_string()),
    };

    let first = service.create_user(request.clone()).await.unwrap();
    let second = service.create_user(request).await.unwrap();
    assert_ne!(first.id, second.id);
}

#[tokio::test]
async fn test_create_user_missing_fields() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let repository = Arc::new(SqliteUserRepository::new(pool));
    let service = UserService::new(repository);

    let request = CreateUserRequest {
        name: None,
        email: Some("nobody@example.com".to_string()),
        password: None,
    };

    let result = service.create_user(request).await;
    match result {
        Err(UserServiceError::RepositoryError(RepositoryError::Validation(e))) => {
            assert_eq!(e.paths().collect::<Vec<_>>(), ["name", "password"]);
        }
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_registered_user_found_by_email() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let repository = Arc::new(SqliteUserRepository::new(pool));
    let service = UserService::new(repository.clone());

    let created = service
        .create_user(CreateUserRequest {
            name: Some("Finder".to_string()),
            email: Some("find@example.com".to_string()),
            password: Some("password123".to_string()),
        })
        .await
        .unwrap();

    let found = repository
        .find_by_email("find@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, created.id);
    assert!(found.password_hash.starts_with("$argon2"));

    assert!(repository
        .find_by_email("nobody@example.com")
        .await
        .unwrap()
        .is_none());
}
