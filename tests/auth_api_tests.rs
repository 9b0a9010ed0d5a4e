use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use loan_tracker::{build_router, test_utils::test_helpers};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn post_json(app: &Router, uri: &str, body: Value) -> anyhow::Result<(StatusCode, Value)> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body)?))?;

    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    Ok((status, serde_json::from_slice(&bytes)?))
}

async fn test_app() -> anyhow::Result<Router> {
    let pool = test_helpers::create_test_db().await?;
    Ok(build_router(test_helpers::test_state(&pool)))
}

#[tokio::test]
async fn register_returns_user_without_password() -> anyhow::Result<()> {
    let app = test_app().await?;

    let (status, user) = post_json(
        &app,
        "/register",
        json!({ "name": "Ada", "email": "ada@example.com", "password": "hunter22" }),
    )
    .await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["name"], "Ada");
    assert_eq!(user["email"], "ada@example.com");
    assert!(user["_id"].is_string());
    assert!(user["createdAt"].is_string());
    assert!(user.get("password").is_none());
    assert!(user.get("password_hash").is_none());
    Ok(())
}

#[tokio::test]
async fn register_missing_fields_is_error_body() -> anyhow::Result<()> {
    let app = test_app().await?;

    let (status, body) = post_json(&app, "/register", json!({ "email": "ada@example.com" })).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["error"],
        "User validation failed: name: Path `name` is required., password: Path `password` is required."
    );
    Ok(())
}

#[tokio::test]
async fn login_outcomes() -> anyhow::Result<()> {
    let app = test_app().await?;

    post_json(
        &app,
        "/register",
        json!({ "name": "Ada", "email": "ada@example.com", "password": "hunter22" }),
    )
    .await?;

    let (_, ok) = post_json(
        &app,
        "/login",
        json!({ "email": "ada@example.com", "password": "hunter22" }),
    )
    .await?;
    assert_eq!(ok["message"], "Login successful");
    assert_eq!(ok["user"]["email"], "ada@example.com");

    let (_, unknown) = post_json(
        &app,
        "/login",
        json!({ "email": "bob@example.com", "password": "hunter22" }),
    )
    .await?;
    assert_eq!(unknown, json!({ "message": "User not found" }));

    let (status, wrong) = post_json(
        &app,
        "/login",
        json!({ "email": "ada@example.com", "password": "wrong" }),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(wrong, json!({ "message": "Invalid credentials" }));

    Ok(())
}

#[tokio::test]
async fn login_with_seeded_user() -> anyhow::Result<()> {
    let pool = test_helpers::create_test_db().await?;
    test_helpers::insert_test_user(&pool, "Seed", "seed@example.com", "seedpass").await?;
    let app = build_router(test_helpers::test_state(&pool));

    let (_, body) = post_json(
        &app,
        "/login",
        json!({ "email": "seed@example.com", "password": "seedpass" }),
    )
    .await?;
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["user"]["name"], "Seed");
    Ok(())
}

#[tokio::test]
async fn numeric_password_is_accepted_as_text() -> anyhow::Result<()> {
    let app = test_app().await?;

    let (status, user) = post_json(
        &app,
        "/register",
        json!({ "name": "Num", "email": "num@example.com", "password": 12345 }),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["email"], "num@example.com");

    let (_, body) = post_json(
        &app,
        "/login",
        json!({ "email": "num@example.com", "password": "12345" }),
    )
    .await?;
    assert_eq!(body["message"], "Login successful");

    let (_, body) = post_json(
        &app,
        "/login",
        json!({ "email": "num@example.com", "password": 12345 }),
    )
    .await?;
    assert_eq!(body["message"], "Login successful");
    Ok(())
}

#[tokio::test]
async fn auth_bodies_without_json_content_type_are_error_bodies() -> anyhow::Result<()> {
    let app = test_app().await?;

    for uri in ["/register", "/login"] {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .body(Body::from(r#"{"email":"a@example.com","password":"pw"}"#))?;
        let response = app.clone().oneshot(request).await?;
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await?;
        let body: Value = serde_json::from_slice(&bytes)?;
        assert!(body["error"].as_str().unwrap().contains("Content-Type"));
    }
    Ok(())
}

#[tokio::test]
async fn object_as_name_is_error_body() -> anyhow::Result<()> {
    let app = test_app().await?;

    let (status, body) = post_json(
        &app,
        "/register",
        json!({ "name": { "first": "Ada" }, "email": "ada@example.com", "password": "pw" }),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body["error"].is_string());
    Ok(())
}
