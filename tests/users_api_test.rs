mod common;

use axum::http::Method;
use serde_json::json;

use common::{response_json, TestApp};

#[tokio::test]
async fn user_creation_stores_only_a_hash() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/api/users",
            Some(json!({
                "username": "abdullah",
                "password": "correct horse battery staple",
                "role": "admin"
            })),
        )
        .await;
    assert_eq!(response.status(), 201);
    let user = response_json(response).await;
    assert_eq!(user["username"], "abdullah");
    assert_eq!(user["role"], "admin");
    // the hash never crosses the wire
    assert!(user.get("password_hash").is_none());
    assert!(user.get("password").is_none());

    // but storage holds an argon2 hash, not the plaintext
    let stored = app
        .state
        .storage
        .user_by_username("abdullah")
        .await
        .unwrap()
        .unwrap();
    assert!(stored.password_hash.starts_with("$argon2"));
    assert_ne!(stored.password_hash, "correct horse battery staple");
}

#[tokio::test]
async fn duplicate_usernames_are_rejected() {
    let app = TestApp::new().await;
    let payload = json!({
        "username": "sara",
        "password": "password-123",
        "role": "seller"
    });
    let response = app.request(Method::POST, "/api/users", Some(payload.clone())).await;
    assert_eq!(response.status(), 201);
    let response = app.request(Method::POST, "/api/users", Some(payload)).await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn short_passwords_are_rejected() {
    let app = TestApp::new().await;
    let response = app
        .request(
            Method::POST,
            "/api/users",
            Some(json!({ "username": "weak", "password": "short", "role": "user" })),
        )
        .await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn login_verifies_credentials_and_returns_role() {
    let app = TestApp::new().await;
    app.request(
        Method::POST,
        "/api/users",
        Some(json!({
            "username": "abdullah",
            "password": "correct horse battery staple",
            "role": "seller"
        })),
    )
    .await;

    let response = app
        .request(
            Method::POST,
            "/api/auth/login",
            Some(json!({
                "username": "abdullah",
                "password": "correct horse battery staple"
            })),
        )
        .await;
    assert_eq!(response.status(), 200);
    let body = response_json(response).await;
    assert_eq!(body["role"], "seller");
    assert_eq!(body["user_id"], 1);
    assert!(!body["token"].as_str().unwrap().is_empty());

    // wrong password and unknown user both come back as 401
    let response = app
        .request(
            Method::POST,
            "/api/auth/login",
            Some(json!({ "username": "abdullah", "password": "nope-nope" })),
        )
        .await;
    assert_eq!(response.status(), 401);

    let response = app
        .request(
            Method::POST,
            "/api/auth/login",
            Some(json!({ "username": "ghost", "password": "whatever-12" })),
        )
        .await;
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn password_change_takes_effect_on_next_login() {
    let app = TestApp::new().await;
    app.request(
        Method::POST,
        "/api/users",
        Some(json!({
            "username": "abdullah",
            "password": "original-password",
            "role": "user"
        })),
    )
    .await;

    let response = app
        .request(
            Method::PUT,
            "/api/users/1",
            Some(json!({ "password": "rotated-password" })),
        )
        .await;
    assert_eq!(response.status(), 200);

    let response = app
        .request(
            Method::POST,
            "/api/auth/login",
            Some(json!({ "username": "abdullah", "password": "original-password" })),
        )
        .await;
    assert_eq!(response.status(), 401);

    let response = app
        .request(
            Method::POST,
            "/api/auth/login",
            Some(json!({ "username": "abdullah", "password": "rotated-password" })),
        )
        .await;
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn user_delete_is_a_404_when_missing() {
    let app = TestApp::new().await;
    let response = app.request(Method::DELETE, "/api/users/7", None).await;
    assert_eq!(response.status(), 404);
}
