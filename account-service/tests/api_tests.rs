mod common;

use auth::SessionClaims;
use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;
use uuid::Uuid;

fn assert_no_hash_field(account: &serde_json::Value) {
    let fields = account.as_object().expect("Account is not an object");
    assert!(!fields.contains_key("passwordHash"));
    assert!(!fields.contains_key("password_hash"));
}

async fn expect_failure(
    response: reqwest::Response,
    expected_error: &str,
) -> serde_json::Value {
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], json!(expected_error));
    body
}

#[tokio::test]
async fn test_register_organization_login_roundtrip() {
    let app = TestApp::spawn().await;

    // Register organization {email, password, name} succeeds and returns a
    // token naming the new account.
    let response = app
        .post("/api/auth/register-organization")
        .json(&json!({
            "email": "a@b.com",
            "password": "Secret123!",
            "name": "Acme"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["organization"]["email"], json!("a@b.com"));
    assert_eq!(body["organization"]["name"], json!("Acme"));
    assert_eq!(body["organization"]["plan"], json!("free"));
    assert!(body["organization"]["id"].is_string());
    assert!(body["organization"]["createdAt"].is_string());
    assert!(body.get("user").is_none());
    assert_no_hash_field(&body["organization"]);

    let claims: SessionClaims = app
        .jwt_handler
        .decode(body["token"].as_str().expect("Token missing"))
        .expect("Issued token failed verification");
    assert_eq!(claims.sub, body["organization"]["id"].as_str().unwrap());
    assert_eq!(claims.email, "a@b.com");

    // The correct password logs in.
    let response = app
        .post("/api/auth/login-organization")
        .json(&json!({ "email": "a@b.com", "password": "Secret123!" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], json!(true));
    assert!(body["token"].is_string());
    assert_no_hash_field(&body["organization"]);

    // The wrong password does not.
    let response = app
        .post("/api/auth/login-organization")
        .json(&json!({ "email": "a@b.com", "password": "wrong" }))
        .send()
        .await
        .expect("Failed to execute request");

    expect_failure(response, "Invalid Credentials!").await;
}

#[tokio::test]
async fn test_register_user_and_login() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/register")
        .json(&json!({
            "email": "jane@example.com",
            "password": "pass_word!",
            "name": "Jane Doe"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["user"]["email"], json!("jane@example.com"));
    // User accounts carry no organization profile fields.
    assert!(body["user"].get("plan").is_none());
    assert!(body.get("organization").is_none());
    assert_no_hash_field(&body["user"]);

    let response = app
        .post("/api/auth/login")
        .json(&json!({ "email": "jane@example.com", "password": "pass_word!" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["user"]["name"], json!("Jane Doe"));
    assert_no_hash_field(&body["user"]);
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::spawn().await;

    app.post("/api/auth/register-organization")
        .json(&json!({
            "email": "a@b.com",
            "password": "Secret123!",
            "name": "Acme"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    let response = app
        .post("/api/auth/register-organization")
        .json(&json!({
            "email": "a@b.com",
            "password": "Other456!",
            "name": "Acme Again"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    expect_failure(response, "User already exists!!").await;
}

#[tokio::test]
async fn test_register_same_email_across_collections() {
    let app = TestApp::spawn().await;

    // Email uniqueness is per collection; the same address may back both a
    // user and an organization.
    for path in ["/api/auth/register", "/api/auth/register-organization"] {
        let response = app
            .post(path)
            .json(&json!({
                "email": "shared@example.com",
                "password": "Secret123!",
                "name": "Shared"
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::OK);
    }
}

#[tokio::test]
async fn test_register_missing_fields() {
    let app = TestApp::spawn().await;

    let incomplete_bodies = [
        json!({ "password": "Secret123!", "name": "Acme" }),
        json!({ "email": "a@b.com", "name": "Acme" }),
        json!({ "email": "a@b.com", "password": "Secret123!" }),
        json!({ "email": "a@b.com", "password": "", "name": "Acme" }),
        json!({ "email": "a@b.com", "password": "Secret123!", "name": "" }),
        json!({ "email": "not-an-email", "password": "Secret123!", "name": "Acme" }),
    ];

    for body in incomplete_bodies {
        let response = app
            .post("/api/auth/register-organization")
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request");

        expect_failure(response, "Remember all fields!").await;
    }

    // Nothing was written along the way.
    let response = app
        .post("/api/auth/login-organization")
        .json(&json!({ "email": "a@b.com", "password": "Secret123!" }))
        .send()
        .await
        .expect("Failed to execute request");

    expect_failure(response, "Invalid Credentials!").await;
}

#[tokio::test]
async fn test_login_unknown_email_indistinguishable_from_wrong_password() {
    let app = TestApp::spawn().await;

    app.post("/api/auth/register")
        .json(&json!({
            "email": "jane@example.com",
            "password": "pass_word!",
            "name": "Jane Doe"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    let unknown_email = app
        .post("/api/auth/login")
        .json(&json!({ "email": "nobody@example.com", "password": "pass_word!" }))
        .send()
        .await
        .expect("Failed to execute request");

    let wrong_password = app
        .post("/api/auth/login")
        .json(&json!({ "email": "jane@example.com", "password": "wrong" }))
        .send()
        .await
        .expect("Failed to execute request");

    // Identical status and body: the caller cannot probe which emails exist.
    assert_eq!(unknown_email.status(), wrong_password.status());
    let unknown_body = expect_failure(unknown_email, "Invalid Credentials!").await;
    let wrong_body = expect_failure(wrong_password, "Invalid Credentials!").await;
    assert_eq!(unknown_body, wrong_body);
}

#[tokio::test]
async fn test_login_with_malformed_email() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/login")
        .json(&json!({ "email": "not-an-email", "password": "pass_word!" }))
        .send()
        .await
        .expect("Failed to execute request");

    expect_failure(response, "Invalid Credentials!").await;
}

#[tokio::test]
async fn test_verify_roundtrip() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/register")
        .json(&json!({
            "email": "jane@example.com",
            "password": "pass_word!",
            "name": "Jane Doe"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    let registered: serde_json::Value = response.json().await.expect("Failed to parse response");
    let token = registered["token"].as_str().expect("Token missing");

    let response = app
        .post("/api/auth/verify")
        .json(&json!({ "token": token }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["user"]["id"], registered["user"]["id"]);
    assert_eq!(body["user"]["email"], json!("jane@example.com"));
    assert!(body.get("token").is_none());
    assert_no_hash_field(&body["user"]);
}

#[tokio::test]
async fn test_verify_organization_returns_profile_fields() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/register-organization")
        .json(&json!({
            "email": "a@b.com",
            "password": "Secret123!",
            "name": "Acme"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    let registered: serde_json::Value = response.json().await.expect("Failed to parse response");
    let token = registered["token"].as_str().expect("Token missing");

    let response = app
        .post("/api/auth/verify-organization")
        .json(&json!({ "token": token }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["organization"]["plan"], json!("free"));
    assert!(body["organization"]["settings"].is_object());
    assert_no_hash_field(&body["organization"]);
}

#[tokio::test]
async fn test_verify_garbage_token() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/verify")
        .json(&json!({ "token": "not-a-token" }))
        .send()
        .await
        .expect("Failed to execute request");

    expect_failure(response, "Invalid token!").await;
}

#[tokio::test]
async fn test_verify_missing_token_field() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/verify")
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to execute request");

    expect_failure(response, "Invalid token!").await;
}

#[tokio::test]
async fn test_verify_expired_token() {
    let app = TestApp::spawn().await;

    let mut claims = SessionClaims::new(Uuid::new_v4(), "ghost@example.com", 1);
    claims.iat -= 7200;
    claims.exp = claims.iat + 60;
    let token = app.jwt_handler.encode(&claims).expect("Failed to encode");

    let response = app
        .post("/api/auth/verify")
        .json(&json!({ "token": token }))
        .send()
        .await
        .expect("Failed to execute request");

    expect_failure(response, "Token expired!").await;
}

#[tokio::test]
async fn test_verify_token_for_missing_account() {
    let app = TestApp::spawn().await;

    // Well-formed, well-signed, unexpired -- but its subject resolves to no
    // account, so verification fails.
    let claims = SessionClaims::new(Uuid::new_v4(), "ghost@example.com", 24);
    let token = app.jwt_handler.encode(&claims).expect("Failed to encode");

    let response = app
        .post("/api/auth/verify")
        .json(&json!({ "token": token }))
        .send()
        .await
        .expect("Failed to execute request");

    expect_failure(response, "Invalid token!").await;
}

#[tokio::test]
async fn test_verify_against_wrong_collection() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/register")
        .json(&json!({
            "email": "jane@example.com",
            "password": "pass_word!",
            "name": "Jane Doe"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    let registered: serde_json::Value = response.json().await.expect("Failed to parse response");
    let token = registered["token"].as_str().expect("Token missing");

    // A user session does not verify as an organization session.
    let response = app
        .post("/api/auth/verify-organization")
        .json(&json!({ "token": token }))
        .send()
        .await
        .expect("Failed to execute request");

    expect_failure(response, "Invalid token!").await;
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/health")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
}
