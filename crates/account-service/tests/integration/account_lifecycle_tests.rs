//! E2E tests for the account lifecycle over HTTP.
//!
//! ## Test Categories
//!
//! - **Signup**: account creation and duplicate handling
//! - **Login**: blank input, unknown email, wrong and right password
//! - **Listing**: redaction of credential hashes
//! - **Deletion**: removal and not-found handling
//!
//! ## Test Naming
//!
//! Tests follow the convention: `test_<feature>_<scenario>_<expected_result>`

use account_service::config::MIN_BCRYPT_COST;
use account_service::crypto::{BcryptHasher, CredentialHasher};
use account_test_utils::{
    ResponseAssertions, TestAccountServer, ALICE, BOB, CHARLIE, UNKNOWN_EMAIL,
};
use reqwest::StatusCode;
use serde_json::json;

// ============================================================================
// Signup Tests
// ============================================================================

#[tokio::test]
async fn test_signup_happy_path_returns_account() -> Result<(), anyhow::Error> {
    let server = TestAccountServer::spawn().await?;

    let (status, body) = server.signup(&ALICE).await?;

    assert_eq!(status, StatusCode::OK);
    body.assert_success()
        .assert_message("Account created successfully! Welcome alice!")
        .assert_no_credentials(ALICE.password);
    assert_eq!(body["username"], "alice");
    assert_eq!(body["account"]["email"], ALICE.email);
    assert!(
        body["account"]["id"].as_str().is_some_and(|id| !id.is_empty()),
        "Signup should return the assigned id"
    );

    Ok(())
}

#[tokio::test]
async fn test_signup_stores_hash_not_plaintext() -> Result<(), anyhow::Error> {
    let server = TestAccountServer::spawn().await?;
    server.signup(&ALICE).await?;

    let stored = server
        .service()
        .find_by_email(ALICE.email)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Account should be stored"))?;

    assert_ne!(stored.credential_hash, ALICE.password);
    let hasher = BcryptHasher::new(MIN_BCRYPT_COST)?;
    assert!(hasher.verify(ALICE.password, &stored.credential_hash)?);

    Ok(())
}

#[tokio::test]
async fn test_signup_duplicate_email_conflict() -> Result<(), anyhow::Error> {
    let server = TestAccountServer::spawn().await?;
    server.signup(&ALICE).await?;

    let (status, body) = server
        .post_json(
            "/api/signup",
            json!({"username": "alice-again", "email": ALICE.email, "password": "another"}),
        )
        .await?;

    assert_eq!(status, StatusCode::CONFLICT);
    body.assert_error()
        .assert_message("Email 'a@x.com' already exists!");

    let (_, listing) = server.list_users().await?;
    assert_eq!(listing["count"], 1);
    assert_eq!(listing["users"][0]["username"], "alice");

    Ok(())
}

#[tokio::test]
async fn test_signup_empty_body_is_accepted() -> Result<(), anyhow::Error> {
    let server = TestAccountServer::spawn().await?;

    let (status, body) = server.post_json("/api/signup", json!({})).await?;

    assert_eq!(status, StatusCode::OK);
    body.assert_success();
    assert_eq!(body["account"]["email"], "");

    Ok(())
}

#[tokio::test]
async fn test_signup_non_json_rejected() -> Result<(), anyhow::Error> {
    let server = TestAccountServer::spawn().await?;

    let response = server
        .client()
        .post(format!("{}/api/signup", server.url()))
        .body("username=alice")
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let body = response.json::<serde_json::Value>().await?;
    body.assert_error()
        .assert_message("Expected request with `Content-Type: application/json`");

    Ok(())
}

// ============================================================================
// Login Tests
// ============================================================================

#[tokio::test]
async fn test_login_blank_fields_bad_request() -> Result<(), anyhow::Error> {
    let server = TestAccountServer::spawn().await?;
    server.signup(&ALICE).await?;

    let (status, body) = server.login(ALICE.email, "").await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    body.assert_error().assert_message("Please enter password");

    let (status, body) = server.login("", ALICE.password).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    body.assert_error().assert_message("Please enter email");

    let (status, body) = server.post_json("/api/login", json!({})).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    body.assert_message("Please enter email");

    Ok(())
}

#[tokio::test]
async fn test_login_unknown_email_not_found() -> Result<(), anyhow::Error> {
    let server = TestAccountServer::spawn().await?;

    let (status, body) = server.login(UNKNOWN_EMAIL, "anything").await?;

    assert_eq!(status, StatusCode::NOT_FOUND);
    body.assert_error()
        .assert_message("User with email 'nobody@example.com' not found");

    Ok(())
}

#[tokio::test]
async fn test_login_wrong_password_unauthorized() -> Result<(), anyhow::Error> {
    let server = TestAccountServer::spawn().await?;
    server.signup(&BOB).await?;

    let (status, body) = server.login(BOB.email, "incorrect-horse").await?;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    body.assert_error()
        .assert_message("Wrong password! Please try again");

    Ok(())
}

#[tokio::test]
async fn test_login_success_excludes_credentials() -> Result<(), anyhow::Error> {
    let server = TestAccountServer::spawn().await?;
    let (_, signup) = server.signup(&BOB).await?;

    let (status, body) = server.login(BOB.email, BOB.password).await?;

    assert_eq!(status, StatusCode::OK);
    body.assert_success()
        .assert_message("Welcome back, bob!")
        .assert_no_credentials(BOB.password);
    assert_eq!(body["user"]["id"], signup["account"]["id"]);
    assert_eq!(body["user"]["email"], BOB.email);
    assert!(body["user"].get("password").is_none());

    Ok(())
}

// ============================================================================
// Listing Tests
// ============================================================================

#[tokio::test]
async fn test_list_users_redacts_hashes() -> Result<(), anyhow::Error> {
    let server = TestAccountServer::spawn().await?;
    server.signup(&ALICE).await?;
    server.signup(&BOB).await?;

    let (status, body) = server.list_users().await?;

    assert_eq!(status, StatusCode::OK);
    body.assert_success()
        .assert_message("All users retrieved successfully")
        .assert_users_redacted()
        .assert_no_credentials(ALICE.password)
        .assert_no_credentials(BOB.password);
    assert_eq!(body["count"], 2);

    let emails: Vec<&str> = body["users"]
        .as_array()
        .map(|users| users.iter().filter_map(|u| u["email"].as_str()).collect())
        .unwrap_or_default();
    assert!(emails.contains(&ALICE.email));
    assert!(emails.contains(&BOB.email));

    Ok(())
}

#[tokio::test]
async fn test_list_users_empty() -> Result<(), anyhow::Error> {
    let server = TestAccountServer::spawn().await?;

    let (status, body) = server.list_users().await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);
    assert_eq!(body["users"], json!([]));

    Ok(())
}

// ============================================================================
// Deletion Tests
// ============================================================================

#[tokio::test]
async fn test_delete_existing_removes_only_that_account() -> Result<(), anyhow::Error> {
    let server = TestAccountServer::spawn().await?;
    server.signup(&ALICE).await?;
    server.signup(&CHARLIE).await?;

    let (status, body) = server.delete_user(CHARLIE.email).await?;

    assert_eq!(status, StatusCode::OK);
    body.assert_success()
        .assert_message("User with email 'charlie@example.com' deleted successfully");

    assert!(server.service().find_by_email(CHARLIE.email).await?.is_none());
    assert!(server.service().find_by_email(ALICE.email).await?.is_some());

    Ok(())
}

#[tokio::test]
async fn test_delete_unknown_email_not_found() -> Result<(), anyhow::Error> {
    let server = TestAccountServer::spawn().await?;
    server.signup(&ALICE).await?;

    let (status, body) = server.delete_user(UNKNOWN_EMAIL).await?;

    assert_eq!(status, StatusCode::NOT_FOUND);
    body.assert_error();

    let (_, listing) = server.list_users().await?;
    assert_eq!(listing["count"], 1);

    Ok(())
}

// ============================================================================
// Full Lifecycle
// ============================================================================

#[tokio::test]
async fn test_account_lifecycle_end_to_end() -> Result<(), anyhow::Error> {
    let server = TestAccountServer::spawn().await?;

    let (status, body) = server.signup(&ALICE).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body["account"]["id"].as_str().is_some());

    let (status, _) = server.login(ALICE.email, ALICE.password).await?;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = server.login(ALICE.email, "wrong").await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = server.delete_user(ALICE.email).await?;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = server.login(ALICE.email, ALICE.password).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn test_signup_after_delete_allows_email_reuse() -> Result<(), anyhow::Error> {
    let server = TestAccountServer::spawn().await?;
    let (_, first) = server.signup(&ALICE).await?;
    server.delete_user(ALICE.email).await?;

    let (status, second) = server.signup(&ALICE).await?;

    assert_eq!(status, StatusCode::OK);
    assert_ne!(first["account"]["id"], second["account"]["id"]);

    Ok(())
}
