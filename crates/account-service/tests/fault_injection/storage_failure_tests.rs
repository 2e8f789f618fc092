//! Storage failure tests.
//!
//! Each test spawns a real server over a `FaultyAccountStore` and checks
//! that the client sees a generic 500 while the store is left untouched.

use account_service::repositories::mock::{FaultPoint, FaultyAccountStore};
use account_service::repositories::AccountStore;
use account_test_utils::{ResponseAssertions, TestAccountServer, ALICE, BOB};
use reqwest::StatusCode;
use std::sync::Arc;

const STORAGE_FAILURE_MESSAGE: &str = "An internal storage error occurred";

async fn spawn_failing_on(
    point: FaultPoint,
) -> Result<(TestAccountServer, Arc<FaultyAccountStore>), anyhow::Error> {
    let store = Arc::new(FaultyAccountStore::failing_on(point));
    let server = TestAccountServer::spawn_with_store(store.clone() as Arc<dyn AccountStore>).await?;
    Ok((server, store))
}

fn assert_generic_failure(status: StatusCode, body: &serde_json::Value) {
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    body.assert_error().assert_message(STORAGE_FAILURE_MESSAGE);
    assert!(
        !body.to_string().contains("Injected"),
        "Storage details leaked to client: {}",
        body
    );
}

#[tokio::test]
async fn test_signup_save_failure_leaves_no_record() -> Result<(), anyhow::Error> {
    let (server, store) = spawn_failing_on(FaultPoint::Save).await?;

    let (status, body) = server.signup(&ALICE).await?;

    assert_generic_failure(status, &body);
    assert!(store.inner().is_empty().await);

    Ok(())
}

#[tokio::test]
async fn test_signup_lookup_failure_skips_save() -> Result<(), anyhow::Error> {
    let (server, store) = spawn_failing_on(FaultPoint::FindOne).await?;

    let (status, body) = server.signup(&ALICE).await?;

    assert_generic_failure(status, &body);
    assert!(store.inner().is_empty().await);
    // Only the duplicate lookup ran.
    assert_eq!(store.call_count(), 1);

    Ok(())
}

#[tokio::test]
async fn test_login_lookup_failure_is_500() -> Result<(), anyhow::Error> {
    let (server, _store) = spawn_failing_on(FaultPoint::FindOne).await?;

    let (status, body) = server.login(ALICE.email, ALICE.password).await?;

    assert_generic_failure(status, &body);

    Ok(())
}

#[tokio::test]
async fn test_login_blank_input_never_reaches_store() -> Result<(), anyhow::Error> {
    let (server, store) = spawn_failing_on(FaultPoint::Every).await?;

    let (status, body) = server.login("", ALICE.password).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    body.assert_error().assert_message("Please enter email");
    assert_eq!(store.call_count(), 0);

    Ok(())
}

#[tokio::test]
async fn test_list_failure_does_not_affect_login() -> Result<(), anyhow::Error> {
    let (server, _store) = spawn_failing_on(FaultPoint::FindAll).await?;

    let (status, _) = server.signup(&BOB).await?;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = server.list_users().await?;
    assert_generic_failure(status, &body);

    let (status, body) = server.login(BOB.email, BOB.password).await?;
    assert_eq!(status, StatusCode::OK);
    body.assert_success();

    Ok(())
}

#[tokio::test]
async fn test_delete_remove_failure_keeps_account() -> Result<(), anyhow::Error> {
    let (server, store) = spawn_failing_on(FaultPoint::Remove).await?;
    server.signup(&ALICE).await?;

    let (status, body) = server.delete_user(ALICE.email).await?;

    assert_generic_failure(status, &body);
    assert_eq!(store.inner().len().await, 1);

    let (status, _) = server.login(ALICE.email, ALICE.password).await?;
    assert_eq!(status, StatusCode::OK);

    Ok(())
}

#[tokio::test]
async fn test_operational_endpoints_survive_store_outage() -> Result<(), anyhow::Error> {
    let (server, store) = spawn_failing_on(FaultPoint::Every).await?;

    let response = server
        .client()
        .get(format!("{}/health", server.url()))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let response = server
        .client()
        .get(format!("{}/api/test", server.url()))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(store.call_count(), 0);

    Ok(())
}
