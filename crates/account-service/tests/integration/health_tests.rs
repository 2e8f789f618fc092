//! E2E tests for operational endpoints.

use account_test_utils::server_harness::TestAccountServer;
use account_test_utils::ResponseAssertions;
use reqwest::StatusCode;

#[tokio::test]
async fn test_health_returns_ok() -> Result<(), anyhow::Error> {
    let server = TestAccountServer::spawn().await?;

    let response = server
        .client()
        .get(format!("{}/health", server.url()))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await?, "OK");

    Ok(())
}

#[tokio::test]
async fn test_api_test_endpoint() -> Result<(), anyhow::Error> {
    let server = TestAccountServer::spawn().await?;

    let response = server
        .client()
        .get(format!("{}/api/test", server.url()))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await?;
    body.assert_message("API is working");

    Ok(())
}

#[tokio::test]
async fn test_metrics_endpoint_serves_text() -> Result<(), anyhow::Error> {
    let server = TestAccountServer::spawn().await?;

    let response = server
        .client()
        .get(format!("{}/metrics", server.url()))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::OK);

    Ok(())
}

#[tokio::test]
async fn test_unknown_route_is_404() -> Result<(), anyhow::Error> {
    let server = TestAccountServer::spawn().await?;

    let response = server
        .client()
        .get(format!("{}/api/nope", server.url()))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    Ok(())
}
