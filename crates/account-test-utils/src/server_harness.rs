//! Test server harness for E2E testing
//!
//! Provides TestAccountServer for spawning real account service instances in tests.

use crate::fixtures::{test_hasher, TestAccount};
use account_service::repositories::memory::MemoryAccountStore;
use account_service::repositories::AccountStore;
use account_service::routes::{self, AppState};
use account_service::services::AccountService;
use metrics_exporter_prometheus::PrometheusBuilder;
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Test harness for spawning the account service in E2E tests
///
/// # Example
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_signup_e2e() -> Result<(), anyhow::Error> {
///     let server = TestAccountServer::spawn().await?;
///
///     let response = server
///         .client()
///         .post(format!("{}/api/signup", server.url()))
///         .json(&signup_body)
///         .send()
///         .await?;
///
///     assert_eq!(response.status(), 200);
///     Ok(())
/// }
/// ```
pub struct TestAccountServer {
    addr: SocketAddr,
    service: AccountService,
    client: reqwest::Client,
    handle: JoinHandle<()>,
}

impl TestAccountServer {
    /// Spawn a server backed by a fresh in-memory store.
    pub async fn spawn() -> Result<Self, anyhow::Error> {
        Self::spawn_with_store(Arc::new(MemoryAccountStore::new())).await
    }

    /// Spawn a server backed by the given store.
    ///
    /// The server will:
    /// - Bind to a random available port (127.0.0.1:0)
    /// - Hash with the minimum bcrypt cost
    /// - Serve in a background task until dropped
    pub async fn spawn_with_store(store: Arc<dyn AccountStore>) -> Result<Self, anyhow::Error> {
        let service = AccountService::new(store, test_hasher());

        let state = Arc::new(AppState {
            accounts: service.clone(),
        });

        // The global recorder can only be installed once per process; later
        // servers get a standalone recorder.
        let metrics_handle = match routes::init_metrics_recorder() {
            Ok(handle) => handle,
            Err(_) => PrometheusBuilder::new().build_recorder().handle(),
        };

        let app = routes::build_routes(state, metrics_handle);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bind test server: {}", e))?;

        let addr = listener
            .local_addr()
            .map_err(|e| anyhow::anyhow!("Failed to get local address: {}", e))?;

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("Test server error: {}", e);
            }
        });

        Ok(Self {
            addr,
            service,
            client: reqwest::Client::new(),
            handle,
        })
    }

    /// Get the base URL of the test server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Shared HTTP client
    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// The service instance behind the server, for direct state inspection
    pub fn service(&self) -> &AccountService {
        &self.service
    }

    /// POST /api/signup for a fixture account
    pub async fn signup(
        &self,
        account: &TestAccount,
    ) -> Result<(StatusCode, Value), anyhow::Error> {
        self.post_json(
            "/api/signup",
            json!({
                "username": account.username,
                "email": account.email,
                "password": account.password,
            }),
        )
        .await
    }

    /// POST /api/login
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(StatusCode, Value), anyhow::Error> {
        self.post_json("/api/login", json!({"email": email, "password": password}))
            .await
    }

    /// GET /api/users
    pub async fn list_users(&self) -> Result<(StatusCode, Value), anyhow::Error> {
        let response = self
            .client
            .get(format!("{}/api/users", self.url()))
            .send()
            .await?;
        Self::into_parts(response).await
    }

    /// DELETE /api/users/:email
    pub async fn delete_user(&self, email: &str) -> Result<(StatusCode, Value), anyhow::Error> {
        let response = self
            .client
            .delete(format!("{}/api/users/{}", self.url(), email))
            .send()
            .await?;
        Self::into_parts(response).await
    }

    /// POST an arbitrary JSON body
    pub async fn post_json(
        &self,
        path: &str,
        body: Value,
    ) -> Result<(StatusCode, Value), anyhow::Error> {
        let response = self
            .client
            .post(format!("{}{}", self.url(), path))
            .json(&body)
            .send()
            .await?;
        Self::into_parts(response).await
    }

    async fn into_parts(response: reqwest::Response) -> Result<(StatusCode, Value), anyhow::Error> {
        let status = response.status();
        let body = response.json::<Value>().await?;
        Ok((status, body))
    }
}

impl Drop for TestAccountServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
