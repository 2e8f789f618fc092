use crate::errors::AccountError;
use crate::models::{
    AccountListing, DeleteResponse, LoginResponse, SignupResponse, TestResponse,
    UserListResponse, STATUS_SUCCESS,
};
use crate::routes::AppState;
use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Path, Request, State},
    Json,
};
use common::secret::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::sync::Arc;
use tracing::instrument;

/// Signup body. Missing fields are treated as empty strings.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: Option<SecretString>,
}

/// Login body. Missing fields are reported as blank input by the service.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<SecretString>,
}

/// `Json` extractor whose rejections use the service's error body.
#[derive(Debug)]
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AccountError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => {
                tracing::debug!(
                    target: "account.handler",
                    status = %rejection.status(),
                    "Rejected request body"
                );
                Err(AccountError::InvalidBody(rejection))
            }
        }
    }
}

fn exposed(secret: &Option<SecretString>) -> &str {
    secret.as_ref().map(|s| s.expose_secret()).unwrap_or("")
}

/// Handle API smoke test
///
/// GET /api/test
pub async fn handle_test() -> Json<TestResponse> {
    Json(TestResponse {
        message: "API is working",
    })
}

/// Handle signup
///
/// POST /api/signup
#[instrument(name = "account.handler.signup", skip_all)]
pub async fn handle_signup(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<SignupRequest>,
) -> Result<Json<SignupResponse>, AccountError> {
    let account = state
        .accounts
        .create(&payload.username, &payload.email, exposed(&payload.password))
        .await?;

    Ok(Json(SignupResponse {
        status: STATUS_SUCCESS,
        message: format!(
            "Account created successfully! Welcome {}!",
            account.username
        ),
        username: account.username.clone(),
        account: account.summary(),
    }))
}

/// Handle login
///
/// POST /api/login
#[instrument(name = "account.handler.login", skip_all)]
pub async fn handle_login(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AccountError> {
    let email = payload.email.as_deref().unwrap_or("");
    let user = state
        .accounts
        .authenticate(email, exposed(&payload.password))
        .await?;

    Ok(Json(LoginResponse {
        status: STATUS_SUCCESS,
        message: format!("Welcome back, {}!", user.username),
        user,
    }))
}

/// Handle user listing
///
/// GET /api/users
///
/// Every entry's `password` field carries the redaction marker.
#[instrument(name = "account.handler.list_users", skip_all)]
pub async fn handle_list_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<UserListResponse>, AccountError> {
    let users: Vec<AccountListing> = state
        .accounts
        .list_all()
        .await?
        .into_iter()
        .map(AccountListing::from)
        .collect();

    Ok(Json(UserListResponse {
        status: STATUS_SUCCESS,
        message: "All users retrieved successfully".to_string(),
        count: users.len(),
        users,
    }))
}

/// Handle user deletion
///
/// DELETE /api/users/:email
#[instrument(name = "account.handler.delete_user", skip_all)]
pub async fn handle_delete_user(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
) -> Result<Json<DeleteResponse>, AccountError> {
    state.accounts.delete_by_email(&email).await?;

    Ok(Json(DeleteResponse {
        status: STATUS_SUCCESS,
        message: format!("User with email '{}' deleted successfully", email),
    }))
}
