//! # HTTP client for a real authentication backend
//!
//! [`ApiClient`] wraps a `reqwest::Client` with the conventions the backend is expected
//! to follow:
//!
//! - every path is resolved against a base URL (default `/api`);
//! - the current session token, when there is one, goes out as `Authorization: Bearer ...`;
//! - bodies come back in an envelope `{ "code": 200, "data": ..., "message": ... }` where
//!   any `code` other than 200 is a rejection carrying `message`;
//! - a `401` status fires the unauthorized hook so the owner can drop the session.
//!
//! [`HttpAuthService`] implements [`AuthService`] on top of it, preserving the same
//! request/response shapes as [`MockAuthService`](crate::MockAuthService).

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ServiceError;
use crate::models::{ApiResponse, AuthPayload, AuthResponse, LoginRequest, RegisterRequest};
use crate::service::AuthService;

pub const DEFAULT_BASE_URL: &str = "/api";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const SUCCESS_CODE: u16 = 200;

/// Supplies the bearer token for outgoing requests.
pub type TokenSource = Arc<dyn Fn() -> Option<String> + Send + Sync>;

/// Invoked whenever the backend answers `401 Unauthorized`.
pub type UnauthorizedHook = Arc<dyn Fn() + Send + Sync>;

/// Response envelope used by every backend endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Envelope<T> {
    pub code: u16,
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    /// Unwrap the payload, turning a non-200 `code` into [`ServiceError::Rejected`].
    pub fn into_data(self) -> Result<Option<T>, ServiceError> {
        if self.code == SUCCESS_CODE {
            Ok(self.data)
        } else {
            Err(ServiceError::Rejected(
                self.message
                    .unwrap_or_else(|| "Request failed".to_string()),
            ))
        }
    }
}

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<TokenSource>,
    on_unauthorized: Option<UnauthorizedHook>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("has_token_source", &self.token.is_some())
            .field("has_unauthorized_hook", &self.on_unauthorized.is_some())
            .finish()
    }
}

impl ApiClient {
    /// Build a client. The timeout is enforced on native targets only; browsers
    /// apply their own fetch limits.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ServiceError> {
        #[cfg(not(target_arch = "wasm32"))]
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        #[cfg(target_arch = "wasm32")]
        let http = {
            let _ = timeout;
            reqwest::Client::builder().build()?
        };

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
            on_unauthorized: None,
        })
    }

    pub fn with_token_source(mut self, source: TokenSource) -> Self {
        self.token = Some(source);
        self
    }

    pub fn with_unauthorized_hook(mut self, hook: UnauthorizedHook) -> Self {
        self.on_unauthorized = Some(hook);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve `path` against the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, ServiceError> {
        self.send(self.http.get(self.url(path))).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<Option<T>, ServiceError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.http.post(self.url(path)).json(body)).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        mut request: RequestBuilder,
    ) -> Result<Option<T>, ServiceError> {
        if let Some(token) = self.token.as_ref().and_then(|source| source()) {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        self.check_status(response.status())?;

        let envelope: Envelope<T> = response.json().await?;
        envelope.into_data()
    }

    /// Turn a non-success status into an error, firing the unauthorized hook on 401.
    pub fn check_status(&self, status: StatusCode) -> Result<(), ServiceError> {
        if status.is_success() {
            return Ok(());
        }

        let error = ServiceError::from_status(status.as_u16());
        match &error {
            ServiceError::Unauthorized => {
                tracing::warn!("backend rejected the session token");
                if let Some(hook) = &self.on_unauthorized {
                    hook();
                }
            }
            other => tracing::warn!(%status, error = %other, "request failed"),
        }
        Err(error)
    }
}

/// [`AuthService`] backed by a real HTTP API.
#[derive(Clone, Debug)]
pub struct HttpAuthService {
    client: ApiClient,
}

impl HttpAuthService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }
}

/// A rejection from the backend is an ordinary negative outcome; everything else
/// stays an error.
fn auth_outcome(
    result: Result<Option<AuthPayload>, ServiceError>,
) -> Result<AuthResponse, ServiceError> {
    match result {
        Ok(Some(payload)) => Ok(AuthResponse::ok(payload.user, payload.token)),
        Ok(None) => Err(ServiceError::Decode("response carried no data".to_string())),
        Err(ServiceError::Rejected(message)) => Ok(AuthResponse::failure(message)),
        Err(e) => Err(e),
    }
}

#[derive(Serialize)]
struct TokenBody<'a> {
    token: &'a str,
}

impl AuthService for HttpAuthService {
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ServiceError> {
        auth_outcome(self.client.post("/auth/login", request).await)
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ServiceError> {
        auth_outcome(self.client.post("/auth/register", request).await)
    }

    async fn logout(&self) -> Result<ApiResponse, ServiceError> {
        let result: Result<Option<serde_json::Value>, ServiceError> =
            self.client.post("/auth/logout", &serde_json::json!({})).await;
        match result {
            Ok(data) => Ok(ApiResponse {
                success: true,
                data,
                error: None,
                message: None,
            }),
            Err(ServiceError::Rejected(message)) => Ok(ApiResponse::failure(message)),
            Err(e) => Err(e),
        }
    }

    async fn user_info(&self, _token: &str) -> Result<AuthResponse, ServiceError> {
        // The bearer header comes from the token source.
        auth_outcome(self.client.get("/auth/me").await)
    }

    async fn refresh_token(&self, token: &str) -> Result<AuthResponse, ServiceError> {
        auth_outcome(self.client.post("/auth/refresh", &TokenBody { token }).await)
    }
}
