//! # In-memory authentication service
//!
//! [`MockAuthService`] stands in for a backend during development. It keeps a small
//! user table behind an `Arc<Mutex<_>>` (clones share the table) and sleeps for a
//! configurable [`MockLatency`] before every answer so loading states are visible.
//!
//! Tokens have the shape `mock-jwt-token-{user_id}-{unix_millis}`. `user_info` and
//! `refresh_token` decode the user id back out of that shape.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::Utc;

use crate::error::ServiceError;
use crate::models::{ApiResponse, AuthResponse, LoginRequest, RegisterRequest, UserInfo};
use crate::service::AuthService;

const TOKEN_PREFIX: &str = "mock-jwt-token-";
const DEFAULT_AVATAR: &str =
    "https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?w=100&h=100&fit=crop&crop=face";

pub const INVALID_CREDENTIALS: &str = "Invalid email or password";
pub const EMAIL_TAKEN: &str = "Email is already registered";
pub const PASSWORD_MISMATCH: &str = "Passwords do not match";
pub const INVALID_TOKEN: &str = "Invalid or expired token";

/// Artificial delay applied before each mock answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockLatency {
    pub login: Duration,
    pub register: Duration,
    pub logout: Duration,
    pub user_info: Duration,
    pub refresh_token: Duration,
}

impl MockLatency {
    /// No delay at all; handy in tests.
    pub fn none() -> Self {
        Self {
            login: Duration::ZERO,
            register: Duration::ZERO,
            logout: Duration::ZERO,
            user_info: Duration::ZERO,
            refresh_token: Duration::ZERO,
        }
    }
}

impl Default for MockLatency {
    fn default() -> Self {
        Self {
            login: Duration::from_millis(1500),
            register: Duration::from_millis(1500),
            logout: Duration::from_millis(500),
            user_info: Duration::from_millis(800),
            refresh_token: Duration::from_millis(600),
        }
    }
}

#[derive(Debug, Clone)]
struct MockUser {
    id: String,
    name: String,
    email: String,
    password: String,
    avatar: Option<String>,
}

impl MockUser {
    fn to_info(&self) -> UserInfo {
        UserInfo {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            avatar: self.avatar.clone(),
        }
    }
}

fn seed_users() -> Vec<MockUser> {
    vec![
        MockUser {
            id: "1".to_string(),
            name: "QiuYeDx".to_string(),
            email: "qiuyedx@example.com".to_string(),
            password: "123456".to_string(),
            avatar: Some(DEFAULT_AVATAR.to_string()),
        },
        MockUser {
            id: "2".to_string(),
            name: "张三".to_string(),
            email: "zhangsan@example.com".to_string(),
            password: "123456".to_string(),
            avatar: Some(
                "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=100&h=100&fit=crop&crop=face"
                    .to_string(),
            ),
        },
    ]
}

/// In-memory [`AuthService`] seeded with two demo accounts.
#[derive(Clone, Debug)]
pub struct MockAuthService {
    users: Arc<Mutex<Vec<MockUser>>>,
    latency: MockLatency,
}

impl Default for MockAuthService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAuthService {
    pub fn new() -> Self {
        Self::with_latency(MockLatency::default())
    }

    pub fn with_latency(latency: MockLatency) -> Self {
        Self {
            users: Arc::new(Mutex::new(seed_users())),
            latency,
        }
    }

    pub fn latency(&self) -> MockLatency {
        self.latency
    }

    /// Number of accounts currently known, seeded ones included.
    pub fn user_count(&self) -> usize {
        self.users().len()
    }

    fn users(&self) -> MutexGuard<'_, Vec<MockUser>> {
        self.users.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn find_by_token(&self, token: &str) -> Option<MockUser> {
        let id = user_id_from_token(token)?;
        self.users().iter().find(|u| u.id == id).cloned()
    }
}

fn issue_token(user_id: &str) -> String {
    format!("{TOKEN_PREFIX}{user_id}-{}", Utc::now().timestamp_millis())
}

fn user_id_from_token(token: &str) -> Option<&str> {
    let rest = token.strip_prefix(TOKEN_PREFIX)?;
    let (id, millis) = rest.rsplit_once('-')?;
    if id.is_empty() || millis.parse::<i64>().is_err() {
        return None;
    }
    Some(id)
}

#[cfg(target_arch = "wasm32")]
async fn delay(duration: Duration) {
    if !duration.is_zero() {
        gloo_timers::future::sleep(duration).await;
    }
}

#[cfg(not(target_arch = "wasm32"))]
async fn delay(duration: Duration) {
    if !duration.is_zero() {
        tokio::time::sleep(duration).await;
    }
}

impl AuthService for MockAuthService {
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ServiceError> {
        delay(self.latency.login).await;

        let user = self
            .users()
            .iter()
            .find(|u| u.email == request.email && u.password == request.password)
            .cloned();

        match user {
            Some(user) => {
                tracing::debug!(user_id = %user.id, "mock login accepted");
                Ok(AuthResponse::ok(user.to_info(), issue_token(&user.id)))
            }
            None => {
                tracing::debug!(email = %request.email, "mock login rejected");
                Ok(AuthResponse::failure(INVALID_CREDENTIALS))
            }
        }
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ServiceError> {
        delay(self.latency.register).await;

        let mut users = self.users();
        if users.iter().any(|u| u.email == request.email) {
            return Ok(AuthResponse::failure(EMAIL_TAKEN));
        }
        if request.password != request.confirm_password {
            return Ok(AuthResponse::failure(PASSWORD_MISMATCH));
        }

        let user = MockUser {
            id: uuid::Uuid::new_v4().to_string(),
            name: request.name.clone(),
            email: request.email.clone(),
            password: request.password.clone(),
            avatar: Some(DEFAULT_AVATAR.to_string()),
        };
        let info = user.to_info();
        let token = issue_token(&user.id);
        users.push(user);
        tracing::debug!(user_id = %info.id, "mock user registered");

        Ok(AuthResponse::ok(info, token))
    }

    async fn logout(&self) -> Result<ApiResponse, ServiceError> {
        delay(self.latency.logout).await;
        Ok(ApiResponse::acknowledged("Signed out"))
    }

    async fn user_info(&self, token: &str) -> Result<AuthResponse, ServiceError> {
        delay(self.latency.user_info).await;

        Ok(match self.find_by_token(token) {
            Some(user) => AuthResponse::ok(user.to_info(), token),
            None => AuthResponse::failure(INVALID_TOKEN),
        })
    }

    async fn refresh_token(&self, token: &str) -> Result<AuthResponse, ServiceError> {
        delay(self.latency.refresh_token).await;

        Ok(match self.find_by_token(token) {
            Some(user) => AuthResponse::ok(user.to_info(), issue_token(&user.id)),
            None => AuthResponse::failure(INVALID_TOKEN),
        })
    }
}
