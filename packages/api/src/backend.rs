//! Runtime choice between the mock and the HTTP [`AuthService`].

use crate::error::ServiceError;
use crate::mock::MockAuthService;
use crate::models::{ApiResponse, AuthResponse, LoginRequest, RegisterRequest};
use crate::request::HttpAuthService;
use crate::service::AuthService;

/// The [`AuthService`] the app was configured with.
#[derive(Clone, Debug)]
pub enum AuthBackend {
    Mock(MockAuthService),
    Http(HttpAuthService),
}

impl AuthBackend {
    pub fn is_mock(&self) -> bool {
        matches!(self, Self::Mock(_))
    }
}

impl From<MockAuthService> for AuthBackend {
    fn from(service: MockAuthService) -> Self {
        Self::Mock(service)
    }
}

impl From<HttpAuthService> for AuthBackend {
    fn from(service: HttpAuthService) -> Self {
        Self::Http(service)
    }
}

impl AuthService for AuthBackend {
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ServiceError> {
        match self {
            Self::Mock(service) => service.login(request).await,
            Self::Http(service) => service.login(request).await,
        }
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ServiceError> {
        match self {
            Self::Mock(service) => service.register(request).await,
            Self::Http(service) => service.register(request).await,
        }
    }

    async fn logout(&self) -> Result<ApiResponse, ServiceError> {
        match self {
            Self::Mock(service) => service.logout().await,
            Self::Http(service) => service.logout().await,
        }
    }

    async fn user_info(&self, token: &str) -> Result<AuthResponse, ServiceError> {
        match self {
            Self::Mock(service) => service.user_info(token).await,
            Self::Http(service) => service.user_info(token).await,
        }
    }

    async fn refresh_token(&self, token: &str) -> Result<AuthResponse, ServiceError> {
        match self {
            Self::Mock(service) => service.refresh_token(token).await,
            Self::Http(service) => service.refresh_token(token).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockLatency;

    #[tokio::test]
    async fn test_mock_backend_delegates() {
        let backend = AuthBackend::from(MockAuthService::with_latency(MockLatency::none()));
        assert!(backend.is_mock());

        let response = backend
            .login(&LoginRequest {
                email: "qiuyedx@example.com".into(),
                password: "123456".into(),
            })
            .await
            .unwrap();
        assert!(response.success);
        assert_eq!(response.data.unwrap().user.name, "QiuYeDx");
    }
}
