//! The authentication collaborator seam.

use std::future::Future;

use crate::error::ServiceError;
use crate::models::{ApiResponse, AuthResponse, LoginRequest, RegisterRequest};

/// Async interface to whatever issues sessions: the in-memory
/// [`MockAuthService`](crate::MockAuthService) or a real backend reached through
/// [`HttpAuthService`](crate::HttpAuthService).
///
/// Implementations report negative outcomes as `Ok(AuthResponse { success: false, .. })`
/// and reserve `Err` for transport failures. Callers treat both the same way.
pub trait AuthService {
    fn login(
        &self,
        request: &LoginRequest,
    ) -> impl Future<Output = Result<AuthResponse, ServiceError>>;

    fn register(
        &self,
        request: &RegisterRequest,
    ) -> impl Future<Output = Result<AuthResponse, ServiceError>>;

    fn logout(&self) -> impl Future<Output = Result<ApiResponse, ServiceError>>;

    fn user_info(
        &self,
        token: &str,
    ) -> impl Future<Output = Result<AuthResponse, ServiceError>>;

    fn refresh_token(
        &self,
        token: &str,
    ) -> impl Future<Output = Result<AuthResponse, ServiceError>>;
}
