//! # API crate — the authentication collaborator boundary
//!
//! Everything the client knows about "the server" lives here: the wire models, the
//! [`AuthService`] trait the rest of the workspace programs against, and two
//! implementations of it.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`models`] | `UserInfo`, login/register requests, `AuthResponse` / `ApiResponse` result shapes |
//! | [`service`] | The async [`AuthService`] trait (`login`, `register`, `logout`, `user_info`, `refresh_token`) |
//! | [`mock`] | [`MockAuthService`], an in-memory user table with simulated latency |
//! | [`request`] | [`ApiClient`] (bearer token, JSON envelope, status mapping) and [`HttpAuthService`] |
//! | [`backend`] | [`AuthBackend`], the mock or HTTP service picked at startup |
//! | [`error`] | [`ServiceError`], the transport/protocol failure type |
//!
//! The mock and HTTP services return identical shapes, so swapping the mock for a
//! real backend does not touch any caller.

pub mod backend;
pub mod error;
pub mod mock;
pub mod models;
pub mod request;
pub mod service;

pub use backend::AuthBackend;
pub use error::ServiceError;
pub use mock::{MockAuthService, MockLatency};
pub use models::{ApiResponse, AuthPayload, AuthResponse, LoginRequest, RegisterRequest, UserInfo};
pub use request::{ApiClient, HttpAuthService, TokenSource, UnauthorizedHook};
pub use reqwest::StatusCode;
pub use service::AuthService;
