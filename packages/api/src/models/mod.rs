//! Wire models shared by the authentication collaborator and its callers.

mod auth;
mod user;

pub use auth::{ApiResponse, AuthPayload, AuthResponse, LoginRequest, RegisterRequest};
pub use user::UserInfo;
