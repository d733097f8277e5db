//! Request and response shapes of the authentication endpoints.

use serde::{Deserialize, Serialize};

use super::UserInfo;

/// Credentials submitted by the login form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Payload submitted by the registration form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// The user and bearer token issued on a successful login or registration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthPayload {
    pub user: UserInfo,
    pub token: String,
}

/// Result of `login` / `register`.
///
/// `success == false` is an ordinary outcome (wrong credentials, email taken),
/// not a transport failure; `error` then carries the message to show.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<AuthPayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AuthResponse {
    pub fn ok(user: UserInfo, token: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(AuthPayload {
                user,
                token: token.into(),
            }),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }

    /// The payload, only when the response is a success that carries one.
    pub fn into_payload(self) -> Result<AuthPayload, Option<String>> {
        match (self.success, self.data) {
            (true, Some(payload)) => Ok(payload),
            _ => Err(self.error),
        }
    }
}

/// Generic acknowledgement used by endpoints without a meaningful body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiResponse<T = serde_json::Value> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn acknowledged(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            error: None,
            message: Some(message.into()),
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            message: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_uses_camel_case() {
        let req = RegisterRequest {
            name: "Ann".into(),
            email: "ann@example.com".into(),
            password: "secret1".into(),
            confirm_password: "secret1".into(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["confirmPassword"], "secret1");
        assert!(json.get("confirm_password").is_none());
    }

    #[test]
    fn test_success_without_data_is_not_a_payload() {
        let response = AuthResponse {
            success: true,
            data: None,
            error: None,
        };
        assert_eq!(response.into_payload(), Err(None));

        let failed = AuthResponse::failure("nope");
        assert_eq!(failed.into_payload(), Err(Some("nope".to_string())));
    }

    #[test]
    fn test_failure_response_shape() {
        let json = serde_json::to_value(AuthResponse::failure("Invalid email or password")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "success": false, "error": "Invalid email or password" })
        );
    }

    #[test]
    fn test_acknowledgement_with_typed_payload() {
        let ack: ApiResponse<UserInfo> =
            serde_json::from_str(r#"{"success": true, "message": "Signed out"}"#).unwrap();
        assert!(ack.success);
        assert!(ack.data.is_none());
        assert_eq!(ack.message.as_deref(), Some("Signed out"));
    }
}
