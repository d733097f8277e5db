//! # User model for authenticated users
//!
//! [`UserInfo`] is the client-safe projection of a user account. It is what the
//! authentication collaborator hands back on a successful login or registration,
//! and what the session keeps for the rest of the process lifetime. Passwords
//! never appear here; the mock service keeps them in its own record type.
//!
//! The JSON shape is the contract a real backend must honour:
//!
//! ```json
//! { "id": "1", "name": "QiuYeDx", "email": "qiuyedx@example.com", "avatar": "https://..." }
//! ```

use serde::{Deserialize, Serialize};

/// User information safe to send to the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserInfo {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl UserInfo {
    /// Get display name, falling back to email if name is blank.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.email
        } else {
            &self.name
        }
    }

    /// First character of the display name, upper-cased, for avatar placeholders.
    pub fn initial(&self) -> String {
        self.display_name()
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str) -> UserInfo {
        UserInfo {
            id: "1".to_string(),
            name: name.to_string(),
            email: "someone@example.com".to_string(),
            avatar: None,
        }
    }

    #[test]
    fn test_display_name_falls_back_to_email() {
        assert_eq!(user("QiuYeDx").display_name(), "QiuYeDx");
        assert_eq!(user("  ").display_name(), "someone@example.com");
    }

    #[test]
    fn test_initial() {
        assert_eq!(user("qiuyedx").initial(), "Q");
        assert_eq!(user("张三").initial(), "张");
    }

    #[test]
    fn test_avatar_omitted_when_absent() {
        let json = serde_json::to_string(&user("QiuYeDx")).unwrap();
        assert!(!json.contains("avatar"));

        let parsed: UserInfo =
            serde_json::from_str(r#"{"id":"2","name":"n","email":"e@x.io"}"#).unwrap();
        assert!(parsed.avatar.is_none());
    }
}
