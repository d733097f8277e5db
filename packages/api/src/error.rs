//! Errors raised while talking to the authentication collaborator.

use thiserror::Error;

/// Transport or protocol failure. Ordinary negative outcomes (wrong password,
/// email taken) are not errors; they come back as `AuthResponse::failure`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden,
    #[error("resource not found")]
    NotFound,
    #[error("server error ({0})")]
    Server(u16),
    #[error("unexpected HTTP status {0}")]
    Http(u16),
    #[error("request timed out")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
    #[error("failed to decode response: {0}")]
    Decode(String),
    #[error("{0}")]
    Rejected(String),
}

impl ServiceError {
    /// Map a non-success HTTP status onto the matching variant.
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            500..=599 => Self::Server(status),
            other => Self::Http(other),
        }
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else if e.is_decode() {
            Self::Decode(e.to_string())
        } else {
            Self::Network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status() {
        assert_eq!(ServiceError::from_status(401), ServiceError::Unauthorized);
        assert_eq!(ServiceError::from_status(403), ServiceError::Forbidden);
        assert_eq!(ServiceError::from_status(404), ServiceError::NotFound);
        assert_eq!(ServiceError::from_status(502), ServiceError::Server(502));
        assert_eq!(ServiceError::from_status(418), ServiceError::Http(418));
    }

    #[test]
    fn test_rejected_displays_message_verbatim() {
        assert_eq!(
            ServiceError::Rejected("Email is already registered".into()).to_string(),
            "Email is already registered"
        );
    }
}
