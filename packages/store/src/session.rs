//! Process-wide authentication state.
//!
//! A [`Session`] is either signed out or holds both a user and a token; there is no
//! way to build one with only half of the pair, so "authenticated" and "user and
//! token present" can never disagree.

use std::sync::Arc;

use api::UserInfo;
use tokio::sync::watch;

#[derive(Debug, Clone, PartialEq, Eq)]
struct SignedIn {
    user: UserInfo,
    token: String,
}

/// Current authentication status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    current: Option<SignedIn>,
}

impl Session {
    pub fn signed_in(user: UserInfo, token: impl Into<String>) -> Self {
        Self {
            current: Some(SignedIn {
                user,
                token: token.into(),
            }),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    pub fn user(&self) -> Option<&UserInfo> {
        self.current.as_ref().map(|s| &s.user)
    }

    pub fn token(&self) -> Option<&str> {
        self.current.as_ref().map(|s| s.token.as_str())
    }
}

/// Shared, observable [`Session`] cell. Clones refer to the same session.
#[derive(Clone, Debug)]
pub struct SessionStore {
    tx: Arc<watch::Sender<Session>>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    /// Starts signed out.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Session::default());
        Self { tx: Arc::new(tx) }
    }

    pub fn sign_in(&self, user: UserInfo, token: impl Into<String>) {
        tracing::debug!(user_id = %user.id, "session signed in");
        self.tx.send_replace(Session::signed_in(user, token));
    }

    /// Clear the session. Notifies subscribers only if something was cleared.
    pub fn sign_out(&self) {
        let cleared = self.tx.send_if_modified(|session| session.current.take().is_some());
        if cleared {
            tracing::debug!("session cleared");
        }
    }

    pub fn snapshot(&self) -> Session {
        self.tx.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.tx.borrow().is_authenticated()
    }

    pub fn user(&self) -> Option<UserInfo> {
        self.tx.borrow().user().cloned()
    }

    pub fn token(&self) -> Option<String> {
        self.tx.borrow().token().map(str::to_string)
    }

    /// Receiver that wakes on every session change.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserInfo {
        UserInfo {
            id: "1".into(),
            name: "QiuYeDx".into(),
            email: "qiuyedx@example.com".into(),
            avatar: None,
        }
    }

    #[test]
    fn test_starts_signed_out() {
        let store = SessionStore::new();
        let session = store.snapshot();
        assert!(!session.is_authenticated());
        assert!(session.user().is_none());
        assert!(session.token().is_none());
    }

    #[test]
    fn test_sign_in_and_out() {
        let store = SessionStore::new();
        store.sign_in(user(), "tok");

        assert!(store.is_authenticated());
        assert_eq!(store.user().unwrap().name, "QiuYeDx");
        assert_eq!(store.token().as_deref(), Some("tok"));

        store.sign_out();
        assert!(!store.is_authenticated());
        assert!(store.user().is_none());
        assert!(store.token().is_none());
    }

    #[test]
    fn test_clones_share_state() {
        let store = SessionStore::new();
        let other = store.clone();
        other.sign_in(user(), "tok");
        assert!(store.is_authenticated());
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let store = SessionStore::new();
        let mut rx = store.subscribe();

        store.sign_in(user(), "tok");
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_authenticated());

        // Signing out twice only notifies once
        store.sign_out();
        store.sign_out();
        rx.changed().await.unwrap();
        assert!(!rx.borrow_and_update().is_authenticated());
        assert!(!rx.has_changed().unwrap());
    }
}
