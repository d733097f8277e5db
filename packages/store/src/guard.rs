//! Session guard for protected views.

use crate::navigation::{IntentSlot, NavigateOptions, NavigationIntent, Navigator};

/// Outcome of checking one navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Render,
    Redirect {
        to: String,
        intent: Option<NavigationIntent>,
    },
}

/// Lets authenticated sessions through and sends everyone else to `fallback`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionGuard {
    fallback: String,
}

impl SessionGuard {
    pub fn new(fallback: impl Into<String>) -> Self {
        Self {
            fallback: fallback.into(),
        }
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Pure decision. The fallback itself is never recorded as an intent.
    pub fn decide(&self, authenticated: bool, current_path: &str) -> GuardDecision {
        if authenticated {
            return GuardDecision::Render;
        }
        let intent = (current_path != self.fallback).then(|| NavigationIntent::new(current_path));
        GuardDecision::Redirect {
            to: self.fallback.clone(),
            intent,
        }
    }

    /// Apply [`decide`](Self::decide): capture the intent and redirect if needed.
    /// Returns `true` when the protected view may render.
    pub fn enforce<N: Navigator>(
        &self,
        authenticated: bool,
        intents: &IntentSlot,
        navigator: &N,
    ) -> bool {
        let current = navigator.current_path();
        match self.decide(authenticated, &current) {
            GuardDecision::Render => true,
            GuardDecision::Redirect { to, intent } => {
                tracing::debug!(from = %current, %to, "guard redirect");
                if let Some(intent) = intent {
                    intents.capture(intent);
                }
                navigator.navigate(&to, NavigateOptions::replace());
                false
            }
        }
    }
}

impl Default for SessionGuard {
    fn default() -> Self {
        Self::new("/login")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::testing::RecordingNavigator;

    #[test]
    fn test_authenticated_renders() {
        let guard = SessionGuard::default();
        assert_eq!(guard.decide(true, "/profile"), GuardDecision::Render);
    }

    #[test]
    fn test_anonymous_is_redirected_with_intent() {
        let guard = SessionGuard::default();
        for path in ["/profile", "/settings/security", "/"] {
            assert_eq!(
                guard.decide(false, path),
                GuardDecision::Redirect {
                    to: "/login".to_string(),
                    intent: Some(NavigationIntent::new(path)),
                }
            );
        }
    }

    #[test]
    fn test_fallback_is_not_captured() {
        let guard = SessionGuard::new("/signin");
        assert_eq!(
            guard.decide(false, "/signin"),
            GuardDecision::Redirect {
                to: "/signin".to_string(),
                intent: None,
            }
        );
    }

    #[test]
    fn test_enforce_redirects_and_captures() {
        let guard = SessionGuard::default();
        let intents = IntentSlot::new();
        let nav = RecordingNavigator::at("/profile");

        assert!(!guard.enforce(false, &intents, &nav));
        assert_eq!(
            nav.last(),
            Some(("/login".to_string(), NavigateOptions::replace()))
        );
        assert_eq!(intents.peek(), Some(NavigationIntent::new("/profile")));
    }

    #[test]
    fn test_enforce_lets_sessions_through() {
        let guard = SessionGuard::default();
        let intents = IntentSlot::new();
        let nav = RecordingNavigator::at("/profile");

        assert!(guard.enforce(true, &intents, &nav));
        assert!(nav.history().is_empty());
        assert!(intents.peek().is_none());
    }
}
