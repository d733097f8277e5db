//! Router seam and the deferred destination captured by the session guard.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigateOptions {
    /// Replace the current history entry instead of pushing a new one.
    pub replace: bool,
}

impl NavigateOptions {
    pub fn replace() -> Self {
        Self { replace: true }
    }

    pub fn push() -> Self {
        Self { replace: false }
    }
}

/// The two router primitives the guard and the auth flows rely on.
pub trait Navigator {
    fn current_path(&self) -> String;
    fn navigate(&self, path: &str, options: NavigateOptions);
}

/// Where the user was headed when the guard turned them away.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationIntent {
    pub target_path: String,
}

impl NavigationIntent {
    pub fn new(target_path: impl Into<String>) -> Self {
        Self {
            target_path: target_path.into(),
        }
    }
}

/// Holds at most one [`NavigationIntent`]; a newer capture replaces the older one.
#[derive(Clone, Debug, Default)]
pub struct IntentSlot {
    inner: Arc<Mutex<Option<NavigationIntent>>>,
}

impl IntentSlot {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Option<NavigationIntent>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn capture(&self, intent: NavigationIntent) {
        tracing::debug!(target_path = %intent.target_path, "navigation intent captured");
        *self.lock() = Some(intent);
    }

    /// Consume the intent; a second call returns `None`.
    pub fn take(&self) -> Option<NavigationIntent> {
        self.lock().take()
    }

    pub fn peek(&self) -> Option<NavigationIntent> {
        self.lock().clone()
    }

    pub fn clear(&self) {
        self.lock().take();
    }

    /// Drop the intent once the user has moved on to `path` by other means.
    ///
    /// The intent survives on its own target and on the `auth_paths` where the
    /// user completes signing in. Returns whether an intent was dropped.
    pub fn discard_unless(&self, path: &str, auth_paths: &[&str]) -> bool {
        let mut slot = self.lock();
        let keep = match slot.as_ref() {
            None => return false,
            Some(intent) => intent.target_path == path || auth_paths.contains(&path),
        };
        if keep {
            return false;
        }
        if let Some(intent) = slot.take() {
            tracing::debug!(target_path = %intent.target_path, %path, "navigation intent discarded");
        }
        true
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_is_consumed_once() {
        let slot = IntentSlot::new();
        slot.capture(NavigationIntent::new("/profile"));

        assert_eq!(slot.peek(), Some(NavigationIntent::new("/profile")));
        assert_eq!(slot.take(), Some(NavigationIntent::new("/profile")));
        assert_eq!(slot.take(), None);
    }

    #[test]
    fn test_newer_capture_wins() {
        let slot = IntentSlot::new();
        slot.capture(NavigationIntent::new("/a"));
        slot.capture(NavigationIntent::new("/b"));
        assert_eq!(slot.take().unwrap().target_path, "/b");
    }

    const AUTH_PATHS: [&str; 2] = ["/login", "/register"];

    #[test]
    fn test_intent_survives_auth_pages() {
        let slot = IntentSlot::new();
        slot.capture(NavigationIntent::new("/profile"));

        for path in ["/profile", "/login", "/register", "/login"] {
            assert!(!slot.discard_unless(path, &AUTH_PATHS));
        }
        assert_eq!(slot.peek(), Some(NavigationIntent::new("/profile")));
    }

    #[test]
    fn test_intent_discarded_when_navigating_elsewhere() {
        let slot = IntentSlot::new();
        slot.capture(NavigationIntent::new("/profile"));

        assert!(slot.discard_unless("/", &AUTH_PATHS));
        assert!(slot.peek().is_none());
        assert!(!slot.discard_unless("/about", &AUTH_PATHS));
    }

    #[test]
    fn test_clear() {
        let slot = IntentSlot::new();
        slot.clone().capture(NavigationIntent::new("/a"));
        slot.clear();
        assert!(slot.peek().is_none());
    }
}
