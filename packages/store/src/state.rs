//! The explicitly constructed application state handed to views.

use std::sync::Arc;

use api::{ApiClient, AuthBackend, HttpAuthService, MockAuthService, ServiceError};

use crate::busy::BusyCoordinator;
use crate::config::AppConfig;
use crate::guard::SessionGuard;
use crate::navigation::IntentSlot;
use crate::session::SessionStore;

/// Session, busy flag and pending intent for one running client.
///
/// Cloning is cheap and every clone observes the same state; construct a fresh
/// instance to get isolated state (one per test, for example).
#[derive(Clone, Debug)]
pub struct AppState {
    config: Arc<AppConfig>,
    session: SessionStore,
    busy: BusyCoordinator,
    intents: IntentSlot,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let busy = BusyCoordinator::new(config.busy.default_message.clone());
        Self {
            config: Arc::new(config),
            session: SessionStore::new(),
            busy,
            intents: IntentSlot::new(),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn busy(&self) -> &BusyCoordinator {
        &self.busy
    }

    pub fn intents(&self) -> &IntentSlot {
        &self.intents
    }

    /// Called for every route the user lands on. Forgets a captured intent once
    /// the user leaves the sign-in pages for somewhere other than its target.
    pub fn observe_route(&self, path: &str) {
        let routes = &self.config.routes;
        self.intents.discard_unless(
            path,
            &[routes.login_path.as_str(), routes.register_path.as_str()],
        );
    }

    /// Guard that redirects to the configured login path.
    pub fn guard(&self) -> SessionGuard {
        SessionGuard::new(self.config.routes.login_path.clone())
    }

    /// Mock auth service with the configured latency.
    pub fn mock_service(&self) -> MockAuthService {
        MockAuthService::with_latency(self.config.mock.latency())
    }

    /// The auth service selected by `[api] mock`.
    pub fn auth_service(&self) -> Result<AuthBackend, ServiceError> {
        if self.config.api.mock {
            return Ok(self.mock_service().into());
        }
        tracing::info!(base_url = %self.config.api.base_url, "using HTTP auth backend");
        Ok(HttpAuthService::new(self.api_client()?).into())
    }

    /// HTTP client that sends the session token and drops the session on `401`.
    pub fn api_client(&self) -> Result<ApiClient, ServiceError> {
        let tokens = self.session.clone();
        let on_unauthorized = self.session.clone();

        Ok(
            ApiClient::new(self.config.api.base_url.clone(), self.config.api.timeout())?
                .with_token_source(Arc::new(move || tokens.token()))
                .with_unauthorized_hook(Arc::new(move || on_unauthorized.sign_out())),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::StatusCode;
    use api::UserInfo;

    use crate::navigation::NavigationIntent;

    fn user() -> UserInfo {
        UserInfo {
            id: "1".into(),
            name: "QiuYeDx".into(),
            email: "qiuyedx@example.com".into(),
            avatar: None,
        }
    }

    #[test]
    fn test_instances_are_isolated() {
        let a = AppState::default();
        let b = AppState::default();
        a.session().sign_in(user(), "tok");
        assert!(a.session().is_authenticated());
        assert!(!b.session().is_authenticated());

        let a2 = a.clone();
        assert!(a2.session().is_authenticated());
    }

    #[test]
    fn test_guard_uses_configured_login_path() {
        let mut config = AppConfig::default();
        config.routes.login_path = "/signin".into();
        let state = AppState::new(config);
        assert_eq!(state.guard().fallback(), "/signin");
    }

    #[test]
    fn test_unauthorized_response_clears_session() {
        let state = AppState::default();
        state.session().sign_in(user(), "tok");

        let client = state.api_client().unwrap();
        assert!(client.check_status(StatusCode::INTERNAL_SERVER_ERROR).is_err());
        assert!(state.session().is_authenticated());

        assert!(client.check_status(StatusCode::UNAUTHORIZED).is_err());
        assert!(!state.session().is_authenticated());
    }

    #[test]
    fn test_observe_route_uses_configured_auth_paths() {
        let mut config = AppConfig::default();
        config.routes.login_path = "/signin".into();
        let state = AppState::new(config);
        state.intents().capture(NavigationIntent::new("/profile"));

        state.observe_route("/signin");
        state.observe_route("/register");
        assert!(state.intents().peek().is_some());

        state.observe_route("/login");
        assert!(state.intents().peek().is_none());
    }

    #[test]
    fn test_auth_service_follows_mock_switch() {
        let state = AppState::default();
        assert!(state.auth_service().unwrap().is_mock());

        let mut config = AppConfig::default();
        config.api.mock = false;
        config.api.base_url = "https://auth.example.com/api".into();
        let backend = AppState::new(config).auth_service().unwrap();
        assert!(matches!(backend, AuthBackend::Http(_)));
    }

    #[test]
    fn test_mock_service_follows_config() {
        let mut config = AppConfig::default();
        config.mock.logout_ms = 0;
        let state = AppState::new(config);
        assert!(state.mock_service().latency().logout.is_zero());
    }
}
