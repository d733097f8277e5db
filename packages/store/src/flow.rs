//! # Auth flow orchestration — login, registration, logout
//!
//! [`AuthFlow`] sequences one user-initiated auth operation against an
//! [`AuthService`], the shared [`AppState`] and a [`Navigator`]:
//!
//! 1. validate the form locally; on failure return [`SubmitError::Invalid`] without
//!    touching anything else;
//! 2. enter [`AuthPhase::Pending`] (clearing any earlier error) and raise the busy flag
//!    with an operation-specific message;
//! 3. call the service;
//! 4. on success populate the session, lower busy and redirect (replacing history) to
//!    the captured [`NavigationIntent`](crate::NavigationIntent) or the landing path;
//! 5. on failure lower busy first, then record and return an [`AuthError`].
//!
//! Transport errors are logged and normalised to [`NETWORK_ERROR_MESSAGE`]. Logout never
//! fails from the caller's point of view: the local session is cleared whatever the
//! service says.
//!
//! Concurrent submissions are not serialised; views disable their submit button
//! while [`AuthFlow::is_pending`] holds.

use std::sync::{Mutex, MutexGuard, PoisonError};

use api::{AuthPayload, AuthResponse, AuthService, ServiceError, UserInfo};
use thiserror::Error;

use crate::busy::{BusyDescriptor, BusyGuard};
use crate::navigation::{NavigateOptions, Navigator};
use crate::state::AppState;
use crate::validation::{FormField, LoginErrors, LoginFields, RegisterErrors, RegisterFields};

pub const LOGIN_BUSY_MESSAGE: &str = "Signing in...";
pub const REGISTER_BUSY_MESSAGE: &str = "Creating account...";
pub const LOGOUT_BUSY_MESSAGE: &str = "Signing out...";

pub const NETWORK_ERROR_MESSAGE: &str = "Network error, please try again later";
pub const LOGIN_FAILED_MESSAGE: &str = "Login failed";
pub const REGISTER_FAILED_MESSAGE: &str = "Registration failed";

/// Error descriptor surfaced above the form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct AuthError {
    pub message: String,
    pub field: Option<FormField>,
}

impl AuthError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field: None,
        }
    }

    pub fn for_field(message: impl Into<String>, field: FormField) -> Self {
        Self {
            message: message.into(),
            field: Some(field),
        }
    }
}

/// Why a submit did not succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitError<E> {
    /// Local validation failed; nothing was sent.
    Invalid(E),
    /// The service said no, or could not be reached.
    Failed(AuthError),
}

impl<E> SubmitError<E> {
    pub fn auth_error(&self) -> Option<&AuthError> {
        match self {
            Self::Failed(e) => Some(e),
            Self::Invalid(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthOperation {
    Login,
    Register,
    Logout,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthPhase {
    #[default]
    Idle,
    Pending(AuthOperation),
    Succeeded(AuthOperation),
    Failed(AuthOperation, AuthError),
}

pub struct AuthFlow<S, N> {
    state: AppState,
    service: S,
    navigator: N,
    phase: Mutex<AuthPhase>,
}

impl<S, N> AuthFlow<S, N>
where
    S: AuthService,
    N: Navigator,
{
    pub fn new(state: AppState, service: S, navigator: N) -> Self {
        Self {
            state,
            service,
            navigator,
            phase: Mutex::new(AuthPhase::Idle),
        }
    }

    fn phase_lock(&self) -> MutexGuard<'_, AuthPhase> {
        self.phase.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_phase(&self, phase: AuthPhase) {
        tracing::debug!(?phase, "auth phase");
        *self.phase_lock() = phase;
    }

    pub fn phase(&self) -> AuthPhase {
        self.phase_lock().clone()
    }

    pub fn is_pending(&self) -> bool {
        matches!(*self.phase_lock(), AuthPhase::Pending(_))
    }

    pub fn error(&self) -> Option<AuthError> {
        match &*self.phase_lock() {
            AuthPhase::Failed(_, error) => Some(error.clone()),
            _ => None,
        }
    }

    /// Drop a stored error, e.g. once the user edits the form.
    pub fn clear_error(&self) {
        let mut phase = self.phase_lock();
        if matches!(*phase, AuthPhase::Failed(..)) {
            *phase = AuthPhase::Idle;
        }
    }

    pub fn reset(&self) {
        self.set_phase(AuthPhase::Idle);
    }

    pub async fn login(&self, fields: &LoginFields) -> Result<UserInfo, SubmitError<LoginErrors>> {
        fields.validate().map_err(SubmitError::Invalid)?;

        self.set_phase(AuthPhase::Pending(AuthOperation::Login));
        let busy = self.raise(LOGIN_BUSY_MESSAGE);

        let outcome = self.service.login(&fields.to_request()).await;
        self.finish(AuthOperation::Login, outcome, busy)
            .map_err(SubmitError::Failed)
    }

    pub async fn register(
        &self,
        fields: &RegisterFields,
    ) -> Result<UserInfo, SubmitError<RegisterErrors>> {
        fields.validate().map_err(SubmitError::Invalid)?;

        self.set_phase(AuthPhase::Pending(AuthOperation::Register));
        let busy = self.raise(REGISTER_BUSY_MESSAGE);

        let outcome = self.service.register(&fields.to_request()).await;
        self.finish(AuthOperation::Register, outcome, busy)
            .map_err(SubmitError::Failed)
    }

    /// Sign out. The local session is cleared even when the service call fails.
    pub async fn logout(&self) {
        self.set_phase(AuthPhase::Pending(AuthOperation::Logout));
        let busy = self.raise(LOGOUT_BUSY_MESSAGE);

        match self.service.logout().await {
            Ok(response) if response.success => {}
            Ok(response) => {
                tracing::error!(error = ?response.error, "logout rejected, clearing local session")
            }
            Err(e) => tracing::error!(error = %e, "logout failed, clearing local session"),
        }

        self.state.session().sign_out();
        self.state.intents().clear();
        drop(busy);
        self.set_phase(AuthPhase::Succeeded(AuthOperation::Logout));
        self.navigator.navigate(
            &self.state.config().routes.landing_path,
            NavigateOptions::replace(),
        );
    }

    fn raise(&self, message: &str) -> BusyGuard {
        self.state.busy().raise(BusyDescriptor::message(message))
    }

    fn finish(
        &self,
        operation: AuthOperation,
        outcome: Result<AuthResponse, ServiceError>,
        busy: BusyGuard,
    ) -> Result<UserInfo, AuthError> {
        match normalize(operation, outcome) {
            Ok(AuthPayload { user, token }) => {
                self.state.session().sign_in(user.clone(), token);
                drop(busy);
                self.set_phase(AuthPhase::Succeeded(operation));
                self.redirect_after_auth();
                Ok(user)
            }
            Err(error) => {
                drop(busy);
                self.set_phase(AuthPhase::Failed(operation, error.clone()));
                Err(error)
            }
        }
    }

    fn redirect_after_auth(&self) {
        let target = self
            .state
            .intents()
            .take()
            .map(|intent| intent.target_path)
            .unwrap_or_else(|| self.state.config().routes.landing_path.clone());
        self.navigator.navigate(&target, NavigateOptions::replace());
    }
}

/// Collapse every way a call can go wrong into one [`AuthError`].
fn normalize(
    operation: AuthOperation,
    outcome: Result<AuthResponse, ServiceError>,
) -> Result<AuthPayload, AuthError> {
    let response = outcome.map_err(|e| {
        tracing::warn!(?operation, error = %e, "auth request failed");
        AuthError::new(NETWORK_ERROR_MESSAGE)
    })?;

    response.into_payload().map_err(|message| {
        let message = message.unwrap_or_else(|| {
            match operation {
                AuthOperation::Register => REGISTER_FAILED_MESSAGE,
                AuthOperation::Login | AuthOperation::Logout => LOGIN_FAILED_MESSAGE,
            }
            .to_string()
        });
        match field_for_message(&message) {
            Some(field) => AuthError::for_field(message, field),
            None => AuthError::new(message),
        }
    })
}

/// Attach the input a known service message is about.
fn field_for_message(message: &str) -> Option<FormField> {
    match message {
        api::mock::EMAIL_TAKEN => Some(FormField::Email),
        api::mock::PASSWORD_MISMATCH => Some(FormField::ConfirmPassword),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use api::{ApiResponse, LoginRequest, MockAuthService, MockLatency, RegisterRequest};

    use crate::navigation::testing::RecordingNavigator;
    use crate::navigation::NavigationIntent;

    /// Service whose every call fails at the transport level.
    #[derive(Clone, Default)]
    struct OfflineService {
        calls: Arc<AtomicUsize>,
    }

    impl OfflineService {
        fn fail(&self) -> ServiceError {
            self.calls.fetch_add(1, Ordering::SeqCst);
            ServiceError::Network("connection refused".into())
        }
    }

    impl AuthService for OfflineService {
        async fn login(&self, _: &LoginRequest) -> Result<AuthResponse, ServiceError> {
            Err(self.fail())
        }
        async fn register(&self, _: &RegisterRequest) -> Result<AuthResponse, ServiceError> {
            Err(self.fail())
        }
        async fn logout(&self) -> Result<ApiResponse, ServiceError> {
            Err(self.fail())
        }
        async fn user_info(&self, _: &str) -> Result<AuthResponse, ServiceError> {
            Err(self.fail())
        }
        async fn refresh_token(&self, _: &str) -> Result<AuthResponse, ServiceError> {
            Err(self.fail())
        }
    }

    fn mock() -> MockAuthService {
        MockAuthService::with_latency(MockLatency::none())
    }

    type TestFlow<S> = (AuthFlow<S, RecordingNavigator>, AppState, RecordingNavigator);

    fn make_flow<S: AuthService>(service: S) -> TestFlow<S> {
        let state = AppState::default();
        let nav = RecordingNavigator::at("/login");
        (AuthFlow::new(state.clone(), service, nav.clone()), state, nav)
    }

    fn credentials(email: &str, password: &str) -> LoginFields {
        LoginFields {
            email: email.into(),
            password: password.into(),
        }
    }

    fn registration(email: &str, password: &str, confirm: &str) -> RegisterFields {
        RegisterFields {
            name: "New Person".into(),
            email: email.into(),
            password: password.into(),
            confirm_password: confirm.into(),
        }
    }

    #[tokio::test]
    async fn test_login_success_populates_session() {
        let (flow, state, nav) = make_flow(mock());

        let user = flow
            .login(&credentials("qiuyedx@example.com", "123456"))
            .await
            .unwrap();

        assert_eq!(user.name, "QiuYeDx");
        let session = state.session().snapshot();
        assert!(session.is_authenticated());
        assert_eq!(session.user().unwrap().name, "QiuYeDx");
        assert!(session.token().unwrap().starts_with("mock-jwt-token-1-"));

        assert!(!state.busy().is_active());
        assert_eq!(flow.phase(), AuthPhase::Succeeded(AuthOperation::Login));
        assert_eq!(nav.last(), Some(("/".to_string(), NavigateOptions::replace())));
    }

    #[tokio::test]
    async fn test_login_returns_to_captured_intent() {
        let (flow, state, nav) = make_flow(mock());
        state.intents().capture(NavigationIntent::new("/profile"));

        flow.login(&credentials("zhangsan@example.com", "123456"))
            .await
            .unwrap();

        assert_eq!(
            nav.last(),
            Some(("/profile".to_string(), NavigateOptions::replace()))
        );
        assert!(state.intents().peek().is_none());
    }

    #[tokio::test]
    async fn test_abandoned_intent_is_not_resumed() {
        let (flow, state, nav) = make_flow(mock());
        let guard = state.guard();
        let visit = |path: &str| {
            nav.navigate(path, NavigateOptions::push());
            state.observe_route(path);
        };

        visit("/profile");
        assert!(!guard.enforce(false, state.intents(), &nav));
        state.observe_route(&nav.current_path());
        assert!(state.intents().peek().is_some());

        // Gives up on signing in and browses elsewhere, then signs in later
        visit("/");
        visit("/login");
        flow.login(&credentials("qiuyedx@example.com", "123456"))
            .await
            .unwrap();

        assert_eq!(nav.last(), Some(("/".to_string(), NavigateOptions::replace())));
    }

    #[tokio::test]
    async fn test_wrong_password_leaves_session_untouched() {
        let (flow, state, nav) = make_flow(mock());

        let err = flow
            .login(&credentials("qiuyedx@example.com", "wrong1"))
            .await
            .unwrap_err();

        let auth_error = err.auth_error().unwrap();
        assert_eq!(auth_error.message, api::mock::INVALID_CREDENTIALS);
        assert_eq!(flow.error().as_ref(), Some(auth_error));
        assert!(!state.session().is_authenticated());
        assert!(!state.busy().is_active());
        assert!(nav.history().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_form_never_reaches_service() {
        let service = OfflineService::default();
        let (flow, state, nav) = make_flow(service.clone());
        let busy_rx = state.busy().subscribe();

        let err = flow
            .login(&credentials("not-an-email", "123"))
            .await
            .unwrap_err();

        let SubmitError::Invalid(errors) = err else {
            panic!("expected field errors, got {err:?}");
        };
        assert!(errors.email.is_some());
        assert!(errors.password.is_some());
        assert_eq!(service.calls.load(Ordering::SeqCst), 0);
        assert_eq!(flow.phase(), AuthPhase::Idle);
        assert!(!busy_rx.has_changed().unwrap());
        assert!(nav.history().is_empty());
    }

    #[tokio::test]
    async fn test_transport_error_is_normalized() {
        let (flow, state, _nav) = make_flow(OfflineService::default());

        let err = flow
            .login(&credentials("qiuyedx@example.com", "123456"))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            SubmitError::Failed(AuthError::new(NETWORK_ERROR_MESSAGE))
        );
        assert!(!state.busy().is_active());
        assert!(!state.session().is_authenticated());
    }

    #[tokio::test(start_paused = true)]
    async fn test_busy_is_raised_while_pending() {
        let service = MockAuthService::new();
        let (flow, state, _nav) = make_flow(service);
        let busy = state.busy().clone();

        let fields = credentials("qiuyedx@example.com", "123456");
        let submit = flow.login(&fields);
        let observe = async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            (busy.state(), flow.is_pending())
        };

        let (result, (midway, pending)) = tokio::join!(submit, observe);
        assert!(result.is_ok());
        assert!(midway.active);
        assert_eq!(midway.message, LOGIN_BUSY_MESSAGE);
        assert!(pending);
        assert!(!busy.is_active());
    }

    #[tokio::test]
    async fn test_register_taken_email() {
        let service = mock();
        let (flow, state, _nav) = make_flow(service.clone());

        let err = flow
            .register(&registration("qiuyedx@example.com", "abcdef", "abcdef"))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            SubmitError::Failed(AuthError::for_field(
                api::mock::EMAIL_TAKEN,
                FormField::Email
            ))
        );
        assert_eq!(service.user_count(), 2);
        assert!(!state.session().is_authenticated());
    }

    #[tokio::test]
    async fn test_register_mismatch_is_caught_locally() {
        let service = mock();
        let (flow, _state, _nav) = make_flow(service.clone());

        let err = flow
            .register(&registration("fresh@example.com", "abcdef", "abcdeg"))
            .await
            .unwrap_err();

        let SubmitError::Invalid(errors) = err else {
            panic!("expected field errors, got {err:?}");
        };
        assert_eq!(
            errors.confirm_password,
            Some(crate::validation::FieldError::ConfirmMismatch)
        );
        assert_eq!(service.user_count(), 2);
    }

    #[tokio::test]
    async fn test_register_success_signs_in() {
        let service = mock();
        let (flow, state, nav) = make_flow(service.clone());

        let user = flow
            .register(&registration("fresh@example.com", "abcdef", "abcdef"))
            .await
            .unwrap();

        assert_eq!(user.email, "fresh@example.com");
        assert_eq!(state.session().user(), Some(user));
        assert_eq!(service.user_count(), 3);
        assert_eq!(nav.last().unwrap().0, "/");
    }

    #[tokio::test]
    async fn test_logout_clears_session_even_when_service_fails() {
        let (flow, state, nav) = make_flow(OfflineService::default());
        state.session().sign_in(
            UserInfo {
                id: "1".into(),
                name: "QiuYeDx".into(),
                email: "qiuyedx@example.com".into(),
                avatar: None,
            },
            "tok",
        );
        state.intents().capture(NavigationIntent::new("/profile"));

        flow.logout().await;

        assert!(!state.session().is_authenticated());
        assert!(state.intents().peek().is_none());
        assert!(!state.busy().is_active());
        assert!(flow.error().is_none());
        assert_eq!(nav.last(), Some(("/".to_string(), NavigateOptions::replace())));
    }

    #[tokio::test]
    async fn test_new_submit_clears_previous_error() {
        let (flow, _state, _nav) = make_flow(mock());

        let _ = flow
            .login(&credentials("qiuyedx@example.com", "wrong1"))
            .await;
        assert!(flow.error().is_some());

        flow.login(&credentials("qiuyedx@example.com", "123456"))
            .await
            .unwrap();
        assert!(flow.error().is_none());
    }

    #[tokio::test]
    async fn test_clear_error_and_reset() {
        let (flow, _state, _nav) = make_flow(mock());
        let _ = flow
            .login(&credentials("qiuyedx@example.com", "wrong1"))
            .await;

        flow.clear_error();
        assert_eq!(flow.phase(), AuthPhase::Idle);

        flow.login(&credentials("qiuyedx@example.com", "123456"))
            .await
            .unwrap();
        flow.clear_error();
        assert_eq!(flow.phase(), AuthPhase::Succeeded(AuthOperation::Login));
        flow.reset();
        assert_eq!(flow.phase(), AuthPhase::Idle);
    }

    #[test]
    fn test_success_without_payload_uses_default_message() {
        let outcome = Ok(AuthResponse {
            success: true,
            data: None,
            error: None,
        });
        assert_eq!(
            normalize(AuthOperation::Register, outcome),
            Err(AuthError::new(REGISTER_FAILED_MESSAGE))
        );
    }
}
