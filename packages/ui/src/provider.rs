//! # Application context
//!
//! [`AppProvider`] builds the [`AppState`] once from an [`AppConfig`] and exposes
//! it to every descendant. The stores inside `AppState` are `tokio::sync::watch`
//! channels; the provider mirrors each one into a Dioxus [`Signal`] so components
//! re-render when the session or the busy flag changes.
//!
//! | Hook | Returns |
//! |------|---------|
//! | [`use_app_state`] | the shared [`AppState`] |
//! | [`use_session`] | `Signal<Session>` |
//! | [`use_busy`] | `Signal<BusyState>` |
//! | [`use_auth_service`] | the [`AuthBackend`] selected by `[api] mock` |
//! | [`use_theme`](crate::use_theme) / [`use_locale`](crate::use_locale) | persisted preferences |

use api::AuthBackend;
use dioxus::prelude::*;
use store::{AppConfig, AppState, BusyState, Session};

use crate::preferences::{
    apply_locale, apply_theme, browser_language, platform_preferences, LocaleSignal, ThemeSignal,
};

#[derive(Clone, Copy)]
struct SessionSignal(Signal<Session>);

#[derive(Clone, Copy)]
struct BusySignal(Signal<BusyState>);

pub fn use_app_state() -> AppState {
    use_context::<AppState>()
}

pub fn use_session() -> Signal<Session> {
    use_context::<SessionSignal>().0
}

pub fn use_busy() -> Signal<BusyState> {
    use_context::<BusySignal>().0
}

pub fn use_auth_service() -> AuthBackend {
    use_context::<AuthBackend>()
}

/// Wrap the router with this component.
#[component]
pub fn AppProvider(config: AppConfig, children: Element) -> Element {
    let state = use_context_provider(|| AppState::new(config));
    use_context_provider(|| {
        state.auth_service().unwrap_or_else(|e| {
            tracing::error!(error = %e, "cannot build HTTP auth backend, using mock");
            AuthBackend::from(state.mock_service())
        })
    });

    let mut session = use_signal(|| state.session().snapshot());
    let mut busy = use_signal(|| state.busy().state());
    use_context_provider(|| SessionSignal(session));
    use_context_provider(|| BusySignal(busy));

    let session_state = state.clone();
    use_future(move || {
        let mut rx = session_state.session().subscribe();
        async move {
            while rx.changed().await.is_ok() {
                let next = rx.borrow_and_update().clone();
                tracing::debug!(authenticated = next.is_authenticated(), "session changed");
                session.set(next);
            }
        }
    });

    let busy_state = state.clone();
    use_future(move || {
        let mut rx = busy_state.busy().subscribe();
        async move {
            while rx.changed().await.is_ok() {
                busy.set(rx.borrow_and_update().clone());
            }
        }
    });

    let preferences = use_context_provider(platform_preferences);
    let theme = use_signal(|| preferences.theme());
    let locale = use_signal(|| preferences.initial_locale(browser_language().as_deref()));
    use_context_provider(|| ThemeSignal(theme));
    use_context_provider(|| LocaleSignal(locale));

    use_effect(move || apply_theme(&theme()));
    use_effect(move || apply_locale(locale()));

    rsx! {
        {children}
    }
}
