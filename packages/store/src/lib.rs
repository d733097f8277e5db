//! # Store crate — client-side application state
//!
//! Holds everything views share: the session, the global busy flag, the
//! navigation intent captured by the session guard, the auth flows that tie
//! them to an [`api::AuthService`], and persisted preferences.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | [`AppConfig`], layered from defaults, `scaffold.toml` and `SCAFFOLD__*` env vars |
//! | [`state`] | [`AppState`], the explicitly constructed container handed to views |
//! | [`session`] | [`SessionStore`], observable signed-in user and token |
//! | [`busy`] | [`BusyCoordinator`], ticketed show/hide with delayed and auto-hide variants |
//! | [`navigation`] | [`Navigator`] seam, [`NavigationIntent`] and its [`IntentSlot`] |
//! | [`guard`] | [`SessionGuard`], redirect-to-login for protected views |
//! | [`validation`] | Typed form records and field rules |
//! | [`flow`] | [`AuthFlow`], login / register / logout orchestration |
//! | [`preferences`] | Language and theme persistence |
//! | [`timer`] | `sleep` / `spawn` for native and browser targets |
//!
//! All state is observable through `tokio::sync::watch` receivers, which the UI
//! crate mirrors into Dioxus signals.

pub mod busy;
pub mod config;
pub mod flow;
pub mod guard;
pub mod navigation;
pub mod preferences;
pub mod session;
pub mod state;
pub mod timer;
pub mod validation;

pub use busy::{BusyCoordinator, BusyDescriptor, BusyGuard, BusyState, BusyTicket};
pub use config::AppConfig;
pub use flow::{AuthError, AuthFlow, AuthOperation, AuthPhase, SubmitError};
pub use guard::{GuardDecision, SessionGuard};
pub use navigation::{IntentSlot, NavigateOptions, NavigationIntent, Navigator};
pub use preferences::{
    Locale, MemoryPreferences, PreferenceError, PreferenceStore, Preferences, ThemeMode,
    ThemeSettings,
};
pub use session::{Session, SessionStore};
pub use state::AppState;
pub use validation::{
    FieldError, FormField, LoginErrors, LoginFields, RegisterErrors, RegisterFields,
};

#[cfg(not(target_arch = "wasm32"))]
pub use preferences::FilePreferences;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use preferences::LocalStoragePreferences;

pub use tokio::sync::watch;
