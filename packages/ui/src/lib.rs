//! This crate contains all shared UI for the workspace.
//!
//! Components here know nothing about the route table; views in the `web`
//! crate wire them to the router and to [`store::AuthFlow`].

mod provider;
pub use provider::{use_app_state, use_auth_service, use_busy, use_session, AppProvider};

mod loading_overlay;
pub use loading_overlay::LoadingOverlay;

mod auth_form;
pub use auth_form::{LoginForm, RegisterForm};

mod navbar;
pub use navbar::{Navbar, UserMenu};

mod labels;
pub use labels::{use_label, Label};

mod preferences;
pub use preferences::{
    use_locale, use_preferences, use_theme, LanguageSwitcher, PlatformPreferences, ThemeToggle,
};
