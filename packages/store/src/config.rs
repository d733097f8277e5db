//! # Application configuration — `scaffold.toml`
//!
//! Every tunable of the client lives in [`AppConfig`]. All sections derive `Default`
//! with production values, so a missing or partial file is equivalent to the default
//! configuration.
//!
//! ## Structure
//!
//! ```toml
//! [routes]
//! login_path = "/login"      # where the session guard sends anonymous visitors
//! landing_path = "/"         # where auth flows land when no intent was captured
//! register_path = "/register"
//!
//! [api]
//! mock = true                # in-memory auth service; false talks to base_url
//! base_url = "/api"
//! timeout_ms = 10000
//!
//! [busy]
//! default_message = "Loading..."
//!
//! [mock]
//! login_ms = 1500            # simulated latency of the mock auth service
//! register_ms = 1500
//! logout_ms = 500
//! user_info_ms = 800
//! refresh_ms = 600
//! ```
//!
//! ## Loading
//!
//! [`AppConfig::from_toml`] parses a string. On native targets [`AppConfig::load`]
//! layers the defaults, an optional `scaffold.toml` in the working directory, a
//! `.env` file and `SCAFFOLD__SECTION__KEY` environment variables, in that order.

use std::time::Duration;

use api::MockLatency;
use serde::{Deserialize, Serialize};

/// Top-level configuration stored in `scaffold.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub routes: RouteConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub busy: BusyConfig,
    #[serde(default)]
    pub mock: MockConfig,
}

/// Paths the guard and the auth flows redirect to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteConfig {
    #[serde(default = "default_login_path")]
    pub login_path: String,
    #[serde(default = "default_landing_path")]
    pub landing_path: String,
    #[serde(default = "default_register_path")]
    pub register_path: String,
}

fn default_login_path() -> String {
    "/login".to_string()
}

fn default_landing_path() -> String {
    "/".to_string()
}

fn default_register_path() -> String {
    "/register".to_string()
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            login_path: default_login_path(),
            landing_path: default_landing_path(),
            register_path: default_register_path(),
        }
    }
}

/// HTTP backend settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Use the in-memory mock instead of the HTTP backend.
    #[serde(default = "default_mock")]
    pub mock: bool,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_mock() -> bool {
    true
}

fn default_base_url() -> String {
    api::request::DEFAULT_BASE_URL.to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            mock: default_mock(),
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Busy overlay settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BusyConfig {
    /// Message shown when a caller raises the overlay without one.
    #[serde(default = "default_busy_message")]
    pub default_message: String,
}

fn default_busy_message() -> String {
    "Loading...".to_string()
}

impl Default for BusyConfig {
    fn default() -> Self {
        Self {
            default_message: default_busy_message(),
        }
    }
}

/// Simulated latency of the mock authentication service, in milliseconds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MockConfig {
    #[serde(default = "default_login_ms")]
    pub login_ms: u64,
    #[serde(default = "default_login_ms")]
    pub register_ms: u64,
    #[serde(default = "default_logout_ms")]
    pub logout_ms: u64,
    #[serde(default = "default_user_info_ms")]
    pub user_info_ms: u64,
    #[serde(default = "default_refresh_ms")]
    pub refresh_ms: u64,
}

fn default_login_ms() -> u64 {
    1500
}

fn default_logout_ms() -> u64 {
    500
}

fn default_user_info_ms() -> u64 {
    800
}

fn default_refresh_ms() -> u64 {
    600
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            login_ms: default_login_ms(),
            register_ms: default_login_ms(),
            logout_ms: default_logout_ms(),
            user_info_ms: default_user_info_ms(),
            refresh_ms: default_refresh_ms(),
        }
    }
}

impl MockConfig {
    pub fn latency(&self) -> MockLatency {
        MockLatency {
            login: Duration::from_millis(self.login_ms),
            register: Duration::from_millis(self.register_ms),
            logout: Duration::from_millis(self.logout_ms),
            user_info: Duration::from_millis(self.user_info_ms),
            refresh_token: Duration::from_millis(self.refresh_ms),
        }
    }
}

impl AppConfig {
    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "scaffold.toml"
    }

    /// Prefix of environment variables that override file values.
    pub fn env_prefix() -> &'static str {
        "SCAFFOLD"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Layered load: defaults, then `scaffold.toml`, then `.env` and
    /// `SCAFFOLD__*` variables.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Result<Self, config::ConfigError> {
        use config::{Config, Environment, File, FileFormat};

        dotenvy::dotenv().ok();

        let config = Config::builder()
            .add_source(Config::try_from(&AppConfig::default())?)
            .add_source(
                File::with_name(Self::filename())
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                Environment::with_prefix(Self::env_prefix())
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Browsers have no config file or environment; the compiled-in defaults apply.
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Result<Self, config::ConfigError> {
        Ok(Self::default())
    }

    /// [`load`](Self::load), falling back to defaults with a warning.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "invalid configuration, using defaults");
            Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.routes.login_path, "/login");
        assert_eq!(config.routes.landing_path, "/");
        assert_eq!(config.routes.register_path, "/register");
        assert!(config.api.mock);
        assert_eq!(config.api.base_url, "/api");
        assert_eq!(config.api.timeout(), Duration::from_secs(10));
        assert_eq!(config.mock.latency(), MockLatency::default());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [routes]
            landing_path = "/home"

            [mock]
            login_ms = 0
            "#,
        )
        .unwrap();

        assert_eq!(config.routes.landing_path, "/home");
        assert_eq!(config.routes.login_path, "/login");
        assert_eq!(config.mock.login_ms, 0);
        assert_eq!(config.mock.register_ms, 1500);
        assert_eq!(config.busy, BusyConfig::default());
    }

    #[test]
    fn test_http_backend_switch() {
        let config = AppConfig::from_toml(
            r#"
            [api]
            mock = false
            base_url = "https://auth.example.com"
            "#,
        )
        .unwrap();

        assert!(!config.api.mock);
        assert_eq!(config.api.timeout_ms, 10_000);
    }

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(AppConfig::from_toml("").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut config = AppConfig::default();
        config.api.base_url = "https://auth.example.com".to_string();
        let text = config.to_toml().unwrap();
        assert_eq!(AppConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_load_reads_environment() {
        std::env::set_var("SCAFFOLD__ROUTES__LOGIN_PATH", "/signin");
        std::env::set_var("SCAFFOLD__API__TIMEOUT_MS", "2500");
        let config = AppConfig::load().unwrap();
        std::env::remove_var("SCAFFOLD__ROUTES__LOGIN_PATH");
        std::env::remove_var("SCAFFOLD__API__TIMEOUT_MS");

        assert_eq!(config.routes.login_path, "/signin");
        assert_eq!(config.api.timeout_ms, 2500);
        assert_eq!(config.routes.landing_path, "/");
    }
}
