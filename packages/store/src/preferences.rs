//! # Persisted UI preferences
//!
//! Two small key/value preferences survive reloads: the interface language
//! (key `language`) and the theme (key `theme`, JSON-encoded [`ThemeSettings`]).
//!
//! | Backend | Platform | Location |
//! |---------|----------|----------|
//! | [`MemoryPreferences`] | any | process memory (tests, SSR) |
//! | [`FilePreferences`] | native | `<config_dir>/scaffold/preferences.toml` |
//! | [`LocalStoragePreferences`] | wasm32 + `web` | `window.localStorage` |
//!
//! Unreadable or malformed values are logged and replaced by defaults; a
//! preference never blocks startup.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const LANGUAGE_KEY: &str = "language";
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("preference storage unavailable")]
    Unavailable,
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml decode: {0}")]
    TomlDe(#[from] toml::de::Error),
    #[error("toml encode: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Raw string storage behind [`Preferences`].
pub trait PreferenceStore {
    fn read(&self, key: &str) -> Result<Option<String>, PreferenceError>;
    fn write(&self, key: &str, value: &str) -> Result<(), PreferenceError>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "zh-CN")]
    ZhCn,
    #[serde(rename = "en-US")]
    EnUs,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::ZhCn, Locale::EnUs];

    pub fn tag(self) -> &'static str {
        match self {
            Self::ZhCn => "zh-CN",
            Self::EnUs => "en-US",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::ZhCn => "简体中文",
            Self::EnUs => "English",
        }
    }

    /// Best match for a browser language tag: exact tag first, then the
    /// primary subtag (`en-GB` → English).
    pub fn negotiate(tag: &str) -> Option<Self> {
        if let Ok(locale) = tag.parse() {
            return Some(locale);
        }
        let primary = tag.split(['-', '_']).next()?.to_ascii_lowercase();
        match primary.as_str() {
            "zh" => Some(Self::ZhCn),
            "en" => Some(Self::EnUs),
            _ => None,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported locale: {0}")]
pub struct UnknownLocale(pub String);

impl FromStr for Locale {
    type Err = UnknownLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|locale| locale.tag().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownLocale(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }
}

pub const DEFAULT_PRIMARY_COLOR: &str = "#1890ff";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeSettings {
    #[serde(default)]
    pub mode: ThemeMode,
    #[serde(default = "default_primary_color")]
    pub primary_color: String,
}

fn default_primary_color() -> String {
    DEFAULT_PRIMARY_COLOR.to_string()
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            mode: ThemeMode::default(),
            primary_color: default_primary_color(),
        }
    }
}

/// In-process store. Clones share contents.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferences {
    fn read(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        let values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(values.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use file::FilePreferences;

#[cfg(not(target_arch = "wasm32"))]
mod file {
    use std::collections::BTreeMap;
    use std::path::{Path, PathBuf};

    use super::{PreferenceError, PreferenceStore};

    /// TOML file of string pairs, rewritten on every change.
    #[derive(Debug, Clone)]
    pub struct FilePreferences {
        path: PathBuf,
    }

    impl FilePreferences {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }

        /// `<config_dir>/scaffold/preferences.toml`, when the platform has a config dir.
        pub fn in_config_dir() -> Option<Self> {
            dirs::config_dir().map(|dir| Self::new(dir.join("scaffold").join("preferences.toml")))
        }

        pub fn path(&self) -> &Path {
            &self.path
        }

        fn load(&self) -> Result<BTreeMap<String, String>, PreferenceError> {
            match std::fs::read_to_string(&self.path) {
                Ok(text) => Ok(toml::from_str(&text)?),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
                Err(e) => Err(e.into()),
            }
        }
    }

    impl PreferenceStore for FilePreferences {
        fn read(&self, key: &str) -> Result<Option<String>, PreferenceError> {
            Ok(self.load()?.remove(key))
        }

        fn write(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
            let mut values = self.load()?;
            values.insert(key.to_string(), value.to_string());
            if let Some(parent) = self.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&self.path, toml::to_string(&values)?)?;
            Ok(())
        }
    }
}

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local_storage::LocalStoragePreferences;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local_storage {
    use super::{PreferenceError, PreferenceStore};

    /// `window.localStorage`; unavailable storage (private mode, sandboxed
    /// iframes) surfaces as [`PreferenceError::Unavailable`].
    #[derive(Debug, Clone, Copy, Default)]
    pub struct LocalStoragePreferences;

    impl LocalStoragePreferences {
        fn storage() -> Result<web_sys::Storage, PreferenceError> {
            web_sys::window()
                .and_then(|window| window.local_storage().ok().flatten())
                .ok_or(PreferenceError::Unavailable)
        }
    }

    impl PreferenceStore for LocalStoragePreferences {
        fn read(&self, key: &str) -> Result<Option<String>, PreferenceError> {
            Self::storage()?
                .get_item(key)
                .map_err(|_| PreferenceError::Unavailable)
        }

        fn write(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
            Self::storage()?
                .set_item(key, value)
                .map_err(|_| PreferenceError::Unavailable)
        }
    }
}

/// Typed access to the language and theme preferences.
#[derive(Debug, Clone, Default)]
pub struct Preferences<P> {
    store: P,
}

impl<P: PreferenceStore> Preferences<P> {
    pub fn new(store: P) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &P {
        &self.store
    }

    /// Stored locale if any, else the browser's language, else the default.
    pub fn initial_locale(&self, browser_tag: Option<&str>) -> Locale {
        self.stored_locale()
            .or_else(|| browser_tag.and_then(Locale::negotiate))
            .unwrap_or_default()
    }

    pub fn locale(&self) -> Locale {
        self.stored_locale().unwrap_or_default()
    }

    fn stored_locale(&self) -> Option<Locale> {
        let raw = match self.store.read(LANGUAGE_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read language preference");
                return None;
            }
        };
        match raw.parse() {
            Ok(locale) => Some(locale),
            Err(e) => {
                tracing::warn!(error = %e, "ignoring stored language");
                None
            }
        }
    }

    pub fn set_locale(&self, locale: Locale) -> Result<(), PreferenceError> {
        self.store.write(LANGUAGE_KEY, locale.tag())
    }

    pub fn theme(&self) -> ThemeSettings {
        let raw = match self.store.read(THEME_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return ThemeSettings::default(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read theme preference");
                return ThemeSettings::default();
            }
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "ignoring stored theme");
            ThemeSettings::default()
        })
    }

    pub fn set_theme(&self, theme: &ThemeSettings) -> Result<(), PreferenceError> {
        self.store.write(THEME_KEY, &serde_json::to_string(theme)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_parsing() {
        assert_eq!("zh-CN".parse::<Locale>(), Ok(Locale::ZhCn));
        assert_eq!("en-us".parse::<Locale>(), Ok(Locale::EnUs));
        assert!("fr-FR".parse::<Locale>().is_err());
        assert_eq!(Locale::default(), Locale::ZhCn);
        assert_eq!(Locale::EnUs.to_string(), "en-US");
    }

    #[test]
    fn test_locale_negotiation() {
        assert_eq!(Locale::negotiate("en-GB"), Some(Locale::EnUs));
        assert_eq!(Locale::negotiate("zh_TW"), Some(Locale::ZhCn));
        assert_eq!(Locale::negotiate("de"), None);
    }

    #[test]
    fn test_initial_locale_precedence() {
        let prefs = Preferences::new(MemoryPreferences::new());
        assert_eq!(prefs.initial_locale(None), Locale::ZhCn);
        assert_eq!(prefs.initial_locale(Some("en-AU")), Locale::EnUs);

        prefs.set_locale(Locale::ZhCn).unwrap();
        assert_eq!(prefs.initial_locale(Some("en-AU")), Locale::ZhCn);
    }

    #[test]
    fn test_garbage_falls_back_to_defaults() {
        let store = MemoryPreferences::new();
        store.write(LANGUAGE_KEY, "klingon").unwrap();
        store.write(THEME_KEY, "{not json").unwrap();

        let prefs = Preferences::new(store);
        assert_eq!(prefs.locale(), Locale::ZhCn);
        assert_eq!(prefs.theme(), ThemeSettings::default());
    }

    #[test]
    fn test_theme_roundtrip_and_partial_json() {
        let prefs = Preferences::new(MemoryPreferences::new());
        let dark = ThemeSettings {
            mode: ThemeMode::Dark,
            primary_color: "#52c41a".into(),
        };
        prefs.set_theme(&dark).unwrap();
        assert_eq!(prefs.theme(), dark);

        prefs.store().write(THEME_KEY, r#"{"mode":"dark"}"#).unwrap();
        let theme = prefs.theme();
        assert!(theme.mode.is_dark());
        assert_eq!(theme.primary_color, DEFAULT_PRIMARY_COLOR);
        assert_eq!(theme.mode.toggled(), ThemeMode::Light);
    }

    #[test]
    fn test_file_preferences_persist() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("preferences.toml");

        let prefs = Preferences::new(FilePreferences::new(&path));
        assert_eq!(prefs.locale(), Locale::ZhCn);
        prefs.set_locale(Locale::EnUs).unwrap();
        prefs.set_theme(&ThemeSettings::default()).unwrap();

        let reopened = Preferences::new(FilePreferences::new(&path));
        assert_eq!(reopened.locale(), Locale::EnUs);
        assert_eq!(reopened.theme(), ThemeSettings::default());
        assert!(std::fs::read_to_string(&path).unwrap().contains("language"));
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.toml");
        std::fs::write(&path, "= nope").unwrap();

        let store = FilePreferences::new(&path);
        assert!(matches!(store.read(LANGUAGE_KEY), Err(PreferenceError::TomlDe(_))));
        assert_eq!(Preferences::new(store).locale(), Locale::ZhCn);
    }
}
