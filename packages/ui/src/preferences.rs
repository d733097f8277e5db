//! Theme and language controls backed by [`store::Preferences`].

use dioxus::prelude::*;
use dioxus_free_icons::icons::fa_solid_icons::{FaLanguage, FaMoon, FaSun};
use dioxus_free_icons::Icon;
use store::{Locale, Preferences, ThemeSettings};

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type PlatformPreferences = store::LocalStoragePreferences;
#[cfg(all(target_arch = "wasm32", not(feature = "web")))]
pub type PlatformPreferences = store::MemoryPreferences;
#[cfg(not(target_arch = "wasm32"))]
pub type PlatformPreferences = store::FilePreferences;

#[derive(Clone, Copy)]
pub(crate) struct ThemeSignal(pub(crate) Signal<ThemeSettings>);

#[derive(Clone, Copy)]
pub(crate) struct LocaleSignal(pub(crate) Signal<Locale>);

pub(crate) fn platform_preferences() -> Preferences<PlatformPreferences> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        let file = store::FilePreferences::in_config_dir().unwrap_or_else(|| {
            store::FilePreferences::new(std::env::temp_dir().join("scaffold-preferences.toml"))
        });
        Preferences::new(file)
    }
    #[cfg(target_arch = "wasm32")]
    {
        Preferences::new(PlatformPreferences::default())
    }
}

pub fn use_preferences() -> Preferences<PlatformPreferences> {
    use_context::<Preferences<PlatformPreferences>>()
}

pub fn use_theme() -> Signal<ThemeSettings> {
    use_context::<ThemeSignal>().0
}

pub fn use_locale() -> Signal<Locale> {
    use_context::<LocaleSignal>().0
}

pub(crate) fn browser_language() -> Option<String> {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window().and_then(|window| window.navigator().language())
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        None
    }
}

/// Toggle the `dark` class and the primary color variable on `<html>`.
pub(crate) fn apply_theme(theme: &ThemeSettings) {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(root) = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.document_element())
        else {
            return;
        };
        let classes = root.class_list();
        let result = if theme.mode.is_dark() {
            classes.add_1("dark")
        } else {
            classes.remove_1("dark")
        };
        if result.is_err() {
            tracing::warn!("failed to apply theme class");
        }
        let style = format!("--primary-color: {}", theme.primary_color);
        if root.set_attribute("style", &style).is_err() {
            tracing::warn!("failed to apply primary color");
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        tracing::debug!(mode = ?theme.mode, "theme applied");
    }
}

pub(crate) fn apply_locale(locale: Locale) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(root) = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.document_element())
        {
            let _ = root.set_attribute("lang", locale.tag());
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        tracing::debug!(%locale, "locale applied");
    }
}

#[component]
pub fn ThemeToggle() -> Element {
    let preferences = use_preferences();
    let mut theme = use_theme();
    let dark = theme().mode.is_dark();
    let title = if dark {
        "Switch to light mode"
    } else {
        "Switch to dark mode"
    };

    rsx! {
        button {
            class: "icon-button",
            title,
            onclick: move |_| {
                let mut next = theme();
                next.mode = next.mode.toggled();
                if let Err(e) = preferences.set_theme(&next) {
                    tracing::warn!(error = %e, "failed to persist theme");
                }
                theme.set(next);
            },
            if dark {
                Icon { icon: FaSun, width: 16, height: 16 }
            } else {
                Icon { icon: FaMoon, width: 16, height: 16 }
            }
        }
    }
}

#[component]
pub fn LanguageSwitcher() -> Element {
    let preferences = use_preferences();
    let mut locale = use_locale();

    rsx! {
        label {
            class: "language-switcher",
            Icon { icon: FaLanguage, width: 16, height: 16 }
            select {
                value: locale().tag(),
                onchange: move |evt: FormEvent| {
                    let Ok(next) = evt.value().parse::<Locale>() else {
                        return;
                    };
                    if let Err(e) = preferences.set_locale(next) {
                        tracing::warn!(error = %e, "failed to persist language");
                    }
                    locale.set(next);
                },
                for choice in Locale::ALL {
                    option {
                        key: "{choice.tag()}",
                        value: choice.tag(),
                        selected: choice == locale(),
                        "{choice.label()}"
                    }
                }
            }
        }
    }
}
