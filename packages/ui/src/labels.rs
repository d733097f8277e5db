//! Navigation chrome text in each supported [`Locale`].

use dioxus::prelude::*;
use store::Locale;

use crate::preferences::use_locale;

/// Fixed strings shown in the navbar and user menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    Home,
    About,
    LoadingDebug,
    Profile,
    SignIn,
    SignOut,
}

impl Label {
    pub fn text(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::Home, Locale::EnUs) => "Home",
            (Self::Home, Locale::ZhCn) => "首页",
            (Self::About, Locale::EnUs) => "About",
            (Self::About, Locale::ZhCn) => "关于",
            (Self::LoadingDebug, Locale::EnUs) => "Loading debug",
            (Self::LoadingDebug, Locale::ZhCn) => "加载调试",
            (Self::Profile, Locale::EnUs) => "Profile",
            (Self::Profile, Locale::ZhCn) => "个人资料",
            (Self::SignIn, Locale::EnUs) => "Sign in",
            (Self::SignIn, Locale::ZhCn) => "登录",
            (Self::SignOut, Locale::EnUs) => "Sign out",
            (Self::SignOut, Locale::ZhCn) => "退出登录",
        }
    }
}

/// Text for `label` in the active locale; re-renders when the locale changes.
pub fn use_label(label: Label) -> &'static str {
    label.text(use_locale()())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Label; 6] = [
        Label::Home,
        Label::About,
        Label::LoadingDebug,
        Label::Profile,
        Label::SignIn,
        Label::SignOut,
    ];

    #[test]
    fn test_labels_follow_locale() {
        assert_eq!(Label::SignIn.text(Locale::EnUs), "Sign in");
        assert_eq!(Label::SignIn.text(Locale::ZhCn), "登录");
    }

    #[test]
    fn test_every_label_is_translated() {
        for label in ALL {
            let en = label.text(Locale::EnUs);
            let zh = label.text(Locale::ZhCn);
            assert!(!en.is_empty());
            assert_ne!(en, zh, "{label:?} is untranslated");
        }
    }
}
