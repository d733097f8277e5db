use api::UserInfo;
use dioxus::prelude::*;
use dioxus_free_icons::icons::fa_solid_icons::{FaRightFromBracket, FaUser};
use dioxus_free_icons::Icon;

use crate::labels::{use_label, Label};

#[component]
pub fn Navbar(brand: Element, children: Element, actions: Element) -> Element {
    rsx! {
        header {
            class: "navbar",
            div { class: "navbar-brand", {brand} }
            nav { class: "navbar-links", {children} }
            div { class: "navbar-actions", {actions} }
        }
    }
}

/// Avatar button with a dropdown for the signed-in user.
#[component]
pub fn UserMenu(
    user: UserInfo,
    on_profile: EventHandler<()>,
    on_logout: EventHandler<()>,
) -> Element {
    let mut open = use_signal(|| false);
    let initial = user.initial();
    let profile = use_label(Label::Profile);
    let sign_out = use_label(Label::SignOut);

    rsx! {
        div {
            class: "user-menu",
            button {
                class: "user-menu-trigger",
                aria_expanded: open(),
                onclick: move |_| open.toggle(),
                if let Some(avatar) = user.avatar.clone() {
                    img { class: "user-avatar", src: "{avatar}", alt: "Avatar" }
                } else {
                    span { class: "user-avatar user-avatar-initial", "{initial}" }
                }
                span { class: "user-menu-name", "{user.display_name()}" }
            }
            if open() {
                div {
                    class: "user-menu-dropdown",
                    div { class: "user-menu-email", "{user.email}" }
                    button {
                        class: "user-menu-item",
                        onclick: move |_| {
                            open.set(false);
                            on_profile.call(());
                        },
                        Icon { icon: FaUser, width: 14, height: 14 }
                        span { "{profile}" }
                    }
                    button {
                        class: "user-menu-item",
                        onclick: move |_| {
                            open.set(false);
                            on_logout.call(());
                        },
                        Icon { icon: FaRightFromBracket, width: 14, height: 14 }
                        span { "{sign_out}" }
                    }
                }
            }
        }
    }
}
