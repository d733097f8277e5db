use dioxus::prelude::*;
use ui::use_session;

use crate::Route;

#[component]
pub fn Home() -> Element {
    let session = use_session()();

    rsx! {
        section {
            class: "hero",
            h1 { "Auth Scaffold" }
            if let Some(user) = session.user() {
                p { class: "hero-lead", "Welcome back, {user.display_name()}." }
            } else {
                p {
                    class: "hero-lead",
                    "Sign in to reach your profile. Protected pages send you to the login form and bring you back afterwards."
                }
            }
            div {
                class: "hero-actions",
                Link { to: Route::Profile {}, class: "button button-primary", "Open profile" }
                Link { to: Route::LoadingDebug {}, class: "button", "Try the loading overlay" }
            }
        }
    }
}
