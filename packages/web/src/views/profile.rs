use dioxus::prelude::*;
use ui::use_session;

use crate::navigator::use_auth_flow;

/// Signed-in user's details. Only reachable through `RequireAuth`.
#[component]
pub fn Profile() -> Element {
    let session = use_session();
    let flow = use_auth_flow();

    let Some(user) = session().user().cloned() else {
        return rsx! {};
    };

    rsx! {
        section {
            class: "content profile",
            div {
                class: "profile-header",
                if let Some(avatar) = user.avatar.clone() {
                    img { class: "profile-avatar", src: "{avatar}", alt: "Avatar" }
                } else {
                    span { class: "profile-avatar user-avatar-initial", "{user.initial()}" }
                }
                div {
                    h1 { "{user.display_name()}" }
                    p { class: "muted", "{user.email}" }
                }
            }
            dl {
                class: "profile-details",
                dt { "User ID" }
                dd { code { "{user.id}" } }
                dt { "Name" }
                dd { "{user.name}" }
                dt { "Email" }
                dd { "{user.email}" }
            }
            button {
                class: "button button-danger",
                onclick: move |_| {
                    let flow = flow.clone();
                    spawn(async move {
                        flow.logout().await;
                    });
                },
                "Sign out"
            }
        }
    }
}
