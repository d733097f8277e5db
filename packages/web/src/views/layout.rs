use dioxus::prelude::*;
use ui::{
    use_app_state, use_label, use_session, Label, LanguageSwitcher, LoadingOverlay, Navbar,
    ThemeToggle, UserMenu,
};

use crate::navigator::use_auth_flow;
use crate::Route;

/// Shell shared by every page: navigation bar, busy overlay, routed content.
#[component]
pub fn AppLayout() -> Element {
    let state = use_app_state();
    state.observe_route(&use_route::<Route>().to_string());

    let session = use_session();
    let flow = use_auth_flow();
    let nav = use_navigator();
    let home = use_label(Label::Home);
    let about = use_label(Label::About);
    let loading_debug = use_label(Label::LoadingDebug);
    let profile = use_label(Label::Profile);
    let sign_in = use_label(Label::SignIn);

    let on_logout = move |_| {
        let flow = flow.clone();
        spawn(async move {
            flow.logout().await;
        });
    };

    rsx! {
        Navbar {
            brand: rsx! {
                Link { to: Route::Home {}, class: "navbar-title", "Auth Scaffold" }
            },
            actions: rsx! {
                LanguageSwitcher {}
                ThemeToggle {}
                if let Some(user) = session().user().cloned() {
                    UserMenu {
                        user,
                        on_profile: move |_| {
                            nav.push(Route::Profile {});
                        },
                        on_logout,
                    }
                } else {
                    Link { to: Route::Login {}, class: "button button-primary", "{sign_in}" }
                }
            },
            Link { to: Route::Home {}, active_class: "active", "{home}" }
            Link { to: Route::About {}, active_class: "active", "{about}" }
            Link { to: Route::LoadingDebug {}, active_class: "active", "{loading_debug}" }
            Link { to: Route::Profile {}, active_class: "active", "{profile}" }
        }

        main {
            class: "page",
            Outlet::<Route> {}
        }

        LoadingOverlay {}
    }
}
