//! Login page.

use dioxus::prelude::*;
use store::{AuthError, LoginFields, NavigateOptions, Navigator, SubmitError};
use ui::{use_app_state, use_session, LoginForm};

use crate::navigator::{use_auth_flow, use_router_navigator};
use crate::Route;

#[component]
pub fn Login() -> Element {
    let state = use_app_state();
    let session = use_session();
    let navigator = use_router_navigator();
    let flow = use_auth_flow();
    let mut pending = use_signal(|| false);
    let mut error = use_signal(|| Option::<AuthError>::None);

    // Already signed in: nothing to do here.
    if session().is_authenticated() && !pending() {
        navigator.navigate(&state.config().routes.landing_path, NavigateOptions::replace());
        return rsx! {};
    }

    let on_submit = move |fields: LoginFields| {
        let flow = flow.clone();
        pending.set(true);
        error.set(None);
        spawn(async move {
            let result = flow.login(&fields).await;
            pending.set(false);
            if let Err(SubmitError::Failed(e)) = result {
                error.set(Some(e));
            }
        });
    };

    rsx! {
        section {
            class: "auth-page",
            div {
                class: "auth-card",
                h1 { "Sign in" }
                p { class: "muted", "Use your email and password to continue." }

                LoginForm {
                    pending: pending(),
                    error: error(),
                    on_submit,
                    on_dismiss_error: move |_| error.set(None),
                }

                p {
                    class: "auth-switch",
                    "No account yet? "
                    Link { to: Route::Register {}, "Create one" }
                }
            }
        }
    }
}
