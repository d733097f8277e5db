//! Registration page.

use dioxus::prelude::*;
use store::{AuthError, NavigateOptions, Navigator, RegisterFields, SubmitError};
use ui::{use_app_state, use_session, RegisterForm};

use crate::navigator::{use_auth_flow, use_router_navigator};
use crate::Route;

#[component]
pub fn Register() -> Element {
    let state = use_app_state();
    let session = use_session();
    let navigator = use_router_navigator();
    let flow = use_auth_flow();
    let mut pending = use_signal(|| false);
    let mut error = use_signal(|| Option::<AuthError>::None);

    if session().is_authenticated() && !pending() {
        navigator.navigate(&state.config().routes.landing_path, NavigateOptions::replace());
        return rsx! {};
    }

    let on_submit = move |fields: RegisterFields| {
        let flow = flow.clone();
        pending.set(true);
        error.set(None);
        spawn(async move {
            let result = flow.register(&fields).await;
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
                h1 { "Create account" }
                p { class: "muted", "New accounts are signed in straight away." }

                RegisterForm {
                    pending: pending(),
                    error: error(),
                    on_submit,
                    on_dismiss_error: move |_| error.set(None),
                }

                p {
                    class: "auth-switch",
                    "Already have an account? "
                    Link { to: Route::Login {}, "Sign in" }
                }
            }
        }
    }
}
