use dioxus::prelude::*;
use ui::{use_app_state, use_session};

use crate::navigator::use_router_navigator;
use crate::Route;

/// Layout that only renders its children for a signed-in session.
#[component]
pub fn RequireAuth() -> Element {
    let state = use_app_state();
    let session = use_session();
    let navigator = use_router_navigator();

    let authenticated = session().is_authenticated();
    if !state
        .guard()
        .enforce(authenticated, state.intents(), &navigator)
    {
        return rsx! {};
    }

    rsx! {
        Outlet::<Route> {}
    }
}
