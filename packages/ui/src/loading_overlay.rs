use dioxus::prelude::*;
use dioxus_free_icons::icons::fa_solid_icons::FaSpinner;
use dioxus_free_icons::Icon;

use crate::provider::use_busy;

/// Full-screen spinner shown while the global busy flag is raised.
#[component]
pub fn LoadingOverlay() -> Element {
    let busy = use_busy();
    let state = busy();

    if !state.active {
        return rsx! {};
    }

    let class = match &state.class_name {
        Some(extra) => format!("loading-overlay {extra}"),
        None => "loading-overlay".to_string(),
    };

    rsx! {
        div {
            class: "{class}",
            role: "status",
            aria_live: "polite",
            div {
                class: "loading-card",
                Icon { class: "loading-spinner", icon: FaSpinner, width: 28, height: 28 }
                span { class: "loading-message", "{state.message}" }
            }
        }
    }
}
