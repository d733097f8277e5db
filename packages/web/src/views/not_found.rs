use dioxus::prelude::*;

use crate::Route;

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let path = format!("/{}", segments.join("/"));

    rsx! {
        section {
            class: "content not-found",
            h1 { "404" }
            p { "Nothing lives at " code { "{path}" } "." }
            Link { to: Route::Home {}, class: "button", "Back home" }
        }
    }
}
