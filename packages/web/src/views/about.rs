use dioxus::prelude::*;

#[component]
pub fn About() -> Element {
    rsx! {
        section {
            class: "content",
            h1 { "About" }
            p {
                "A client scaffold with a session guard, email/password authentication against a mock service and a global loading overlay."
            }
            h2 { "Demo accounts" }
            ul {
                li { code { "qiuyedx@example.com" } " / " code { "123456" } }
                li { code { "zhangsan@example.com" } " / " code { "123456" } }
            }
        }
    }
}
