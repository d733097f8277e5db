use dioxus::prelude::*;

use store::AppConfig;
use ui::AppProvider;
use views::{
    About, AppLayout, Home, LoadingDebug, Login, NotFound, Profile, Register, RequireAuth,
};

mod navigator;
mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(AppLayout)]
        #[route("/")]
        Home {},
        #[route("/about")]
        About {},
        #[route("/loading-debug")]
        LoadingDebug {},
        #[layout(RequireAuth)]
            #[route("/profile")]
            Profile {},
        #[end_layout]
        #[route("/login")]
        Login {},
        #[route("/register")]
        Register {},
        #[route("/:..segments")]
        NotFound { segments: Vec<String> },
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    let level = if cfg!(debug_assertions) {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    if let Err(e) = dioxus::logger::init(level) {
        eprintln!("failed to initialise logging: {e}");
    }

    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let config = use_hook(AppConfig::load_or_default);
    tracing::debug!(landing = %config.routes.landing_path, "starting");

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        AppProvider {
            config,
            Router::<Route> {}
        }
    }
}
