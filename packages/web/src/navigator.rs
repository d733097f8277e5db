//! Bridges the Dioxus router to [`store::Navigator`].

use std::rc::Rc;

use api::AuthBackend;
use dioxus::prelude::*;
use dioxus::router::Navigator;
use store::{AuthFlow, NavigateOptions};
use ui::{use_app_state, use_auth_service};

use crate::Route;

#[derive(Clone)]
pub struct RouterNavigator {
    router: Navigator,
    current: String,
}

/// Navigator for the route being rendered.
pub fn use_router_navigator() -> RouterNavigator {
    RouterNavigator {
        router: use_navigator(),
        current: use_route::<Route>().to_string(),
    }
}

pub type ViewAuthFlow = AuthFlow<AuthBackend, RouterNavigator>;

/// Auth flow bound to this component's router, built once per mount.
pub fn use_auth_flow() -> Rc<ViewAuthFlow> {
    let state = use_app_state();
    let service = use_auth_service();
    let navigator = use_router_navigator();
    use_hook(move || Rc::new(AuthFlow::new(state, service, navigator)))
}

impl store::Navigator for RouterNavigator {
    fn current_path(&self) -> String {
        self.current.clone()
    }

    fn navigate(&self, path: &str, options: NavigateOptions) {
        let route = match path.parse::<Route>() {
            Ok(route) => route,
            Err(e) => {
                tracing::warn!(%path, error = %e, "cannot route to path");
                return;
            }
        };
        if options.replace {
            self.router.replace(route);
        } else {
            self.router.push(route);
        }
    }
}
