use dioxus::prelude::*;

use ui::components::app_navbar::{register_nav, NavBuilder};
use ui::components::{AppNavbar, AppShell};
use ui::views::{Detect, Home};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(WebNavbar)]
    #[route("/")]
    Home {},
    #[route("/detect")]
    Detect {},
}

fn nav_home(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::Home {},
        "{label}"
    })
}
fn nav_detect(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::Detect {},
        "{label}"
    })
}

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    register_nav(NavBuilder {
        home: nav_home,
        detect: nav_detect,
    });

    rsx! {
        AppShell {
            Router::<Route> {}
        }
    }
}

/// A web-specific layout around the shared `AppNavbar` component
/// which allows us to use the web-specific `Route` enum.
#[component]
fn WebNavbar() -> Element {
    rsx! {
        AppNavbar {}
        Outlet::<Route> {}
    }
}
