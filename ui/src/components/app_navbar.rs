use crate::core::theme::Theme;
use crate::i18n::{self, Language};
use crate::services::{use_language, use_theme};
use crate::t;
use dioxus::prelude::*;
use once_cell::sync::OnceCell;

// Navbar stylesheet (inlined as well for release native builds)
const NAVBAR_CSS: Asset = asset!("/assets/styling/navbar.css");
const NAVBAR_CSS_INLINE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/styling/navbar.css"
));

/// Platforms register a `NavBuilder` providing fully constructed `Link`
/// elements, so `ui` does not need to know each platform's `Route` enum.
///
/// Each closure receives the localized label and returns a link that already
/// contains it.
///
/// ```ignore
/// use ui::components::app_navbar::{NavBuilder, register_nav};
/// fn install_nav() {
///     register_nav(NavBuilder {
///         home: |label| rsx!( Link { class: "navbar__link", to: Route::Home {}, "{label}" } ),
///         detect: |label| rsx!( Link { class: "navbar__link", to: Route::Detect {}, "{label}" } ),
///     });
/// }
/// ```
pub struct NavBuilder {
    pub home: fn(label: &str) -> Element,
    pub detect: fn(label: &str) -> Element,
}

static NAV_BUILDER: OnceCell<NavBuilder> = OnceCell::new();

pub fn register_nav(builder: NavBuilder) {
    let _ = NAV_BUILDER.set(builder);
}

/// Platform link to the diagnosis page, for calls to action outside the navbar.
pub(crate) fn detect_link(label: &str) -> Option<Element> {
    NAV_BUILDER.get().map(|b| (b.detect)(label))
}

#[component]
pub fn AppNavbar() -> Element {
    let mut language = use_language();
    let mut theme = use_theme();
    let langs = use_signal(i18n::available_languages);
    let show_switcher = langs().len() > 1;
    let current = language();

    let on_language = move |evt: FormEvent| {
        let Some(next) = Language::from_code(&evt.value()) else {
            return;
        };
        match i18n::set_language(next) {
            Ok(()) => language.set(next),
            Err(err) => log::error!("[i18n] Couldn't switch to {}: {err}", next.tag()),
        }
    };

    let on_theme = move |_| {
        let next = theme().toggled();
        next.persist();
        theme.set(next);
    };

    let links = NAV_BUILDER.get().map(|b| {
        let home = (b.home)(&t!("nav-home"));
        let detect = (b.detect)(&t!("nav-detect"));
        rsx! {
            nav { class: "navbar__links",
                {home}
                {detect}
            }
        }
    });

    let theme_label = match theme() {
        Theme::Light => t!("theme-toggle-dark"),
        Theme::Dark => t!("theme-toggle-light"),
    };
    let theme_icon = match theme() {
        Theme::Light => "☾",
        Theme::Dark => "☀",
    };

    rsx! {
        document::Link { rel: "stylesheet", href: NAVBAR_CSS }
        if cfg!(all(not(debug_assertions), not(target_arch = "wasm32"))) {
            document::Style { "{NAVBAR_CSS_INLINE}" }
        }

        header {
            id: "navbar",
            class: "navbar",
            div { class: "navbar__inner",
                div { class: "navbar__brand",
                    span { class: "navbar__brand-link",
                        span { class: "navbar__brand-spark", aria_hidden: "true" }
                        span { class: "navbar__brand-mark", {t!("app-brand")} }
                    }
                    span { class: "navbar__brand-subtitle", {t!("tagline")} }
                }

                if let Some(links) = links {
                    {links}
                }

                div { class: "navbar__actions",
                    button {
                        r#type: "button",
                        class: "navbar__theme",
                        title: "{theme_label}",
                        aria_label: "{theme_label}",
                        onclick: on_theme,
                        "{theme_icon}"
                    }

                    if show_switcher {
                        div { class: "navbar__locale",
                            label {
                                class: "visually-hidden",
                                r#for: "locale-select",
                                {t!("nav-language-label")}
                            }
                            select {
                                id: "locale-select",
                                value: "{current.code()}",
                                oninput: on_language,
                                for lang in langs() {
                                    option {
                                        key: "{lang.code()}",
                                        value: "{lang.code()}",
                                        selected: lang == current,
                                        "{lang.native_name()}"
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
