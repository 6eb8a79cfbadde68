use api::ServiceConfig;
use dioxus::prelude::*;

use crate::core::theme::Theme;
use crate::i18n::{self, Language};
use crate::services::Services;

/// Shared theme; desktop release builds also inline it.
pub const THEME_CSS: Asset = asset!("/assets/theme/main.css");

/// Root wrapper shared by every platform.
///
/// Provides the backend clients plus the language and theme signals, and
/// applies the theme class to everything rendered inside it.
#[component]
pub fn AppShell(children: Element) -> Element {
    i18n::init();

    let language = use_signal(i18n::current_language);
    let theme = use_signal(Theme::restore);
    use_context_provider(|| language);
    use_context_provider(|| theme);
    use_context_provider(|| Services::from_config(ServiceConfig::from_env()));

    let lang: Language = language();
    let theme_class = theme().css_class();

    rsx! {
        document::Link { rel: "stylesheet", href: THEME_CSS }

        div {
            class: "app-shell {theme_class}",
            lang: "{lang.code()}",
            {children}
        }
    }
}
