use dioxus::prelude::*;

use crate::components::{ChatPanel, ImageUploader, ResultTabs};
use crate::diagnosis::Session;
use crate::services::use_language;
use crate::t;

/// Upload, analysis results and the assistant for one diagnosis session.
///
/// The session lives as long as this page; navigating away discards it.
#[component]
pub fn Detect() -> Element {
    let _lang = use_language()();
    let session = use_signal(Session::default);
    use_context_provider(|| session);

    rsx! {
        section { class: "page page-detect",
            h1 { {t!("app-title")} }
            div { class: "page-detect__grid",
                ImageUploader {}
                ResultTabs {}
            }
            ChatPanel {}
        }
    }
}
