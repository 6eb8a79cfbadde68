use dioxus::prelude::*;

use crate::components::app_navbar::detect_link;
use crate::services::use_language;
use crate::t;

#[component]
pub fn Home() -> Element {
    // Subscribe to the language signal so the page re-renders on change.
    let _lang = use_language()();

    let features = [
        ("technology-yolo-title", t!("technology-yolo-title"), t!("technology-yolo-description")),
        (
            "technology-efficientnet-title",
            t!("technology-efficientnet-title"),
            t!("technology-efficientnet-description"),
        ),
        ("technology-gradcam-title", t!("technology-gradcam-title"), t!("technology-gradcam-description")),
    ];
    let cta = detect_link(&t!("upload-analyze"));

    rsx! {
        section { class: "page page-home",
            header { class: "page-home__hero",
                h1 { {t!("app-title")} }
                p { {t!("app-description")} }
            }

            h2 { {t!("technology-title")} }
            ul { class: "page-home__features",
                for (key, title, description) in features {
                    li { key: "{key}", class: "feature",
                        h3 { "{title}" }
                        p { "{description}" }
                    }
                }
            }

            div { class: "page-home__cta",
                h2 { {t!("cta-title")} }
                p { {t!("cta-description")} }
                if let Some(link) = cta {
                    {link}
                }
            }

            footer { class: "page-home__footer",
                p { {t!("footer-credit")} }
            }
        }
    }
}
