use api::{DetectedRegion, VisualKind};
use dioxus::prelude::*;

use crate::components::{DiseaseGuidance, ExportButton};
use crate::core::format::{css_percent, format_percent_whole, percent_value};
use crate::diagnosis::{use_session, Artifact, Diagnosis, Explanation};
use crate::i18n::disease_name;
use crate::services::use_language;
use crate::t;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Diagnosis,
    Detection,
    Heatmap,
    Combined,
}

impl Tab {
    const ALL: [Tab; 4] = [Tab::Diagnosis, Tab::Detection, Tab::Heatmap, Tab::Combined];

    fn label(self) -> String {
        match self {
            Tab::Diagnosis => t!("results-diagnosis"),
            Tab::Detection => t!("results-detection"),
            Tab::Heatmap => t!("results-heatmap"),
            Tab::Combined => t!("results-combined"),
        }
    }
}

fn tab_class(active: Tab, tab: Tab) -> &'static str {
    if active == tab {
        "tabs__tab tabs__tab--active"
    } else {
        "tabs__tab"
    }
}

/// Tabbed view over the current analysis.
#[component]
pub fn ResultTabs() -> Element {
    let _lang = use_language()();
    let session = use_session();
    let mut active = use_signal(|| Tab::Diagnosis);

    let snapshot = session.with(|s| {
        let result = s.result()?;
        Some((
            Diagnosis::from_result(result),
            s.explanation().clone(),
            result.regions.clone(),
            s.upload().map(|upload| upload.preview.clone()),
            VisualKind::ALL.map(|kind| s.visual(kind).clone()),
        ))
    });

    let Some((diagnosis, explanation, regions, preview, [boxes, heatmap, combined])) = snapshot
    else {
        return rsx! {
            section { class: "card results results--empty",
                h2 { class: "card__title", {t!("app-results")} }
                p { class: "results__placeholder", {t!("results-none")} }
            }
        };
    };

    rsx! {
        section { class: "card results",
            div { class: "results__header",
                h2 { class: "card__title", {t!("app-results")} }
                ExportButton {}
            }

            div { class: "tabs", role: "tablist",
                for tab in Tab::ALL {
                    button {
                        key: "{tab:?}",
                        r#type: "button",
                        role: "tab",
                        class: "{tab_class(active(), tab)}",
                        aria_selected: active() == tab,
                        onclick: move |_| active.set(tab),
                        {tab.label()}
                    }
                }
            }

            div { class: "tabs__panel", role: "tabpanel",
                {match active() {
                    Tab::Diagnosis => rsx! {
                        DiagnosisPanel { diagnosis, explanation }
                    },
                    Tab::Detection => rsx! {
                        DetectionPanel { artifact: boxes, regions, preview }
                    },
                    Tab::Heatmap => rsx! {
                        VisualPanel { kind: VisualKind::Heatmap, artifact: heatmap }
                    },
                    Tab::Combined => rsx! {
                        VisualPanel { kind: VisualKind::Combined, artifact: combined }
                    },
                }}
            }
        }
    }
}

#[component]
fn DiagnosisPanel(diagnosis: Diagnosis, explanation: Explanation) -> Element {
    let lang = use_language()();

    let body = match &diagnosis {
        Diagnosis::NoDetection => rsx! {
            h3 { class: "diagnosis__name", {t!("diagnosis-no-detection")} }
            p { {t!("diagnosis-no-detection-explanation")} }
            div { class: "alert alert--warning",
                p {
                    strong { {t!("diagnosis-warning")} }
                    " "
                    {t!("diagnosis-not-accurate")}
                }
                p { {t!("diagnosis-could-mean")} }
                ul {
                    li { {t!("diagnosis-reason1")} }
                    li { {t!("diagnosis-reason2")} }
                    li { {t!("diagnosis-reason3")} }
                }
                p { {t!("diagnosis-consult")} }
            }
        },
        Diagnosis::Detected { label, confidence } => {
            let name = disease_name(lang, label);
            let value = percent_value(*confidence);
            rsx! {
                h3 { class: "diagnosis__name", "{name}" }
                p { class: "diagnosis__confidence", {t!("diagnosis-confidence", value = value)} }
            }
        }
    };

    let details = match explanation {
        Explanation::Idle => None,
        Explanation::Loading => Some(t!("diagnosis-explaining")),
        Explanation::Ready(text) => Some(text),
    };

    let lang_code = lang.code();

    rsx! {
        div { class: "diagnosis",
            {body}
            if let Some(text) = details {
                h4 { class: "diagnosis__details", {t!("diagnosis-details")} }
                p { class: "diagnosis__explanation", "{text}" }
            }
            if let Diagnosis::Detected { label, .. } = diagnosis {
                DiseaseGuidance { key: "{label}-{lang_code}", label }
            }
        }
    }
}

#[component]
fn DetectionPanel(artifact: Artifact, regions: Vec<DetectedRegion>, preview: Option<String>) -> Element {
    let lang = use_language()();
    let count = regions.len().to_string();
    let rows: Vec<(String, String)> = regions
        .iter()
        .map(|region| {
            (
                disease_name(lang, &region.label),
                format_percent_whole(region.confidence),
            )
        })
        .collect();
    let boxes: Vec<(String, String)> = regions
        .iter()
        .filter_map(|region| {
            let bbox = region.bbox?;
            Some((
                format!(
                    "left:{};top:{};width:{};height:{};",
                    css_percent(bbox.x1),
                    css_percent(bbox.y1),
                    css_percent(bbox.width()),
                    css_percent(bbox.height())
                ),
                format_percent_whole(region.confidence),
            ))
        })
        .collect();

    let view = match (&artifact, preview) {
        (Artifact::Loading, _) => rsx! {
            p { class: "visual__status",
                span { class: "spinner", aria_hidden: "true" }
                {t!("detection-processing")}
            }
        },
        (Artifact::Ready(image), _) => {
            let src = image.url().to_string();
            rsx! {
                img { class: "visual__image", src: "{src}", alt: t!("results-detection") }
            }
        }
        // Without the rendered image, draw the regions over the upload.
        (_, Some(src)) => rsx! {
            p { class: "visual__status", {t!("detection-not-available")} }
            div { class: "overlay",
                img { class: "visual__image", src: "{src}", alt: t!("results-detection") }
                for (index, (style, badge)) in boxes.into_iter().enumerate() {
                    div { key: "{index}", class: "overlay__box", style: "{style}",
                        span { class: "overlay__tag", "{badge}" }
                    }
                }
            }
        },
        (_, None) => rsx! {},
    };

    rsx! {
        div { class: "visual",
            {view}
            if rows.is_empty() {
                p { class: "visual__caption", {t!("detection-no-patterns")} }
            } else {
                p { class: "visual__caption", {t!("detection-boxes")} }
                h4 { {t!("detection-areas-detected", count = count)} }
                ul { class: "regions",
                    for (index, (name, score)) in rows.into_iter().enumerate() {
                        li { key: "{index}", class: "regions__item",
                            span { class: "regions__label", "{name}" }
                            span { class: "regions__score", "{score}" }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn VisualPanel(kind: VisualKind, artifact: Artifact) -> Element {
    let _lang = use_language()();

    let (title, explanation, generating, caption, missing) = match kind {
        VisualKind::Combined => (
            t!("combined-title"),
            t!("combined-explanation"),
            t!("combined-generating"),
            t!("combined-boxes"),
            t!("combined-not-available"),
        ),
        _ => (
            t!("heatmap-title"),
            t!("heatmap-explanation"),
            t!("heatmap-generating"),
            t!("heatmap-red-areas"),
            t!("heatmap-not-available"),
        ),
    };

    rsx! {
        div { class: "visual",
            h3 { class: "visual__title", "{title}" }
            p { class: "visual__subtitle", "{explanation}" }
            {match artifact {
                Artifact::Loading => rsx! {
                    p { class: "visual__status",
                        span { class: "spinner", aria_hidden: "true" }
                        "{generating}"
                    }
                },
                Artifact::Ready(image) => {
                    let src = image.url().to_string();
                    rsx! {
                        img { class: "visual__image", src: "{src}", alt: "{title}" }
                        p { class: "visual__caption", "{caption}" }
                    }
                }
                Artifact::Idle | Artifact::Unavailable => rsx! {
                    p { class: "visual__status visual__status--missing", "{missing}" }
                },
            }}
        }
    }
}
