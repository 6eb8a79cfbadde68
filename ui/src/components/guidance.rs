use api::{ApiError, InfoKind};
use dioxus::prelude::*;

use crate::i18n::disease_name;
use crate::services::{use_language, use_services};
use crate::t;

/// Prevention and treatment cards for a diagnosed disease.
///
/// The guidance is looked up under the disease's name in the active
/// language; unknown diseases show the generic advice instead. Mount it with a
/// `key` derived from the label so a new diagnosis starts a fresh lookup.
#[component]
pub fn DiseaseGuidance(label: String) -> Element {
    let lang = use_language()();
    let services = use_services();
    let name = disease_name(lang, &label);

    let guidance = use_resource({
        let name = name.clone();
        move || {
            let client = services.disease_info.clone();
            let name = name.clone();
            async move {
                let (prevention, treatment) = futures::join!(
                    client.fetch(&name, InfoKind::Prevention),
                    client.fetch(&name, InfoKind::Treatment)
                );
                (settle(&name, prevention), settle(&name, treatment))
            }
        }
    });

    let loaded = guidance.read().clone();
    let (prevention, treatment) = match loaded {
        Some((prevention, treatment)) => (
            prevention.unwrap_or_else(|| t!("diseases-fallback-prevention")),
            treatment.unwrap_or_else(|| t!("diseases-fallback-treatment")),
        ),
        None => {
            return rsx! {
                p { class: "guidance__loading", {t!("diseases-loading")} }
            }
        }
    };

    rsx! {
        div { class: "guidance",
            article { class: "guidance__card guidance__card--prevention",
                h4 { {t!("diseases-prevention-for", disease = name.clone())} }
                p { "{prevention}" }
            }
            article { class: "guidance__card guidance__card--treatment",
                h4 { {t!("diseases-treatment-for", disease = name.clone())} }
                p { "{treatment}" }
            }
        }
    }
}

fn settle(disease: &str, outcome: Result<String, ApiError>) -> Option<String> {
    match outcome {
        Ok(text) => Some(text),
        Err(ApiError::NotFound) => {
            log::info!("No guidance for {disease}; showing general advice");
            None
        }
        Err(err) => {
            log::warn!("Guidance lookup for {disease} failed: {err}");
            None
        }
    }
}
