//! Backend clients and the shared UI signals, provided through context.

use api::{DiseaseInfoClient, HttpBackend, OpenAiAssistant, ServiceConfig};
use dioxus::prelude::*;

use crate::{core::theme::Theme, i18n::Language};

/// Every remote collaborator the views talk to.
#[derive(Clone)]
pub struct Services {
    pub backend: HttpBackend,
    pub assistant: OpenAiAssistant,
    pub disease_info: DiseaseInfoClient,
}

impl Services {
    pub fn from_config(config: ServiceConfig) -> Self {
        log::info!(
            "Inference service at {}, guidance at {}",
            config.backend_url,
            config.disease_info_url
        );
        if config.assistant_api_key.is_none() {
            log::warn!("No assistant API key configured; explanations fall back to canned text");
        }
        Self {
            assistant: OpenAiAssistant::new(&config),
            disease_info: DiseaseInfoClient::new(config.disease_info_url.clone()),
            backend: HttpBackend::new(config),
        }
    }
}

pub fn use_services() -> Services {
    use_context::<Services>()
}

/// Active UI language; reading it subscribes the caller to language changes.
pub fn use_language() -> Signal<Language> {
    use_context::<Signal<Language>>()
}

pub fn use_theme() -> Signal<Theme> {
    use_context::<Signal<Theme>>()
}
