//! Service endpoints and credentials.
//!
//! Native builds read the environment at run time; wasm builds bake the
//! values in at compile time since there is no process environment in the
//! browser.

use serde::{Deserialize, Serialize};

pub const BACKEND_URL_VAR: &str = "LEAFSCAN_BACKEND_URL";
pub const ASSISTANT_URL_VAR: &str = "LEAFSCAN_ASSISTANT_URL";
pub const ASSISTANT_KEY_VAR: &str = "LEAFSCAN_ASSISTANT_KEY";
pub const ASSISTANT_MODEL_VAR: &str = "LEAFSCAN_ASSISTANT_MODEL";
pub const DISEASE_INFO_URL_VAR: &str = "LEAFSCAN_DISEASE_INFO_URL";

const DEFAULT_BACKEND_URL: &str = "http://localhost:4000";
const DEFAULT_ASSISTANT_URL: &str = "https://api.openai.com/v1";
const DEFAULT_ASSISTANT_MODEL: &str = "gpt-4o";
const DEFAULT_DISEASE_INFO_URL: &str = "http://localhost:4100/disease-info";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base URL of the inference service (`/detect`, `/detect_with_*`).
    pub backend_url: String,
    /// OpenAI-compatible base URL used for explanations and chat.
    pub assistant_url: String,
    #[serde(default, skip_serializing)]
    pub assistant_api_key: Option<String>,
    pub assistant_model: String,
    /// Full URL of the disease guidance endpoint.
    pub disease_info_url: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            assistant_url: DEFAULT_ASSISTANT_URL.to_string(),
            assistant_api_key: None,
            assistant_model: DEFAULT_ASSISTANT_MODEL.to_string(),
            disease_info_url: DEFAULT_DISEASE_INFO_URL.to_string(),
        }
    }
}

impl ServiceConfig {
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    #[cfg(target_arch = "wasm32")]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| {
            let value = match name {
                BACKEND_URL_VAR => option_env!("LEAFSCAN_BACKEND_URL"),
                ASSISTANT_URL_VAR => option_env!("LEAFSCAN_ASSISTANT_URL"),
                ASSISTANT_KEY_VAR => option_env!("LEAFSCAN_ASSISTANT_KEY"),
                ASSISTANT_MODEL_VAR => option_env!("LEAFSCAN_ASSISTANT_MODEL"),
                DISEASE_INFO_URL_VAR => option_env!("LEAFSCAN_DISEASE_INFO_URL"),
                _ => None,
            };
            value.map(str::to_string)
        })
    }

    /// Build a config from an arbitrary variable source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let defaults = Self::default();
        Self {
            backend_url: read(BACKEND_URL_VAR)
                .map(trim_base)
                .unwrap_or(defaults.backend_url),
            assistant_url: read(ASSISTANT_URL_VAR)
                .map(trim_base)
                .unwrap_or(defaults.assistant_url),
            assistant_api_key: read(ASSISTANT_KEY_VAR),
            assistant_model: read(ASSISTANT_MODEL_VAR).unwrap_or(defaults.assistant_model),
            disease_info_url: read(DISEASE_INFO_URL_VAR).unwrap_or(defaults.disease_info_url),
        }
    }

    /// Join a backend path (`detect`, `/detect_with_boxes`) onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.backend_url, path.trim_start_matches('/'))
    }
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
