//! Backend collaborators for Leafscan.
//!
//! The inference service (detection, classification, Grad-CAM renders) is an
//! opaque HTTP peer; this crate owns the wire contract, the text-generation
//! client used for explanations and chat, and the static disease guidance
//! table (served over HTTP when the `server` feature is enabled).

pub mod assistant;
pub mod backend;
pub mod config;
pub mod disease_info;
mod error;
pub mod model;

#[cfg(feature = "server")]
pub mod server;

pub use assistant::{OpenAiAssistant, PromptMessage, TextGenerator};
pub use backend::{DiagnosisBackend, HttpBackend, VisualImage};
pub use config::ServiceConfig;
pub use disease_info::{DiseaseInfoClient, InfoKind};
pub use error::ApiError;
pub use model::{
    AnalysisResult, BoundingBox, Classification, DetectedRegion, ImagePayload, VisualKind,
};
