//! HTTP client for the inference service.

use futures::future::LocalBoxFuture;
use reqwest::multipart::{Form, Part};

use crate::model::{AnalysisResult, ImagePayload, VisualKind};
use crate::{ApiError, ServiceConfig};

const DETECT_ENDPOINT: &str = "detect";
const IMAGE_FIELD: &str = "file";
const DEFAULT_VISUAL_MIME: &str = "image/png";

/// Rendered visualization returned by one of the `detect_with_*` endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualImage {
    pub bytes: Vec<u8>,
    pub mime: String,
}

/// The inference service as seen by the analysis orchestrator.
///
/// Futures are `!Send` so the same trait serves the browser (fetch-backed)
/// and native builds.
pub trait DiagnosisBackend {
    fn detect<'a>(
        &'a self,
        image: &'a ImagePayload,
    ) -> LocalBoxFuture<'a, Result<AnalysisResult, ApiError>>;

    fn visualize<'a>(
        &'a self,
        kind: VisualKind,
        image: &'a ImagePayload,
    ) -> LocalBoxFuture<'a, Result<VisualImage, ApiError>>;
}

#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    config: ServiceConfig,
}

impl HttpBackend {
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    async fn post_image(
        &self,
        endpoint: &str,
        image: &ImagePayload,
    ) -> Result<reqwest::Response, ApiError> {
        let url = self.config.endpoint(endpoint);
        let part = Part::bytes(image.bytes.to_vec())
            .file_name(image.file_name.clone())
            .mime_str(&image.mime)
            .map_err(|err| ApiError::transport(endpoint, err))?;
        let form = Form::new().part(IMAGE_FIELD, part);

        log::debug!("POST {url} ({} bytes)", image.len());
        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|err| ApiError::transport(endpoint, err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::status(endpoint, status.as_u16()));
        }
        Ok(response)
    }
}

impl DiagnosisBackend for HttpBackend {
    fn detect<'a>(
        &'a self,
        image: &'a ImagePayload,
    ) -> LocalBoxFuture<'a, Result<AnalysisResult, ApiError>> {
        Box::pin(async move {
            let response = self.post_image(DETECT_ENDPOINT, image).await?;
            let body = response
                .text()
                .await
                .map_err(|err| ApiError::transport(DETECT_ENDPOINT, err))?;
            AnalysisResult::from_json(&body)
        })
    }

    fn visualize<'a>(
        &'a self,
        kind: VisualKind,
        image: &'a ImagePayload,
    ) -> LocalBoxFuture<'a, Result<VisualImage, ApiError>> {
        Box::pin(async move {
            let endpoint = kind.endpoint();
            let response = self.post_image(endpoint, image).await?;
            let mime = response
                .headers()
                .get(reqwest::header::CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .filter(|value| value.starts_with("image/"))
                .unwrap_or(DEFAULT_VISUAL_MIME)
                .to_string();
            let bytes = response
                .bytes()
                .await
                .map_err(|err| ApiError::transport(endpoint, err))?;
            if bytes.is_empty() {
                return Err(ApiError::Malformed(format!("{endpoint} returned no image")));
            }
            Ok(VisualImage {
                bytes: bytes.to_vec(),
                mime,
            })
        })
    }
}
