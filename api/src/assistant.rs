//! Text generation for disease explanations and the chat assistant.
//!
//! Callers never see a hard failure from [`explain`]: every error path ends in
//! a deterministic sentence naming the label. [`reply`] does report errors so
//! the chat transcript can show its own failure turn.

use futures::future::LocalBoxFuture;
use serde::{Deserialize, Serialize};

use crate::{ApiError, ServiceConfig};

/// Synthetic label used when the detector found no regions.
pub const NO_DETECTION_LABEL: &str = "no detection";

const EXPLANATION_TOKENS: u32 = 150;
const CHAT_TOKENS: u32 = 500;
const TEMPERATURE: f32 = 0.7;

const NO_DETECTION_EXPLANATION: &str = "No specific disease patterns were detected in this image. \
This could mean the image doesn't contain recognizable disease patterns, the disease is at an early \
stage, or the image quality is affecting analysis. Consider consulting with a plant pathologist for \
proper diagnosis.";

const EXPLAIN_SYSTEM_PROMPT: &str = "You are a plant pathology expert specializing in citrus \
diseases. Provide concise, informative explanations about lemon diseases in 2-3 sentences. Include \
basic information about the disease and general treatment recommendations.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptMessage {
    pub role: PromptRole,
    pub content: String,
}

impl PromptMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: PromptRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: PromptRole::User,
            content: content.into(),
        }
    }
}

/// A chat-completion style text generator.
pub trait TextGenerator {
    fn complete<'a>(
        &'a self,
        messages: Vec<PromptMessage>,
        max_tokens: u32,
    ) -> LocalBoxFuture<'a, Result<String, ApiError>>;
}

/// Deterministic text shown whenever generation fails for `label`.
pub fn fallback_explanation(label: &str) -> String {
    format!(
        "{label}: A disease affecting lemon plants. Please consult with a plant pathologist for proper diagnosis and treatment."
    )
}

pub fn explanation_prompt(label: &str) -> Vec<PromptMessage> {
    vec![
        PromptMessage::system(EXPLAIN_SYSTEM_PROMPT),
        PromptMessage::user(format!(
            "Explain the lemon disease \"{label}\" in 2-3 sentences, including what it is and basic treatment recommendations."
        )),
    ]
}

pub fn chat_prompt(message: &str, label: &str, explanation: &str) -> Vec<PromptMessage> {
    let context = if explanation.trim().is_empty() {
        String::new()
    } else {
        format!(" Current explanation of the diagnosis: {explanation}")
    };
    vec![
        PromptMessage::system(format!(
            "You are a helpful plant pathology assistant specializing in lemon and citrus diseases. \
The user's image was diagnosed as \"{label}\".{context} Answer questions about this diagnosis \
clearly and practically, and recommend consulting a local expert when unsure."
        )),
        PromptMessage::user(message.to_string()),
    ]
}

/// Explanation text for `label`. Never fails.
pub async fn explain<G>(generator: &G, label: &str) -> String
where
    G: TextGenerator + ?Sized,
{
    if label == NO_DETECTION_LABEL {
        return NO_DETECTION_EXPLANATION.to_string();
    }

    match generator
        .complete(explanation_prompt(label), EXPLANATION_TOKENS)
        .await
    {
        Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
        Ok(_) => {
            log::warn!("Empty explanation for {label}; using fallback");
            fallback_explanation(label)
        }
        Err(err) => {
            log::warn!("Explanation for {label} failed: {err}");
            fallback_explanation(label)
        }
    }
}

/// Assistant answer to one chat turn, grounded in the current diagnosis.
pub async fn reply<G>(
    generator: &G,
    message: &str,
    label: &str,
    explanation: &str,
) -> Result<String, ApiError>
where
    G: TextGenerator + ?Sized,
{
    let text = generator
        .complete(chat_prompt(message, label, explanation), CHAT_TOKENS)
        .await?;
    let text = text.trim();
    if text.is_empty() {
        return Err(ApiError::Malformed("assistant returned no content".into()));
    }
    Ok(text.to_string())
}

/// OpenAI-compatible `chat/completions` client.
#[derive(Debug, Clone)]
pub struct OpenAiAssistant {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [PromptMessage],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiAssistant {
    pub fn new(config: &ServiceConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.assistant_url.clone(),
            api_key: config.assistant_api_key.clone(),
            model: config.assistant_model.clone(),
        }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

impl TextGenerator for OpenAiAssistant {
    fn complete<'a>(
        &'a self,
        messages: Vec<PromptMessage>,
        max_tokens: u32,
    ) -> LocalBoxFuture<'a, Result<String, ApiError>> {
        Box::pin(async move {
            let key = self
                .api_key
                .as_deref()
                .ok_or(ApiError::NotConfigured("assistant API key"))?;
            let url = self.completions_url();
            let request = CompletionRequest {
                model: &self.model,
                messages: &messages,
                max_tokens,
                temperature: TEMPERATURE,
            };

            let response = self
                .client
                .post(&url)
                .bearer_auth(key)
                .json(&request)
                .send()
                .await
                .map_err(|err| ApiError::transport("chat/completions", err))?;
            let status = response.status();
            if !status.is_success() {
                return Err(ApiError::status("chat/completions", status.as_u16()));
            }

            let body: CompletionResponse = response
                .json()
                .await
                .map_err(|err| ApiError::Malformed(err.to_string()))?;
            body.choices
                .into_iter()
                .next()
                .and_then(|choice| choice.message.content)
                .ok_or_else(|| ApiError::Malformed("completion has no choices".into()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::cell::RefCell;

    struct Scripted {
        answer: Result<String, ApiError>,
        prompts: RefCell<Vec<Vec<PromptMessage>>>,
    }

    impl Scripted {
        fn new(answer: Result<String, ApiError>) -> Self {
            Self {
                answer,
                prompts: RefCell::new(Vec::new()),
            }
        }
    }

    impl TextGenerator for Scripted {
        fn complete<'a>(
            &'a self,
            messages: Vec<PromptMessage>,
            _max_tokens: u32,
        ) -> LocalBoxFuture<'a, Result<String, ApiError>> {
            self.prompts.borrow_mut().push(messages);
            let answer = self.answer.clone();
            Box::pin(async move { answer })
        }
    }

    #[test]
    fn sentinel_label_skips_generation() {
        let gen = Scripted::new(Ok("unused".into()));
        let text = block_on(explain(&gen, NO_DETECTION_LABEL));
        assert!(text.starts_with("No specific disease patterns"));
        assert!(gen.prompts.borrow().is_empty());
    }

    #[test]
    fn failure_falls_back_to_templated_text() {
        let gen = Scripted::new(Err(ApiError::status("chat/completions", 500)));
        let text = block_on(explain(&gen, "Scab"));
        assert_eq!(text, fallback_explanation("Scab"));
        assert!(text.starts_with("Scab: "));
    }

    #[test]
    fn blank_completion_falls_back_too() {
        let gen = Scripted::new(Ok("   ".into()));
        assert_eq!(block_on(explain(&gen, "Thrips")), fallback_explanation("Thrips"));
    }

    #[test]
    fn explanation_prompt_names_the_label() {
        let gen = Scripted::new(Ok(" Greening is bacterial. ".into()));
        let text = block_on(explain(&gen, "Greening"));
        assert_eq!(text, "Greening is bacterial.");
        let prompts = gen.prompts.borrow();
        assert_eq!(prompts[0][0].role, PromptRole::System);
        assert!(prompts[0][1].content.contains("\"Greening\""));
    }

    #[test]
    fn chat_prompt_carries_label_and_explanation() {
        let gen = Scripted::new(Ok("Prune in dry weather.".into()));
        let answer = block_on(reply(&gen, "How do I treat it?", "Scab", "Scab is fungal.")).unwrap();
        assert_eq!(answer, "Prune in dry weather.");
        let prompts = gen.prompts.borrow();
        assert!(prompts[0][0].content.contains("\"Scab\""));
        assert!(prompts[0][0].content.contains("Scab is fungal."));
        assert_eq!(prompts[0][1], PromptMessage::user("How do I treat it?"));
    }

    #[test]
    fn chat_errors_propagate() {
        let gen = Scripted::new(Err(ApiError::NotConfigured("assistant API key")));
        assert!(block_on(reply(&gen, "hi", "Scab", "")).is_err());
    }

    #[test]
    fn missing_key_fails_without_network() {
        let assistant = OpenAiAssistant::new(&ServiceConfig::default());
        let err = block_on(assistant.complete(explanation_prompt("Scab"), 10)).unwrap_err();
        assert_eq!(err, ApiError::NotConfigured("assistant API key"));
    }

    #[test]
    fn request_serialises_lowercase_roles() {
        let messages = explanation_prompt("Scab");
        let request = CompletionRequest {
            model: "gpt-4o",
            messages: &messages,
            max_tokens: 150,
            temperature: 0.7,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["max_tokens"], 150);
    }
}
