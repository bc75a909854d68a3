use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{error, info, warn};

use crate::error::{GuidanceError, Result};

/// Prefix of the diagnostic returned when the payload had no usable text
pub const UNEXPECTED_PREFIX: &str = "⚠️ Unexpected response:";
/// Prefix of the diagnostic returned when the call itself failed
pub const FAILURE_PREFIX: &str = "⚠️ GenAI error:";

/// Remote text generation backend
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Perform the remote call and extract the generated text
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Like [`TextGenerator::complete`] but never fails: errors are turned into
    /// a visible diagnostic string that flows on like ordinary output.
    async fn generate(&self, prompt: &str) -> String {
        match self.complete(prompt).await {
            Ok(text) => text,
            Err(GuidanceError::UnexpectedResponse(raw)) => {
                warn!(raw = %raw, "Generator returned an unrecognised payload");
                format!("{UNEXPECTED_PREFIX} {raw}")
            }
            Err(e) => {
                error!(error = %e, "Text generation failed");
                format!("{FAILURE_PREFIX} {e}")
            }
        }
    }
}

/// Response shapes seen from text-generation inference endpoints, in the
/// order they are tried
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum InferenceResponse {
    /// `[{"generated_text": "..."}]`
    Sequence(Vec<SequenceItem>),
    /// `{"generated_text": "..."}`
    Direct { generated_text: String },
    /// `{"choices": [{"text": "..."}]}`
    Choices { choices: Vec<Choice> },
    Unrecognized(Value),
}

#[derive(Debug, Deserialize)]
pub struct SequenceItem {
    generated_text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    text: Option<String>,
}

impl InferenceResponse {
    pub fn into_text(self) -> Option<String> {
        match self {
            InferenceResponse::Sequence(items) => {
                items.into_iter().next().and_then(|item| item.generated_text)
            }
            InferenceResponse::Direct { generated_text } => Some(generated_text),
            InferenceResponse::Choices { choices } => {
                choices.into_iter().next().and_then(|choice| choice.text)
            }
            InferenceResponse::Unrecognized(_) => None,
        }
    }
}

/// Extracts the generated text from a decoded response body
pub fn decode_response(raw: Value) -> Result<String> {
    serde_json::from_value::<InferenceResponse>(raw.clone())
        .ok()
        .and_then(InferenceResponse::into_text)
        .ok_or_else(|| GuidanceError::UnexpectedResponse(raw.to_string()))
}

#[derive(Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
}

/// Hugging Face inference API client
pub struct HuggingFaceGenerator {
    client: reqwest::Client,
    api_url: String,
    token: Option<String>,
}

impl HuggingFaceGenerator {
    pub const DEFAULT_MODEL_URL: &'static str =
        "https://api-inference.huggingface.co/models/mistralai/Mixtral-8x7B-Instruct-v0.1";

    pub fn new(api_url: impl Into<String>, token: Option<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_url: api_url.into(),
            token,
        })
    }
}

#[async_trait]
impl TextGenerator for HuggingFaceGenerator {
    async fn complete(&self, prompt: &str) -> Result<String> {
        info!(url = %self.api_url, prompt_length = prompt.len(), "Requesting text generation");

        let mut request = self
            .client
            .post(&self.api_url)
            .json(&InferenceRequest { inputs: prompt });
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(GuidanceError::Transport(format!("{status}: {body}")));
        }

        let raw: Value = serde_json::from_str(&body)
            .map_err(|e| GuidanceError::Transport(format!("malformed payload: {e}")))?;
        decode_response(raw)
    }
}

#[cfg(feature = "openrouter")]
pub use openrouter_backend::OpenRouterGenerator;

#[cfg(feature = "openrouter")]
mod openrouter_backend {
    use async_trait::async_trait;
    use rig::{agent::Agent, completion::Chat, prelude::*, providers::openrouter};
    use tracing::info;

    use super::TextGenerator;
    use crate::error::{GuidanceError, Result};

    /// Generator backed by an OpenRouter chat model via rig
    pub struct OpenRouterGenerator {
        agent: Agent<openrouter::CompletionModel>,
        model: String,
    }

    impl OpenRouterGenerator {
        pub fn new(api_key: &str, model: &str) -> Self {
            let client = openrouter::Client::new(api_key);
            let agent = client.agent(model).build();
            Self {
                agent,
                model: model.to_string(),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for OpenRouterGenerator {
        async fn complete(&self, prompt: &str) -> Result<String> {
            info!(model = %self.model, prompt_length = prompt.len(), "Requesting chat completion");
            let prompt = prompt.to_string();
            self.agent
                .chat(&prompt, vec![])
                .await
                .map_err(|e| GuidanceError::Transport(e.to_string()))
        }
    }
}
