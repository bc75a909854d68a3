use anyhow::{Context, Result, bail};
use saathi_guidance::HuggingFaceGenerator;
use std::{path::PathBuf, time::Duration};

/// Which remote service produces guidance text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratorBackend {
    HuggingFace {
        model_url: String,
        token: Option<String>,
    },
    OpenRouter {
        api_key: String,
        model: String,
    },
}

/// Runtime settings, read from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub backend: GeneratorBackend,
    pub audio_output_path: PathBuf,
    pub http_timeout: Duration,
    pub port: u16,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from any key lookup; blank values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let backend = match get("GENERATOR_BACKEND")
            .unwrap_or_else(|| "huggingface".to_string())
            .to_lowercase()
            .as_str()
        {
            "huggingface" | "hf" => GeneratorBackend::HuggingFace {
                model_url: get("HF_MODEL_URL")
                    .unwrap_or_else(|| HuggingFaceGenerator::DEFAULT_MODEL_URL.to_string()),
                token: get("HF_TOKEN"),
            },
            "openrouter" => GeneratorBackend::OpenRouter {
                api_key: get("OPENROUTER_API_KEY")
                    .context("OPENROUTER_API_KEY not set")?,
                model: get("OPENROUTER_MODEL").unwrap_or_else(|| "openai/gpt-4o-mini".to_string()),
            },
            other => bail!("Unsupported GENERATOR_BACKEND: {}", other),
        };

        let http_timeout = match get("HTTP_TIMEOUT_SECS") {
            Some(secs) => Duration::from_secs(
                secs.trim()
                    .parse()
                    .with_context(|| format!("Invalid HTTP_TIMEOUT_SECS: {}", secs))?,
            ),
            None => Duration::from_secs(60),
        };

        let port = match get("PORT") {
            Some(port) => port
                .trim()
                .parse()
                .with_context(|| format!("Invalid PORT: {}", port))?,
            None => 7860,
        };

        Ok(Self {
            backend,
            audio_output_path: get("AUDIO_OUTPUT_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("guidance_output.mp3")),
            http_timeout,
            port,
        })
    }
}
