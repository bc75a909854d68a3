use anyhow::Result;
use saathi_guidance::{
    AllowList, GoogleTranslateSpeech, GuidanceAssistant, HuggingFaceGenerator, KeywordTable,
    OpenRouterGenerator, SpeechRenderer, TextGenerator,
};
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::{GeneratorBackend, Settings};

/// Builds the generator selected by configuration
pub fn build_generator(settings: &Settings) -> Result<Arc<dyn TextGenerator>> {
    match &settings.backend {
        GeneratorBackend::HuggingFace { model_url, token } => {
            if token.is_none() {
                warn!("HF_TOKEN not set, inference requests will be sent without authorization");
            }
            info!(model_url = %model_url, "Using Hugging Face inference backend");
            Ok(Arc::new(HuggingFaceGenerator::new(
                model_url.clone(),
                token.clone(),
                settings.http_timeout,
            )?))
        }
        GeneratorBackend::OpenRouter { api_key, model } => {
            info!(model = %model, "Using OpenRouter backend");
            Ok(Arc::new(OpenRouterGenerator::new(api_key, model)))
        }
    }
}

/// Wires the taxonomy, allow-list and remote clients into one assistant
pub fn build_assistant(settings: &Settings) -> Result<GuidanceAssistant> {
    let generator = build_generator(settings)?;
    let speech: Arc<dyn SpeechRenderer> = Arc::new(GoogleTranslateSpeech::new(
        settings.audio_output_path.clone(),
        settings.http_timeout,
    )?);

    Ok(GuidanceAssistant::new(
        Arc::new(KeywordTable::standard()),
        Arc::new(AllowList::standard()),
        generator,
        speech,
    ))
}
