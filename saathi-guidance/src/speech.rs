use async_trait::async_trait;
use std::{
    path::{Path, PathBuf},
    time::Duration,
};
use tracing::{debug, info};

use crate::{
    error::{GuidanceError, Result},
    language::Language,
};

/// Converts final guidance text into an audio file
#[async_trait]
pub trait SpeechRenderer: Send + Sync {
    async fn render(&self, text: &str, language: Language) -> Result<PathBuf>;
}

/// Longest piece of text the translate TTS endpoint accepts per request
pub const MAX_CHUNK_CHARS: usize = 100;

/// Google Translate TTS client, writing MP3 to a single reusable path
pub struct GoogleTranslateSpeech {
    client: reqwest::Client,
    endpoint: String,
    output_path: PathBuf,
}

impl GoogleTranslateSpeech {
    pub const DEFAULT_ENDPOINT: &'static str = "https://translate.google.com/translate_tts";

    pub fn new(output_path: impl Into<PathBuf>, timeout: Duration) -> Result<Self> {
        Self::with_endpoint(Self::DEFAULT_ENDPOINT, output_path, timeout)
    }

    pub fn with_endpoint(
        endpoint: impl Into<String>,
        output_path: impl Into<PathBuf>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            output_path: output_path.into(),
        })
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    async fn fetch_chunk(&self, chunk: &str, language: Language) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("tl", language.code()),
                ("q", chunk),
            ])
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;
        if !status.is_success() {
            return Err(GuidanceError::Speech(format!(
                "tts error {} ({} bytes)",
                status,
                bytes.len()
            )));
        }
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl SpeechRenderer for GoogleTranslateSpeech {
    async fn render(&self, text: &str, language: Language) -> Result<PathBuf> {
        let chunks = split_for_speech(text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(GuidanceError::Speech("no text to speak".to_string()));
        }

        let mut audio = Vec::new();
        for (index, chunk) in chunks.iter().enumerate() {
            debug!(index, total = chunks.len(), "Fetching speech chunk");
            audio.extend(self.fetch_chunk(chunk, language).await?);
        }

        tokio::fs::write(&self.output_path, &audio).await?;
        info!(
            path = %self.output_path.display(),
            bytes = audio.len(),
            language = %language,
            "Speech written"
        );
        Ok(self.output_path.clone())
    }
}

/// Splits text into pieces of at most `max_chars` characters, breaking at
/// whitespace where possible. Words longer than the limit are cut on
/// character boundaries.
pub fn split_for_speech(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > max_chars {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let chars: Vec<char> = word.chars().collect();
            chunks.extend(chars.chunks(max_chars).map(|piece| piece.iter().collect::<String>()));
            continue;
        }

        let needed = if current.is_empty() {
            word_len
        } else {
            current_len + 1 + word_len
        };
        if needed > max_chars {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if !current.is_empty() {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
