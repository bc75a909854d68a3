use saathi_guidance::{ChatTurn, OutcomeStatus};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct GuidanceResponse {
    pub guidance: String,
    pub status: OutcomeStatus,
    /// Where the voiced guidance can be fetched, when rendering succeeded
    pub audio_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    pub language: Option<String>,
    /// Conversation shown so far; the new turn is appended to it
    #[serde(default)]
    pub history: Vec<ChatTurn>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub history: Vec<ChatTurn>,
}
