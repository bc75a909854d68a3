use thiserror::Error;

/// Errors produced while turning a claim form into guidance
#[derive(Error, Debug)]
pub enum GuidanceError {
    #[error("Unknown language: {0}")]
    UnknownLanguage(String),

    #[error("Unknown insurance type: {0}")]
    UnknownCategory(String),

    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Generation request failed: {0}")]
    Transport(String),

    #[error("{0}")]
    UnexpectedResponse(String),

    #[error("Speech synthesis failed: {0}")]
    Speech(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GuidanceError>;
