use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::error::GuidanceError;

/// Languages the assistant can answer in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    English,
    Hindi,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::English, Language::Hindi];

    /// Two-letter code used by the speech service
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Hindi => "hi",
        }
    }

    /// Name shown in the language selector and embedded in prompts
    pub fn display_name(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hindi => "Hindi",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Language {
    type Err = GuidanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "english" | "en" => Ok(Language::English),
            "hindi" | "hi" | "हिंदी" | "हिन्दी" => Ok(Language::Hindi),
            _ => Err(GuidanceError::UnknownLanguage(trimmed.to_string())),
        }
    }
}
