use std::sync::Arc;

use crate::{
    language::Language,
    taxonomy::{AllowList, first_match},
};

/// Keeps the help chat to in-domain questions
#[derive(Debug, Clone)]
pub struct ChatGate {
    allow_list: Arc<AllowList>,
}

impl ChatGate {
    pub fn new(allow_list: Arc<AllowList>) -> Self {
        Self { allow_list }
    }

    pub fn is_allowed(&self, message: &str, language: Language) -> bool {
        first_match(&message.to_lowercase(), self.allow_list.keywords(language)).is_some()
    }

    /// Canned reply for questions outside the allow-list
    pub fn refusal(language: Language) -> &'static str {
        match language {
            Language::Hindi => "⚠️ केवल मोटर, स्वास्थ्य या फसल बीमा से संबंधित प्रश्न पूछें।",
            Language::English => "⚠️ Please ask only about Motor, Health, or Crop insurance.",
        }
    }
}
