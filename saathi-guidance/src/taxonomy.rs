//! Fixed keyword tables behind claim validation and the chat gate.
//!
//! Both tables are built once at startup and shared behind `Arc`; nothing
//! mutates them afterwards.

use std::collections::HashMap;

use crate::{category::InsuranceCategory, language::Language};

/// Per-category, per-language keyword lists
#[derive(Debug, Clone, Default)]
pub struct KeywordTable {
    entries: HashMap<InsuranceCategory, HashMap<Language, Vec<String>>>,
}

impl KeywordTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The taxonomy used in production
    pub fn standard() -> Self {
        Self::new()
            .with(
                InsuranceCategory::Motor,
                Language::English,
                &["car", "vehicle", "accident", "theft", "damage", "bike", "scooter"],
            )
            .with(
                InsuranceCategory::Motor,
                Language::Hindi,
                &["कार", "वाहन", "दुर्घटना", "चोरी", "क्षति", "बाइक", "स्कूटर"],
            )
            .with(
                InsuranceCategory::Health,
                Language::English,
                &["hospital", "treatment", "medical", "illness", "surgery", "doctor"],
            )
            .with(
                InsuranceCategory::Health,
                Language::Hindi,
                &["अस्पताल", "उपचार", "चिकित्सा", "बीमारी", "सर्जरी", "डॉक्टर"],
            )
            .with(
                InsuranceCategory::Crop,
                Language::English,
                &["crop", "farmer", "drought", "flood", "pest", "harvest", "yield"],
            )
            .with(
                InsuranceCategory::Crop,
                Language::Hindi,
                &["फसल", "किसान", "सूखा", "बाढ़", "कीट", "फसल कटाई", "उपज"],
            )
    }

    /// Replace the keyword list for one category and language
    pub fn with(mut self, category: InsuranceCategory, language: Language, keywords: &[&str]) -> Self {
        self.entries
            .entry(category)
            .or_default()
            .insert(language, normalise(keywords));
        self
    }

    pub fn keywords(&self, category: InsuranceCategory, language: Language) -> &[String] {
        self.entries
            .get(&category)
            .and_then(|by_language| by_language.get(&language))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Broader domain keywords that admit a chat question
#[derive(Debug, Clone, Default)]
pub struct AllowList {
    entries: HashMap<Language, Vec<String>>,
}

impl AllowList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn standard() -> Self {
        Self::new()
            .with(
                Language::English,
                &[
                    "motor", "health", "crop", "vehicle", "car", "bike", "doctor", "hospital",
                    "treatment", "farmer", "flood", "drought",
                ],
            )
            .with(
                Language::Hindi,
                &[
                    "मोटर", "स्वास्थ्य", "फसल", "कार", "बाइक", "डॉक्टर", "अस्पताल", "किसान", "बाढ़",
                    "सूखा",
                ],
            )
    }

    pub fn with(mut self, language: Language, keywords: &[&str]) -> Self {
        self.entries.insert(language, normalise(keywords));
        self
    }

    pub fn keywords(&self, language: Language) -> &[String] {
        self.entries
            .get(&language)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// First keyword contained in `haystack`; callers pass already lower-cased text
pub fn first_match<'a>(haystack: &str, keywords: &'a [String]) -> Option<&'a str> {
    keywords
        .iter()
        .find(|keyword| haystack.contains(keyword.as_str()))
        .map(String::as_str)
}

// Devanagari has no case, so lower-casing only affects Latin keywords.
fn normalise(keywords: &[&str]) -> Vec<String> {
    keywords.iter().map(|k| k.to_lowercase()).collect()
}
